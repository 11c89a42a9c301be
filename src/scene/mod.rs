pub mod camera;
pub mod mode;
pub mod object;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use crate::core::geometry::projection::Lens;
use crate::core::geometry::GeometryError;
use crate::engine::core::EngineConfig;
use crate::engine::resources::{ModelHandle, ResourceManager};
use crate::input::{InputCommand, MoveDirection, TurnDirection};
use camera::Camera;
use mode::{Antipode, GeometryMode};
use object::Object;

/// Step sizes for keyboard flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraControls {
    pub step: f32,
    pub turn_factor: f32,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self {
            step: 2.0,
            turn_factor: 0.5,
        }
    }
}

/// One indexed draw the renderer must issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub object: usize,
    pub model: ModelHandle,
    pub mode: GeometryMode,
    pub antipode: Antipode,
}

/// Everything a frame depends on: active geometry, camera and placed objects.
#[derive(Debug, Clone)]
pub struct Scene {
    mode: GeometryMode,
    camera: Camera,
    controls: CameraControls,
    objects: Vec<Object>,
}

impl Scene {
    pub fn new(
        mode: GeometryMode,
        camera: Camera,
        controls: CameraControls,
        objects: Vec<Object>,
    ) -> Result<Self, GeometryError> {
        let mut camera = camera;
        camera.update(mode)?;
        Ok(Self {
            mode,
            camera,
            controls,
            objects,
        })
    }

    pub fn from_config(config: &EngineConfig, resources: &ResourceManager) -> Result<Self> {
        let geometry = &config.geometry;
        let camera_config = &config.camera;
        let lens = Lens {
            fovy: camera_config.fovy_degrees.to_radians(),
            aspect: config.aspect_ratio(),
            near: camera_config.near,
            far: camera_config.far,
        };
        let camera = Camera::new(
            Vec3::from_array(camera_config.position),
            Vec3::from_array(camera_config.center),
            lens,
            geometry.curvature_scale,
            geometry.initial_mode,
        )
        .context("invalid camera configuration")?;

        let mut objects = Vec::with_capacity(config.objects.len());
        for placement in &config.objects {
            let model = resources
                .model_handle(&placement.model)
                .with_context(|| format!("object `{}` uses unknown model `{}`", placement.name, placement.model))?;
            let object = Object::new(
                placement.name.clone(),
                model,
                Vec3::from_array(placement.translation),
                placement.rotation_matrix(),
                Mat4::from_scale(Vec3::splat(placement.scale)),
                geometry.curvature_scale,
            )
            .with_context(|| format!("cannot place object `{}`", placement.name))?;
            tracing::debug!(object = %placement.name, model = %placement.model, "object placed");
            objects.push(object);
        }

        let controls = CameraControls {
            step: camera_config.step,
            turn_factor: camera_config.turn_factor,
        };
        Ok(Self::new(geometry.initial_mode, camera, controls, objects)?)
    }

    pub fn mode(&self) -> GeometryMode {
        self.mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Applies a camera or mode command. `Quit` is left to the caller.
    pub fn apply(&mut self, command: InputCommand) -> Result<(), GeometryError> {
        let step = self.controls.step;
        let turn = self.controls.turn_factor * step;
        match command {
            InputCommand::Move(direction) => {
                let amount = match direction {
                    MoveDirection::Forward => step * self.camera.forward(),
                    MoveDirection::Back => -step * self.camera.forward(),
                    MoveDirection::Left => -step * self.camera.right(),
                    MoveDirection::Right => step * self.camera.right(),
                };
                self.camera.move_by(amount, self.mode)
            }
            InputCommand::Turn(direction) => {
                let amount = match direction {
                    TurnDirection::Left => -turn * self.camera.right(),
                    TurnDirection::Right => turn * self.camera.right(),
                };
                self.camera.turn_by(amount, self.mode)
            }
            InputCommand::ToggleMode => self.toggle_mode(),
            InputCommand::Quit => Ok(()),
        }
    }

    /// Switches geometry; the mode only changes if the camera accepts it.
    pub fn toggle_mode(&mut self) -> Result<(), GeometryError> {
        let next = self.mode.toggled();
        self.camera.update(next)?;
        self.mode = next;
        tracing::info!(target: "engine", mode = ?self.mode, "geometry mode toggled");
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GeometryError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.camera.set_aspect(width as f32 / height as f32, self.mode)
    }

    /// Draws for the current frame, in object order.
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        let passes = self.mode.passes();
        let mut calls = Vec::with_capacity(self.objects.len() * passes.len());
        for (index, object) in self.objects.iter().enumerate() {
            for &antipode in passes {
                calls.push(DrawCall {
                    object: index,
                    model: object.model(),
                    mode: self.mode,
                    antipode,
                });
            }
        }
        calls
    }
}

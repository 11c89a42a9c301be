use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::geometry::projection::Lens;
use crate::core::geometry::Curvature;
use crate::scene::camera::check_look_direction;
use crate::scene::mode::GeometryMode;

pub const DEFAULT_CONFIG_PATH: &str = "assets/scene.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub app_name: String,
    pub window_width: u32,
    pub window_height: u32,
    pub clear_color: [f64; 4],
    pub asset_root: PathBuf,
    pub camera: CameraConfig,
    pub geometry: GeometryConfig,
    pub models: Vec<ModelConfig>,
    pub objects: Vec<ObjectConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub center: [f32; 3],
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub step: f32,
    pub turn_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub curvature: Curvature,
    /// World units to radians of arc on the unit sphere.
    pub curvature_scale: f32,
    pub initial_mode: GeometryMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub mesh: PathBuf,
    pub texture: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub model: String,
    pub translation: [f32; 3],
    #[serde(default)]
    pub rotation: Option<RotationConfig>,
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RotationConfig {
    pub axis: [f32; 3],
    pub degrees: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Lorentz View".to_string(),
            window_width: 800,
            window_height: 600,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            asset_root: PathBuf::from("assets/models"),
            camera: CameraConfig::default(),
            geometry: GeometryConfig::default(),
            models: default_models(),
            objects: default_objects(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 10.0, 10.0],
            center: [0.0, 10.0, 0.0],
            fovy_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            step: 2.0,
            turn_factor: 0.5,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            curvature: Curvature::Spherical,
            curvature_scale: 0.003,
            initial_mode: GeometryMode::Euclidean,
        }
    }
}

fn default_models() -> Vec<ModelConfig> {
    let model = |name: &str, mesh: &str, texture: &str| ModelConfig {
        name: name.to_string(),
        mesh: PathBuf::from(mesh),
        texture: PathBuf::from(texture),
    };
    vec![
        model("tree", "Lowpoly_Tree.obj", "wall.jpg"),
        model("house", "Hogar.obj", "wall.jpg"),
        model(
            "grass",
            "10438_Circular_Grass_Patch_v1_iterations-2.obj",
            "10438_Circular_Grass_Patch_v1_Diffuse.jpg",
        ),
        model("fox", "Lowpoly_Fox.obj", "wall.jpg"),
    ]
}

fn default_objects() -> Vec<ObjectConfig> {
    let object = |name: &str, model: &str, translation: [f32; 3], scale: f32| ObjectConfig {
        name: name.to_string(),
        model: model.to_string(),
        translation,
        rotation: None,
        scale,
    };
    vec![
        object("tree-1", "tree", [-100.0, 0.0, 0.0], 0.9),
        object("tree-2", "tree", [50.0, 0.0, 0.0], 0.9),
        object("house", "house", [0.0, 0.0, -50.0], 0.9),
        ObjectConfig {
            rotation: Some(RotationConfig {
                axis: [1.0, 0.0, 0.0],
                degrees: -90.0,
            }),
            ..object("grass", "grass", [0.0, -10.0, 0.0], 1.0)
        },
        object("fox", "fox", [0.0, 0.0, 50.0], 0.2),
    ]
}

impl EngineConfig {
    /// Reads a RON config, or falls back to the built-in scene when `path` is absent.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using built-in scene");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_ron(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).context("failed to parse RON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            bail!("window size must be non-zero");
        }
        self.geometry.curvature.ensure_supported()?;
        if !(self.geometry.curvature_scale > 0.0) {
            bail!("curvature_scale must be positive");
        }
        Lens {
            fovy: self.camera.fovy_degrees.to_radians(),
            aspect: self.aspect_ratio(),
            near: self.camera.near,
            far: self.camera.far,
        }
        .validate()?;
        check_look_direction(
            Vec3::from_array(self.camera.position),
            Vec3::from_array(self.camera.center),
        )?;
        for object in &self.objects {
            if !self.models.iter().any(|model| model.name == object.model) {
                bail!("object `{}` references undeclared model `{}`", object.name, object.model);
            }
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    pub fn asset_path(&self, relative: &Path) -> PathBuf {
        self.asset_root.join(relative)
    }
}

impl ObjectConfig {
    pub fn rotation_matrix(&self) -> Mat4 {
        match self.rotation {
            Some(rotation) => Mat4::from_axis_angle(
                Vec3::from_array(rotation.axis).normalize(),
                rotation.degrees.to_radians(),
            ),
            None => Mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.models.len(), 4);
        assert_eq!(config.objects.len(), 5);
        assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn partial_ron_fills_defaults() {
        let config = EngineConfig::from_ron(
            "(window_width: 1024, geometry: (curvature_scale: 0.01, initial_mode: NonEuclidean))",
        )
        .expect("config parses");
        assert_eq!(config.window_width, 1024);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.geometry.initial_mode, GeometryMode::NonEuclidean);
        assert_eq!(config.objects.len(), 5);
    }

    #[test]
    fn hyperbolic_curvature_is_rejected() {
        let err = EngineConfig::from_ron("(geometry: (curvature: Hyperbolic))").unwrap_err();
        assert!(format!("{err:#}").contains("not supported"));
    }

    #[test]
    fn unknown_model_reference_is_rejected() {
        let mut config = EngineConfig::default();
        config.objects[0].model = "rock".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn camera_looking_straight_down_is_rejected() {
        let err = EngineConfig::from_ron(
            "(camera: (position: (0.0, 10.0, 0.0), center: (0.0, 0.0, 0.0)))",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("degenerate look direction"));
    }

    #[test]
    fn camera_looking_at_itself_is_rejected() {
        let mut config = EngineConfig::default();
        config.camera.center = config.camera.position;
        assert!(config.validate().is_err());
    }

    #[test]
    fn grass_rotation_tips_the_patch_flat() {
        let config = EngineConfig::default();
        let grass = config
            .objects
            .iter()
            .find(|object| object.name == "grass")
            .expect("grass object");
        let up = grass.rotation_matrix().transform_vector3(Vec3::Z);
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6));
    }
}

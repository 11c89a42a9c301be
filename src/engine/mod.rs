pub mod core;
pub mod renderer;
pub mod resources;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use wgpu::SurfaceError;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{EventLoop, EventLoopWindowTarget},
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

use self::core::EngineConfig;
use self::renderer::Renderer;
use self::resources::ResourceManager;
use crate::input::{command_for_key, InputCommand};
use crate::scene::Scene;

pub struct EngineApp {
    config: EngineConfig,
    resources: ResourceManager,
    scene: Scene,
}

impl EngineApp {
    /// Loads assets and places the scene. Mesh load failures abort here.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let resources = ResourceManager::load(&config)?;
        let scene = Scene::from_config(&config, &resources)?;
        Ok(Self {
            config,
            resources,
            scene,
        })
    }

    pub fn run(self) -> Result<()> {
        tracing::info!(
            target: "engine",
            app = %self.config.app_name,
            objects = self.scene.objects().len(),
            mode = ?self.scene.mode(),
            "Engine starting"
        );

        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let mut engine = self;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(engine.config.app_name.clone())
                .with_inner_size(LogicalSize::new(
                    engine.config.window_width as f64,
                    engine.config.window_height as f64,
                ))
                .build(&event_loop)
                .context("failed to create window")?,
        );
        let mut renderer: Option<Renderer> = None;
        let mut last_frame = Instant::now();

        event_loop
            .run(move |event, target| match event {
                Event::Resumed => {
                    if renderer.is_none() {
                        let clear_color = engine.config.clear_color;
                        match pollster::block_on(Renderer::new(window.clone(), clear_color)) {
                            Ok(mut new_renderer) => {
                                new_renderer.upload(&engine.resources, &engine.scene);
                                engine.resize(new_renderer.size().width, new_renderer.size().height);
                                tracing::info!("renderer initialized");
                                renderer = Some(new_renderer);
                            }
                            Err(err) => {
                                tracing::error!(error = %format!("{err:#}"), "failed to initialize renderer");
                                target.exit();
                            }
                        }
                    }
                }
                Event::AboutToWait => {
                    if renderer.is_some() {
                        window.request_redraw();
                    }
                }
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested => {
                            tracing::info!("window close requested");
                            target.exit();
                        }
                        WindowEvent::Resized(size) => {
                            if let Some(renderer) = renderer.as_mut() {
                                renderer.resize(size);
                            }
                            engine.resize(size.width, size.height);
                        }
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key),
                                    state: ElementState::Pressed,
                                    repeat: false,
                                    ..
                                },
                            ..
                        } => {
                            if let Some(command) = command_for_key(key) {
                                engine.handle_command(command, target);
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            if let Some(renderer) = renderer.as_mut() {
                                let now = Instant::now();
                                let delta = now.duration_since(last_frame);
                                last_frame = now;
                                tracing::trace!(
                                    target: "engine",
                                    frame_delta_ms = %delta.as_millis(),
                                    "frame tick"
                                );

                                match renderer.render(&engine.scene) {
                                    Ok(()) => {}
                                    Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                                        renderer.resize(window.inner_size());
                                    }
                                    Err(SurfaceError::OutOfMemory) => {
                                        tracing::error!("GPU out of memory, shutting down engine");
                                        target.exit();
                                    }
                                    Err(SurfaceError::Timeout) => {
                                        tracing::warn!("surface timeout, retrying next frame");
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            })
            .map_err(|err| anyhow!(err))?;

        tracing::info!(target: "engine", "Engine shutdown complete");
        Ok(())
    }

    fn handle_command(&mut self, command: InputCommand, target: &EventLoopWindowTarget<()>) {
        if command == InputCommand::Quit {
            tracing::info!("quit requested");
            target.exit();
            return;
        }
        match self.scene.apply(command) {
            Ok(()) => {
                let camera = self.scene.camera();
                tracing::debug!(
                    ?command,
                    position = ?camera.position(),
                    center = ?camera.center(),
                    "camera updated"
                );
            }
            Err(err) => tracing::warn!(?command, %err, "command rejected, camera unchanged"),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.scene.resize(width, height) {
            tracing::warn!(width, height, %err, "keeping previous aspect ratio");
        }
    }
}

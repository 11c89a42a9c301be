use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use wgpu::SurfaceError;
use winit::{dpi::PhysicalSize, window::Window};

use crate::engine::resources::{MeshVertex, ResourceManager, TextureData, TextureHandle};
use crate::scene::camera::Camera;
use crate::scene::mode::{Antipode, GeometryMode};
use crate::scene::object::{Object, ObjectMatrices};
use crate::scene::Scene;

const EUCLIDEAN_SHADER: &str = include_str!("shaders/euclidean.wgsl");
const SPHERICAL_SHADER: &str = include_str!("shaders/spherical.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Remaps OpenGL clip depth [-1, 1] to the [0, 1] range wgpu expects.
#[rustfmt::skip]
const OPENGL_TO_WGPU: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraUniform {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    params: [f32; 4],
}

impl CameraUniform {
    fn new(camera: &Camera) -> Self {
        Self {
            view: camera.view().to_cols_array_2d(),
            projection: (OPENGL_TO_WGPU * camera.projection()).to_cols_array_2d(),
            params: [camera.curvature_scale(), 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    translation: [[f32; 4]; 4],
    rotation: [[f32; 4]; 4],
    scale: [[f32; 4]; 4],
    anti: f32,
    _padding: [f32; 3],
}

impl From<ObjectMatrices> for ObjectUniform {
    fn from(matrices: ObjectMatrices) -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        match matrices {
            ObjectMatrices::Euclidean { model } => Self {
                model: model.to_cols_array_2d(),
                translation: identity,
                rotation: identity,
                scale: identity,
                anti: 1.0,
                _padding: [0.0; 3],
            },
            ObjectMatrices::Curved {
                translation,
                rotation,
                scale,
                anti,
            } => Self {
                model: identity,
                translation: translation.to_cols_array_2d(),
                rotation: rotation.to_cols_array_2d(),
                scale: scale.to_cols_array_2d(),
                anti,
                _padding: [0.0; 3],
            },
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    texture: TextureHandle,
}

/// Uniform bind groups for one object: flat, curved near, curved far.
struct GpuObject {
    euclidean: wgpu::BindGroup,
    near: wgpu::BindGroup,
    far: wgpu::BindGroup,
}

impl GpuObject {
    fn bind_group(&self, mode: GeometryMode, antipode: Antipode) -> &wgpu::BindGroup {
        match (mode, antipode) {
            (GeometryMode::Euclidean, _) => &self.euclidean,
            (GeometryMode::NonEuclidean, Antipode::Near) => &self.near,
            (GeometryMode::NonEuclidean, Antipode::Far) => &self.far,
        }
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    clear_color: wgpu::Color,
    depth_view: wgpu::TextureView,
    euclidean_pipeline: wgpu::RenderPipeline,
    spherical_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    meshes: Vec<GpuMesh>,
    textures: Vec<wgpu::BindGroup>,
    objects: Vec<GpuObject>,
    frame_count: u64,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, clear_color: [f64; 4]) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|err| anyhow!("failed to create surface: {err}"))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No suitable GPU adapters found"))?;
        tracing::info!(adapter = ?adapter.get_info().name, "adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("lorentz-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to open GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let present_mode = surface_caps
            .present_modes
            .iter()
            .copied()
            .find(|mode| *mode == wgpu::PresentMode::Mailbox)
            .unwrap_or(wgpu::PresentMode::Fifo);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let camera_layout = uniform_layout(&device, "lorentz-camera-layout");
        let object_layout = uniform_layout(&device, "lorentz-object-layout");
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lorentz-texture-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lorentz-pipeline-layout"),
            bind_group_layouts: &[&camera_layout, &object_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let euclidean_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            "lorentz-euclidean",
            EUCLIDEAN_SHADER,
            config.format,
        );
        let spherical_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            "lorentz-spherical",
            SPHERICAL_SHADER,
            config.format,
        );
        if let Some(err) = device.pop_error_scope().await {
            return Err(anyhow!("shader pipeline creation failed: {err}"));
        }

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lorentz-camera-buffer"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lorentz-camera-bind-group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lorentz-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let [r, g, b, a] = clear_color;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            clear_color: wgpu::Color { r, g, b, a },
            depth_view,
            euclidean_pipeline,
            spherical_pipeline,
            camera_buffer,
            camera_bind_group,
            object_layout,
            texture_layout,
            sampler,
            meshes: Vec::new(),
            textures: Vec::new(),
            objects: Vec::new(),
            frame_count: 0,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Creates GPU copies of every mesh, texture and object uniform set.
    /// Object matrices never change afterwards, so their buffers are written once.
    pub fn upload(&mut self, resources: &ResourceManager, scene: &Scene) {
        self.textures = resources
            .textures()
            .iter()
            .map(|texture| self.upload_texture(texture))
            .collect();

        self.meshes = resources
            .models()
            .iter()
            .map(|model| GpuMesh {
                vertex_buffer: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("lorentz-vertex-buffer"),
                        contents: bytemuck::cast_slice(&model.mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                index_buffer: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("lorentz-index-buffer"),
                        contents: bytemuck::cast_slice(&model.mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                index_count: model.mesh.index_count(),
                texture: model.texture,
            })
            .collect();

        self.objects = scene
            .objects()
            .iter()
            .map(|object| GpuObject {
                euclidean: self.object_bind_group(object, GeometryMode::Euclidean, Antipode::Near),
                near: self.object_bind_group(object, GeometryMode::NonEuclidean, Antipode::Near),
                far: self.object_bind_group(object, GeometryMode::NonEuclidean, Antipode::Far),
            })
            .collect();

        tracing::debug!(
            meshes = self.meshes.len(),
            textures = self.textures.len(),
            objects = self.objects.len(),
            "scene uploaded"
        );
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(scene.camera())]),
        );

        let pipeline = match scene.mode() {
            GeometryMode::Euclidean => &self.euclidean_pipeline,
            GeometryMode::NonEuclidean => &self.spherical_pipeline,
        };
        let draws = scene.draw_calls();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lorentz-render-encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lorentz-render-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for draw in &draws {
                let (Some(object), Some(mesh)) =
                    (self.objects.get(draw.object), self.meshes.get(draw.model.index()))
                else {
                    continue;
                };
                let Some(texture) = self
                    .textures
                    .get(mesh.texture.index())
                    .or_else(|| self.textures.get(TextureHandle::PLACEHOLDER.index()))
                else {
                    continue;
                };
                render_pass.set_bind_group(1, object.bind_group(draw.mode, draw.antipode), &[]);
                render_pass.set_bind_group(2, texture, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, draws = draws.len(), mode = ?scene.mode(), "frame presented");
        Ok(())
    }

    fn object_bind_group(
        &self,
        object: &Object,
        mode: GeometryMode,
        antipode: Antipode,
    ) -> wgpu::BindGroup {
        let uniform = ObjectUniform::from(object.matrices(mode, antipode));
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("lorentz-object-buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lorentz-object-bind-group"),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn upload_texture(&self, data: &TextureData) -> wgpu::BindGroup {
        let levels = data.mip_chain();
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lorentz-diffuse-texture"),
            size: wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        for (mip_level, level) in levels.iter().enumerate() {
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.rgba,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level.width),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lorentz-texture-bind-group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("lorentz-depth-texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    label: &str,
    source: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[mesh_vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as u64,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    }
}

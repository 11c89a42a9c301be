use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bytemuck::{Pod, Zeroable};

use crate::engine::core::EngineConfig;

/// Index of a model in the [`ResourceManager`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(usize);

impl ModelHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a decoded texture. Slot 0 is always the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub const PLACEHOLDER: TextureHandle = TextureHandle(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn from_obj_file(path: &Path) -> Result<Self> {
        let (models, _materials) = tobj::load_obj(path, &obj_load_options())
            .with_context(|| format!("failed to parse mesh {}", path.display()))?;
        Self::from_models(&models)
    }

    pub fn from_obj_reader(reader: &mut impl BufRead) -> Result<Self> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &obj_load_options(), |_| Err(tobj::LoadError::OpenFileFailed))
                .context("failed to parse mesh")?;
        Self::from_models(&models)
    }

    // Shapes are merged into one indexed mesh.
    fn from_models(models: &[tobj::Model]) -> Result<Self> {
        let mut mesh = MeshData::default();
        for model in models {
            let source = &model.mesh;
            let base = mesh.vertices.len() as u32;
            let vertex_count = source.positions.len() / 3;
            let has_uv = source.texcoords.len() >= vertex_count * 2;
            for i in 0..vertex_count {
                let tex_coords = if has_uv {
                    [source.texcoords[2 * i], source.texcoords[2 * i + 1]]
                } else {
                    [0.0, 0.0]
                };
                mesh.vertices.push(MeshVertex {
                    position: [
                        source.positions[3 * i],
                        source.positions[3 * i + 1],
                        source.positions[3 * i + 2],
                    ],
                    tex_coords,
                });
            }
            mesh.indices.extend(source.indices.iter().map(|index| base + index));
        }
        if mesh.indices.is_empty() {
            bail!("mesh contains no faces");
        }
        Ok(mesh)
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// RGBA8 pixels ready for upload.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255, 255, 255, 255],
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to decode texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// Base level followed by each halved level down to 1x1.
    pub fn mip_chain(&self) -> Vec<TextureData> {
        let mut levels = vec![self.clone()];
        let Some(mut current) = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
        else {
            tracing::warn!(width = self.width, height = self.height, "texture size does not match pixel data, skipping mipmaps");
            return levels;
        };
        while current.width() > 1 || current.height() > 1 {
            let width = (current.width() / 2).max(1);
            let height = (current.height() / 2).max(1);
            current = image::imageops::resize(&current, width, height, image::imageops::FilterType::Triangle);
            levels.push(TextureData {
                width,
                height,
                rgba: current.as_raw().clone(),
            });
        }
        levels
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub mesh: MeshData,
    pub texture: TextureHandle,
}

/// Owns CPU-side meshes and textures; everything else refers to them by handle.
#[derive(Debug)]
pub struct ResourceManager {
    models: Vec<Model>,
    textures: Vec<TextureData>,
    texture_paths: HashMap<PathBuf, TextureHandle>,
    model_names: HashMap<String, ModelHandle>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            textures: vec![TextureData::placeholder()],
            texture_paths: HashMap::new(),
            model_names: HashMap::new(),
        }
    }
}

impl ResourceManager {
    /// Loads every configured model. A mesh that fails to load is fatal.
    pub fn load(config: &EngineConfig) -> Result<Self> {
        let mut resources = Self::default();
        for model in &config.models {
            let mesh_path = config.asset_path(&model.mesh);
            let mesh = MeshData::from_obj_file(&mesh_path)
                .with_context(|| format!("cannot load model `{}`", model.name))?;
            let texture = resources.load_texture(&config.asset_path(&model.texture));
            resources.register_model(model.name.clone(), mesh, texture);
        }
        tracing::info!(
            models = resources.model_count(),
            textures = resources.texture_count(),
            "assets loaded"
        );
        Ok(resources)
    }

    /// Decodes a texture once per path; failures degrade to the placeholder.
    pub fn load_texture(&mut self, path: &Path) -> TextureHandle {
        if let Some(handle) = self.texture_paths.get(path) {
            return *handle;
        }
        let handle = match TextureData::from_file(path) {
            Ok(texture) => {
                tracing::debug!(path = %path.display(), width = texture.width, height = texture.height, "texture decoded");
                self.register_texture(texture)
            }
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "using placeholder texture");
                TextureHandle::PLACEHOLDER
            }
        };
        self.texture_paths.insert(path.to_path_buf(), handle);
        handle
    }

    pub fn register_texture(&mut self, texture: TextureData) -> TextureHandle {
        self.textures.push(texture);
        TextureHandle(self.textures.len() - 1)
    }

    pub fn register_model(
        &mut self,
        name: impl Into<String>,
        mesh: MeshData,
        texture: TextureHandle,
    ) -> ModelHandle {
        let name = name.into();
        tracing::debug!(%name, vertices = mesh.vertices.len(), indices = mesh.indices.len(), "registering model");
        let handle = ModelHandle(self.models.len());
        self.model_names.insert(name.clone(), handle);
        self.models.push(Model {
            name,
            mesh,
            texture,
        });
        handle
    }

    pub fn model_handle(&self, name: &str) -> Option<ModelHandle> {
        self.model_names.get(name).copied()
    }

    pub fn model(&self, handle: ModelHandle) -> &Model {
        &self.models[handle.0]
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn textures(&self) -> &[TextureData] {
        &self.textures
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

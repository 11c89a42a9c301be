use glam::{Mat4, Vec3, Vec4};

use crate::core::geometry::{Euclidean3, GeometryError, Manifold, Spherical3};
use crate::engine::resources::ModelHandle;
use crate::scene::mode::{Antipode, GeometryMode};

/// Uniform set bound before one draw of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectMatrices {
    Euclidean {
        model: Mat4,
    },
    Curved {
        translation: Mat4,
        rotation: Mat4,
        scale: Mat4,
        anti: f32,
    },
}

/// A placed instance of a shared model. Immutable once built.
#[derive(Debug, Clone)]
pub struct Object {
    name: String,
    model: ModelHandle,
    translation: Vec4,
    rotation: Mat4,
    scale: Mat4,
    model_matrix: Mat4,
    curved_translation: Mat4,
}

impl Object {
    pub fn new(
        name: impl Into<String>,
        model: ModelHandle,
        translation: Vec3,
        rotation: Mat4,
        scale: Mat4,
        curvature_scale: f32,
    ) -> Result<Self, GeometryError> {
        let model_matrix =
            Euclidean3::translation(Euclidean3::embed(translation))? * rotation * scale;
        let curved_translation =
            Spherical3::translation(Spherical3::embed(translation * curvature_scale))?;

        Ok(Self {
            name: name.into(),
            model,
            translation: translation.extend(1.0),
            rotation,
            scale,
            model_matrix,
            curved_translation,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> ModelHandle {
        self.model
    }

    pub fn translation(&self) -> Vec4 {
        self.translation
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn curved_translation(&self) -> Mat4 {
        self.curved_translation
    }

    pub fn matrices(&self, mode: GeometryMode, antipode: Antipode) -> ObjectMatrices {
        match mode {
            GeometryMode::Euclidean => ObjectMatrices::Euclidean {
                model: self.model_matrix,
            },
            GeometryMode::NonEuclidean => ObjectMatrices::Curved {
                translation: self.curved_translation,
                rotation: self.rotation,
                scale: self.scale,
                anti: antipode.sign(),
            },
        }
    }
}

use glam::{Mat4, Vec3, Vec4};

use super::GeometryError;

/// A constant-curvature 3-space embedded in 4-space.
/// Points live as homogeneous `Vec4`s and translations are 4x4 isometries
/// of the embedding, so both flat and curved scenes share one matrix pipeline.
pub trait Manifold {
    /// The point every translation is measured from.
    const ORIGIN: Vec4 = Vec4::W;

    /// Maps a (curvature-scaled) Euclidean point onto the manifold.
    fn embed(p: Vec3) -> Vec4;

    /// Builds the isometry taking `ORIGIN` to `to`.
    fn translation(to: Vec4) -> Result<Mat4, GeometryError>;

    /// Bilinear form preserved by every isometry of the manifold.
    fn form(a: Vec4, b: Vec4) -> f32;
}

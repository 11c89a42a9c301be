use super::manifold::Manifold;
use super::GeometryError;
use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean3;

impl Manifold for Euclidean3 {
    fn embed(p: Vec3) -> Vec4 {
        p.extend(1.0)
    }

    fn translation(to: Vec4) -> Result<Mat4, GeometryError> {
        Ok(Mat4::from_translation(to.truncate()))
    }

    // Translations fix direction vectors (w = 0), which is all this form sees.
    fn form(a: Vec4, b: Vec4) -> f32 {
        a.truncate().dot(b.truncate())
    }
}

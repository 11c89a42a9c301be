use glam::{Mat4, Vec3, Vec4};

use super::manifold::Manifold;
use super::GeometryError;

/// Below this geodesic distance the sphere is treated as flat.
pub const FLAT_EPSILON: f32 = 1e-4;

/// Minimum `|1 + w|` accepted when building a translation.
pub const ANTIPODE_EPSILON: f32 = 1e-6;

/// Sign of the curvature in the translation closed form.
const SIGN: f32 = 1.0;

/// The unit 3-sphere in the Lorentz-model embedding, curvature +1.
///
/// A Euclidean point `p` is read as a tangent vector at the origin whose
/// length is the geodesic distance travelled along the sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spherical3;

impl Manifold for Spherical3 {
    fn embed(p: Vec3) -> Vec4 {
        let distance = p.length();
        if distance < FLAT_EPSILON {
            return p.extend(1.0);
        }
        (p / distance * distance.sin()).extend(distance.cos())
    }

    /// Closed-form isometry taking the origin `(0, 0, 0, 1)` to `to`.
    ///
    /// `to` must lie on the unit sphere and must not be the antipode of the
    /// origin; `w = -1` zeroes the denominator and is rejected.
    fn translation(to: Vec4) -> Result<Mat4, GeometryError> {
        let denom = 1.0 + to.w;
        if denom.abs() < ANTIPODE_EPSILON {
            return Err(GeometryError::AntipodalSingularity { w_plus_one: denom });
        }

        let x = to.truncate().to_array();
        let mut table = [[0.0_f32; 4]; 4];
        for i in 0..3 {
            for j in 0..3 {
                let delta = if i == j { 1.0 } else { 0.0 };
                table[i][j] = delta - SIGN * x[i] * x[j] / denom;
            }
            table[i][3] = -SIGN * x[i];
            table[3][i] = x[i];
        }
        table[3][3] = to.w;

        // The table is row-major; loading its rows into glam's column slots
        // is the transpose that puts `to` in the fourth column.
        Ok(Mat4::from_cols_array_2d(&table))
    }

    fn form(a: Vec4, b: Vec4) -> f32 {
        a.truncate().dot(b.truncate()) + SIGN * a.w * b.w
    }
}

/// Inverse of a translation built by [`Spherical3::translation`].
/// The operator is orthogonal, so this is its transpose.
pub fn inverse_translation(translation: Mat4) -> Mat4 {
    translation.transpose()
}

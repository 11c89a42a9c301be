use glam::Mat4;

use super::GeometryError;

/// Smallest `|sin(far - near)|` accepted by the curved projection.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Margin kept below pi for the horizontal span `fovy * aspect`.
pub const SPAN_MARGIN: f32 = 1e-3;

/// Intrinsic camera parameters. `fovy` is in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Lens {
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.fovy > 0.0 && self.fovy < std::f32::consts::PI) {
            return Err(GeometryError::InvalidLens("fovy must lie in (0, pi)"));
        }
        if !(self.aspect > 0.0) {
            return Err(GeometryError::InvalidLens("aspect must be positive"));
        }
        if !(self.near > 0.0) {
            return Err(GeometryError::InvalidLens("near must be positive"));
        }
        if !(self.far > self.near) {
            return Err(GeometryError::InvalidLens("far must exceed near"));
        }
        Ok(())
    }

    /// OpenGL-convention perspective (clip depth in [-1, 1]).
    pub fn perspective(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy, self.aspect, self.near, self.far)
    }

    /// Perspective for the unit sphere with near/far scaled by `curvature_scale`.
    ///
    /// Geodesic distance `near` maps to clip depth -1 and `far` to +1.
    pub fn spherical_perspective(&self, curvature_scale: f32) -> Result<Mat4, GeometryError> {
        let span = self.fovy * self.aspect;
        if !(span < std::f32::consts::PI - SPAN_MARGIN) {
            return Err(GeometryError::FieldOfViewTooWide { span });
        }

        let near = self.near * curvature_scale;
        let far = self.far * curvature_scale;

        let s_fov_x = 1.0 / (self.fovy / 2.0).tan();
        let s_fov_y = 1.0 / (self.fovy * self.aspect / 2.0).tan();
        let div = (far - near).sin();
        if div.abs() < DEGENERATE_EPSILON {
            return Err(GeometryError::DegenerateProjection { div });
        }
        let fp = 2.0 * near.sin() * far.sin() / div;
        let alph = (near + far).sin() / div;

        let mut table = [[0.0_f32; 4]; 4];
        table[0][0] = s_fov_x;
        table[1][1] = s_fov_y;
        table[2][2] = -alph;
        table[2][3] = -1.0;
        table[3][2] = -fp;

        // Row-major table, transposed on load into glam's columns.
        Ok(Mat4::from_cols_array_2d(&table))
    }
}

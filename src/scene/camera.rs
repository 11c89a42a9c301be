//! Free-flying look-at camera with flat and spherical matrix sets.

use glam::{Mat4, Vec3, Vec4};

use crate::core::geometry::projection::Lens;
use crate::core::geometry::{GeometryError, Manifold, Spherical3};
use crate::scene::mode::GeometryMode;

/// Up vector handed to the look-at builder. Deliberately not unit length.
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 0.1, 0.0);

/// Reference up used to derive the strafe direction.
const STRAFE_UP: Vec3 = Vec3::Y;

/// Shortest eye-to-center distance, and smallest `|forward x +Y|`, accepted.
pub const LOOK_EPSILON: f32 = 1e-4;

/// Rejects eye/center pairs for which the look-at basis or the strafe
/// vector cannot be built.
pub fn check_look_direction(position: Vec3, center: Vec3) -> Result<(), GeometryError> {
    let look = center - position;
    let distance = look.length();
    if !(distance >= LOOK_EPSILON) {
        return Err(GeometryError::DegenerateLookDirection("eye and center coincide"));
    }
    if !((look / distance).cross(STRAFE_UP).length() >= LOOK_EPSILON) {
        return Err(GeometryError::DegenerateLookDirection("looking straight up or down"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    center: Vec3,
    lens: Lens,
    curvature_scale: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(
        position: Vec3,
        center: Vec3,
        lens: Lens,
        curvature_scale: f32,
        mode: GeometryMode,
    ) -> Result<Self, GeometryError> {
        lens.validate()?;
        let (view, projection) = Self::matrices(position, center, &lens, curvature_scale, mode)?;
        Ok(Self {
            position,
            center,
            lens,
            curvature_scale,
            view,
            projection,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn lens(&self) -> Lens {
        self.lens
    }

    pub fn curvature_scale(&self) -> f32 {
        self.curvature_scale
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Unit vector from the eye toward the look-at center.
    pub fn forward(&self) -> Vec3 {
        (self.center - self.position).normalize()
    }

    /// Unit strafe vector, `forward x +Y`.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(STRAFE_UP).normalize()
    }

    /// Shifts eye and center together.
    pub fn move_by(&mut self, amount: Vec3, mode: GeometryMode) -> Result<(), GeometryError> {
        self.commit(self.position + amount, self.center + amount, self.lens, mode)
    }

    /// Shifts the center only, swinging the view direction.
    pub fn turn_by(&mut self, amount: Vec3, mode: GeometryMode) -> Result<(), GeometryError> {
        self.commit(self.position, self.center + amount, self.lens, mode)
    }

    pub fn set_aspect(&mut self, aspect: f32, mode: GeometryMode) -> Result<(), GeometryError> {
        let lens = Lens { aspect, ..self.lens };
        lens.validate()?;
        self.commit(self.position, self.center, lens, mode)
    }

    /// Recomputes both matrices for `mode`.
    pub fn update(&mut self, mode: GeometryMode) -> Result<(), GeometryError> {
        self.commit(self.position, self.center, self.lens, mode)
    }

    // State only changes once the new matrices are known to be valid.
    fn commit(
        &mut self,
        position: Vec3,
        center: Vec3,
        lens: Lens,
        mode: GeometryMode,
    ) -> Result<(), GeometryError> {
        let (view, projection) =
            Self::matrices(position, center, &lens, self.curvature_scale, mode)?;
        self.position = position;
        self.center = center;
        self.lens = lens;
        self.view = view;
        self.projection = projection;
        Ok(())
    }

    fn matrices(
        position: Vec3,
        center: Vec3,
        lens: &Lens,
        curvature_scale: f32,
        mode: GeometryMode,
    ) -> Result<(Mat4, Mat4), GeometryError> {
        check_look_direction(position, center)?;
        let look_at = Mat4::look_at_rh(position, center, WORLD_UP);
        match mode {
            GeometryMode::Euclidean => Ok((look_at, lens.perspective())),
            GeometryMode::NonEuclidean => Ok((
                spherical_view(look_at, position, curvature_scale)?,
                lens.spherical_perspective(curvature_scale)?,
            )),
        }
    }
}

/// Parallel-transports the flat look-at basis to the embedded eye.
///
/// The rows of `look_at` are the camera's right, up and backward axes. Each
/// is carried by the translation that takes the origin to the eye, and the
/// resulting frame `[i' | j' | k' | eye]` is transposed into a view matrix.
fn spherical_view(look_at: Mat4, position: Vec3, curvature_scale: f32) -> Result<Mat4, GeometryError> {
    let eye = Spherical3::embed(position * curvature_scale);
    let transport = Spherical3::translation(eye)?;

    let axis = |row: usize| transport * look_at.row(row).truncate().extend(0.0);
    let frame = Mat4::from_cols(axis(0), axis(1), axis(2), Vec4::new(eye.x, eye.y, eye.z, 1.0));
    Ok(frame.transpose())
}

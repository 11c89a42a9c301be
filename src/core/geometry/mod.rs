pub mod euclidean;
pub mod manifold;
pub mod projection;
pub mod spherical;

pub use euclidean::Euclidean3;
pub use manifold::Manifold;
pub use spherical::Spherical3;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sign of the sectional curvature used by the curved rendering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Curvature {
    #[default]
    Spherical,
    /// Accepted by the config format but rejected by validation.
    Hyperbolic,
}

impl Curvature {
    pub fn ensure_supported(self) -> Result<(), GeometryError> {
        match self {
            Curvature::Spherical => Ok(()),
            Curvature::Hyperbolic => Err(GeometryError::UnsupportedCurvature(self)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("translation target {w_plus_one:e} away from the antipode of the origin (w = -1)")]
    AntipodalSingularity { w_plus_one: f32 },
    #[error("curved projection is degenerate: sin(far - near) = {div:e} after scaling")]
    DegenerateProjection { div: f32 },
    #[error("invalid lens: {0}")]
    InvalidLens(&'static str),
    #[error("curved projection needs fovy * aspect below pi, got {span}")]
    FieldOfViewTooWide { span: f32 },
    #[error("degenerate look direction: {0}")]
    DegenerateLookDirection(&'static str),
    #[error("{0:?} curvature is not supported")]
    UnsupportedCurvature(Curvature),
}

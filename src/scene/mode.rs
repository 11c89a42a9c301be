use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeometryMode {
    #[default]
    Euclidean,
    NonEuclidean,
}

impl GeometryMode {
    pub fn toggled(self) -> Self {
        match self {
            GeometryMode::Euclidean => GeometryMode::NonEuclidean,
            GeometryMode::NonEuclidean => GeometryMode::Euclidean,
        }
    }

    /// Draw passes issued per object. The curved path also draws the
    /// antipodal copy because the sphere double-covers clip space.
    pub fn passes(self) -> &'static [Antipode] {
        match self {
            GeometryMode::Euclidean => &[Antipode::Near],
            GeometryMode::NonEuclidean => &[Antipode::Near, Antipode::Far],
        }
    }
}

/// Which copy of an object a curved draw renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Antipode {
    Near,
    Far,
}

impl Antipode {
    pub fn sign(self) -> f32 {
        match self {
            Antipode::Near => 1.0,
            Antipode::Far => -1.0,
        }
    }
}

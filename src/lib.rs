pub mod core {
    pub mod geometry;
}

pub mod engine;
pub mod input;
pub mod scene;

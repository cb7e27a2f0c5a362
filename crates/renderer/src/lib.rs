use thiserror::Error;

use math::MathError;

pub mod frame;
pub mod scene;
pub mod uniform_buffer;

pub use frame::update_frame_transforms;
pub use scene::{load_scene, SceneDescriptor};
pub use uniform_buffer::{FrameTransforms, FrameUniforms};

/// Uniform blocks kept on the host, one per frame the GPU may still be reading.
pub const MAX_FRAMES_IN_FLIGHT: usize = 2;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("invalid projection: {0}")]
    InvalidProjection(&'static str),
    #[error("scene file not found: {0}")]
    SceneNotFound(String),
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene: {0}")]
    SceneParse(#[from] serde_yaml::Error),
}

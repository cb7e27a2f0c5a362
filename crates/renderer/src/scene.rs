use std::path::Path;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use math::{vec3, Vec3, HALF_PI};

use crate::RendererError;

/// Fixed scene constants the frame driver works from.
///
/// Every field has a default, so a scene file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, TypedBuilder, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescriptor {
    #[builder(default = vec3(2.0, 2.0, 2.0))]
    pub eye: Vec3,
    #[builder(default = Vec3::ZERO)]
    pub target: Vec3,
    #[builder(default = Vec3::Z)]
    pub up: Vec3,
    /// Axis of the one-turn-per-second spin applied to the model.
    #[builder(default = Vec3::Z)]
    pub spin_axis: Vec3,
    /// Vertical field of view in radians.
    #[builder(default = HALF_PI)]
    pub fov_y: f32,
    #[builder(default = 0.1)]
    pub near: f32,
    #[builder(default = 10.0)]
    pub far: f32,
}

impl Default for SceneDescriptor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SceneDescriptor {
    /// Rejects projection parameters that would produce a degenerate matrix.
    pub fn validate(&self) -> Result<(), RendererError> {
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(RendererError::InvalidProjection(
                "field of view must be between 0 and pi",
            ));
        }
        if !(self.near > 0.0) {
            return Err(RendererError::InvalidProjection("near plane must be positive"));
        }
        if !(self.far > self.near) {
            return Err(RendererError::InvalidProjection(
                "far plane must lie beyond the near plane",
            ));
        }
        Ok(())
    }
}

/// Load a scene description from a YAML file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDescriptor, RendererError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RendererError::SceneNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let scene: SceneDescriptor = serde_yaml::from_str(&content)?;
    scene.validate()?;

    log::debug!("loaded scene from {}: {:?}", path.display(), scene);
    Ok(scene)
}

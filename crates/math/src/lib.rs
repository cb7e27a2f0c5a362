pub use error::*;
pub use matrix::*;
pub use quaternion::*;
pub use vector::*;

mod error;
mod matrix;
mod quaternion;
mod vector;

pub const PI: f32 = std::f32::consts::PI;
pub const PI_2: f32 = 2.0f32 * PI;
pub const HALF_PI: f32 = 0.5f32 * PI;
pub const QUARTER_PI: f32 = 0.25f32 * PI;
pub const DEG2RAD_MULTIPLIER: f32 = PI / 180.0f32;
pub const RAD2DEG_MULTIPLIER: f32 = 180.0f32 / PI;

/// Below `-1 + PARALLEL_TOLERANCE` two unit vectors are treated as anti-parallel.
pub(crate) const PARALLEL_TOLERANCE: f32 = 0.001_f32;

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * DEG2RAD_MULTIPLIER
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians * RAD2DEG_MULTIPLIER
}

pub mod prelude {
    #[doc(hidden)]
    pub use crate::{quat, vec3, Mat4, MathError, Quaternion, Vec3};
}

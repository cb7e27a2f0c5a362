use std::fmt;
use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

use crate::{MathError, Vec3, PARALLEL_TOLERANCE};

/// Scalar part `w` plus imaginary part `xyz`.
///
/// Only unit quaternions describe rotations. [`Quaternion::from_angle_axis`] and
/// [`Quaternion::from_vector_to_vector`] always produce one; anything assembled by hand
/// should go through [`Quaternion::normalise`] first.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Quaternion {
    pub w: f32,
    pub xyz: Vec3,
}

#[inline]
pub const fn quat(w: f32, x: f32, y: f32, z: f32) -> Quaternion {
    Quaternion::new(w, Vec3::new(x, y, z))
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(1.0, Vec3::ZERO);

    #[inline]
    pub const fn new(w: f32, xyz: Vec3) -> Self {
        Self { w, xyz }
    }

    pub fn conjugate(self) -> Quaternion {
        Quaternion::new(self.w, -self.xyz)
    }

    pub fn norm(self) -> f32 {
        (self.w * self.w + self.xyz.dot(self.xyz)).sqrt()
    }

    /// Rescales to unit norm. The zero quaternion comes back unchanged.
    pub fn normalise(self) -> Quaternion {
        let norm = self.norm();
        if norm == 0.0 {
            return self;
        }
        Quaternion::new(self.w / norm, self.xyz.scale(1.0 / norm))
    }

    /// Hamilton product `self * other`. As rotations: apply `other` first, then `self`.
    pub fn multiply(self, other: Quaternion) -> Quaternion {
        let (a, u) = (self.w, self.xyz);
        let (b, v) = (other.w, other.xyz);
        Quaternion::new(a * b - u.dot(v), v.scale(a) + u.scale(b) + u.cross(v))
    }

    /// Rotation by `phi` radians about `axis`, counter-clockwise when looking down the axis.
    pub fn from_angle_axis(phi: f32, axis: Vec3) -> Result<Quaternion, MathError> {
        if axis.norm() == 0.0 {
            return Err(MathError::ZeroLengthAxis);
        }
        let (s, c) = (phi * 0.5).sin_cos();
        Ok(Quaternion::new(c, axis.normalise().scale(s)))
    }

    /// Shortest-arc rotation taking the direction of `u` onto the direction of `v`.
    ///
    /// Nearly opposite inputs leave `u × v` without a usable direction, so a half turn is
    /// built about an axis perpendicular to `u` instead: world up when possible, otherwise
    /// world `y`. If either input has zero length there is no direction to rotate and the
    /// identity is returned.
    pub fn from_vector_to_vector(u: Vec3, v: Vec3) -> Quaternion {
        let u = u.normalise();
        let v = v.normalise();
        if u == Vec3::ZERO || v == Vec3::ZERO {
            return Quaternion::IDENTITY;
        }

        // rounding can push the dot of two unit vectors just past ±1
        let cos_phi = u.dot(v).clamp(-1.0, 1.0);

        if cos_phi < -1.0 + PARALLEL_TOLERANCE {
            let mut reference = Vec3::Z;
            if u.dot(reference).abs() > 1.0 - PARALLEL_TOLERANCE {
                reference = Vec3::Y;
            }
            let axis = (reference - u.scale(u.dot(reference))).normalise();
            return Quaternion::new(0.0, axis);
        }

        let axis = u.cross(v).normalise();
        let a = (2.0 * (1.0 + cos_phi)).sqrt();
        let b = (2.0 * (1.0 - cos_phi)).sqrt();
        Quaternion::new(a * 0.5, axis.scale(b * 0.5))
    }

    /// Rotates `v` by this quaternion (`q v q*`). Assumes unit norm.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        self.multiply(Quaternion::new(0.0, v))
            .multiply(self.conjugate())
            .xyz
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(rhs)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {}i + {}j + {}k",
            self.w, self.xyz.x, self.xyz.y, self.xyz.z
        )
    }
}

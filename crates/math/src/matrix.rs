use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use bytemuck::{Pod, Zeroable};

use crate::{MathError, Quaternion, Vec3};

/// 4x4 matrix stored row-major, `m[row][col]`.
///
/// Points are column vectors on the right (`M * p`), so translations live in the last
/// column and `a * b` applies `b` first.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self(rows)
    }

    pub fn as_array(&self) -> &[[f32; 4]; 4] {
        &self.0
    }

    pub const fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(v: Vec3) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, v.x],
            [0.0, 1.0, 0.0, v.y],
            [0.0, 0.0, 1.0, v.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(v: Vec3) -> Mat4 {
        Mat4([
            [v.x, 0.0, 0.0, 0.0],
            [0.0, v.y, 0.0, 0.0],
            [0.0, 0.0, v.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation matrix for `q`. `q` is normalised first, so any non-zero quaternion gives a
    /// proper rotation.
    pub fn from_quaternion(q: Quaternion) -> Mat4 {
        let q = q.normalise();
        let (r, i, j, k) = (q.w, q.xyz.x, q.xyz.y, q.xyz.z);
        Mat4([
            [
                1.0 - 2.0 * (j * j + k * k),
                2.0 * (i * j - k * r),
                2.0 * (i * k + j * r),
                0.0,
            ],
            [
                2.0 * (i * j + k * r),
                1.0 - 2.0 * (i * i + k * k),
                2.0 * (j * k - i * r),
                0.0,
            ],
            [
                2.0 * (i * k - j * r),
                2.0 * (j * k + i * r),
                1.0 - 2.0 * (i * i + j * j),
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation(angle: f32, axis: Vec3) -> Result<Mat4, MathError> {
        Quaternion::from_angle_axis(angle, axis).map(Mat4::from_quaternion)
    }

    /// Shortest rotation taking the direction of `u` onto the direction of `v`.
    pub fn rotation_between(u: Vec3, v: Vec3) -> Mat4 {
        Mat4::from_quaternion(Quaternion::from_vector_to_vector(u, v))
    }

    /// `self * other`.
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.0[i][k] * other.0[k][j]).sum();
            }
        }
        Mat4(result)
    }

    pub fn transpose(&self) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in self.0.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                result[j][i] = *value;
            }
        }
        Mat4(result)
    }

    /// `self * p` for a homogeneous point.
    pub fn transform(&self, p: [f32; 4]) -> [f32; 4] {
        let mut result = [0.0f32; 4];
        for (value, row) in result.iter_mut().zip(self.0.iter()) {
            *value = row.iter().zip(p.iter()).map(|(a, b)| a * b).sum();
        }
        result
    }

    /// Transforms `p` as a point (`w = 1`) and divides by the resulting `w`.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, w] = self.transform([p.x, p.y, p.z, 1.0]);
        Vec3::new(x / w, y / w, z / w)
    }

    /// World-to-camera transform for a camera at `eye` looking at `target`.
    ///
    /// Camera space has `+x` along `up × forward`, `+y` along the corrected up and `+z`
    /// along the view direction. In a right-handed world `+x` is the viewer's left;
    /// [`Mat4::perspective`] turns the image half a turn to undo that. `up` only needs to
    /// be roughly upward but must not be collinear with `target - eye`.
    pub fn camera(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, MathError> {
        let forward = (target - eye).normalise();
        let right = up.cross(forward);
        if forward == Vec3::ZERO || right.norm() <= f32::EPSILON * up.norm() {
            return Err(MathError::CollinearCameraBasis);
        }
        let right = right.normalise();
        let true_up = forward.cross(right);

        let basis = Mat4([
            [right.x, true_up.x, forward.x, 0.0],
            [right.y, true_up.y, forward.y, 0.0],
            [right.z, true_up.z, forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        // move the eye to the origin, then rotate world axes onto the camera axes
        Ok(basis.transpose() * Mat4::translation(-eye))
    }

    /// Perspective projection with vertical field of view `fov_y` in radians.
    ///
    /// Looks down camera-space `+z`. Depth lands in `[0, 1]` after the divide: `near` maps
    /// to 0 and `far` to 1. Output is Vulkan clip space as is (`+x` right, `+y` down), so
    /// the viewport needs no flip.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        let phi = 1.0 / (fov_y * 0.5).tan();
        let a = far / (far - near);
        let b = -(near * far) / (far - near);
        // camera x points to the viewer's left and camera y up; negating both rolls the
        // image half a turn onto Vulkan's axes without mirroring it
        Mat4([
            [-phi / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, -phi, 0.0, 0.0],
            [0.0, 0.0, a, b],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl Index<usize> for Mat4 {
    type Output = [f32; 4];

    fn index(&self, row: usize) -> &[f32; 4] {
        &self.0[row]
    }
}

impl IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, row: usize) -> &mut [f32; 4] {
        &mut self.0[row]
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.iter() {
            write!(f, "\n|")?;
            for value in row.iter() {
                write!(f, " {:>5.1} ", value)?;
            }
            write!(f, "|")?;
        }
        Ok(())
    }
}

use bytemuck::{Pod, Zeroable};

use math::Mat4;

use crate::MAX_FRAMES_IN_FLIGHT;

/// 统一缓冲区对象（UBO）
///
/// Three row-major `mat4`s, 64 bytes each, in the order the vertex shader declares them:
///
/// ```glsl
/// layout(std140, row_major, binding = 0) uniform FrameTransforms {
///     mat4 model;
///     mat4 view;
///     mat4 projection;
/// };
/// ```
#[repr(C)]
#[derive(Copy, Clone, Default, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

pub const FRAME_TRANSFORMS_SIZE: usize = 3 * 64;

const _: () = assert!(std::mem::size_of::<FrameTransforms>() == FRAME_TRANSFORMS_SIZE);

impl FrameTransforms {
    /// The block exactly as it should be copied into the mapped uniform buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Host copies of the uniform block, one per frame in flight.
///
/// Frame `n` writes slot `n % MAX_FRAMES_IN_FLIGHT`, so the block the GPU may still be
/// reading for the previous frame is left alone.
#[derive(Clone, Debug, Default)]
pub struct FrameUniforms {
    blocks: [FrameTransforms; MAX_FRAMES_IN_FLIGHT],
}

impl FrameUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(frame_index: usize) -> usize {
        frame_index % MAX_FRAMES_IN_FLIGHT
    }

    /// Overwrites the slot for `frame_index` and returns its bytes for upload.
    pub fn write(&mut self, frame_index: usize, transforms: FrameTransforms) -> &[u8] {
        let slot = Self::slot(frame_index);
        log::trace!("writing frame {} transforms to slot {}", frame_index, slot);
        self.blocks[slot] = transforms;
        self.blocks[slot].as_bytes()
    }

    pub fn block(&self, frame_index: usize) -> &FrameTransforms {
        &self.blocks[Self::slot(frame_index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::{vec3, Mat4};

    fn sample() -> FrameTransforms {
        FrameTransforms {
            model: Mat4::translation(vec3(1.0, 2.0, 3.0)),
            view: Mat4::scaling(vec3(4.0, 5.0, 6.0)),
            projection: Mat4::perspective(1.0, 1.0, 0.1, 10.0),
        }
    }

    fn f32_at(bytes: &[u8], index: usize) -> f32 {
        let start = index * 4;
        f32::from_ne_bytes(bytes[start..start + 4].try_into().unwrap())
    }

    #[test]
    fn block_is_192_bytes() {
        assert_eq!(sample().as_bytes().len(), 192);
        assert_eq!(FRAME_TRANSFORMS_SIZE, 192);
    }

    #[test]
    fn matrices_are_laid_out_row_major_in_order() {
        let transforms = sample();
        let bytes = transforms.as_bytes();
        // model translation sits at the end of the first three rows
        assert_eq!(f32_at(bytes, 3), 1.0);
        assert_eq!(f32_at(bytes, 7), 2.0);
        assert_eq!(f32_at(bytes, 11), 3.0);
        // view starts at byte 64
        assert_eq!(f32_at(bytes, 16), 4.0);
        assert_eq!(f32_at(bytes, 16 + 5), 5.0);
        // projection's bottom row is [0, 0, 1, 0]
        assert_eq!(f32_at(bytes, 32 + 14), 1.0);
        assert_eq!(f32_at(bytes, 32 + 15), 0.0);
    }

    #[test]
    fn frames_in_flight_use_separate_slots() {
        let mut uniforms = FrameUniforms::new();
        let first = sample();
        let second = FrameTransforms {
            model: Mat4::identity(),
            ..sample()
        };

        uniforms.write(0, first);
        let bytes = uniforms.write(1, second).to_vec();
        assert_eq!(bytes, second.as_bytes());
        assert_eq!(uniforms.block(0), &first);
        assert_eq!(uniforms.block(1), &second);

        uniforms.write(2, second);
        assert_eq!(uniforms.block(0), &second);
        assert_eq!(FrameUniforms::slot(5), 1);
    }
}

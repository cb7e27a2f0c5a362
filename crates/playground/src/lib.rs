use typed_builder::TypedBuilder;

use renderer::{update_frame_transforms, FrameUniforms, RendererError, SceneDescriptor};

pub mod cli;

/// Headless stand-in for the render loop: a fixed framebuffer and a fixed frame rate.
#[derive(Clone, Debug, TypedBuilder)]
pub struct FrameLoopDescriptor {
    #[builder(default = 800)]
    pub width: u32,
    #[builder(default = 600)]
    pub height: u32,
    #[builder(default = 60.0)]
    pub frames_per_second: f32,
    #[builder(default = 120)]
    pub frame_count: usize,
}

impl FrameLoopDescriptor {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

pub struct FrameLoop {
    desc: FrameLoopDescriptor,
    scene: SceneDescriptor,
    uniforms: FrameUniforms,
    frame_index: usize,
}

impl FrameLoop {
    pub fn new(desc: FrameLoopDescriptor, scene: SceneDescriptor) -> Self {
        Self {
            desc,
            scene,
            uniforms: FrameUniforms::new(),
            frame_index: 0,
        }
    }

    pub fn uniforms(&self) -> &FrameUniforms {
        &self.uniforms
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Computes the next frame's transforms, stores them in its in-flight slot and returns
    /// the bytes a renderer would copy into the mapped uniform buffer.
    pub fn step(&mut self) -> Result<&[u8], RendererError> {
        let elapsed = self.frame_index as f32 / self.desc.frames_per_second;
        let transforms =
            update_frame_transforms(&self.scene, elapsed, self.desc.aspect_ratio())?;

        if self.frame_index == 0 {
            log::info!("view {}", transforms.view);
            log::info!("projection {}", transforms.projection);
        }
        log::debug!(
            "frame {} at {:.3}s model {}",
            self.frame_index,
            elapsed,
            transforms.model
        );

        let frame_index = self.frame_index;
        self.frame_index += 1;
        profiling::finish_frame!();
        Ok(self.uniforms.write(frame_index, transforms))
    }

    /// Steps through every configured frame and returns how many bytes were uploaded.
    pub fn run(&mut self) -> Result<usize, RendererError> {
        let mut uploaded = 0;
        for _ in 0..self.desc.frame_count {
            uploaded += self.step()?.len();
        }
        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::Vec3;

    #[test]
    fn run_uploads_one_block_per_frame() {
        let desc = FrameLoopDescriptor::builder().frame_count(10).build();
        let mut frame_loop = FrameLoop::new(desc, SceneDescriptor::default());
        assert_eq!(frame_loop.run().unwrap(), 10 * 192);
        assert_eq!(frame_loop.frame_index(), 10);
    }

    #[test]
    fn step_matches_direct_update() {
        let desc = FrameLoopDescriptor::builder()
            .width(1280)
            .height(720)
            .frames_per_second(30.0)
            .build();
        let scene = SceneDescriptor::default();
        let mut frame_loop = FrameLoop::new(desc, scene.clone());
        frame_loop.step().unwrap();
        let bytes = frame_loop.step().unwrap().to_vec();

        let expected = update_frame_transforms(&scene, 1.0 / 30.0, 1280.0 / 720.0).unwrap();
        assert_eq!(bytes, expected.as_bytes());
        assert_eq!(frame_loop.uniforms().block(1), &expected);
    }

    #[test]
    fn run_stops_at_first_error() {
        let scene = SceneDescriptor::builder().up(Vec3::ZERO).build();
        let mut frame_loop = FrameLoop::new(FrameLoopDescriptor::builder().build(), scene);
        assert!(frame_loop.run().is_err());
        assert_eq!(frame_loop.frame_index(), 0);
    }
}

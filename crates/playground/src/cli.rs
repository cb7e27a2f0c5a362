use std::path::PathBuf;

use clap::Parser;

use crate::FrameLoopDescriptor;

#[derive(Debug, Parser)]
#[command(name = "playground")]
#[command(about = "Drives the frame transform kernel without a window and logs the matrices")]
pub struct Args {
    /// Scene description (YAML); the built-in scene is used when omitted
    pub scene: Option<PathBuf>,

    /// Number of frames to compute
    #[arg(short, long, default_value_t = 120)]
    pub frames: usize,

    /// Framebuffer width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Framebuffer height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,
}

impl Args {
    pub fn frame_loop_descriptor(&self) -> FrameLoopDescriptor {
        FrameLoopDescriptor::builder()
            .width(self.width)
            .height(self.height)
            .frames_per_second(self.fps)
            .frame_count(self.frames)
            .build()
    }
}

use std::time::Instant;

use clap::Parser;

use playground::cli::Args;
use playground::FrameLoop;
use renderer::SceneDescriptor;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    // profiling::tracy_client::Client::start();

    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.init();

    let scene = match &args.scene {
        Some(path) => renderer::load_scene(path)?,
        None => SceneDescriptor::default(),
    };
    log::info!("scene {:?}", scene);

    let mut frame_loop = FrameLoop::new(args.frame_loop_descriptor(), scene);

    let start = Instant::now();
    let uploaded = frame_loop.run()?;
    let elapsed = start.elapsed().as_secs_f32();
    log::info!(
        "{} frames, {} bytes of uniforms in {:.3} ms",
        frame_loop.frame_index(),
        uploaded,
        elapsed * 1000.0
    );
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::RenderConfig;

mod cli;

use cli::Args;

fn init_logger(args: &Args) {
    let mut builder = env_logger::Builder::from_default_env();
    match args.log_level {
        Some(level) => {
            builder.filter_level(level.into());
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(log::LevelFilter::Info);
        }
        None => {}
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    args.apply_to(&mut config);

    let scene = glint_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let image = glint_renderer::render(&scene, &config).context("Render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::RenderConfig;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Whitted-style ray tracer")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image path; the format follows the extension
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Render settings file (JSON); flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Enable adaptive supersampling
    #[arg(long)]
    pub adaptive: bool,

    /// Squared color distance below which corners count as smooth
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Maximum subdivision levels per pixel
    #[arg(long)]
    pub max_subdivision: Option<u32>,

    /// Render buckets in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Bucket edge length in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Logging level; RUST_LOG is used when not given
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Apply command line overrides on top of `config`.
    pub fn apply_to(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.adaptive {
            config.adaptive = true;
        }
        if let Some(threshold) = self.threshold {
            config.adaptive_threshold = threshold;
        }
        if let Some(levels) = self.max_subdivision {
            config.max_subdivision = levels;
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(size) = self.bucket_size {
            config.bucket_size = size;
        }
    }
}

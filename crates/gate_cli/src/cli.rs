use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, ValueEnum)]
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "gate")]
#[command(about = "Path trace a scene with a linked pair of portals")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 500)]
    pub width: u32,

    /// Width / height ratio; the height is derived from it
    #[arg(long, default_value_t = 16.0 / 9.0, value_parser = parse_aspect_ratio)]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 1)]
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 13)]
    pub max_depth: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 40.0)]
    pub vfov: f32,

    /// Distance from the camera to the plane of perfect focus
    #[arg(long, default_value_t = 1.0)]
    pub focus_dist: f32,

    /// Aperture cone angle in degrees (0 disables depth of field)
    #[arg(long, default_value_t = 0.0)]
    pub defocus_angle: f32,

    /// Render worker count
    #[arg(long, short = 'j', default_value_t = gate_renderer::DEFAULT_THREAD_COUNT)]
    pub threads: usize,

    /// Seed for the per-pixel sample generators
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Seed for the random sphere field
    #[arg(long, default_value_t = 0)]
    pub scene_seed: u64,

    /// Output path: `-` for PPM on stdout, `.png` for PNG, anything else PPM
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Accept only finite, strictly positive ratios.
fn parse_aspect_ratio(s: &str) -> Result<f32, String> {
    let ratio: f32 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio must be a positive finite number, got {s}"))
    }
}

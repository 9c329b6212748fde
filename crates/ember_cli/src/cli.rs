use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

/// Render the demonstration sphere scene to an image file
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "A small Monte Carlo path tracer for sphere scenes")]
pub struct Args {
    /// Output image path; the extension selects the format (.png, .jpg, .bmp, ...)
    pub output: PathBuf,

    /// Image width in pixels (height follows from the 16:9 aspect ratio)
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 50)]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 5)]
    pub max_depth: u32,

    /// Seed for the random generator. A fresh seed is drawn when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render buckets on all cores instead of a single thread
    #[arg(long)]
    pub parallel: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

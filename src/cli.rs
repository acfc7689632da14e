use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use phongtrace::config::{JobConfig, SceneKind};

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "phongtrace")]
#[command(about = "A recursive ray tracer with Phong shading, shadows and reflections")]
pub struct Args {
    /// Shorthand for --debug-level debug
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML file listing [[job]] entries; replaces the per-image flags below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneKind,

    /// Image width in pixels
    #[arg(long, default_value = "640", help = "Image width in pixels", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "480", help = "Image height in pixels", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Number of mirror-reflection bounces (0 disables reflection)
    #[arg(long, short = 'r', default_value = "2")]
    pub reflect_levels: u32,

    /// Disable shadow rays
    #[arg(long)]
    pub no_shadow: bool,

    /// Output file path (.png for 8-bit, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png for 8-bit, .exr for HDR linear)")]
    pub output: PathBuf,

    /// Directory containing Teddy.obj and Teapot.obj for the room scene
    #[arg(long, default_value = ".")]
    pub mesh_dir: PathBuf,
}

impl Args {
    /// Effective log level after applying --verbose.
    pub fn log_level(&self) -> LevelFilter {
        let level = LevelFilter::from(self.debug_level.clone());
        if self.verbose {
            level.max(LevelFilter::Debug)
        } else {
            level
        }
    }

    /// Single job described by the per-image flags.
    pub fn job(&self) -> JobConfig {
        JobConfig {
            scene: self.scene,
            width: self.width,
            height: self.height,
            reflect_levels: self.reflect_levels,
            shadows: !self.no_shadow,
            output: self.output.clone(),
            mesh_dir: self.mesh_dir.clone(),
        }
    }
}

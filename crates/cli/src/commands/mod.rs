//! Command implementations for inkctl

pub mod decode;
pub mod probe;
pub mod profiles;
pub mod replay;

use crate::error::CliError;
use anyhow::Result;
use clap::{Args, ValueEnum};
use inkbridge_config::BridgeConfig;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON-lines pointer capture
    pub capture: PathBuf,

    /// Write the rendering here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rendering format
    #[arg(long, value_enum, default_value_t = RenderFormat::Svg)]
    pub format: RenderFormat,

    /// Echo throttled telemetry readouts to stderr
    #[arg(short, long)]
    pub telemetry: bool,

    /// Append pen log entries to this file
    #[arg(long)]
    pub pen_log: Option<PathBuf>,

    /// Telemetry readout rate, overriding the config
    #[arg(long)]
    pub rate_hz: Option<u32>,

    /// Keep the surface transparent instead of painting the background
    #[arg(long)]
    pub no_clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// SVG document
    Svg,
    /// JSON array of surface calls
    Ops,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Device profile name
    #[arg(short, long, default_value = "reference-tablet")]
    pub profile: String,

    /// Reports as hex, decoded in order
    #[arg(required = true, num_args = 1..)]
    pub reports: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// JSON-lines pointer capture
    pub capture: PathBuf,
}

/// Config from `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    match path {
        Some(path) => Ok(BridgeConfig::load(path).map_err(CliError::from)?),
        None => Ok(BridgeConfig::default()),
    }
}

//! inkctl - InkBridge command-line tools
//!
//! Replays captured pointer streams through the normalizer and stroke
//! renderer, decodes raw tablet reports against device profiles and
//! summarizes what a capture says about the pen.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod capture;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{DecodeArgs, ProbeArgs, ReplayArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "inkctl")]
#[command(about = "InkBridge CLI - replay pen captures, decode tablet reports, list profiles")]
#[command(version)]
#[command(long_about = "
inkctl drives the InkBridge input pipeline from the command line.
Captures are JSON-lines files with one pointer event per line.
Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Bridge config file (YAML or JSON)
    #[arg(short, long, global = true, env = "INKCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a pointer capture and render it
    Replay(ReplayArgs),

    /// Decode raw HID reports with a device profile
    Decode(DecodeArgs),

    /// List device profiles
    Profiles,

    /// Report which pen features a capture exercises
    Probe(ProbeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("inkctl={log_level},inkbridge={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = match e.downcast_ref::<CliError>() {
                Some(CliError::ProfileNotFound(_)) => 3,
                Some(CliError::InvalidCapture { .. })
                | Some(CliError::InvalidReport(_))
                | Some(CliError::InvalidConfiguration(_)) => 4,
                _ => 1,
            };

            #[expect(clippy::exit, reason = "exit code must reach the shell after output")]
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Replay(args) => commands::replay::execute(args, &config, cli.json).await,
        Commands::Decode(args) => commands::decode::execute(args, &config, cli.json),
        Commands::Profiles => commands::profiles::execute(&config, cli.json),
        Commands::Probe(args) => commands::probe::execute(args, &config, cli.json).await,
    }
}

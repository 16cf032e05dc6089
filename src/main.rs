//! stegtext - hide text in image pixels
//!
//! A CLI for LSB steganography with optional password encryption.
//! Stego images are written as PNG or BMP so the hidden bits survive.

mod commands;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use stegtext::Settings;

use commands::{CapacityCommand, CommandExecutor, HideCommand, RevealCommand};

/// stegtext - hide text in image pixels
///
/// Hides a message in the least significant bit of every RGB channel value.
/// Pass a password to encrypt the message before it is hidden.
#[derive(Parser)]
#[command(name = "stegtext")]
#[command(version)]
#[command(about = "Hide text in the least significant bits of lossless images")]
#[command(long_about = None)]
struct Cli {
    /// Settings file (default: ~/.stegtext/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress status messages on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an image
    Hide(HideCommand),

    /// Reveal the message hidden in an image
    Reveal(RevealCommand),

    /// Show how much text an image can hold
    Capacity(CapacityCommand),
}

fn init_logging(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();
}

fn log_level(cli: &Cli, settings: &Settings) -> Result<LevelFilter> {
    if cli.debug {
        return Ok(LevelFilter::Debug);
    }
    Ok(settings.log_filter()?.unwrap_or(LevelFilter::Warn))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load().context("Failed to load settings")?,
    };

    init_logging(log_level(&cli, &settings)?);

    let ctx = commands::RunContext {
        settings,
        quiet: cli.quiet,
    };

    match &cli.command {
        Commands::Hide(cmd) => cmd.execute(&ctx),
        Commands::Reveal(cmd) => cmd.execute(&ctx),
        Commands::Capacity(cmd) => cmd.execute(&ctx),
    }
}

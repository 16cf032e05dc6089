//! Reveal command - extract a hidden message from an image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stegtext::{load_pixels, reveal_with_config, Utf8Policy};

use super::{CommandExecutor, RunContext};

/// Reveal the message hidden in an image.
///
/// The image must be the exact lossless file written by `hide`.
/// A wrong password is reported as an error, never as garbled text.
#[derive(Args, Debug)]
pub struct RevealCommand {
    /// Stego image
    #[arg(short, long)]
    pub image: PathBuf,

    /// Password used when hiding (required if the message is encrypted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Replace invalid UTF-8 with U+FFFD instead of failing
    #[arg(long)]
    pub lossy: bool,

    /// Write the message to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output (shows image size and text decoding policy)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for RevealCommand {
    fn execute(&self, ctx: &RunContext) -> Result<()> {
        let stego = load_pixels(&self.image)
            .with_context(|| format!("Failed to load image {}", self.image.display()))?;

        if self.verbose {
            ctx.status(format!(
                "Loaded {}x{} image ({} bits capacity)",
                stego.width(),
                stego.height(),
                stego.capacity_bits()
            ));
        }

        let config = ctx.settings.decoder_config_with(self.lossy);
        if self.verbose && config.utf8 == Utf8Policy::Lossy {
            ctx.status("Invalid UTF-8 will be replaced with U+FFFD");
        }

        let revealed = reveal_with_config(&stego, self.password.as_deref(), &config)
            .context("Failed to reveal message")?;

        ctx.status(format!(
            "Revealed {} bytes{}",
            revealed.text.len(),
            if revealed.encrypted { " (decrypted)" } else { "" }
        ));

        match &self.output {
            Some(path) => {
                std::fs::write(path, &revealed.text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                ctx.status(format!("Message written to {}", path.display()));
            }
            None => println!("{}", revealed.text),
        }

        Ok(())
    }
}

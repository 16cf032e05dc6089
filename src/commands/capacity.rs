//! Capacity command - report how much text an image can hold.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stegtext::{load_pixels, max_message_bytes};

use super::{CommandExecutor, RunContext};

/// Show how much text an image can hold.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Cover image
    #[arg(short, long)]
    pub image: PathBuf,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, _ctx: &RunContext) -> Result<()> {
        let cover = load_pixels(&self.image)
            .with_context(|| format!("Failed to load image {}", self.image.display()))?;
        let bits = cover.capacity_bits();

        println!("Image:          {}x{}", cover.width(), cover.height());
        println!("Capacity:       {} bits", bits);
        println!("Max plaintext:  {} bytes", max_message_bytes(bits, false));
        println!("Max encrypted:  {} bytes", max_message_bytes(bits, true));

        Ok(())
    }
}

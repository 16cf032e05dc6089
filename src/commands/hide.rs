//! Hide command - embed a text message in an image.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use stegtext::{hide, load_pixels, max_message_bytes, required_bits_for, save_pixels, HEADER_BITS};

use super::{CommandExecutor, RunContext};

/// Hide a text message in an image.
///
/// The input can be any image format; the output must be .png or .bmp,
/// since lossy formats destroy the hidden bits.
#[derive(Args, Debug)]
pub struct HideCommand {
    /// Cover image
    #[arg(short, long)]
    pub image: PathBuf,

    /// Where to write the stego image (.png or .bmp)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Text message to hide (mutually exclusive with --file; reads stdin if neither is given)
    #[arg(short, long, conflicts_with = "file")]
    pub message: Option<String>,

    /// UTF-8 text file to hide (mutually exclusive with --message)
    #[arg(short, long, conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// Encrypt the message with this password (empty = no encryption)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Verbose output (shows frame size and remaining capacity)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for HideCommand {
    fn execute(&self, ctx: &RunContext) -> Result<()> {
        // Fail on the output path before doing any work
        stegtext::stego::codec::lossless_format(&self.output)?;

        let message = self.read_message(ctx)?;
        let password = self.password.as_deref();

        let cover = load_pixels(&self.image)
            .with_context(|| format!("Failed to load image {}", self.image.display()))?;

        ctx.status(format!(
            "Loaded {}x{} image ({} bits capacity)",
            cover.width(),
            cover.height(),
            cover.capacity_bits()
        ));

        let encrypted = password.is_some_and(|p| !p.is_empty());
        let required = required_bits_for(&message, password);
        if required > cover.capacity_bits() as u64 {
            ctx.status(format!(
                "Message needs {} bits; this image holds at most {} bytes{}",
                required,
                max_message_bytes(cover.capacity_bits(), encrypted),
                if encrypted { " when encrypted" } else { "" }
            ));
        }

        let capacity = cover.capacity_bits();
        let stego = hide(cover, &message, password).context("Failed to hide message")?;

        if self.verbose {
            ctx.status(format!(
                "Frame: {} bits ({} header + {} payload), {} of {} bits used",
                required,
                HEADER_BITS,
                required - HEADER_BITS as u64,
                required,
                capacity
            ));
        }

        save_pixels(&stego, &self.output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        ctx.status(format!(
            "Hid {} bytes{} in {}",
            message.len(),
            if encrypted { " (encrypted)" } else { "" },
            self.output.display()
        ));

        Ok(())
    }
}

impl HideCommand {
    fn read_message(&self, ctx: &RunContext) -> Result<String> {
        if let Some(message) = &self.message {
            return Ok(message.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read message file {}", path.display()));
        }

        ctx.status("Reading message from stdin (Ctrl+D to finish):");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn command(message: Option<&str>, file: Option<PathBuf>) -> HideCommand {
        HideCommand {
            image: PathBuf::from("cover.png"),
            output: PathBuf::from("stego.png"),
            message: message.map(str::to_string),
            file,
            password: None,
            verbose: false,
        }
    }

    fn quiet() -> RunContext {
        RunContext {
            quiet: true,
            ..RunContext::default()
        }
    }

    #[test]
    fn test_read_message_from_argument() {
        let cmd = command(Some("from args"), None);
        assert_eq!(cmd.read_message(&quiet()).unwrap(), "from args");
    }

    #[test]
    fn test_read_message_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line one\nline two\n").unwrap();

        let cmd = command(None, Some(file.path().to_path_buf()));
        assert_eq!(cmd.read_message(&quiet()).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_argument_takes_precedence_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "from file").unwrap();

        let cmd = command(Some("from args"), Some(file.path().to_path_buf()));
        assert_eq!(cmd.read_message(&quiet()).unwrap(), "from args");
    }

    #[test]
    fn test_missing_message_file() {
        let cmd = command(None, Some(PathBuf::from("/nonexistent/stegtext/message.txt")));
        assert!(cmd.read_message(&quiet()).is_err());
    }

    #[test]
    fn test_lossy_output_is_rejected_before_loading() {
        let mut cmd = command(Some("hi"), None);
        cmd.image = PathBuf::from("/nonexistent/cover.png");
        cmd.output = PathBuf::from("stego.jpg");

        let err = cmd.execute(&quiet()).unwrap_err();
        assert!(err.to_string().contains("lossy format"));
    }
}

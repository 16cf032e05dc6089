//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod capacity;
mod hide;
mod reveal;

pub use capacity::CapacityCommand;
pub use hide::HideCommand;
pub use reveal::RevealCommand;

use anyhow::Result;

use stegtext::Settings;

/// State shared by every command for one invocation.
#[derive(Debug, Default)]
pub struct RunContext {
    pub settings: Settings,
    /// Suppress status lines on stderr.
    pub quiet: bool,
}

impl RunContext {
    /// Prints a status line to stderr unless `--quiet` was given.
    pub fn status(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, ctx: &RunContext) -> Result<()>;
}

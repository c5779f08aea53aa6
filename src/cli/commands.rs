//! CLI command definitions using clap.
//!
//! - run: poll forever (the default)
//! - once: run a single cycle and print the outcome
//! - check: verify credentials and show effective settings

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// homework-bot - relays homework review status changes to Telegram
#[derive(Parser, Debug)]
#[command(name = "homework-bot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The command to run, `run` when none was given
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run { from_date: None })
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Poll until interrupted
    Run {
        /// Start from this unix timestamp instead of now
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Run exactly one cycle
    Once {
        /// Poll from this unix timestamp instead of now
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Check credentials and configuration without polling
    Check,
}

//! CLI module for homework-bot - command-line interface and subcommands.

pub mod commands;

pub use commands::{Cli, Commands};

//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the JWM configuration loader.
#[derive(Parser, Debug)]
#[command(
    name = "jwmrc",
    about = "Load, check and dump JWM configuration files",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file to load (defaults to $JWMRC, then ~/.jwmrc)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// File used when the configuration file cannot be opened
    #[arg(long, global = true)]
    pub fallback: Option<PathBuf>,

    /// Deepest chain of nested includes accepted
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub max_include_depth: Option<u32>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the configuration and report every problem found
    Check,
    /// Load the configuration and print it as JSON
    Dump,
    /// Print version information
    Version,
}

//! CLI argument definitions for cpak.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "cpak",
    version,
    about = "A dependency manager for native C/C++ packages",
    long_about = "cpak resolves C/C++ package dependencies from a registry of versioned \
                  manifests, unifies conflicting versions, and produces a build order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the project's dependencies and print a build order
    Resolve {
        /// Registry directory to resolve against
        #[arg(short, long)]
        registry: PathBuf,
        /// Project manifest path
        #[arg(short, long, default_value = "cpak.toml")]
        manifest: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Verify that every dependency resolves and a build order exists
    Check {
        /// Registry directory to resolve against
        #[arg(short, long)]
        registry: PathBuf,
        /// Project manifest path
        #[arg(short, long, default_value = "cpak.toml")]
        manifest: PathBuf,
    },

    /// Show which packages pull in a dependency
    Why {
        /// Package to explain: `group:artifact` or a full coordinate
        reference: String,
        /// Registry directory to resolve against
        #[arg(short, long)]
        registry: PathBuf,
        /// Project manifest path
        #[arg(short, long, default_value = "cpak.toml")]
        manifest: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}

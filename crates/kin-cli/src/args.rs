//! Command-line argument definitions for the Kin CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments select a subcommand (render a diagram,
//! export the guest list, or show dataset statistics) plus configuration
//! file selection and logging verbosity.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for the Kin family-tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the family tree diagram from a dataset file
    Render {
        /// Path to the input dataset (JSON)
        input: String,

        /// Path to the output file
        #[arg(short, long, default_value = "out.svg")]
        output: String,

        /// Output format
        #[arg(long, value_enum, default_value = "svg")]
        format: Format,
    },

    /// Export the guest list as CSV
    Guests {
        /// Path to the input dataset (JSON)
        input: String,

        /// Path to the output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Only include people marked as invited
        #[arg(long)]
        invited_only: bool,
    },

    /// Show dataset statistics
    Stats {
        /// Path to the input dataset (JSON)
        input: String,
    },
}

/// Diagram output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Scalable Vector Graphics document
    Svg,

    /// Graphviz DOT text
    Dot,
}

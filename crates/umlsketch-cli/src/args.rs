//! Command-line argument definitions for the umlsketch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity, and the chat prompt and palette modes.

use clap::Parser;

/// Command-line arguments for the umlsketch diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram (`.json` document or notation text)
    #[arg(
        help = "Path to the input file",
        required_unless_present = "palette"
    )]
    pub input: Option<String>,

    /// Path to the output file; `.json` writes a document, anything else notation
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write a chat prompt asking MESSAGE about the diagram instead of the diagram
    #[arg(long, value_name = "MESSAGE")]
    pub ask: Option<String>,

    /// List the node kinds of the palette and exit
    #[arg(long, conflicts_with_all = ["input", "output", "ask"])]
    pub palette: bool,
}

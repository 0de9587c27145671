//! Command-line argument definitions for the sadconv CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the root line
//! selection, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the SAD to OCELOT converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input SAD lattice file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output Python file (defaults to the input path with a
    /// `.py` extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Name of the line to expand (defaults to the last line declared)
    #[arg(short, long)]
    pub line: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

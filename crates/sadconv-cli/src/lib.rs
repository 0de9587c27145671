//! CLI logic for the sadconv lattice converter.
//!
//! This module contains the core CLI logic for the sadconv tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::PathBuf};

use log::{info, warn};

use sadconv::{Converter, SadConvError, warning::Severity};

/// Run the sadconv CLI application
///
/// This function converts the input SAD lattice file and writes the
/// resulting OCELOT Python module to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SadConvError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing and mapping errors
/// - Line resolution errors
pub fn run(args: &Args) -> Result<(), SadConvError> {
    let output_path = match &args.output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(&args.input).with_extension("py"),
    };

    info!(
        input_path = args.input,
        output_path = output_path.display().to_string();
        "Converting lattice"
    );

    // Load configuration; the command line overrides the config file
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(line) = &args.line {
        app_config.convert_mut().set_root_line(line);
    }

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Convert using the Converter API
    let converter = Converter::new(app_config);
    let conversion = converter.convert(&source)?;

    for record in &conversion.warnings {
        match record.severity() {
            Severity::Warning => warn!("{record}"),
            Severity::Note => info!("{record}"),
        }
    }
    if !conversion.unrecognized.is_empty() {
        warn!(
            count = conversion.unrecognized.len();
            "Unrecognized element types were skipped"
        );
        for item in &conversion.unrecognized {
            warn!("  - {item}");
        }
    }

    // Write output file
    fs::write(&output_path, conversion.output)?;

    info!(output_file = output_path.display().to_string(); "Lattice exported successfully");

    Ok(())
}

//! Error types for conversion operations.
//!
//! This module provides the main error type [`SadConvError`] which wraps
//! the error conditions that can occur while converting a lattice.

use std::io;

use thiserror::Error;

use sadconv_parser::ParseError;

use crate::export::ResolveError;

/// The main error type for conversion operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans. This provides detailed error information that can be used for rich
/// error reporting.
#[derive(Debug, Error)]
pub enum SadConvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("no usable element declarations found in the input")]
    EmptyLattice,
}

impl SadConvError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

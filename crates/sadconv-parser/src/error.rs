//! Error and diagnostic system for the SAD parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! for returning from the parsing lifecycle.
//!
//! # Example
//!
//! ```
//! # use sadconv_parser::error::{Diagnostic, ErrorCode};
//! # use sadconv_parser::Span;
//!
//! let span = Span::new(100..120);
//!
//! let diag = Diagnostic::error("element `B1` has negative length")
//!     .with_code(ErrorCode::E200)
//!     .with_label(span, "declared here")
//!     .with_help("element lengths must be zero or positive");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;

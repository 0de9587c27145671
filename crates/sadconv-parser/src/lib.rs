//! Parsing front end for SAD lattice description files.
//!
//! The crate turns SAD source text into the semantic model defined in
//! `sadconv-core` through three phases:
//!
//! 1. [`lexer::tokenize`] - error-recovering lexical analysis
//! 2. [`parser::parse_statements`] - statement parsing with recovery at
//!    statement boundaries
//! 3. [`elaborate::elaborate`] - semantic mapping to OCELOT element types
//!
//! The [`parse`] function runs the full pipeline. All phases collect
//! every diagnostic they can before failing, so one malformed declaration
//! never hides the next.

pub mod ast;
pub mod elaborate;
pub mod error;
pub mod lexer;
pub mod parser;
mod span;
pub mod tokens;

#[cfg(test)]
mod parser_tests;

pub use elaborate::ParseOutcome;
pub use error::{Diagnostic, ErrorCode, ParseError};
pub use span::{Span, Spanned};

/// Parse SAD source text into a mapped lattice.
///
/// # Example
///
/// ```
/// let outcome = sadconv_parser::parse(
///     "DRIFT D1 = (L 1.5);\n\
///      LINE RING = (D1 D1);\n",
/// )
/// .unwrap();
///
/// assert_eq!(outcome.lattice.elements().len(), 1);
/// assert!(outcome.lattice.root_line().is_some());
/// ```
pub fn parse(source: &str) -> Result<ParseOutcome, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let significant: Vec<_> = tokens
        .into_iter()
        .filter(|t| !t.token.is_trivia())
        .collect();
    let statements = parser::parse_statements(&significant)?;
    elaborate::elaborate(statements)
}

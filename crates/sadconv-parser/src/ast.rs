//! Parsed statements produced by the [`parser`](crate::parser).
//!
//! A SAD file is a flat sequence of statements. The parser keeps them in
//! source order; the [`elaborate`](crate::elaborate) pass folds them into
//! the semantic [`Lattice`](sadconv_core::lattice::Lattice).

use sadconv_core::element::{ElementDef, LineDef};

use crate::span::Spanned;

/// One parsed statement from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An element declaration such as `DRIFT D1 = (L 1.5);`.
    ///
    /// A single type keyword may declare several elements; each body
    /// becomes its own statement.
    Element(Spanned<ElementDef>),

    /// A `LINE` declaration.
    Line(LineDef),

    /// A declaration-shaped statement whose type keyword is not
    /// recognized, such as `OCT O1 = (...);`. The statement is skipped
    /// but its keyword and name are kept for reporting.
    Unrecognized { keyword: String, name: String },
}

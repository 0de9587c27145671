//! Structured conversion warnings.
//!
//! The SAD to OCELOT mapping is lossy for several element types, and the
//! converter keeps going through unrecognized declarations. Every such
//! event is recorded as a [`ConversionWarning`] and returned to the caller
//! alongside the lattice; the core never prints and never holds warnings in
//! process-wide state.

use std::fmt;

use crate::identifier::Id;

/// The severity of a conversion warning.
///
/// All warnings are non-fatal; severity only controls how prominently a
/// frontend should present the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Information was lost or a simplification was applied.
    Warning,
    /// Advisory only, such as a redeclared name being overwritten.
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A single structured warning record.
///
/// Carries the severity, the element or line the warning concerns (when
/// there is one), and a human-readable message. Presentation is left
/// entirely to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionWarning {
    severity: Severity,
    element: Option<Id>,
    message: String,
}

impl ConversionWarning {
    /// Create a warning-severity record about a specific element.
    pub fn warning(element: Id, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            element: Some(element),
            message: message.into(),
        }
    }

    /// Create a note-severity record about a specific element or line.
    pub fn note(element: Id, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            element: Some(element),
            message: message.into(),
        }
    }

    /// The severity of this record.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The element or line this record concerns.
    pub fn element(&self) -> Option<Id> {
        self.element
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.element {
            Some(element) => write!(f, "{}: {}: {}", self.severity, element, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

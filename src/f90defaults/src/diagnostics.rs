// f90defaults/src/diagnostics.rs

//! Recoverable problems found while extracting defaults.
//!
//! A malformed declaration or an unresolvable namelist member never aborts
//! extraction. It is reported to a caller-supplied [`DiagnosticSink`] and the
//! affected variable is simply absent, or marked as having no default.

use log::Level;
use std::fmt;

/// A per-declaration or per-member problem that extraction recovered from.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A type declaration (or one entity of it) could not be interpreted.
    DeclarationSkipped {
        line: usize,
        text: String,
        reason: String,
    },

    /// A namelist member has no declaration, or a declaration without an
    /// initializer.
    UnresolvedDefault { group: String, variable: String },

    /// An array constructor was truncated; its default was rebuilt from the
    /// first element found.
    MalformedArrayConstructor {
        variable: String,
        line: usize,
        recovered: Option<String>,
    },

    /// A dimension specifier describes more elements than a template holds;
    /// the variable was treated as a scalar.
    OversizedArray {
        variable: String,
        line: usize,
        size: usize,
    },
}

impl Diagnostic {
    /// Log level this diagnostic is reported at.
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::DeclarationSkipped { .. } => Level::Warn,
            Diagnostic::UnresolvedDefault { .. } => Level::Info,
            Diagnostic::MalformedArrayConstructor { .. } => Level::Warn,
            Diagnostic::OversizedArray { .. } => Level::Warn,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DeclarationSkipped { line, text, reason } => {
                write!(f, "line {}: skipped declaration '{}': {}", line, text, reason)
            }
            Diagnostic::UnresolvedDefault { group, variable } => {
                write!(f, "{}%{}: no default value found", group, variable)
            }
            Diagnostic::MalformedArrayConstructor {
                variable,
                line,
                recovered,
            } => match recovered {
                Some(value) => write!(
                    f,
                    "line {}: malformed array constructor for '{}', recovered as {}",
                    line, variable, value
                ),
                None => write!(
                    f,
                    "line {}: malformed array constructor for '{}', no element recovered",
                    line, variable
                ),
            },
            Diagnostic::OversizedArray {
                variable,
                line,
                size,
            } => write!(
                f,
                "line {}: '{}' declares {} elements, treated as a scalar",
                line, variable, size
            ),
        }
    }
}

/// Receiver for diagnostics emitted during a single extraction call.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that logs every diagnostic through the `log` facade and keeps it for
/// later inspection.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped_declarations(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::DeclarationSkipped { .. }))
            .count()
    }

    pub fn unresolved_defaults(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnresolvedDefault { .. }))
            .count()
    }

    pub fn malformed_arrays(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedArrayConstructor { .. }))
            .count()
    }

    pub fn oversized_arrays(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::OversizedArray { .. }))
            .count()
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::log!(diagnostic.level(), "{}", diagnostic);
        self.entries.push(diagnostic);
    }
}

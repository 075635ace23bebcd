// f90defaults/src/error.rs

//! Error types for namelist default extraction and template handling.
//!
//! Only failures that abort a whole file (or a whole template) are errors.
//! Problems local to a single declaration or namelist member are reported
//! as [`crate::diagnostics::Diagnostic`]s and never surface here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for f90defaults operations.
pub type Result<T> = std::result::Result<T, F90DefaultsError>;

/// Errors that abort processing of a source file, namelist file or template.
#[derive(Error, Debug)]
pub enum F90DefaultsError {
    /// The Fortran source file to extract from does not exist.
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The tree builder could not produce a declaration tree.
    #[error("Syntax tree unavailable for {source_name}: {message}")]
    SyntaxTreeUnavailable {
        source_name: String,
        message: String,
    },

    /// Lexical or structural error while reading namelist text.
    #[error("Namelist read error at line {line}, column {column}: {message}")]
    Read {
        message: String,
        line: usize,
        column: usize,
    },

    /// A template value nests an array inside an array.
    #[error("Nested array in template value for {group}%{variable}")]
    NestedArray { group: String, variable: String },

    /// Refusing to overwrite an existing output file.
    #[error("File already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl F90DefaultsError {
    /// Create a new syntax-tree error for the named source.
    pub fn syntax_tree<S: Into<String>, M: Into<String>>(source_name: S, message: M) -> Self {
        F90DefaultsError::SyntaxTreeUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a new namelist read error at a position.
    pub fn read_error<S: Into<String>>(message: S, line: usize, column: usize) -> Self {
        F90DefaultsError::Read {
            message: message.into(),
            line,
            column,
        }
    }

    /// Whether this error is scoped to a single file and the caller may move on
    /// to the next one.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            F90DefaultsError::SourceNotFound(_)
                | F90DefaultsError::SyntaxTreeUnavailable { .. }
                | F90DefaultsError::Read { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = F90DefaultsError::SourceNotFound(PathBuf::from("missing.f90"));
        assert_eq!(err.to_string(), "Source file not found: missing.f90");

        let err = F90DefaultsError::syntax_tree("model_mod.f90", "unterminated character literal");
        assert_eq!(
            err.to_string(),
            "Syntax tree unavailable for model_mod.f90: unterminated character literal"
        );

        let err = F90DefaultsError::read_error("expected group name", 3, 2);
        assert_eq!(
            err.to_string(),
            "Namelist read error at line 3, column 2: expected group name"
        );
    }

    #[test]
    fn test_per_file_classification() {
        assert!(F90DefaultsError::SourceNotFound(PathBuf::from("x")).is_per_file());
        assert!(F90DefaultsError::syntax_tree("x", "y").is_per_file());
        assert!(!F90DefaultsError::FileAlreadyExists(PathBuf::from("x")).is_per_file());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: F90DefaultsError = io_err.into();
        assert!(matches!(err, F90DefaultsError::Io(_)));
    }
}

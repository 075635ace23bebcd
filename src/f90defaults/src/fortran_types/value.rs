// f90defaults/src/fortran_types/value.rs

//! Core FortranValue enum and basic operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that can appear on the right-hand side of a namelist assignment.
///
/// Arrays are flat: an `Array` element is never itself an `Array`. Values
/// produced by [`super::parse_literal`] always respect this; values coming
/// from deserialized templates are checked with [`FortranValue::has_nested_array`].
///
/// Variant order matters for `#[serde(untagged)]`: a YAML/JSON `true` must
/// become `Logical` and `20` must become `Integer` before `Real` is tried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FortranValue {
    /// Logical (boolean) value
    Logical(bool),

    /// Integer value
    Integer(i64),

    /// Real (floating-point) value
    Real(f64),

    /// Character string, without delimiters
    Character(String),

    /// Flat array of values
    Array(Vec<FortranValue>),
}

impl FortranValue {
    /// Create a new character value.
    pub fn character<S: Into<String>>(value: S) -> Self {
        FortranValue::Character(value.into())
    }

    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            FortranValue::Logical(_) => "logical",
            FortranValue::Integer(_) => "integer",
            FortranValue::Real(_) => "real",
            FortranValue::Character(_) => "character",
            FortranValue::Array(_) => "array",
        }
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, FortranValue::Array(_))
    }

    /// Whether an array element is itself an array.
    pub fn has_nested_array(&self) -> bool {
        match self {
            FortranValue::Array(items) => items.iter().any(FortranValue::is_array),
            _ => false,
        }
    }

    /// Collapse nested arrays into a single flat array, preserving element order.
    pub fn flattened(&self) -> FortranValue {
        match self {
            FortranValue::Array(items) => {
                let mut flat = Vec::with_capacity(items.len());
                collect_flat(items, &mut flat);
                FortranValue::Array(flat)
            }
            other => other.clone(),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FortranValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to reals.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            FortranValue::Real(f) => Some(*f),
            FortranValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<bool> {
        match self {
            FortranValue::Logical(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_character(&self) -> Option<&str> {
        match self {
            FortranValue::Character(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FortranValue]> {
        match self {
            FortranValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

fn collect_flat(items: &[FortranValue], out: &mut Vec<FortranValue>) {
    for item in items {
        match item {
            FortranValue::Array(inner) => collect_flat(inner, out),
            scalar => out.push(scalar.clone()),
        }
    }
}

impl fmt::Display for FortranValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::render_literal(self))
    }
}

// f90defaults/src/fortran_types/mod.rs

//! Fortran literal values and the coercion between literal text and
//! structured values.

pub mod conversion;
pub mod formatting;
pub mod parsing;
pub mod value;


pub use formatting::render_literal;
pub use parsing::{
    clean_default_value, find_top_level, parse_literal, parse_number, split_top_level,
    split_unquoted, strip_delimiters,
};
pub use value::FortranValue;

/// Largest array, in elements, that a declaration or a namelist assignment may
/// describe. Larger extents are rejected rather than materialized.
pub const MAX_ARRAY_ELEMENTS: usize = 100_000;

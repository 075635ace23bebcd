// f90defaults/src/fortran_types/formatting.rs

//! Rendering of FortranValue as namelist literal text.

use super::value::FortranValue;

/// Render a value as namelist literal text.
///
/// This is the inverse of [`super::parse_literal`]: for every finite value
/// with a flat array of at least two elements, parsing the rendered text
/// yields the original value. Nested arrays are flattened so the output is
/// always a plain comma-joined list.
pub fn render_literal(value: &FortranValue) -> String {
    match value {
        FortranValue::Logical(b) => format_logical(*b),
        FortranValue::Integer(i) => i.to_string(),
        FortranValue::Real(f) => format_real(*f),
        FortranValue::Character(s) => format_string(s),
        FortranValue::Array(_) => format_array(&value.flattened()),
    }
}

fn format_logical(value: bool) -> String {
    if value { ".true." } else { ".false." }.to_string()
}

fn format_real(value: f64) -> String {
    if value.is_infinite() {
        if value > 0.0 {
            "+inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else if value.is_nan() {
        "nan".to_string()
    } else {
        // A real must keep its decimal point, otherwise it reads back as an integer
        let s = value.to_string();
        if s.contains('.') || s.contains('e') || s.contains('E') {
            s
        } else {
            format!("{}.0", s)
        }
    }
}

fn format_string(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    format!("'{}'", value.replace('\'', "''"))
}

fn format_array(value: &FortranValue) -> String {
    match value {
        FortranValue::Array(items) => items
            .iter()
            .map(render_literal)
            .collect::<Vec<_>>()
            .join(", "),
        scalar => render_literal(scalar),
    }
}

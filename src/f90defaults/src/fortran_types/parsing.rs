// f90defaults/src/fortran_types/parsing.rs

//! String parsing functions for Fortran literal text.

use super::value::FortranValue;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A unary minus separated from its numeric operand by whitespace, as left
    /// behind by source-text reconstruction: `- 42`, `- 3.14`, `- 1.23e-4`.
    static ref DETACHED_MINUS: Regex =
        Regex::new(r"-\s+(\d+(?:\.\d*)?(?:[eEdD][+-]?\d+)?)").unwrap();

    /// Kind suffixes following a numeric literal: `1.0_r8`, `123_digits12`.
    static ref KIND_SUFFIX: Regex =
        Regex::new(r"(?i)([0-9.])_(?:r[0-9]+|digits[0-9]+)\b").unwrap();

    /// Real literals using the Fortran `d` exponent marker: `1.0d0`, `4184.d0`, `1d-5`.
    static ref DOUBLE_EXPONENT: Regex =
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)[dD][+-]?\d+$").unwrap();
}

/// Parse one namelist literal token, or a comma-joined list of them.
///
/// Never fails: anything that is not a logical, a quoted string or a number
/// comes back verbatim as a `Character`.
///
/// ```
/// use f90defaults::{parse_literal, FortranValue};
///
/// assert_eq!(parse_literal(".TRUE."), FortranValue::Logical(true));
/// assert_eq!(
///     parse_literal("1, 2, 3"),
///     FortranValue::Array(vec![1i64.into(), 2i64.into(), 3i64.into()])
/// );
/// ```
pub fn parse_literal(token: &str) -> FortranValue {
    let trimmed = token.trim();

    if trimmed.is_empty() || trimmed == "''" {
        return FortranValue::Character(String::new());
    }

    match trimmed.to_lowercase().as_str() {
        ".true." | "t" => return FortranValue::Logical(true),
        ".false." | "f" => return FortranValue::Logical(false),
        _ => {}
    }

    let parts = split_unquoted(trimmed, ',');
    if parts.len() > 1 {
        return FortranValue::Array(parts.into_iter().map(parse_literal).collect());
    }

    if let Some(inner) = strip_delimiters(trimmed) {
        return FortranValue::Character(inner);
    }

    parse_number(trimmed).unwrap_or_else(|| FortranValue::Character(trimmed.to_string()))
}

/// Parse a bare numeric literal. Text with a decimal point or an exponent
/// marker is real, everything else is tried as an integer.
pub fn parse_number(text: &str) -> Option<FortranValue> {
    if DOUBLE_EXPONENT.is_match(text) {
        let normalized = text.replace(['d', 'D'], "e");
        return normalized.parse::<f64>().ok().map(FortranValue::Real);
    }

    if text.contains('.') || text.contains('e') || text.contains('E') {
        text.parse::<f64>().ok().map(FortranValue::Real)
    } else {
        text.parse::<i64>().ok().map(FortranValue::Integer)
    }
}

/// Normalize a raw default literal before coercion: re-attach detached unary
/// minus signs and drop numeric kind suffixes.
///
/// Text inside quoted strings is left untouched.
///
/// ```
/// use f90defaults::clean_default_value;
///
/// assert_eq!(clean_default_value("1.0_r8"), "1.0");
/// assert_eq!(clean_default_value("- 1.23e-4"), "-1.23e-4");
/// ```
pub fn clean_default_value(text: &str) -> String {
    map_unquoted(text, |segment| {
        let joined = DETACHED_MINUS.replace_all(segment, "-$1");
        KIND_SUFFIX.replace_all(&joined, "$1").into_owned()
    })
}

/// If `text` is wrapped in matching single or double quotes, return the
/// inner text with doubled delimiters collapsed.
pub fn strip_delimiters(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;

    if (first == '\'' || first == '"') && first == last {
        let inner = &text[1..text.len() - 1];
        let doubled: String = [first, first].iter().collect();
        Some(inner.replace(&doubled, &first.to_string()))
    } else {
        None
    }
}

/// Split on `sep` wherever it occurs outside a quoted string.
///
/// Doubled quotes (`'it''s'`) toggle the quote state twice and so stay inside
/// the string.
pub fn split_unquoted(text: &str, sep: char) -> Vec<&str> {
    split_with_depth(text, sep, false)
}

/// Split on `sep` wherever it occurs outside quotes and outside any
/// parentheses or brackets. Used for entity and attribute lists, where
/// `a(2) = (/ 1, 2 /), b` must split into two entities.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    split_with_depth(text, sep, true)
}

/// Byte offset of the first `target` outside quotes and parentheses.
pub fn find_top_level(text: &str, target: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut depth = 0i32;

    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth -= 1,
                _ if depth == 0 && text[idx..].starts_with(target) => return Some(idx),
                _ => {}
            },
        }
    }

    None
}

fn split_with_depth(text: &str, sep: char, track_parens: bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0i32;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' if track_parens => depth += 1,
                ')' | ']' if track_parens => depth -= 1,
                _ if c == sep && depth <= 0 => {
                    parts.push(&text[start..idx]);
                    start = idx + c.len_utf8();
                }
                _ => {}
            },
        }
    }

    parts.push(&text[start..]);
    parts
}

/// Apply `f` to every run of text outside quoted strings.
fn map_unquoted<F>(text: &str, f: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut output = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut run_start = 0;

    for (idx, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => {
                output.push_str(&text[run_start..idx + 1]);
                run_start = idx + 1;
                quote = None;
            }
            Some(_) => {}
            None if c == '\'' || c == '"' => {
                output.push_str(&f(&text[run_start..idx]));
                run_start = idx;
                quote = Some(c);
            }
            None => {}
        }
    }

    let tail = &text[run_start..];
    if quote.is_some() {
        output.push_str(tail);
    } else {
        output.push_str(&f(tail));
    }
    output
}

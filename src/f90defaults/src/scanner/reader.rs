// f90defaults/src/scanner/reader.rs

//! Read namelist text into a [`NamelistTemplate`].
//!
//! Supports `&group ... /` and `$group ... $end` blocks, `name = values`
//! assignments separated by commas, whitespace or newlines, `n*value`
//! repeats and single-index assignments such as `x(3) = 1.0`. Text outside
//! groups is ignored, as Fortran itself does.

use super::scan;
use super::token::{Token, TokenType};
use crate::error::{F90DefaultsError, Result};
use crate::fortran_types::{parse_number, strip_delimiters, FortranValue, MAX_ARRAY_ELEMENTS};
use crate::namelist::{NamelistGroup, NamelistTemplate};
use log::debug;

/// Parse namelist text into an ordered template.
pub fn read_template(text: &str) -> Result<NamelistTemplate> {
    let tokens = scan(text)?;
    Reader::new(tokens).parse()
}

struct Reader {
    tokens: Vec<Token>,
    pos: usize,
}

impl Reader {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<NamelistTemplate> {
        let mut template = NamelistTemplate::new();

        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::Eof => break,
                TokenType::GroupStart | TokenType::GroupStartAlt => {
                    let name = self.advance();
                    if name.token_type != TokenType::Identifier || is_end_marker(&name) {
                        return Err(unexpected(&name, "a group name"));
                    }
                    debug!("Reading namelist group '{}'", name.lexeme);
                    let group = template.insert_group(&name.lexeme);
                    self.parse_group(group, &token)?;
                }
                _ => {}
            }
        }

        Ok(template)
    }

    fn parse_group(&mut self, group: &mut NamelistGroup, opening: &Token) -> Result<()> {
        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::GroupEnd => return Ok(()),
                TokenType::GroupStart | TokenType::GroupStartAlt if is_end_marker(self.peek()) => {
                    self.advance();
                    return Ok(());
                }
                TokenType::Eof => {
                    return Err(F90DefaultsError::read_error(
                        "Namelist group is never closed",
                        opening.line,
                        opening.column,
                    ))
                }
                TokenType::Comma => {}
                _ if token.is_name() && self.at_assignment() => {
                    let index = self.parse_index()?;
                    self.expect(TokenType::Assign, "'='")?;
                    let values = self.parse_values()?;
                    let offset = index.map_or(0, |start| start - 1);
                    if offset.checked_add(values.len()).map_or(true, |end| end > MAX_ARRAY_ELEMENTS) {
                        return Err(too_many_elements(&token));
                    }
                    assign(group, &token.lexeme, index, values);
                }
                _ => return Err(unexpected(&token, "a variable assignment")),
            }
        }
    }

    /// Optional `(i)` or `(lo:hi)` after a variable name; returns the
    /// 1-based start index when it is a plain integer.
    fn parse_index(&mut self) -> Result<Option<usize>> {
        if self.peek().token_type != TokenType::LeftParen {
            return Ok(None);
        }
        let open = self.advance();

        let mut parts = Vec::new();
        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::RightParen => break,
                TokenType::Eof => return Err(unexpected(&token, "')'")),
                _ => parts.push(token),
            }
        }

        let start = match parts.first() {
            Some(first) if first.token_type == TokenType::Integer => first.lexeme.parse::<usize>().ok(),
            _ => None,
        };
        let simple = parts.len() == 1
            || (parts.len() >= 2 && parts[1].token_type == TokenType::Colon);

        match start {
            Some(start) if start >= 1 && simple => Ok(Some(start)),
            _ => {
                debug!(
                    "line {}: index not supported, assigning whole variable",
                    open.line
                );
                Ok(None)
            }
        }
    }

    /// Values up to the next assignment or the end of the group, with
    /// `n*value` repeats expanded. A repeat without a value (`n*`) is a run
    /// of null values and contributes nothing.
    fn parse_values(&mut self) -> Result<Vec<FortranValue>> {
        let mut values = Vec::new();

        loop {
            let token = self.peek().clone();
            match token.token_type {
                TokenType::GroupEnd | TokenType::GroupStart | TokenType::GroupStartAlt | TokenType::Eof => break,
                TokenType::Comma => {
                    self.advance();
                }
                _ if token.is_name() && self.at_assignment_from(self.pos) => break,
                TokenType::Integer if self.peek_at(1).token_type == TokenType::Star => {
                    self.advance();
                    self.advance();
                    let count = token
                        .lexeme
                        .parse::<usize>()
                        .map_err(|_| unexpected(&token, "a repeat count"))?;
                    let next = self.peek().clone();
                    if next.is_value() && !(next.is_name() && self.at_assignment_from(self.pos)) {
                        if values.len().saturating_add(count) > MAX_ARRAY_ELEMENTS {
                            return Err(too_many_elements(&token));
                        }
                        self.advance();
                        let value = token_value(&next);
                        values.extend(std::iter::repeat(value).take(count));
                    }
                }
                _ if token.is_value() => {
                    self.advance();
                    values.push(token_value(&token));
                }
                _ => return Err(unexpected(&token, "a value")),
            }
        }

        Ok(values)
    }

    fn at_assignment(&self) -> bool {
        // The name token has already been consumed.
        self.at_assignment_from(self.pos - 1)
    }

    /// Whether the name token at `pos` is followed by `=` or by an index.
    fn at_assignment_from(&self, pos: usize) -> bool {
        matches!(
            self.token_at(pos + 1).token_type,
            TokenType::Assign | TokenType::LeftParen
        )
    }

    fn expect(&mut self, token_type: TokenType, what: &str) -> Result<Token> {
        let token = self.advance();
        if token.token_type == token_type {
            Ok(token)
        } else {
            Err(unexpected(&token, what))
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.token_at(self.pos).clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn peek(&self) -> &Token {
        self.token_at(self.pos)
    }

    fn peek_at(&self, distance: usize) -> &Token {
        self.token_at(self.pos + distance)
    }

    /// Token at `pos`, or the trailing `Eof` past the end.
    fn token_at(&self, pos: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[pos.min(last)]
    }
}

fn is_end_marker(token: &Token) -> bool {
    token.token_type == TokenType::Identifier && token.lexeme.eq_ignore_ascii_case("end")
}

fn unexpected(token: &Token, expected: &str) -> F90DefaultsError {
    let found = match token.token_type {
        TokenType::Eof => "end of input".to_string(),
        _ => format!("'{}'", token.lexeme),
    };
    F90DefaultsError::read_error(
        format!("expected {}, found {}", expected, found),
        token.line,
        token.column,
    )
}

fn too_many_elements(token: &Token) -> F90DefaultsError {
    F90DefaultsError::read_error(
        format!("more than {} array elements", MAX_ARRAY_ELEMENTS),
        token.line,
        token.column,
    )
}

fn token_value(token: &Token) -> FortranValue {
    match token.token_type {
        TokenType::Logical => {
            let lower = token.lexeme.to_lowercase();
            FortranValue::Logical(lower.trim_start_matches('.').starts_with('t'))
        }
        TokenType::String => {
            let text = strip_delimiters(&token.lexeme).unwrap_or_default();
            if text.trim().is_empty() {
                FortranValue::Character(String::new())
            } else {
                FortranValue::Character(text)
            }
        }
        TokenType::Integer | TokenType::Real => parse_number(&token.lexeme)
            .unwrap_or_else(|| FortranValue::Character(token.lexeme.clone())),
        _ => FortranValue::Character(token.lexeme.clone()),
    }
}

/// Store an assignment's values. An empty value list is the "no default"
/// marker; a single value is a scalar.
///
/// An indexed assignment writes into the existing value starting at the
/// given 1-based position, growing it as needed. Gaps are filled with the
/// first assigned value.
fn assign(group: &mut NamelistGroup, name: &str, index: Option<usize>, values: Vec<FortranValue>) {
    let start = match index {
        Some(start) if !values.is_empty() => start,
        _ => {
            group.insert_setting(name, collapse(values));
            return;
        }
    };

    let mut elements = match group.setting(name) {
        Some(Some(FortranValue::Array(items))) => items.clone(),
        Some(Some(scalar)) => vec![scalar.clone()],
        _ => Vec::new(),
    };

    let offset = start - 1;
    let end = offset + values.len();
    if elements.len() < end {
        elements.resize(end, values[0].clone());
    }
    for (slot, value) in elements[offset..end].iter_mut().zip(values) {
        *slot = value;
    }

    group.insert_setting(name, collapse(elements));
}

fn collapse(mut values: Vec<FortranValue>) -> Option<FortranValue> {
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(FortranValue::Array(values)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_index_is_an_error() {
        let err = read_template("&g\n x(99999999999999) = 1\n/\n").unwrap_err();
        assert!(matches!(err, F90DefaultsError::Read { line: 2, column: 2, .. }));
    }

    #[test]
    fn test_huge_repeat_count_is_an_error() {
        let err = read_template("&g\n x = 1, 99999999999*0.5\n/\n").unwrap_err();
        assert!(matches!(err, F90DefaultsError::Read { line: 2, .. }));

        let template = read_template("&g\n x(3) = 2*0.5\n/\n").unwrap();
        assert_eq!(
            template.get_group("g").unwrap().get("x"),
            Some(&FortranValue::from(vec![0.5, 0.5, 0.5, 0.5]))
        );
    }

    #[test]
    fn test_read_simple_groups() {
        let text = "\
&filter_nml
   ens_size = 20,
   cutoff = 0.2
   output_mean = .true.
   obs_sequence_in_name = 'obs_seq.out'
/

&model_nml
   template_file = \"wrfinput_d01\" /
";
        let template = read_template(text).unwrap();

        assert_eq!(template.group_names().collect::<Vec<_>>(), vec!["filter_nml", "model_nml"]);
        let filter = template.get_group("filter_nml").unwrap();
        assert_eq!(filter.get_i64("ens_size"), Some(20));
        assert_eq!(filter.get_f64("cutoff"), Some(0.2));
        assert_eq!(filter.get_bool("output_mean"), Some(true));
        assert_eq!(filter.get_string("obs_sequence_in_name"), Some("obs_seq.out"));
        assert_eq!(
            template.get_group("model_nml").unwrap().get_string("template_file"),
            Some("wrfinput_d01")
        );
    }

    #[test]
    fn test_lists_repeats_and_comments() {
        let text = "\
&filter_nml
   inf_flavor = 2, 0        ! prior, posterior
   inf_initial = 2*1.0
   assimilate_these_obs_types = 'RADIOSONDE_TEMPERATURE',
                                'RADIOSONDE_U_WIND_COMPONENT'
   stages_to_write = 'preassim', 'output'
/
";
        let template = read_template(text).unwrap();
        let filter = template.get_group("filter_nml").unwrap();

        assert_eq!(filter.get("inf_flavor"), Some(&FortranValue::from(vec![2i64, 0])));
        assert_eq!(filter.get("inf_initial"), Some(&FortranValue::from(vec![1.0, 1.0])));
        assert_eq!(
            filter.get("assimilate_these_obs_types"),
            Some(&FortranValue::from(vec![
                "RADIOSONDE_TEMPERATURE",
                "RADIOSONDE_U_WIND_COMPONENT"
            ]))
        );
        assert_eq!(filter.len(), 4);
    }

    #[test]
    fn test_empty_values_and_blank_strings() {
        let text = "&g\n a = \n b = ' '\n c = '', t = .f.\n/";
        let template = read_template(text).unwrap();
        let group = template.get_group("g").unwrap();

        assert!(group.is_missing("a"));
        assert_eq!(group.get_string("b"), Some(""));
        assert_eq!(group.get_string("c"), Some(""));
        assert_eq!(group.get_bool("t"), Some(false));
    }

    #[test]
    fn test_dollar_groups_and_case() {
        let text = "$FILTER_NML ENS_SIZE = 40 $END\n$other x = 'it''s' $end";
        let template = read_template(text).unwrap();

        assert_eq!(template.get_group("filter_nml").unwrap().get_i64("ens_size"), Some(40));
        assert_eq!(template.get_group("other").unwrap().get_string("x"), Some("it's"));
    }

    #[test]
    fn test_indexed_assignment() {
        let text = "&g\n x = 1, 2, 3\n x(2) = 9\n y(3) = 5\n z(1:2) = 7, 8\n/";
        let template = read_template(text).unwrap();
        let group = template.get_group("g").unwrap();

        assert_eq!(group.get("x"), Some(&FortranValue::from(vec![1i64, 9, 3])));
        assert_eq!(group.get("y"), Some(&FortranValue::from(vec![5i64, 5, 5])));
        assert_eq!(group.get("z"), Some(&FortranValue::from(vec![7i64, 8])));
    }

    #[test]
    fn test_text_between_groups_is_ignored() {
        let text = "header text\n&g x = 1 /\ntrailing notes";
        let template = read_template(text).unwrap();
        assert_eq!(template.len(), 1);
    }

    #[test]
    fn test_unclosed_group_is_an_error() {
        let err = read_template("&g\n x = 1\n").unwrap_err();
        match err {
            F90DefaultsError::Read { line, column, .. } => assert_eq!((line, column), (1, 1)),
            other => panic!("expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_token_is_an_error() {
        let err = read_template("&g\n x = 1\n = 2\n/").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}

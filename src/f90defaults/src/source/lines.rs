// f90defaults/src/source/lines.rs

//! Free-form source text to logical statements.

use crate::error::{F90DefaultsError, Result};
use crate::fortran_types::split_unquoted;

/// One statement after continuation joining, comment stripping and `;`
/// splitting.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Line on which the statement starts (1-based).
    pub line: usize,
    pub text: String,
}

/// Split free-form source into logical statements.
///
/// A trailing `&` continues the statement on the next line; a leading `&` on
/// the continuation line is optional and, when present, joins the two parts
/// without a space. Blank and comment-only lines inside a continuation are
/// skipped.
pub fn logical_statements(source: &str, source_name: &str) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    let mut pending = String::new();
    let mut pending_line = 0;
    let mut quote: Option<char> = None;
    let mut continuing = false;

    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;

        let (text, joined) = if continuing {
            let trimmed = raw.trim_start();
            match trimmed.strip_prefix('&') {
                Some(rest) => (rest, true),
                None if quote.is_some() => (raw, true),
                None => (trimmed, false),
            }
        } else {
            pending_line = number;
            (raw, true)
        };

        let code = strip_comment(text, &mut quote).trim_end();
        if continuing && quote.is_none() && code.trim().is_empty() {
            continue;
        }
        if continuing && !joined {
            pending.push(' ');
        }

        if let Some(body) = code.strip_suffix('&') {
            pending.push_str(body);
            continuing = true;
            continue;
        }
        continuing = false;

        if quote.is_some() {
            return Err(unterminated(source_name, pending_line));
        }

        pending.push_str(code);
        push_statements(&mut statements, &pending, pending_line);
        pending.clear();
    }

    if quote.is_some() {
        return Err(unterminated(source_name, pending_line));
    }
    push_statements(&mut statements, &pending, pending_line);

    Ok(statements)
}

fn unterminated(source_name: &str, line: usize) -> F90DefaultsError {
    F90DefaultsError::syntax_tree(
        source_name,
        format!("unterminated character literal in statement starting on line {}", line),
    )
}

fn push_statements(statements: &mut Vec<Statement>, text: &str, line: usize) {
    for part in split_unquoted(text, ';') {
        let part = part.trim();
        if !part.is_empty() {
            statements.push(Statement {
                line,
                text: part.to_string(),
            });
        }
    }
}

/// Cut `text` at the first `!` outside a character literal. `quote` carries
/// the open delimiter, if any, across continuation lines.
fn strip_comment<'a>(text: &'a str, quote: &mut Option<char>) -> &'a str {
    for (idx, c) in text.char_indices() {
        match *quote {
            Some(q) if c == q => *quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => *quote = Some(c),
                '!' => return &text[..idx],
                _ => {}
            },
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        logical_statements(source, "test.f90")
            .unwrap()
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_comments_are_stripped_outside_quotes() {
        assert_eq!(
            texts("integer :: n = 3 ! count\ncharacter(len=8) :: s = 'a!b' ! note\n! whole line\n"),
            vec!["integer :: n = 3", "character(len=8) :: s = 'a!b'"]
        );
    }

    #[test]
    fn test_continuations_are_joined() {
        let source = "\
real(r8) :: weights(3) = (/ 1.0_r8, &
                            2.0_r8, &
   ! a comment inside the continuation

                            3.0_r8 /)
namelist /filter_nml/ ens_&
    &size, cutoff
";
        assert_eq!(
            texts(source),
            vec![
                "real(r8) :: weights(3) = (/ 1.0_r8,  2.0_r8,  3.0_r8 /)",
                "namelist /filter_nml/ ens_size, cutoff",
            ]
        );
    }

    #[test]
    fn test_continued_character_literal() {
        let source = "character(len=64) :: msg = 'first half &\n    &second half'\n";
        assert_eq!(
            texts(source),
            vec!["character(len=64) :: msg = 'first half second half'"]
        );
    }

    #[test]
    fn test_semicolons_split_statements() {
        let statements = logical_statements("integer :: a; integer :: b = 2\nreal :: c\n", "t").unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[1].text, "integer :: b = 2");
        assert_eq!(statements[1].line, 1);
        assert_eq!(statements[2].line, 2);
    }

    #[test]
    fn test_unterminated_literal_is_an_error() {
        let err = logical_statements("integer :: a\ncharacter :: s = 'oops\n", "bad.f90").unwrap_err();
        assert!(matches!(err, F90DefaultsError::SyntaxTreeUnavailable { .. }));
        assert!(err.to_string().contains("line 2"));
    }
}

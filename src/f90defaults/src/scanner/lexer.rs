// f90defaults/src/scanner/lexer.rs

//! Low-level lexical analysis for namelist tokens.

use super::token::{Token, TokenType};
use crate::error::{F90DefaultsError, Result};
use crate::fortran_types::{parse_number, FortranValue};

/// Low-level lexer for namelist tokens. Whitespace separates tokens and is
/// never emitted.
pub struct Lexer {
    input: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given input.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan every token up to and including `Eof`, dropping comments.
    pub fn scan_all(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token()?;
            match token.token_type {
                TokenType::Comment => continue,
                TokenType::Eof => {
                    tokens.push(token);
                    break;
                }
                _ => tokens.push(token),
            }
        }

        Ok(tokens)
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }

        let start_line = self.line;
        let start_column = self.column;

        if self.is_at_end() {
            return Ok(Token::new(TokenType::Eof, String::new(), start_line, start_column));
        }

        let start = self.current;
        let c = self.advance();

        let token_type = match c {
            '&' => TokenType::GroupStart,
            '$' => TokenType::GroupStartAlt,
            '/' => TokenType::GroupEnd,
            '=' => TokenType::Assign,
            ',' => TokenType::Comma,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            ':' => TokenType::Colon,
            '*' => TokenType::Star,
            '!' => return Ok(self.scan_comment(start_line, start_column)),
            '\'' | '"' => return self.scan_string(c, start_line, start_column),
            _ if is_word_char(c) => return Ok(self.scan_word(start_line, start_column)),
            _ => TokenType::Invalid,
        };

        let lexeme: String = self.input[start..self.current].iter().collect();
        Ok(Token::new(token_type, lexeme, start_line, start_column))
    }

    /// Identifiers, numbers, logicals and undelimited strings share one
    /// character class; the token type is decided from the finished word.
    fn scan_word(&mut self, line: usize, column: usize) -> Token {
        let start = self.current - 1;
        while self.peek().is_some_and(is_word_char) {
            self.advance();
        }

        let lexeme: String = self.input[start..self.current].iter().collect();
        let token_type = classify_word(&lexeme);
        Token::new(token_type, lexeme, line, column)
    }

    fn scan_string(&mut self, delimiter: char, line: usize, column: usize) -> Result<Token> {
        let start = self.current - 1;

        loop {
            if self.is_at_end() {
                return Err(F90DefaultsError::read_error(
                    "Unterminated string literal",
                    line,
                    column,
                ));
            }

            if self.advance() == delimiter {
                if self.peek() == Some(delimiter) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let lexeme: String = self.input[start..self.current].iter().collect();
        Ok(Token::new(TokenType::String, lexeme, line, column))
    }

    fn scan_comment(&mut self, line: usize, column: usize) -> Token {
        let start = self.current - 1;

        while self.peek() != Some('\n') && !self.is_at_end() {
            self.advance();
        }

        let lexeme: String = self.input[start..self.current].iter().collect();
        Token::new(TokenType::Comment, lexeme, line, column)
    }

    fn advance(&mut self) -> char {
        if self.is_at_end() {
            return '\0';
        }

        let c = self.input[self.current];
        self.current += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        c
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-' | '%')
}

fn classify_word(word: &str) -> TokenType {
    match word.to_lowercase().as_str() {
        ".true." | ".t." | "true" | "t" | ".false." | ".f." | "false" | "f" => {
            return TokenType::Logical
        }
        _ => {}
    }

    match parse_number(word) {
        Some(FortranValue::Integer(_)) => TokenType::Integer,
        Some(FortranValue::Real(_)) => TokenType::Real,
        _ => TokenType::Identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(input: &str) -> Vec<TokenType> {
        Lexer::new(input)
            .scan_all()
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_scan_simple_group() {
        assert_eq!(
            types("&filter_nml ens_size=20, cutoff = 0.2d0 output_mean=.TRUE. /"),
            vec![
                TokenType::GroupStart,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::Comma,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Real,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Logical,
                TokenType::GroupEnd,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_and_comments() {
        let tokens = Lexer::new("x = 'it''s', \"a/b\" ! trailing / comment\n").scan_all().unwrap();

        assert_eq!(tokens[2].lexeme, "'it''s'");
        assert_eq!(tokens[4].lexeme, "\"a/b\"");
        assert_eq!(tokens[5].token_type, TokenType::Eof);
    }

    #[test]
    fn test_repeat_and_signed_numbers() {
        assert_eq!(
            types("x = 3*-1.5e-3"),
            vec![
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::Star,
                TokenType::Real,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_tracked() {
        let tokens = Lexer::new("&g\n  x = 1\n/").scan_all().unwrap();
        let x = &tokens[2];
        assert_eq!((x.line, x.column), (2, 3));
    }

    #[test]
    fn test_unterminated_string_reports_position() {
        let err = Lexer::new("&g\n x = 'abc\n/").scan_all().unwrap_err();
        match err {
            F90DefaultsError::Read { line, column, .. } => assert_eq!((line, column), (2, 6)),
            other => panic!("expected Read error, got {:?}", other),
        }
    }
}

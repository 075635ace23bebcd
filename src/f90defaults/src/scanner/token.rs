// f90defaults/src/scanner/token.rs

//! Token types and structures for namelist lexical analysis.

use std::fmt;

/// A token in namelist text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// The raw text of the token
    pub lexeme: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, line: usize, column: usize) -> Self {
        Self {
            token_type,
            lexeme,
            line,
            column,
        }
    }

    /// Whether this token can stand as a value in an assignment's value list.
    pub fn is_value(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Integer
                | TokenType::Real
                | TokenType::Logical
                | TokenType::String
                | TokenType::Identifier
        )
    }

    /// Whether this token could be the name on the left of an assignment.
    /// `t` and `f` lex as logicals but are valid variable names.
    pub fn is_name(&self) -> bool {
        matches!(self.token_type, TokenType::Identifier | TokenType::Logical)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.lexeme)
    }
}

/// Types of tokens that can appear in a namelist file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Namelist group start (&)
    GroupStart,
    /// Alternative group start ($)
    GroupStartAlt,
    /// Namelist group end (/)
    GroupEnd,
    /// Assignment operator (=)
    Assign,
    /// Comma separator (,)
    Comma,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Colon (:)
    Colon,
    /// Repeat operator (*)
    Star,
    /// Variable or group name, or an undelimited string value
    Identifier,
    /// Integer literal
    Integer,
    /// Real number literal
    Real,
    /// Logical literal (.true., .false., t, f)
    Logical,
    /// Quoted string literal, delimiters included
    String,
    /// Comment
    Comment,
    /// End of input
    Eof,
    /// Invalid character
    Invalid,
}

// f90defaults/src/scanner/mod.rs

//! Lexical scanner and reader for existing namelist files.
//!
//! Used to bootstrap a template from a namelist file that is already known
//! to be complete, such as a model's distributed `input.nml`.

pub mod lexer;
pub mod reader;
pub mod token;

pub use lexer::Lexer;
pub use reader::read_template;
pub use token::{Token, TokenType};

use crate::error::Result;

/// Convenience function to scan a string into tokens, comments removed.
pub fn scan(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).scan_all()
}

// f90defaults/src/source/statements.rs

//! Statement classification for the declaration section.

use super::lines::Statement;
use crate::declaration::{DeclNode, NamelistStmt, TypeDeclStmt, UnitKind};
use crate::fortran_types::{find_top_level, split_top_level};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTAINS: Regex = Regex::new(r"(?i)^contains$").unwrap();
    static ref UNIT_HEADER: Regex =
        Regex::new(r"(?i)^(module|program)(?:\s+([a-z][a-z0-9_]*))?$").unwrap();
    static ref SUBPROGRAM_HEADER: Regex = Regex::new(
        r"(?i)^(?:[a-z][a-z0-9_]*(?:\s*\([^)]*\))?\s+)*(?:subroutine|function)\s+([a-z][a-z0-9_]*)"
    )
    .unwrap();
    static ref UNIT_END: Regex = Regex::new(
        r"(?i)^end(?:\s*(?:module|program|subroutine|function)(?:\s+[a-z][a-z0-9_]*)?)?$"
    )
    .unwrap();
    static ref TYPE_DEFINITION: Regex =
        Regex::new(r"(?i)^type(?:\s*,[^:]*)?(?:\s*::\s*|\s+)[a-z][a-z0-9_]*$").unwrap();
    static ref TYPE_DEFINITION_END: Regex = Regex::new(r"(?i)^end\s*type\b").unwrap();
    static ref INTERFACE_START: Regex = Regex::new(r"(?i)^(?:abstract\s+)?interface\b").unwrap();
    static ref INTERFACE_END: Regex = Regex::new(r"(?i)^end\s*interface\b").unwrap();
    static ref NAMELIST: Regex = Regex::new(r"(?i)^namelist\s*/").unwrap();
    static ref TYPE_KEYWORD: Regex = Regex::new(
        r"(?i)^(?:integer|real|logical|character|complex|double\s*precision|double\s*complex|type\s*\(|class\s*\()"
    )
    .unwrap();
    static ref NAME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap();
}

/// What a statement means for tree structure.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `contains`: nothing after it belongs to a declaration section.
    Contains,
    UnitStart { kind: UnitKind, name: String },
    UnitEnd,
    /// Start of a block whose statements are not declarations of the
    /// enclosing unit (derived-type definitions, interface blocks).
    BlockStart(Block),
    Node(DeclNode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    TypeDefinition,
    Interface,
}

impl Block {
    pub fn is_end(self, text: &str) -> bool {
        match self {
            Block::TypeDefinition => TYPE_DEFINITION_END.is_match(text),
            Block::Interface => INTERFACE_END.is_match(text),
        }
    }
}

pub fn classify(statement: Statement) -> StatementKind {
    let text = statement.text.as_str();

    if CONTAINS.is_match(text) {
        return StatementKind::Contains;
    }
    if UNIT_END.is_match(text) {
        return StatementKind::UnitEnd;
    }
    if let Some(caps) = UNIT_HEADER.captures(text) {
        let kind = if caps[1].eq_ignore_ascii_case("module") {
            UnitKind::Module
        } else {
            UnitKind::Program
        };
        let name = caps.get(2).map_or("", |m| m.as_str()).to_lowercase();
        return StatementKind::UnitStart { kind, name };
    }
    if let Some(caps) = SUBPROGRAM_HEADER.captures(text) {
        return StatementKind::UnitStart {
            kind: UnitKind::Subprogram,
            name: caps[1].to_lowercase(),
        };
    }
    if TYPE_DEFINITION.is_match(text) {
        return StatementKind::BlockStart(Block::TypeDefinition);
    }
    if INTERFACE_START.is_match(text) {
        return StatementKind::BlockStart(Block::Interface);
    }

    if NAMELIST.is_match(text) {
        if let Some(stmt) = parse_namelist(statement.line, text) {
            return StatementKind::Node(DeclNode::Namelist(stmt));
        }
    } else if let Some(stmt) = parse_type_decl(statement.line, text) {
        return StatementKind::Node(DeclNode::TypeDecl(stmt));
    }

    StatementKind::Node(DeclNode::Other {
        line: statement.line,
        text: statement.text,
    })
}

/// `namelist /g/ a, b [[,] /g2/ c]...`; `None` when the group structure is
/// malformed.
fn parse_namelist(line: usize, text: &str) -> Option<NamelistStmt> {
    let rest = text["namelist".len()..].trim();
    let parts: Vec<&str> = rest.split('/').collect();
    if !parts.first()?.trim().is_empty() || parts.len() % 2 == 0 {
        return None;
    }

    let mut groups = Vec::new();
    for pair in parts[1..].chunks(2) {
        let name = pair[0].trim();
        if !NAME.is_match(name) {
            return None;
        }
        let members = pair[1]
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if members.iter().any(|m| !NAME.is_match(m)) {
            return None;
        }
        groups.push((name.to_string(), members));
    }

    Some(NamelistStmt { line, groups })
}

/// `type-spec [, attr]... [::] entities`. Returns `None` when the statement
/// does not start with a type keyword. A statement that does but cannot be
/// split comes back with `entities: None`.
fn parse_type_decl(line: usize, text: &str) -> Option<TypeDeclStmt> {
    let keyword = TYPE_KEYWORD.find(text)?;
    let mut end = keyword.end();

    let malformed = || TypeDeclStmt {
        line,
        type_spec: text.to_string(),
        attributes: Vec::new(),
        entities: None,
    };

    if keyword.as_str().ends_with('(') {
        match matching_paren(text, end - 1) {
            Some(close) => end = close + 1,
            None => return Some(malformed()),
        }
    } else {
        // `integer_count = 3` is an assignment, not a declaration
        if text[end..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        let after = end + (text[end..].len() - text[end..].trim_start().len());
        match selector_end(text, after) {
            Some(selector_end) => end = selector_end,
            None => return Some(malformed()),
        }
    }

    let type_spec = text[..end].trim().to_string();
    let rest = &text[end..];

    let (attribute_text, entity_text) = match find_top_level(rest, "::") {
        Some(pos) => (rest[..pos].trim(), rest[pos + 2..].trim()),
        None => ("", rest.trim()),
    };

    let attributes = if attribute_text.is_empty() {
        Vec::new()
    } else {
        match attribute_text.strip_prefix(',') {
            Some(list) => split_top_level(list, ',')
                .into_iter()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
            None => return Some(malformed()),
        }
    };

    let entities = if entity_text.is_empty() || entity_text.starts_with(',') {
        None
    } else {
        Some(entity_text.to_string())
    };

    Some(TypeDeclStmt {
        line,
        type_spec,
        attributes,
        entities,
    })
}

/// End of an optional `(kind)` or `*len` selector starting at `pos`; `pos`
/// itself when there is none.
fn selector_end(text: &str, pos: usize) -> Option<usize> {
    let rest = &text[pos..];

    if rest.starts_with('(') {
        return matching_paren(text, pos).map(|close| close + 1);
    }

    if let Some(after_star) = rest.strip_prefix('*') {
        let skipped = after_star.len() - after_star.trim_start().len();
        let start = pos + 1 + skipped;
        if text[start..].starts_with('(') {
            return matching_paren(text, start).map(|close| close + 1);
        }
        let digits = text[start..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len() - start);
        return (digits > 0).then_some(start + digits);
    }

    Some(pos)
}

/// Byte index of the `)` matching the `(` at `open`, skipping quoted text.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (idx, c) in text[open..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(open + idx);
                    }
                }
                _ => {}
            },
        }
    }

    None
}

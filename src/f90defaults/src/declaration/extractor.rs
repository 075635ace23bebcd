// f90defaults/src/declaration/extractor.rs

//! Recover parameters, declarations and namelist membership from a
//! declaration tree.

use super::tree::{walk, DeclTree, DeclVisitor, NamelistStmt, TypeDeclStmt};
use super::{replicate, Declaration, Extraction};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::fortran_types::{
    clean_default_value, find_top_level, split_top_level, MAX_ARRAY_ELEMENTS,
};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap();
    static ref QUOTED: Regex = Regex::new(r#"'[^']*'|"[^"]*""#).unwrap();
}

/// One `name(dim) = literal` item of an entity list.
#[derive(Debug, Clone, PartialEq)]
struct Entity {
    name: String,
    dimension: Option<String>,
    literal: Option<String>,
}

/// Walk `tree` and build the parameter table, the declaration table and the
/// namelist membership lists.
///
/// Declarations that cannot be interpreted are reported to `sink` and left
/// out; extraction itself never fails.
pub fn extract_declarations(tree: &DeclTree, sink: &mut dyn DiagnosticSink) -> Extraction {
    let mut extractor = DeclarationExtractor {
        extraction: Extraction::default(),
        sink,
    };
    walk(&tree.nodes, &mut extractor);

    let extraction = extractor.extraction;
    debug!(
        "{}: {} parameters, {} declarations, {} namelist groups",
        tree.source_name,
        extraction.parameters.len(),
        extraction.declarations.len(),
        extraction.namelists.len()
    );
    extraction
}

struct DeclarationExtractor<'a> {
    extraction: Extraction,
    sink: &'a mut dyn DiagnosticSink,
}

impl DeclVisitor for DeclarationExtractor<'_> {
    fn visit_namelist(&mut self, stmt: &NamelistStmt) {
        for (group, members) in &stmt.groups {
            let entry = self
                .extraction
                .namelists
                .entry(group.trim().to_lowercase())
                .or_insert_with(Vec::new);
            entry.extend(members.iter().map(|m| m.trim().to_lowercase()));
        }
    }

    fn visit_type_decl(&mut self, stmt: &TypeDeclStmt) {
        let Some(entities) = stmt.entities.as_deref() else {
            self.skip(stmt.line, &stmt.text(), "no entity list");
            return;
        };

        let is_parameter = stmt.is_parameter();
        let shared_dimension = stmt.dimension();

        for text in split_top_level(entities, ',') {
            let text = text.trim();
            match parse_entity(text) {
                Ok(entity) if is_parameter => self.record_parameter(stmt.line, text, entity),
                Ok(entity) => self.record_variable(stmt.line, entity, shared_dimension),
                Err(reason) => self.skip(stmt.line, text, &reason),
            }
        }
    }
}

impl DeclarationExtractor<'_> {
    fn skip(&mut self, line: usize, text: &str, reason: &str) {
        self.sink.report(Diagnostic::DeclarationSkipped {
            line,
            text: text.to_string(),
            reason: reason.to_string(),
        });
    }

    fn record_parameter(&mut self, line: usize, text: &str, entity: Entity) {
        let Some(literal) = entity.literal else {
            self.skip(line, text, "parameter without a value");
            return;
        };

        let size = self.checked_size(line, &entity.name, entity.dimension.as_deref());
        let Some(literal) = self.default_literal(line, &entity.name, &literal, size) else {
            return;
        };
        self.extraction
            .parameters
            .insert(entity.name.clone(), literal.clone());
        self.extraction.declarations.insert(
            entity.name.clone(),
            Declaration {
                name: entity.name,
                default: Some(literal),
                size,
                is_parameter: true,
            },
        );
    }

    fn record_variable(&mut self, line: usize, entity: Entity, shared_dimension: Option<&str>) {
        let dimension = entity.dimension.as_deref().or(shared_dimension);
        let size = self.checked_size(line, &entity.name, dimension);
        let default = match entity.literal {
            None => None,
            Some(literal) => self.default_literal(line, &entity.name, &literal, size),
        };

        self.extraction.declarations.insert(
            entity.name.clone(),
            Declaration {
                name: entity.name,
                default,
                size,
                is_parameter: false,
            },
        );
    }

    /// Element count for `dimension`, or 1 with a diagnostic when it exceeds
    /// [`MAX_ARRAY_ELEMENTS`].
    fn checked_size(&mut self, line: usize, name: &str, dimension: Option<&str>) -> usize {
        let size = array_size(dimension);
        if size <= MAX_ARRAY_ELEMENTS {
            return size;
        }

        self.sink.report(Diagnostic::OversizedArray {
            variable: name.to_string(),
            line,
            size,
        });
        1
    }

    /// Normalize an initializer into comma-joined literal text. A scalar seed
    /// for an array stays a single element until the resolver has
    /// substituted parameters.
    fn default_literal(
        &mut self,
        line: usize,
        name: &str,
        literal: &str,
        size: usize,
    ) -> Option<String> {
        let cleaned = clean_default_value(literal);

        if let Some(body) = constructor_body(&cleaned) {
            return Some(body.to_string());
        }

        if cleaned.starts_with("(/") {
            let recovered = recover_truncated_constructor(&cleaned, size);
            self.sink.report(Diagnostic::MalformedArrayConstructor {
                variable: name.to_string(),
                line,
                recovered: recovered.clone(),
            });
            return recovered;
        }

        Some(cleaned)
    }
}

/// Split `name(dim) = literal`, `name = literal` or bare `name`.
fn parse_entity(text: &str) -> std::result::Result<Entity, String> {
    if text.is_empty() {
        return Err("empty entity".to_string());
    }

    let (lhs, literal) = match find_top_level(text, "=") {
        Some(pos) => {
            let rhs = text[pos + 1..].trim();
            if rhs.starts_with('>') {
                // Pointer initialization (`=> null()`) carries no namelist default
                (text[..pos].trim(), None)
            } else if rhs.is_empty() {
                return Err("missing initializer after '='".to_string());
            } else {
                (text[..pos].trim(), Some(rhs.to_string()))
            }
        }
        None => (text, None),
    };

    let (name, dimension) = match lhs.find('(') {
        Some(open) => {
            let Some(inner) = lhs[open + 1..].strip_suffix(')') else {
                return Err("unbalanced dimension specifier".to_string());
            };
            (lhs[..open].trim(), Some(inner.trim().to_string()))
        }
        None => (lhs, None),
    };

    // Old-style character length: `name*32`
    let name = name.split('*').next().unwrap_or(name).trim();

    if !IDENTIFIER.is_match(name) {
        return Err(format!("invalid entity name '{}'", name));
    }

    Ok(Entity {
        name: name.to_lowercase(),
        dimension,
        literal,
    })
}

/// Number of elements described by a dimension specifier. Anything other
/// than a single extent (`5`) or a single bound pair (`0:4`) counts as one.
fn array_size(dimension: Option<&str>) -> usize {
    let Some(dimension) = dimension else {
        return 1;
    };
    let dimension = dimension.trim();

    if let Ok(extent) = dimension.parse::<usize>() {
        return extent.max(1);
    }

    let Some((lower, upper)) = dimension.split_once(':') else {
        return 1;
    };
    let (Ok(lower), Ok(upper)) = (lower.trim().parse::<i64>(), upper.trim().parse::<i64>()) else {
        return 1;
    };

    upper
        .checked_sub(lower)
        .and_then(|span| span.checked_add(1))
        .and_then(|extent| usize::try_from(extent).ok())
        .filter(|&extent| extent > 0)
        .unwrap_or(1)
}

/// Element list of a complete `(/ ... /)` or `[ ... ]` constructor.
fn constructor_body(literal: &str) -> Option<&str> {
    let body = match literal.strip_prefix("(/") {
        Some(rest) => rest.strip_suffix("/)")?,
        None => literal.strip_prefix('[')?.strip_suffix(']')?,
    };
    Some(body.trim())
}

/// Best-effort default for an array constructor cut short by a line
/// continuation: repeat the first quoted element `size` times, or fall back to
/// the first element of whatever text survived.
fn recover_truncated_constructor(cleaned: &str, size: usize) -> Option<String> {
    let body = cleaned.trim_start_matches("(/").trim();

    let first = match QUOTED.find(body) {
        Some(quoted) => quoted.as_str().to_string(),
        None => split_top_level(body, ',')
            .into_iter()
            .map(str::trim)
            .find(|s| !s.is_empty())?
            .to_string(),
    };

    Some(replicate(&first, size))
}

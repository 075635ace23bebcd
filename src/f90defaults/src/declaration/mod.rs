// f90defaults/src/declaration/mod.rs

//! Declaration extraction and namelist group resolution.
//!
//! A [`tree::DeclTree`] is walked once by [`extract_declarations`] to collect
//! parameters, variable declarations and namelist membership; then
//! [`resolve_namelists`] merges them into a [`crate::NamelistTemplate`].
//! All tables live only for the duration of one source file.

pub mod extractor;
pub mod resolver;
pub mod tree;

pub use extractor::extract_declarations;
pub use resolver::resolve_namelists;
pub use tree::{DeclNode, DeclTree, DeclVisitor, NamelistStmt, TypeDeclStmt, UnitKind};

use linked_hash_map::LinkedHashMap;

/// Named constants: lower-cased name to cleaned literal text.
pub type ParameterTable = LinkedHashMap<String, String>;

/// A variable (or named constant) introduced by a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Lower-cased, without any dimension suffix.
    pub name: String,
    /// Cleaned default literal text, comma-joined for arrays. `None` when the
    /// declaration has no initializer.
    pub default: Option<String>,
    /// Number of array elements; 1 for scalars.
    pub size: usize,
    pub is_parameter: bool,
}

/// Repeat a scalar seed `size` times as comma-joined literal text.
pub(crate) fn replicate(literal: &str, size: usize) -> String {
    vec![literal; size].join(", ")
}

/// Everything recovered from one declaration tree.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub parameters: ParameterTable,
    pub declarations: LinkedHashMap<String, Declaration>,
    /// Group name to ordered member names, both lower-cased.
    pub namelists: LinkedHashMap<String, Vec<String>>,
}

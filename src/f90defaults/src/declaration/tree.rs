// f90defaults/src/declaration/tree.rs

//! Declaration tree handed over by a tree builder.
//!
//! Only the declaration section of a program unit is represented. Executable
//! statements never reach this tree; anything the builder does not classify
//! is kept as [`DeclNode::Other`] so the tree stays total.

/// Declaration tree for one source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclTree {
    /// Name used in diagnostics, usually the file path.
    pub source_name: String,
    pub nodes: Vec<DeclNode>,
}

impl DeclTree {
    pub fn new<S: Into<String>>(source_name: S, nodes: Vec<DeclNode>) -> Self {
        Self {
            source_name: source_name.into(),
            nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclNode {
    /// A module, program or subprogram header with its declarations.
    Unit {
        kind: UnitKind,
        name: String,
        children: Vec<DeclNode>,
    },
    Namelist(NamelistStmt),
    TypeDecl(TypeDeclStmt),
    /// Any statement that is neither a namelist nor a type declaration.
    Other { line: usize, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Module,
    Program,
    Subprogram,
}

/// `namelist /group/ a, b [/group2/ c]`
#[derive(Debug, Clone, PartialEq)]
pub struct NamelistStmt {
    pub line: usize,
    /// Group name and its member list, in source order.
    pub groups: Vec<(String, Vec<String>)>,
}

/// `type-spec [, attr-spec]... [::] entity-decl-list`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclStmt {
    pub line: usize,
    pub type_spec: String,
    pub attributes: Vec<String>,
    /// Raw entity list text; `None` when the builder could not isolate it.
    pub entities: Option<String>,
}

impl TypeDeclStmt {
    /// Whether the attribute specifier contains `parameter`.
    pub fn is_parameter(&self) -> bool {
        self.attributes
            .iter()
            .any(|attr| attr.trim().eq_ignore_ascii_case("parameter"))
    }

    /// Text inside `dimension(...)`, if that attribute is present.
    pub fn dimension(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attr| {
            let attr = attr.trim();
            let rest = attr.get(..9)?;
            if !rest.eq_ignore_ascii_case("dimension") {
                return None;
            }
            let inner = attr[9..].trim();
            inner.strip_prefix('(')?.strip_suffix(')')
        })
    }

    /// Reassemble the statement for diagnostics.
    pub fn text(&self) -> String {
        let mut text = self.type_spec.clone();
        for attr in &self.attributes {
            text.push_str(", ");
            text.push_str(attr);
        }
        if let Some(entities) = &self.entities {
            text.push_str(" :: ");
            text.push_str(entities);
        }
        text
    }
}

/// Visitor over a declaration tree. Every node kind has a method, so adding a
/// node kind is a compile error in every visitor rather than a silent skip.
pub trait DeclVisitor {
    fn visit_unit(&mut self, _kind: UnitKind, _name: &str) {}
    fn visit_namelist(&mut self, stmt: &NamelistStmt);
    fn visit_type_decl(&mut self, stmt: &TypeDeclStmt);
    fn visit_other(&mut self, _line: usize, _text: &str) {}
}

/// Depth-first walk over `nodes`, in source order.
pub fn walk<V: DeclVisitor + ?Sized>(nodes: &[DeclNode], visitor: &mut V) {
    for node in nodes {
        match node {
            DeclNode::Unit {
                kind,
                name,
                children,
            } => {
                visitor.visit_unit(*kind, name);
                walk(children, visitor);
            }
            DeclNode::Namelist(stmt) => visitor.visit_namelist(stmt),
            DeclNode::TypeDecl(stmt) => visitor.visit_type_decl(stmt),
            DeclNode::Other { line, text } => visitor.visit_other(*line, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(attributes: &[&str]) -> TypeDeclStmt {
        TypeDeclStmt {
            line: 1,
            type_spec: "integer".to_string(),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            entities: Some("x".to_string()),
        }
    }

    #[test]
    fn test_attribute_queries() {
        assert!(decl(&["PARAMETER"]).is_parameter());
        assert!(!decl(&["save"]).is_parameter());
        assert_eq!(decl(&["dimension(3)"]).dimension(), Some("3"));
        assert_eq!(decl(&["DIMENSION (0:4)"]).dimension(), Some("0:4"));
        assert_eq!(decl(&["save"]).dimension(), None);
    }

    #[test]
    fn test_walk_is_depth_first() {
        struct Lines(Vec<usize>);
        impl DeclVisitor for Lines {
            fn visit_namelist(&mut self, stmt: &NamelistStmt) {
                self.0.push(stmt.line);
            }
            fn visit_type_decl(&mut self, stmt: &TypeDeclStmt) {
                self.0.push(stmt.line);
            }
        }

        let tree = vec![
            DeclNode::TypeDecl(TypeDeclStmt {
                line: 1,
                ..decl(&[])
            }),
            DeclNode::Unit {
                kind: UnitKind::Module,
                name: "filter_mod".to_string(),
                children: vec![
                    DeclNode::TypeDecl(TypeDeclStmt {
                        line: 3,
                        ..decl(&[])
                    }),
                    DeclNode::Namelist(NamelistStmt {
                        line: 4,
                        groups: vec![],
                    }),
                ],
            },
            DeclNode::TypeDecl(TypeDeclStmt {
                line: 6,
                ..decl(&[])
            }),
        ];

        let mut lines = Lines(Vec::new());
        walk(&tree, &mut lines);
        assert_eq!(lines.0, vec![1, 3, 4, 6]);
    }
}

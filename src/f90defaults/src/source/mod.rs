// f90defaults/src/source/mod.rs

//! Building declaration trees from Fortran source text.
//!
//! [`TreeBuilder`] is the seam between extraction and whatever understands
//! Fortran syntax. [`StatementScanner`] is the built-in implementation: a
//! statement-level scanner for free-form source that only looks at what
//! precedes the first `contains`.

pub mod lines;
pub mod statements;

use crate::declaration::{DeclNode, DeclTree, UnitKind};
use crate::error::{F90DefaultsError, Result};
use lines::logical_statements;
use log::debug;
use statements::{classify, Block, StatementKind};
use std::ops::ControlFlow;

/// Produces a declaration tree from source text.
pub trait TreeBuilder {
    /// Build the tree for one source file. `source_name` is used in errors
    /// and diagnostics only.
    fn build(&self, source: &str, source_name: &str) -> Result<DeclTree>;
}

/// Default [`TreeBuilder`] for free-form Fortran.
///
/// Module, program and subprogram headers open [`DeclNode::Unit`] nodes;
/// namelist statements and type declarations become typed nodes; derived-type
/// definitions and interface blocks are skipped whole; everything else is
/// kept as [`DeclNode::Other`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementScanner;

impl StatementScanner {
    pub fn new() -> Self {
        Self
    }
}

impl TreeBuilder for StatementScanner {
    fn build(&self, source: &str, source_name: &str) -> Result<DeclTree> {
        let statements = logical_statements(source, source_name)?;
        if statements.is_empty() {
            return Err(F90DefaultsError::syntax_tree(source_name, "no statements found"));
        }

        let mut nodes = NodeStack::default();
        for statement in statements {
            let line = statement.line;
            if nodes.push(classify(statement)).is_break() {
                debug!("{}: stopping at 'contains' on line {}", source_name, line);
                break;
            }
        }

        Ok(DeclTree::new(source_name, nodes.finish()))
    }
}

struct Frame {
    kind: UnitKind,
    name: String,
    children: Vec<DeclNode>,
}

#[derive(Default)]
struct NodeStack {
    root: Vec<DeclNode>,
    frames: Vec<Frame>,
    skipping: Option<Block>,
}

impl NodeStack {
    fn push(&mut self, kind: StatementKind) -> ControlFlow<()> {
        if let Some(block) = self.skipping {
            if let StatementKind::Node(DeclNode::Other { text, .. }) = &kind {
                if block.is_end(text) {
                    self.skipping = None;
                }
            }
            return ControlFlow::Continue(());
        }

        match kind {
            StatementKind::Contains => return ControlFlow::Break(()),
            StatementKind::UnitStart { kind, name } => self.frames.push(Frame {
                kind,
                name,
                children: Vec::new(),
            }),
            StatementKind::UnitEnd => self.close_unit(),
            StatementKind::BlockStart(block) => self.skipping = Some(block),
            StatementKind::Node(node) => self.current().push(node),
        }

        ControlFlow::Continue(())
    }

    fn current(&mut self) -> &mut Vec<DeclNode> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    fn close_unit(&mut self) {
        if let Some(frame) = self.frames.pop() {
            let node = DeclNode::Unit {
                kind: frame.kind,
                name: frame.name,
                children: frame.children,
            };
            self.current().push(node);
        }
    }

    fn finish(mut self) -> Vec<DeclNode> {
        while !self.frames.is_empty() {
            self.close_unit();
        }
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(source: &str) -> Vec<DeclNode> {
        StatementScanner::new().build(source, "test.f90").unwrap().nodes
    }

    #[test]
    fn test_module_tree() {
        let source = "\
module filter_mod
use types_mod, only : r8
implicit none
private

type ensemble_type
   integer :: num_copies
   real(r8), allocatable :: copies(:,:)
end type ensemble_type

interface
   subroutine callback(n)
      integer :: n
   end subroutine callback
end interface

integer :: ens_size = 20
namelist /filter_nml/ ens_size

contains

subroutine filter_main()
   integer :: not_a_default = 3
end subroutine filter_main

end module filter_mod
";
        let nodes = build(source);
        assert_eq!(nodes.len(), 1);

        let DeclNode::Unit { kind, name, children } = &nodes[0] else {
            panic!("expected a module unit, got {:?}", nodes[0]);
        };
        assert_eq!(*kind, UnitKind::Module);
        assert_eq!(name, "filter_mod");

        let type_decls: Vec<_> = children
            .iter()
            .filter_map(|node| match node {
                DeclNode::TypeDecl(stmt) => stmt.entities.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(type_decls, vec!["ens_size = 20".to_string()]);
        assert!(children.iter().any(|node| matches!(node, DeclNode::Namelist(_))));
        assert!(children
            .iter()
            .any(|node| matches!(node, DeclNode::Other { text, .. } if text == "implicit none")));
    }

    #[test]
    fn test_program_and_subroutines_nest() {
        let source = "\
program main
integer :: n = 1
end program main
subroutine helper()
logical :: flag = .true.
end subroutine
";
        let nodes = build(source);
        assert_eq!(nodes.len(), 2);
        assert!(matches!(
            &nodes[1],
            DeclNode::Unit { kind: UnitKind::Subprogram, name, children } if name == "helper" && children.len() == 1
        ));
    }

    #[test]
    fn test_unclosed_units_are_closed_at_end() {
        let nodes = build("module m\ninteger :: x = 1\n");
        assert!(matches!(&nodes[0], DeclNode::Unit { children, .. } if children.len() == 1));
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let err = StatementScanner::new()
            .build("! only a comment\n\n", "empty.f90")
            .unwrap_err();
        assert!(matches!(err, F90DefaultsError::SyntaxTreeUnavailable { .. }));
    }
}

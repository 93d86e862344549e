//! Traits for language readers, writers and parsing collaborators.

use crate::ir::{Node, Position};
use crate::language::Language;
use crate::native::SyntaxNode;

/// Error that can occur when reading source code into IR.
///
/// Only raised when no clean native syntax tree can be obtained. Constructs
/// outside the supported subset are never errors; readers drop or replace
/// them instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error at {line}:{column}: {snippet}")]
    Syntax {
        line: usize,
        column: usize,
        snippet: String,
    },

    #[error("grammar unavailable: {0}")]
    Grammar(String),

    #[error("parser collaborator failed: {0}")]
    Collaborator(String),
}

/// A tree the writer cannot render.
///
/// Readers never produce such trees, so this always points at a bug or a
/// hand-built tree; it is still reported rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("{node} node cannot be generated in {position} position")]
    Fault {
        node: &'static str,
        position: Position,
    },
}

impl GenerateError {
    pub(crate) fn fault(node: &Node, position: Position) -> Self {
        GenerateError::Fault {
            node: node.tag(),
            position,
        }
    }
}

/// Supplies native syntax trees for one surface language.
pub trait Collaborator: Send + Sync {
    /// Parse `source` into a native tree, or fail with a diagnostic.
    fn parse_native(&self, source: &str) -> Result<SyntaxNode, ParseError>;
}

/// A reader parses source code into the IR.
pub trait Reader: Send + Sync {
    fn language(&self) -> Language;

    /// Parse source code into a `Module` node.
    fn read(&self, source: &str) -> Result<Node, ParseError>;
}

/// A writer emits the IR as source code in a target language.
pub trait Writer: Send + Sync {
    fn language(&self) -> Language;

    /// Emit a `Module`, or any single node, as source code.
    fn write(&self, node: &Node) -> Result<String, GenerateError>;
}

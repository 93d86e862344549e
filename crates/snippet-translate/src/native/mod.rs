//! Native syntax trees.
//!
//! Readers never talk to a parser directly. A [`Collaborator`] hands them an
//! owned [`SyntaxNode`] tree shaped like a tree-sitter tree: node kinds,
//! field names and named/anonymous children follow the tree-sitter grammar
//! of the language. Two collaborators exist:
//!
//! - [`Grammar`] - the in-process tree-sitter grammar (default)
//! - [`ProcessCollaborator`] - an external program speaking JSON
//!
//! [`Collaborator`]: crate::traits::Collaborator

mod grammar;
mod process;

pub use grammar::Grammar;
pub use process::ProcessCollaborator;

use serde::{Deserialize, Serialize};

/// One node of a native syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: String,

    /// Source text covered by the node.
    #[serde(default)]
    pub text: String,

    #[serde(default = "default_named")]
    pub named: bool,

    /// Comments and other nodes that may appear anywhere.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub extra: bool,

    /// Field name of this node within its parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// 1-based start line.
    #[serde(default)]
    pub line: usize,

    /// 1-based start column.
    #[serde(default)]
    pub column: usize,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

fn default_named() -> bool {
    true
}

impl SyntaxNode {
    /// A named node with no children, mostly useful in tests.
    pub fn leaf(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            named: true,
            extra: false,
            field: None,
            line: 0,
            column: 0,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    /// First child stored under `field`.
    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.children
            .iter()
            .find(|child| child.field.as_deref() == Some(field))
    }

    /// All children stored under `field`, in source order.
    pub fn children_by_field<'a, 'f>(
        &'a self,
        field: &'f str,
    ) -> impl Iterator<Item = &'a SyntaxNode> + use<'a, 'f> {
        self.children
            .iter()
            .filter(move |child| child.field.as_deref() == Some(field))
    }

    /// Named children, skipping comments and other extras.
    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children
            .iter()
            .filter(|child| child.named && !child.extra)
    }

    pub fn first_named_child(&self) -> Option<&SyntaxNode> {
        self.named_children().next()
    }

    /// Whether an anonymous token with this spelling is a direct child.
    pub fn has_token(&self, token: &str) -> bool {
        self.children
            .iter()
            .any(|child| !child.named && child.kind == token)
    }

    /// First `ERROR` node in the tree, depth-first.
    pub fn first_error(&self) -> Option<&SyntaxNode> {
        if self.kind == "ERROR" {
            return Some(self);
        }
        self.children.iter().find_map(SyntaxNode::first_error)
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }
}

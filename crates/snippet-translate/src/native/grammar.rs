//! In-process tree-sitter grammars.

use super::SyntaxNode;
use crate::language::Language;
use crate::traits::{Collaborator, ParseError};
use tree_sitter::{Node, Parser, TreeCursor};

/// Parses with the tree-sitter grammar compiled into the crate.
#[derive(Debug, Clone, Copy)]
pub struct Grammar {
    language: Language,
}

impl Grammar {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether the grammar for `language` was compiled in.
    pub fn is_available(language: Language) -> bool {
        tree_sitter_language(language).is_some()
    }
}

fn tree_sitter_language(language: Language) -> Option<tree_sitter::Language> {
    match language {
        #[cfg(feature = "grammar-python")]
        Language::Python => Some(arborium_python::language().into()),
        #[cfg(feature = "grammar-javascript")]
        Language::JavaScript => Some(arborium_javascript::language().into()),
        #[cfg(feature = "grammar-java")]
        Language::Java => Some(arborium_java::language().into()),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

impl Collaborator for Grammar {
    fn parse_native(&self, source: &str) -> Result<SyntaxNode, ParseError> {
        let grammar = tree_sitter_language(self.language).ok_or_else(|| {
            ParseError::Grammar(format!(
                "no built-in {} grammar; configure a collaborator",
                self.language.name()
            ))
        })?;

        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|err| ParseError::Grammar(err.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Grammar("failed to parse".into()))?;

        if let Some(bad) = first_error(tree.root_node()) {
            return Err(syntax_error(bad, source));
        }

        let mut cursor = tree.walk();
        Ok(lower(&mut cursor, source.as_bytes()))
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn syntax_error(node: Node<'_>, source: &str) -> ParseError {
    let start = node.start_position();
    let snippet = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or("");
        let line = text.lines().next().unwrap_or("");
        format!("unexpected `{}`", line.chars().take(40).collect::<String>())
    };
    ParseError::Syntax {
        line: start.row + 1,
        column: start.column + 1,
        snippet,
    }
}

/// Copy the subtree under the cursor into an owned [`SyntaxNode`].
fn lower(cursor: &mut TreeCursor<'_>, source: &[u8]) -> SyntaxNode {
    let node = cursor.node();
    let start = node.start_position();

    let mut children = Vec::new();
    if cursor.goto_first_child() {
        loop {
            let field = cursor.field_name().map(str::to_string);
            let mut child = lower(cursor, source);
            child.field = field;
            children.push(child);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }

    SyntaxNode {
        kind: node.kind().to_string(),
        text: node.utf8_text(source).unwrap_or("").to_string(),
        named: node.is_named(),
        extra: node.is_extra(),
        field: None,
        line: start.row + 1,
        column: start.column + 1,
        children,
    }
}

//! Translation between surface languages.

use crate::ir::Node;
use crate::language::{Language, UnsupportedLanguage};
use crate::registry::{reader_for, reader_with_collaborator, writer_for};
use crate::traits::{Collaborator, GenerateError, ParseError, Reader};
use std::collections::HashMap;
use std::sync::Arc;

/// Error from a translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerateError),
}

/// Translate `source` from one language tag to another with the built-in
/// grammars.
///
/// Both tags are checked before anything is parsed.
///
/// ```ignore
/// let js = snippet_translate::translate("def add(a, b=0):\n    return a + b\n", "py", "js")?;
/// assert!(js.contains("function add(a, b = 0)"));
/// ```
pub fn translate(source: &str, from: &str, to: &str) -> Result<String, TranslateError> {
    Translator::new().translate(source, from, to)
}

/// Translator with per-language parsing collaborators.
///
/// Languages without an override use their built-in grammar.
#[derive(Clone, Default)]
pub struct Translator {
    collaborators: HashMap<Language, Arc<dyn Collaborator>>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain native trees for `language` from `collaborator`.
    pub fn with_collaborator(
        mut self,
        language: Language,
        collaborator: impl Collaborator + 'static,
    ) -> Self {
        self.collaborators.insert(language, Arc::new(collaborator));
        self
    }

    fn reader(&self, language: Language) -> Box<dyn Reader> {
        match self.collaborators.get(&language) {
            Some(collaborator) => reader_with_collaborator(language, Arc::clone(collaborator)),
            None => reader_for(language),
        }
    }

    /// Parse `source` into an IR module.
    pub fn parse(&self, source: &str, language: Language) -> Result<Node, ParseError> {
        tracing::debug!(%language, bytes = source.len(), "parsing");
        self.reader(language).read(source)
    }

    /// Generate source in `language` from an IR tree.
    pub fn generate(&self, node: &Node, language: Language) -> Result<String, GenerateError> {
        tracing::debug!(%language, node = node.tag(), "generating");
        writer_for(language).write(node)
    }

    pub fn translate(&self, source: &str, from: &str, to: &str) -> Result<String, TranslateError> {
        let from: Language = from.parse()?;
        let to: Language = to.parse()?;
        let ir = self.parse(source, from)?;
        Ok(self.generate(&ir, to)?)
    }
}

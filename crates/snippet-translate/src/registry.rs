//! Registry for readers and writers.
//!
//! The set of languages is closed, so lookup is a `match` on [`Language`];
//! there is no global state to initialize or lock.

use crate::input::{JavaReader, JavaScriptReader, PythonReader};
use crate::language::{Language, UnsupportedLanguage};
use crate::output::{JAVA_WRITER, JAVASCRIPT_WRITER, PYTHON_WRITER};
use crate::traits::{Collaborator, Reader, Writer};
use std::sync::Arc;

/// Reader for `language` using its built-in grammar.
pub fn reader_for(language: Language) -> Box<dyn Reader> {
    match language {
        Language::Python => Box::new(PythonReader::new()),
        Language::JavaScript => Box::new(JavaScriptReader::new()),
        Language::Java => Box::new(JavaReader::new()),
    }
}

/// Reader for `language` that obtains native trees from `collaborator`.
pub fn reader_with_collaborator(
    language: Language,
    collaborator: Arc<dyn Collaborator>,
) -> Box<dyn Reader> {
    match language {
        Language::Python => Box::new(PythonReader::with_collaborator(collaborator)),
        Language::JavaScript => Box::new(JavaScriptReader::with_collaborator(collaborator)),
        Language::Java => Box::new(JavaReader::with_collaborator(collaborator)),
    }
}

pub fn writer_for(language: Language) -> &'static dyn Writer {
    match language {
        Language::Python => &PYTHON_WRITER,
        Language::JavaScript => &JAVASCRIPT_WRITER,
        Language::Java => &JAVA_WRITER,
    }
}

/// Get a reader by language tag or name.
pub fn reader_for_language(tag: &str) -> Result<Box<dyn Reader>, UnsupportedLanguage> {
    Ok(reader_for(tag.parse()?))
}

/// Get a reader by file extension.
pub fn reader_for_extension(ext: &str) -> Option<Box<dyn Reader>> {
    Language::from_extension(ext).map(reader_for)
}

/// Get a writer by language tag or name.
pub fn writer_for_language(tag: &str) -> Result<&'static dyn Writer, UnsupportedLanguage> {
    Ok(writer_for(tag.parse()?))
}

/// All writers, in [`Language::ALL`] order.
pub fn writers() -> Vec<&'static dyn Writer> {
    Language::ALL.into_iter().map(writer_for).collect()
}

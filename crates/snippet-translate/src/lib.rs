//! Translate code snippets between Python, JavaScript and Java.
//!
//! `snippet-translate` parses a fragment (functions, classes and their
//! statement bodies) into one shared IR and emits it in another language.
//! It re-expresses syntax; it does not preserve runtime semantics.
//!
//! # Architecture
//!
//! ```text
//! Source          Native tree        IR            Target
//! ──────────    ──────────────    ──────────    ──────────
//! Python     ─┐                                ┌─> Python
//! JavaScript ─┼─> SyntaxNode ────> Module ─────┼─> JavaScript
//! Java       ─┘   (native.rs)     (ir.rs)      └─> Java
//! ```
//!
//! Native trees come from a [`Collaborator`]: the built-in tree-sitter
//! [`Grammar`](native::Grammar), or an external program via
//! [`ProcessCollaborator`](native::ProcessCollaborator).
//!
//! # Example
//!
//! ```ignore
//! let js = snippet_translate::translate("def add(a, b=0):\n    return a + b\n", "py", "js")?;
//! // function add(a, b = 0) {
//! //   return a + b;
//! // }
//! ```
//!
//! # Unsupported constructs
//!
//! Readers never fail on valid code outside the supported subset. An
//! unsupported statement is dropped and an unsupported expression becomes a
//! null literal; loops over anything but a counted range get a placeholder
//! bound of 10.

pub mod input;
pub mod ir;
pub mod language;
pub mod native;
pub mod output;
pub mod registry;
pub mod traits;
pub mod translate;

// Re-exports: IR types
pub use ir::{BinaryOp, DecodeError, Literal, Node, Param, Position, ShapeError, StructureEq};

// Re-exports: Traits
pub use traits::{Collaborator, GenerateError, ParseError, Reader, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for, reader_for_extension, reader_for_language, reader_with_collaborator, writer_for,
    writer_for_language, writers,
};

pub use language::{Language, UnsupportedLanguage};
pub use translate::{TranslateError, Translator, translate};

// Re-exports: Built-in readers and writers
pub use input::{JavaReader, JavaScriptReader, PythonReader, read_java, read_javascript, read_python};
pub use output::{JavaScriptWriter, JavaWriter, PythonWriter};

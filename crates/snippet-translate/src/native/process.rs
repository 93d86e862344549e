//! External parsing collaborators.
//!
//! The child process receives the raw source on stdin and answers with one
//! JSON document on stdout:
//!
//! ```json
//! {"tree": {"kind": "program", "text": "...", "children": [...]}}
//! {"error": "Unexpected token (1:4)"}
//! ```
//!
//! Node objects use the [`SyntaxNode`] fields. A non-zero exit status, a
//! spawn failure or any other output is reported as a collaborator failure.

use super::SyntaxNode;
use crate::traits::{Collaborator, ParseError};
use serde::Deserialize;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Runs an external program to obtain native trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCollaborator {
    program: String,
    args: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reply {
    Tree { tree: SyntaxNode },
    Error { error: String },
}

impl ProcessCollaborator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, detail: impl std::fmt::Display) -> ParseError {
        ParseError::Collaborator(format!("`{}`: {}", self.program, detail))
    }
}

impl Collaborator for ProcessCollaborator {
    fn parse_native(&self, source: &str) -> Result<SyntaxNode, ParseError> {
        tracing::debug!(program = %self.program, args = ?self.args, "running parser collaborator");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.failure(format_args!("failed to start: {err}")))?;

        let stdin = child.stdin.take();
        // stdin is fed from its own thread so a child that answers before
        // reading all of its input cannot fill the output pipes and stall.
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output =
            output.map_err(|err| self.failure(format_args!("failed to read output: {err}")))?;
        match written {
            Ok(Ok(())) => {}
            // A child that exits without reading reports through its status.
            Ok(Err(err)) if err.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => return Err(self.failure(format_args!("failed to write source: {err}"))),
            Err(_) => return Err(self.failure("stdin writer panicked")),
        }
        tracing::trace!(
            stdout = output.stdout.len(),
            stderr = output.stderr.len(),
            "collaborator finished"
        );

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(self.failure(format_args!("{} {}", output.status, stderr.trim())));
        }
        if !stderr.trim().is_empty() {
            tracing::warn!(program = %self.program, "collaborator stderr: {}", stderr.trim());
        }

        let reply: Reply = serde_json::from_slice(&output.stdout)
            .map_err(|err| self.failure(format_args!("malformed output: {err}")))?;

        match reply {
            Reply::Error { error } => Err(ParseError::Collaborator(error)),
            Reply::Tree { tree } => match tree.first_error() {
                Some(bad) => Err(ParseError::Syntax {
                    line: bad.line,
                    column: bad.column,
                    snippet: format!("unexpected `{}`", bad.text),
                }),
                None => Ok(tree),
            },
        }
    }
}

//! Python writer.

use super::{PYTHON_SYNTAX, loop_target, needs_blank_line};
use crate::ir::{Node, Param, Position};
use crate::language::Language;
use crate::traits::{GenerateError, Writer};

/// Static instance of the Python writer for the registry.
pub static PYTHON_WRITER: PythonWriterImpl = PythonWriterImpl;

/// Python writer implementing the Writer trait.
pub struct PythonWriterImpl;

impl Writer for PythonWriterImpl {
    fn language(&self) -> Language {
        Language::Python
    }

    fn write(&self, node: &Node) -> Result<String, GenerateError> {
        PythonWriter::emit(node)
    }
}

/// Emits IR as Python source code.
pub struct PythonWriter {
    output: String,
    indent: usize,
}

impl PythonWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit a module, a statement or an expression as Python source.
    pub fn emit(node: &Node) -> Result<String, GenerateError> {
        let mut writer = Self::new();
        match node {
            Node::Module { body } => writer.write_body(body)?,
            stmt if stmt.is_statement() => writer.write_stmt(stmt)?,
            expr => writer.output.push_str(&PYTHON_SYNTAX.expr(expr)?),
        }
        Ok(writer.output)
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_body(&mut self, body: &[Node]) -> Result<(), GenerateError> {
        for (i, stmt) in body.iter().enumerate() {
            if i > 0 && needs_blank_line(&body[i - 1], stmt) {
                self.output.push('\n');
            }
            self.write_stmt(stmt)?;
        }
        Ok(())
    }

    /// Indented suite; `pass` when empty.
    fn write_suite(&mut self, body: &[Node]) -> Result<(), GenerateError> {
        self.indent += 1;
        if body.is_empty() {
            self.line("pass");
        } else {
            self.write_body(body)?;
        }
        self.indent -= 1;
        Ok(())
    }

    fn write_stmt(&mut self, stmt: &Node) -> Result<(), GenerateError> {
        let expr = |node: &Node| PYTHON_SYNTAX.expr(node);
        match stmt {
            Node::Function { name, params, body } => {
                self.line(&format!("def {name}({}):", params_list(params)));
                self.write_suite(body)?;
            }
            Node::Class { name, body } => {
                self.line(&format!("class {name}:"));
                if let Some(member) = body
                    .iter()
                    .find(|member| !matches!(member, Node::Function { .. } | Node::Assign { .. }))
                {
                    return Err(GenerateError::fault(member, Position::ClassMember));
                }
                self.write_suite(body)?;
            }
            Node::Return { value: None } => self.line("return"),
            Node::Return { value: Some(value) } => {
                self.line(&format!("return {}", expr(value)?));
            }
            Node::Assign { target, value } => {
                self.line(&format!("{} = {}", expr(target)?, expr(value)?));
            }
            Node::If { test, body, orelse } => self.write_if("if", test, body, orelse)?,
            Node::For { target, iter, body } => {
                let id = loop_target(target)?;
                self.line(&format!("for {id} in range({}):", expr(iter)?));
                self.write_suite(body)?;
            }
            Node::While { test, body } => {
                self.line(&format!("while {}:", expr(test)?));
                self.write_suite(body)?;
            }
            Node::Call { .. } => self.line(&expr(stmt)?),
            Node::Module { .. } | Node::BinaryOp { .. } | Node::Name { .. } | Node::Literal { .. } => {
                return Err(GenerateError::fault(stmt, Position::Statement));
            }
        }
        Ok(())
    }

    fn write_if(
        &mut self,
        keyword: &str,
        test: &Node,
        body: &[Node],
        orelse: &[Node],
    ) -> Result<(), GenerateError> {
        self.line(&format!("{keyword} {}:", PYTHON_SYNTAX.expr(test)?));
        self.write_suite(body)?;
        match orelse {
            [] => {}
            [Node::If { test, body, orelse }] => self.write_if("elif", test, body, orelse)?,
            _ => {
                self.line("else:");
                self.write_suite(orelse)?;
            }
        }
        Ok(())
    }
}

impl Default for PythonWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn params_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| match &param.default {
            Some(default) => format!("{}={default}", param.name),
            None => param.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

//! JavaScript writer.
//!
//! Variables are declared with `let` at their first assignment; see
//! [`Declarations`](super::Declarations) for names first assigned inside
//! branches and loops.

use super::{Declarations, JAVASCRIPT_SYNTAX, loop_target, needs_blank_line};
use crate::ir::{Node, Param, Position};
use crate::language::Language;
use crate::traits::{GenerateError, Writer};

/// Static instance of the JavaScript writer for the registry.
pub static JAVASCRIPT_WRITER: JavaScriptWriterImpl = JavaScriptWriterImpl;

/// JavaScript writer implementing the Writer trait.
pub struct JavaScriptWriterImpl;

impl Writer for JavaScriptWriterImpl {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn write(&self, node: &Node) -> Result<String, GenerateError> {
        JavaScriptWriter::emit(node)
    }
}

/// Emits IR as JavaScript source code.
pub struct JavaScriptWriter {
    output: String,
    indent: usize,
}

impl JavaScriptWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit a module, a statement or an expression as JavaScript source.
    pub fn emit(node: &Node) -> Result<String, GenerateError> {
        let mut writer = Self::new();
        let mut scope = Declarations::default();
        match node {
            Node::Module { body } => writer.write_body(body, &mut scope)?,
            stmt if stmt.is_statement() => writer.write_body(std::slice::from_ref(stmt), &mut scope)?,
            expr => writer.output.push_str(&JAVASCRIPT_SYNTAX.expr(expr)?),
        }
        Ok(writer.output)
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_body(&mut self, body: &[Node], scope: &mut Declarations) -> Result<(), GenerateError> {
        scope.declare_definitions(body);
        for (i, stmt) in body.iter().enumerate() {
            if i > 0 && needs_blank_line(&body[i - 1], stmt) {
                self.output.push('\n');
            }
            for name in scope.hoist(stmt) {
                self.line(&format!("let {name};"));
            }
            self.write_stmt(stmt, scope)?;
        }
        Ok(())
    }

    /// `{ ... }` contents, closed by `closer`.
    fn write_block(
        &mut self,
        body: &[Node],
        scope: &mut Declarations,
        closer: &str,
    ) -> Result<(), GenerateError> {
        self.indent += 1;
        self.write_body(body, scope)?;
        self.indent -= 1;
        self.line(closer);
        Ok(())
    }

    fn write_stmt(&mut self, stmt: &Node, scope: &mut Declarations) -> Result<(), GenerateError> {
        let expr = |node: &Node| JAVASCRIPT_SYNTAX.expr(node);
        match stmt {
            Node::Function { name, params, body } => {
                self.line(&format!("function {name}({}) {{", params_list(params)));
                self.write_block(body, &mut Declarations::with_params(params), "}")?;
            }
            Node::Class { name, body } => {
                self.line(&format!("class {name} {{"));
                self.indent += 1;
                for (i, member) in body.iter().enumerate() {
                    if i > 0 && needs_blank_line(&body[i - 1], member) {
                        self.output.push('\n');
                    }
                    self.write_member(member)?;
                }
                self.indent -= 1;
                self.line("}");
            }
            Node::Return { value: None } => self.line("return;"),
            Node::Return { value: Some(value) } => {
                self.line(&format!("return {};", expr(value)?));
            }
            Node::Assign { target, value } => {
                let keyword = if scope.declare(target) { "let " } else { "" };
                self.line(&format!("{keyword}{} = {};", expr(target)?, expr(value)?));
            }
            Node::If { test, body, orelse } => self.write_if("", test, body, orelse, scope)?,
            Node::For { target, iter, body } => {
                let id = loop_target(target)?;
                self.line(&format!(
                    "for (let {id} = 0; {id} < {}; {id}++) {{",
                    JAVASCRIPT_SYNTAX.loop_bound(iter)?
                ));
                let fresh = scope.enter_loop(id);
                self.write_block(body, scope, "}")?;
                scope.leave_loop(id, fresh);
            }
            Node::While { test, body } => {
                self.line(&format!("while ({}) {{", expr(test)?));
                self.write_block(body, scope, "}")?;
            }
            Node::Call { .. } => self.line(&format!("{};", expr(stmt)?)),
            Node::Module { .. } | Node::BinaryOp { .. } | Node::Name { .. } | Node::Literal { .. } => {
                return Err(GenerateError::fault(stmt, Position::Statement));
            }
        }
        Ok(())
    }

    fn write_member(&mut self, member: &Node) -> Result<(), GenerateError> {
        match member {
            Node::Function { name, params, body } => {
                self.line(&format!("{name}({}) {{", params_list(params)));
                self.write_block(body, &mut Declarations::with_params(params), "}")
            }
            Node::Assign { target, value } => {
                self.line(&format!(
                    "{} = {};",
                    JAVASCRIPT_SYNTAX.expr(target)?,
                    JAVASCRIPT_SYNTAX.expr(value)?
                ));
                Ok(())
            }
            other => Err(GenerateError::fault(other, Position::ClassMember)),
        }
    }

    fn write_if(
        &mut self,
        prefix: &str,
        test: &Node,
        body: &[Node],
        orelse: &[Node],
        scope: &mut Declarations,
    ) -> Result<(), GenerateError> {
        self.line(&format!("{prefix}if ({}) {{", JAVASCRIPT_SYNTAX.expr(test)?));
        match orelse {
            [] => self.write_block(body, scope, "}"),
            [Node::If {
                test: next_test,
                body: next_body,
                orelse: next_orelse,
            }] => {
                self.indent += 1;
                self.write_body(body, scope)?;
                self.indent -= 1;
                self.write_if("} else ", next_test, next_body, next_orelse, scope)
            }
            _ => {
                self.write_block(body, scope, "} else {")?;
                self.write_block(orelse, scope, "}")
            }
        }
    }
}

impl Default for JavaScriptWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn params_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| match &param.default {
            Some(default) => format!("{} = {default}", param.name),
            None => param.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BinaryOp;

    #[test]
    fn test_function_with_default() {
        let module = Node::module(vec![Node::function(
            "add",
            vec![Param::new("a"), Param::with_default("b", "0")],
            vec![Node::return_stmt(Some(Node::binary(
                Node::name("a"),
                BinaryOp::Add,
                Node::name("b"),
            )))],
        )]);
        let output = JavaScriptWriter::emit(&module).unwrap();
        assert_eq!(output, "function add(a, b = 0) {\n  return a + b;\n}\n");
    }

    #[test]
    fn test_declarations() {
        let module = Node::module(vec![
            Node::assign(Node::name("x"), Node::int(1)),
            Node::assign(Node::name("x"), Node::int(2)),
            Node::if_stmt(
                Node::name("flag"),
                vec![Node::assign(Node::name("y"), Node::string("yes"))],
                vec![Node::assign(Node::name("y"), Node::string("no"))],
            ),
            Node::call(Node::name("console.log"), vec![Node::name("y")]),
        ]);
        insta::assert_snapshot!(JavaScriptWriter::emit(&module).unwrap(), @r#"
        let x = 1;
        x = 2;
        let y;
        if (flag) {
          y = "yes";
        } else {
          y = "no";
        }
        console.log(y);
        "#);
    }

    #[test]
    fn test_definitions_are_declared() {
        let module = Node::module(vec![
            Node::assign(Node::name("f"), Node::int(0)),
            Node::function("f", vec![], vec![]),
            Node::class("Point", vec![]),
            Node::if_stmt(
                Node::name("flag"),
                vec![Node::assign(Node::name("Point"), Node::null())],
                vec![],
            ),
        ]);
        insta::assert_snapshot!(JavaScriptWriter::emit(&module).unwrap(), @r"
        f = 0;

        function f() {
        }

        class Point {
        }

        if (flag) {
          Point = null;
        }
        ");
    }

    #[test]
    fn test_parameters_are_declared() {
        let function = Node::function(
            "bump",
            vec![Param::new("n")],
            vec![
                Node::assign(Node::name("n"), Node::binary(Node::name("n"), BinaryOp::Add, Node::int(1))),
                Node::return_stmt(Some(Node::name("n"))),
            ],
        );
        let output = JavaScriptWriter::emit(&function).unwrap();
        assert_eq!(output, "function bump(n) {\n  n = n + 1;\n  return n;\n}\n");
    }

    #[test]
    fn test_counted_loop() {
        let stmt = Node::for_range(
            Node::name("i"),
            Node::binary(Node::name("n"), BinaryOp::Add, Node::int(1)),
            vec![Node::assign(Node::name("total"), Node::name("i"))],
        );
        insta::assert_snapshot!(JavaScriptWriter::emit(&stmt).unwrap(), @r"
        let total;
        for (let i = 0; i < n + 1; i++) {
          total = i;
        }
        ");
    }

    #[test]
    fn test_else_if_chain() {
        let stmt = Node::if_stmt(
            Node::binary(Node::name("x"), BinaryOp::Gt, Node::int(0)),
            vec![Node::return_stmt(Some(Node::int(1)))],
            vec![Node::if_stmt(
                Node::binary(Node::name("x"), BinaryOp::Lt, Node::int(0)),
                vec![Node::return_stmt(Some(Node::int(-1)))],
                vec![Node::return_stmt(Some(Node::int(0)))],
            )],
        );
        insta::assert_snapshot!(JavaScriptWriter::emit(&stmt).unwrap(), @r"
        if (x > 0) {
          return 1;
        } else if (x < 0) {
          return -1;
        } else {
          return 0;
        }
        ");
    }

    #[test]
    fn test_class() {
        let class = Node::class(
            "Counter",
            vec![
                Node::assign(Node::name("count"), Node::int(0)),
                Node::function("reset", vec![], vec![Node::assign(Node::name("this.count"), Node::int(0))]),
            ],
        );
        insta::assert_snapshot!(JavaScriptWriter::emit(&class).unwrap(), @r"
        class Counter {
          count = 0;

          reset() {
            this.count = 0;
          }
        }
        ");
    }

    #[test]
    fn test_nested_module_is_a_fault() {
        let module = Node::module(vec![Node::module(vec![])]);
        assert_eq!(
            JavaScriptWriter::emit(&module),
            Err(GenerateError::Fault {
                node: "Module",
                position: Position::Statement,
            })
        );
    }
}

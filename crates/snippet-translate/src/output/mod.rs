//! Output writers - emit IR as source code.

pub mod java;
pub mod javascript;
pub mod python;

pub use java::{JAVA_WRITER, JavaWriter, JavaWriterImpl};
pub use javascript::{JAVASCRIPT_WRITER, JavaScriptWriter, JavaScriptWriterImpl};
pub use python::{PYTHON_WRITER, PythonWriter, PythonWriterImpl};

use crate::ir::{BinaryOp, Literal, Node, Param, Position};
use crate::traits::GenerateError;
use std::collections::HashSet;

/// Expression spelling that differs between the surface languages.
struct ExprSyntax {
    true_kw: &'static str,
    false_kw: &'static str,
    null_kw: &'static str,
    /// Python chains comparisons, so `(a < b) == c` keeps its parentheses.
    chained_comparisons: bool,
    /// Integers outside the 32-bit range need an `L` suffix.
    long_suffix: bool,
}

const PYTHON_SYNTAX: ExprSyntax = ExprSyntax {
    true_kw: "True",
    false_kw: "False",
    null_kw: "None",
    chained_comparisons: true,
    long_suffix: false,
};

const JAVASCRIPT_SYNTAX: ExprSyntax = ExprSyntax {
    true_kw: "true",
    false_kw: "false",
    null_kw: "null",
    chained_comparisons: false,
    long_suffix: false,
};

const JAVA_SYNTAX: ExprSyntax = ExprSyntax {
    true_kw: "true",
    false_kw: "false",
    null_kw: "null",
    chained_comparisons: false,
    long_suffix: true,
};

impl ExprSyntax {
    /// Binding strength of `op`; higher binds tighter.
    fn precedence(&self, op: BinaryOp) -> u8 {
        match op {
            BinaryOp::Mul | BinaryOp::Div => 4,
            BinaryOp::Add | BinaryOp::Sub => 3,
            // Python compares at a single level.
            _ if self.chained_comparisons => 1,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 2,
            BinaryOp::Eq | BinaryOp::Ne => 1,
        }
    }

    /// Whether `child`, an operand of `parent`, must be parenthesized.
    fn needs_parens(&self, parent: BinaryOp, child: &Node, is_right: bool) -> bool {
        let Node::BinaryOp { op, .. } = child else {
            return false;
        };
        if self.chained_comparisons && parent.is_comparison() && op.is_comparison() {
            return true;
        }
        let (outer, inner) = (self.precedence(parent), self.precedence(*op));
        inner < outer || (is_right && inner == outer)
    }

    fn literal(&self, value: &Literal) -> String {
        match value {
            Literal::Null => self.null_kw.to_string(),
            Literal::Bool(true) => self.true_kw.to_string(),
            Literal::Bool(false) => self.false_kw.to_string(),
            Literal::Int(value) if self.long_suffix && i32::try_from(*value).is_err() => {
                format!("{value}L")
            }
            Literal::Int(value) => value.to_string(),
            Literal::Float(value) => format_float(*value),
            Literal::Str(value) => quote_string(value),
        }
    }

    fn operand(&self, parent: BinaryOp, child: &Node, is_right: bool) -> Result<String, GenerateError> {
        let text = self.expr(child)?;
        Ok(if self.needs_parens(parent, child, is_right) {
            format!("({text})")
        } else {
            text
        })
    }

    /// Render a node in expression position.
    fn expr(&self, node: &Node) -> Result<String, GenerateError> {
        match node {
            Node::Name { id } => Ok(id.clone()),
            Node::Literal { value } => Ok(self.literal(value)),
            Node::BinaryOp { op, left, right } => Ok(format!(
                "{} {} {}",
                self.operand(*op, left, false)?,
                op,
                self.operand(*op, right, true)?
            )),
            Node::Call { func, args } => {
                let callee = self.expr(func)?;
                let callee = if matches!(func.as_ref(), Node::BinaryOp { .. }) {
                    format!("({callee})")
                } else {
                    callee
                };
                let args = args
                    .iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{callee}({})", args.join(", ")))
            }
            Node::Module { .. }
            | Node::Function { .. }
            | Node::Class { .. }
            | Node::Return { .. }
            | Node::Assign { .. }
            | Node::If { .. }
            | Node::For { .. }
            | Node::While { .. } => Err(GenerateError::fault(node, Position::Expression)),
        }
    }

    /// Upper bound of a counted loop, as the right operand of `<`.
    fn loop_bound(&self, iter: &Node) -> Result<String, GenerateError> {
        self.operand(BinaryOp::Lt, iter, true)
    }
}

/// Decimal text that always reads back as a float.
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// Double-quote a raw string payload, escaping only bare `"`.
fn quote_string(payload: &str) -> String {
    let mut quoted = String::with_capacity(payload.len() + 2);
    quoted.push('"');
    let mut chars = payload.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                quoted.push('\\');
                if let Some(escaped) = chars.next() {
                    quoted.push(escaped);
                }
            }
            '"' => quoted.push_str("\\\""),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Top-level definitions are set off by one blank line.
fn needs_blank_line(prev: &Node, next: &Node) -> bool {
    let is_definition = |node: &Node| matches!(node, Node::Function { .. } | Node::Class { .. });
    is_definition(prev) || is_definition(next)
}

/// Loop variable name, which must be a plain `Name`.
fn loop_target(target: &Node) -> Result<&str, GenerateError> {
    match target {
        Node::Name { id } => Ok(id),
        other => Err(GenerateError::fault(other, Position::LoopTarget)),
    }
}

fn simple_name(node: &Node) -> Option<&str> {
    match node {
        Node::Name { id } if !id.contains('.') => Some(id),
        _ => None,
    }
}

/// Local names already declared in the body being written.
///
/// Used by writers whose target language declares variables (`let`,
/// `Object`). A name is declared by its first assignment in the body; a
/// name first assigned inside a compound statement is declared just before
/// it.
#[derive(Debug, Default)]
struct Declarations {
    declared: HashSet<String>,
}

impl Declarations {
    fn with_params(params: &[Param]) -> Self {
        Self {
            declared: params.iter().map(|param| param.name.clone()).collect(),
        }
    }

    /// Fields of the enclosing class, visible by bare name in its methods.
    fn declare_fields(&mut self, members: &[Node]) {
        for member in members {
            if let Node::Assign { target, .. } = member {
                self.declare(target);
            }
        }
    }

    /// Names bound by `function`/`class` declarations in `body`.
    fn declare_definitions(&mut self, body: &[Node]) {
        for stmt in body {
            if let Node::Function { name, .. } | Node::Class { name, .. } = stmt {
                self.declared.insert(name.clone());
            }
        }
    }

    /// Record an assignment to `target`; true when it declares a new name.
    fn declare(&mut self, target: &Node) -> bool {
        simple_name(target).is_some_and(|id| self.declared.insert(id.to_string()))
    }

    /// Bring a loop variable into scope; true when it was not declared yet.
    fn enter_loop(&mut self, id: &str) -> bool {
        self.declared.insert(id.to_string())
    }

    fn leave_loop(&mut self, id: &str, fresh: bool) {
        if fresh {
            self.declared.remove(id);
        }
    }

    /// Names first assigned inside the blocks of `stmt`, in source order.
    /// They count as declared from here on.
    fn hoist(&mut self, stmt: &Node) -> Vec<String> {
        let mut names = Vec::new();
        if matches!(stmt, Node::If { .. } | Node::For { .. } | Node::While { .. }) {
            let mut loop_vars = Vec::new();
            self.collect(stmt, &mut loop_vars, &mut names);
        }
        for name in &names {
            self.declared.insert(name.clone());
        }
        names
    }

    fn collect<'a>(&self, node: &'a Node, loop_vars: &mut Vec<&'a str>, names: &mut Vec<String>) {
        match node {
            Node::Assign { target, .. } => {
                if let Some(id) = simple_name(target)
                    && !self.declared.contains(id)
                    && !loop_vars.contains(&id)
                    && !names.iter().any(|name| name == id)
                {
                    names.push(id.to_string());
                }
            }
            Node::If { body, orelse, .. } => {
                for stmt in body.iter().chain(orelse) {
                    self.collect(stmt, loop_vars, names);
                }
            }
            Node::While { body, .. } => {
                for stmt in body {
                    self.collect(stmt, loop_vars, names);
                }
            }
            Node::For { target, body, .. } => {
                let loop_var = simple_name(target);
                if let Some(id) = loop_var {
                    loop_vars.push(id);
                }
                for stmt in body {
                    self.collect(stmt, loop_vars, names);
                }
                if loop_var.is_some() {
                    loop_vars.pop();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("hello"), "\"hello\"");
        assert_eq!(quote_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_string("already \\\" escaped"), "\"already \\\" escaped\"");
        assert_eq!(quote_string("it's\\n"), "\"it's\\n\"");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.25), "-0.25");
        assert_eq!(format_float(1e21), "1e21");
    }

    #[test]
    fn test_precedence_parens() {
        let sum = Node::binary(Node::name("a"), BinaryOp::Add, Node::name("b"));
        let product = Node::binary(Node::name("a"), BinaryOp::Mul, Node::name("b"));
        let js = &JAVASCRIPT_SYNTAX;

        let mul_of_sum = Node::binary(sum.clone(), BinaryOp::Mul, Node::int(2));
        assert_eq!(js.expr(&mul_of_sum).unwrap(), "(a + b) * 2");

        let sum_of_product = Node::binary(sum.clone(), BinaryOp::Add, product);
        assert_eq!(js.expr(&sum_of_product).unwrap(), "a + b + a * b");

        let right_nested = Node::binary(Node::name("x"), BinaryOp::Sub, sum);
        assert_eq!(js.expr(&right_nested).unwrap(), "x - (a + b)");
    }

    #[test]
    fn test_comparison_nesting() {
        let lt = Node::binary(Node::name("a"), BinaryOp::Lt, Node::name("b"));
        let eq = Node::binary(lt, BinaryOp::Eq, Node::bool(true));
        assert_eq!(JAVASCRIPT_SYNTAX.expr(&eq).unwrap(), "a < b == true");
        assert_eq!(PYTHON_SYNTAX.expr(&eq).unwrap(), "(a < b) == True");
    }

    #[test]
    fn test_literals_per_language() {
        assert_eq!(PYTHON_SYNTAX.literal(&Literal::Null), "None");
        assert_eq!(JAVA_SYNTAX.literal(&Literal::Bool(false)), "false");
        assert_eq!(JAVA_SYNTAX.literal(&Literal::Int(5_000_000_000)), "5000000000L");
        assert_eq!(JAVASCRIPT_SYNTAX.literal(&Literal::Int(5_000_000_000)), "5000000000");
        assert_eq!(JAVA_SYNTAX.literal(&Literal::Int(-7)), "-7");
    }

    #[test]
    fn test_statement_in_expression_position() {
        let bad = Node::binary(Node::return_stmt(None), BinaryOp::Add, Node::int(1));
        assert_eq!(
            PYTHON_SYNTAX.expr(&bad),
            Err(GenerateError::Fault {
                node: "Return",
                position: Position::Expression,
            })
        );
    }

    #[test]
    fn test_hoisting() {
        let mut scope = Declarations::with_params(&[Param::new("n")]);
        assert!(scope.declare(&Node::name("total")));
        assert!(!scope.declare(&Node::name("total")));
        assert!(!scope.declare(&Node::name("self.x")));

        let branch = Node::if_stmt(
            Node::name("flag"),
            vec![
                Node::assign(Node::name("total"), Node::int(1)),
                Node::assign(Node::name("label"), Node::string("a")),
            ],
            vec![Node::for_range(
                Node::name("i"),
                Node::name("n"),
                vec![
                    Node::assign(Node::name("i"), Node::int(0)),
                    Node::assign(Node::name("last"), Node::name("i")),
                    Node::assign(Node::name("label"), Node::string("b")),
                ],
            )],
        );
        assert_eq!(scope.hoist(&branch), vec!["label", "last"]);
        assert!(scope.hoist(&branch).is_empty());
        assert!(scope.hoist(&Node::assign(Node::name("y"), Node::int(1))).is_empty());
    }
}

//! Python reader.

use super::{
    augmented_op, compound_assign, loop_variable, negate, number_literal, placeholder_bound,
    string_literal, unsupported_expr, unsupported_stmt,
};
use crate::ir::{BinaryOp, Node, Param};
use crate::language::Language;
use crate::native::{Grammar, SyntaxNode};
use crate::traits::{Collaborator, ParseError, Reader};
use std::sync::Arc;

const LANG: Language = Language::Python;

/// Python reader over the tree-sitter-python node vocabulary.
#[derive(Clone)]
pub struct PythonReader {
    collaborator: Arc<dyn Collaborator>,
}

impl PythonReader {
    pub fn new() -> Self {
        Self::with_collaborator(Arc::new(Grammar::new(LANG)))
    }

    pub fn with_collaborator(collaborator: Arc<dyn Collaborator>) -> Self {
        Self { collaborator }
    }
}

impl Default for PythonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for PythonReader {
    fn language(&self) -> Language {
        LANG
    }

    fn read(&self, source: &str) -> Result<Node, ParseError> {
        let root = self.collaborator.parse_native(source)?;
        Ok(Node::module(read_block(Some(&root))))
    }
}

/// Parse Python source into IR with the built-in grammar.
pub fn read_python(source: &str) -> Result<Node, ParseError> {
    PythonReader::new().read(source)
}

fn read_block(node: Option<&SyntaxNode>) -> Vec<Node> {
    node.map(|block| block.named_children().filter_map(read_stmt).collect())
        .unwrap_or_default()
}

fn read_stmt(node: &SyntaxNode) -> Option<Node> {
    match node.kind() {
        "function_definition" => read_function(node),
        "class_definition" => read_class(node),
        "decorated_definition" => node.child_by_field("definition").and_then(read_stmt),
        "return_statement" => Some(Node::return_stmt(
            node.first_named_child().map(read_expr),
        )),
        "if_statement" => Some(read_if(node)),
        "for_statement" => {
            drop_loop_else(node);
            Some(read_for(node))
        }
        "while_statement" => {
            drop_loop_else(node);
            Some(Node::while_loop(
                expr_field(node, "condition"),
                read_block(node.child_by_field("body")),
            ))
        }
        // Depending on the grammar build, simple statements may or may not
        // be wrapped in `expression_statement`.
        "expression_statement" => node.first_named_child().and_then(read_simple_stmt),
        "assignment" | "augmented_assignment" | "call" => read_simple_stmt(node),
        "pass_statement" => None,
        _ => unsupported_stmt(LANG, node),
    }
}

fn read_function(node: &SyntaxNode) -> Option<Node> {
    let name = node.child_by_field("name")?;
    Some(Node::function(
        name.text(),
        read_params(node.child_by_field("parameters")),
        read_block(node.child_by_field("body")),
    ))
}

fn read_params(node: Option<&SyntaxNode>) -> Vec<Param> {
    let Some(node) = node else {
        return Vec::new();
    };
    node.named_children()
        .filter_map(|param| match param.kind() {
            "identifier" => Some(Param::new(param.text())),
            "default_parameter" | "typed_default_parameter" => {
                let name = param.child_by_field("name")?;
                let value = param.child_by_field("value")?;
                Some(Param::with_default(name.text(), value.text()))
            }
            "typed_parameter" => param
                .first_named_child()
                .filter(|name| name.kind() == "identifier")
                .map(|name| Param::new(name.text())),
            _ => {
                tracing::debug!(kind = param.kind(), "dropping unsupported parameter");
                None
            }
        })
        .collect()
}

fn read_class(node: &SyntaxNode) -> Option<Node> {
    let name = node.child_by_field("name")?;
    let members = read_block(node.child_by_field("body"))
        .into_iter()
        .filter(|member| match member {
            Node::Function { .. } | Node::Assign { .. } => true,
            other => {
                tracing::debug!(node = other.tag(), "dropping non-member statement from class body");
                false
            }
        })
        .collect();
    Some(Node::class(name.text(), members))
}

fn read_if(node: &SyntaxNode) -> Node {
    let alternatives: Vec<_> = node.children_by_field("alternative").collect();
    let mut orelse = Vec::new();
    for clause in alternatives.into_iter().rev() {
        match clause.kind() {
            "else_clause" => orelse = read_block(clause.child_by_field("body")),
            "elif_clause" => {
                orelse = vec![Node::if_stmt(
                    expr_field(clause, "condition"),
                    read_block(clause.child_by_field("consequence")),
                    orelse,
                )];
            }
            _ => {}
        }
    }
    Node::if_stmt(
        expr_field(node, "condition"),
        read_block(node.child_by_field("consequence")),
        orelse,
    )
}

fn read_for(node: &SyntaxNode) -> Node {
    let target = loop_variable(LANG, node.child_by_field("left"));
    let iter = range_bound(node.child_by_field("right"))
        .unwrap_or_else(|| placeholder_bound(LANG, node));
    Node::for_range(target, iter, read_block(node.child_by_field("body")))
}

/// `n` of `range(n)` or `range(0, n)`.
fn range_bound(node: Option<&SyntaxNode>) -> Option<Node> {
    let call = node.filter(|node| node.kind() == "call")?;
    let func = call.child_by_field("function")?;
    if func.kind() != "identifier" || func.text() != "range" {
        return None;
    }
    let args = call
        .child_by_field("arguments")
        .filter(|args| args.kind() == "argument_list")?;
    let args: Vec<_> = args.named_children().collect();
    match args.as_slice() {
        [end] => Some(read_expr(end)),
        [start, end] if read_expr(start) == Node::int(0) => Some(read_expr(end)),
        _ => None,
    }
}

/// `else` of a `for`/`while` has no IR counterpart; the loop itself is kept.
fn drop_loop_else(node: &SyntaxNode) {
    if let Some(clause) = node.child_by_field("alternative") {
        tracing::debug!(
            language = %LANG,
            kind = clause.kind(),
            line = clause.line,
            "dropping loop else clause"
        );
    }
}

fn read_simple_stmt(expr: &SyntaxNode) -> Option<Node> {
    match expr.kind() {
        "assignment" => read_assignment(expr),
        "augmented_assignment" => {
            let target = target(expr.child_by_field("left")?)?;
            let Some(op) = expr
                .child_by_field("operator")
                .and_then(|op| augmented_op(op.text()))
            else {
                return unsupported_stmt(LANG, expr);
            };
            Some(compound_assign(target, op, expr_field(expr, "right")))
        }
        "call" => Some(read_expr(expr)),
        _ => unsupported_stmt(LANG, expr),
    }
}

fn read_assignment(node: &SyntaxNode) -> Option<Node> {
    let Some(target) = node.child_by_field("left").and_then(target) else {
        return unsupported_stmt(LANG, node);
    };
    let value = match node.child_by_field("right") {
        // `x: int` declares without a value.
        None => Node::null(),
        Some(right) if matches!(right.kind(), "assignment" | "augmented_assignment") => {
            return unsupported_stmt(LANG, node);
        }
        Some(right) => read_expr(right),
    };
    Some(Node::assign(target, value))
}

fn target(node: &SyntaxNode) -> Option<Node> {
    dotted_name(node).map(Node::name)
}

fn dotted_name(node: &SyntaxNode) -> Option<String> {
    match node.kind() {
        "identifier" => Some(node.text().to_string()),
        "attribute" => {
            let object = dotted_name(node.child_by_field("object")?)?;
            let attribute = node.child_by_field("attribute")?;
            Some(format!("{object}.{}", attribute.text()))
        }
        _ => None,
    }
}

fn expr_field(node: &SyntaxNode, field: &str) -> Node {
    match node.child_by_field(field) {
        Some(child) => read_expr(child),
        None => unsupported_expr(LANG, node),
    }
}

fn read_expr(node: &SyntaxNode) -> Node {
    match node.kind() {
        "identifier" => Node::name(node.text()),
        "attribute" => match dotted_name(node) {
            Some(id) => Node::name(id),
            None => unsupported_expr(LANG, node),
        },
        "integer" | "float" => number_literal(LANG, node),
        "string" => string_literal(LANG, node),
        "true" => Node::bool(true),
        "false" => Node::bool(false),
        "none" => Node::null(),
        "binary_operator" => read_binary(node),
        "comparison_operator" => read_comparison(node),
        "unary_operator" => {
            let negated = node
                .child_by_field("operator")
                .filter(|op| op.text() == "-")
                .and(node.child_by_field("argument"))
                .and_then(|arg| negate(read_expr(arg)));
            negated.unwrap_or_else(|| unsupported_expr(LANG, node))
        }
        "parenthesized_expression" => match node.first_named_child() {
            Some(inner) => read_expr(inner),
            None => unsupported_expr(LANG, node),
        },
        "call" => read_call(node),
        _ => unsupported_expr(LANG, node),
    }
}

fn read_binary(node: &SyntaxNode) -> Node {
    let op = node
        .child_by_field("operator")
        .and_then(|op| BinaryOp::from_symbol(op.text()));
    match (node.child_by_field("left"), op, node.child_by_field("right")) {
        (Some(left), Some(op), Some(right)) => Node::binary(read_expr(left), op, read_expr(right)),
        _ => unsupported_expr(LANG, node),
    }
}

/// Two-operand comparisons; chains such as `a < b < c` are unsupported.
fn read_comparison(node: &SyntaxNode) -> Node {
    let operands: Vec<_> = node.named_children().collect();
    let operators: Vec<_> = node.children_by_field("operators").collect();
    match (operands.as_slice(), operators.as_slice()) {
        ([left, right], [op]) => match BinaryOp::from_symbol(op.text()) {
            Some(op) => Node::binary(read_expr(left), op, read_expr(right)),
            None => unsupported_expr(LANG, node),
        },
        _ => unsupported_expr(LANG, node),
    }
}

fn read_call(node: &SyntaxNode) -> Node {
    let func = expr_field(node, "function");
    let args = match node.child_by_field("arguments") {
        Some(args) if args.kind() == "argument_list" => {
            args.named_children().map(read_expr).collect()
        }
        Some(other) => vec![unsupported_expr(LANG, other)],
        None => Vec::new(),
    };
    Node::call(func, args)
}

//! JavaScript reader.

use super::{
    augmented_op, compound_assign, counted_bound, loop_variable, negate, number_literal,
    placeholder_bound, string_literal, unsupported_expr, unsupported_stmt, update_assign,
};
use crate::ir::{BinaryOp, Node, Param};
use crate::language::Language;
use crate::native::{Grammar, SyntaxNode};
use crate::traits::{Collaborator, ParseError, Reader};
use std::sync::Arc;

const LANG: Language = Language::JavaScript;

/// JavaScript reader over the tree-sitter-javascript node vocabulary.
#[derive(Clone)]
pub struct JavaScriptReader {
    collaborator: Arc<dyn Collaborator>,
}

impl JavaScriptReader {
    pub fn new() -> Self {
        Self::with_collaborator(Arc::new(Grammar::new(LANG)))
    }

    pub fn with_collaborator(collaborator: Arc<dyn Collaborator>) -> Self {
        Self { collaborator }
    }
}

impl Default for JavaScriptReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JavaScriptReader {
    fn language(&self) -> Language {
        LANG
    }

    fn read(&self, source: &str) -> Result<Node, ParseError> {
        let root = self.collaborator.parse_native(source)?;
        Ok(Node::module(read_statements(&root)))
    }
}

/// Parse JavaScript source into IR with the built-in grammar.
pub fn read_javascript(source: &str) -> Result<Node, ParseError> {
    JavaScriptReader::new().read(source)
}

fn read_statements(node: &SyntaxNode) -> Vec<Node> {
    node.named_children().filter_map(read_stmt).collect()
}

/// Body of a compound statement: a `{ ... }` block or a single statement.
fn read_body(node: Option<&SyntaxNode>) -> Vec<Node> {
    match node {
        Some(block) if block.kind() == "statement_block" => read_statements(block),
        Some(stmt) => read_stmt(stmt).into_iter().collect(),
        None => Vec::new(),
    }
}

fn read_stmt(node: &SyntaxNode) -> Option<Node> {
    match node.kind() {
        "function_declaration" => read_function(node),
        "class_declaration" => read_class(node),
        "export_statement" => node.child_by_field("declaration").and_then(read_stmt),
        "lexical_declaration" | "variable_declaration" => read_declaration(node),
        "expression_statement" => read_expression_statement(node),
        "return_statement" => Some(Node::return_stmt(
            node.first_named_child().map(read_expr),
        )),
        "if_statement" => Some(read_if(node)),
        "for_statement" => Some(read_for(node)),
        "for_in_statement" => Some(Node::for_range(
            loop_variable(LANG, node.child_by_field("left")),
            placeholder_bound(LANG, node),
            read_body(node.child_by_field("body")),
        )),
        "while_statement" => Some(Node::while_loop(
            expr_field(node, "condition"),
            read_body(node.child_by_field("body")),
        )),
        "statement_block" => {
            tracing::debug!(line = node.line, "dropping bare block");
            None
        }
        "empty_statement" => None,
        _ => unsupported_stmt(LANG, node),
    }
}

fn read_function(node: &SyntaxNode) -> Option<Node> {
    let name = node.child_by_field("name")?;
    Some(Node::function(
        name.text(),
        read_params(node.child_by_field("parameters")),
        read_body(node.child_by_field("body")),
    ))
}

fn read_params(node: Option<&SyntaxNode>) -> Vec<Param> {
    let Some(node) = node else {
        return Vec::new();
    };
    node.named_children()
        .filter_map(|param| match param.kind() {
            "identifier" => Some(Param::new(param.text())),
            "assignment_pattern" => {
                let name = param
                    .child_by_field("left")
                    .filter(|left| left.kind() == "identifier")?;
                let value = param.child_by_field("right")?;
                Some(Param::with_default(name.text(), value.text()))
            }
            _ => {
                tracing::debug!(kind = param.kind(), "dropping unsupported parameter");
                None
            }
        })
        .collect()
}

fn read_class(node: &SyntaxNode) -> Option<Node> {
    let name = node.child_by_field("name")?;
    let members = node
        .child_by_field("body")
        .map(|body| body.named_children().filter_map(read_member).collect())
        .unwrap_or_default();
    Some(Node::class(name.text(), members))
}

fn read_member(node: &SyntaxNode) -> Option<Node> {
    match node.kind() {
        "method_definition" => {
            let name = node
                .child_by_field("name")
                .filter(|name| name.kind() == "property_identifier")?;
            Some(Node::function(
                name.text(),
                read_params(node.child_by_field("parameters")),
                read_body(node.child_by_field("body")),
            ))
        }
        "field_definition" => {
            let Some(property) = node
                .child_by_field("property")
                .filter(|property| property.kind() == "property_identifier")
            else {
                return unsupported_stmt(LANG, node);
            };
            let value = node
                .child_by_field("value")
                .map(read_expr)
                .unwrap_or_else(Node::null);
            Some(Node::assign(Node::name(property.text()), value))
        }
        _ => unsupported_stmt(LANG, node),
    }
}

/// `let x = v;` with a single declarator; `let x;` declares a null value.
fn read_declaration(node: &SyntaxNode) -> Option<Node> {
    let declarators: Vec<_> = node
        .named_children()
        .filter(|child| child.kind() == "variable_declarator")
        .collect();
    let [declarator] = declarators.as_slice() else {
        return unsupported_stmt(LANG, node);
    };
    let Some(name) = declarator
        .child_by_field("name")
        .filter(|name| name.kind() == "identifier")
    else {
        return unsupported_stmt(LANG, node);
    };
    let value = declarator
        .child_by_field("value")
        .map(read_expr)
        .unwrap_or_else(Node::null);
    Some(Node::assign(Node::name(name.text()), value))
}

fn read_expression_statement(node: &SyntaxNode) -> Option<Node> {
    let expr = node.first_named_child()?;
    match expr.kind() {
        "assignment_expression" => {
            let Some(target) = expr.child_by_field("left").and_then(target) else {
                return unsupported_stmt(LANG, expr);
            };
            match expr.child_by_field("right") {
                Some(right) if right.kind() == "assignment_expression" => {
                    unsupported_stmt(LANG, expr)
                }
                _ => Some(Node::assign(target, expr_field(expr, "right"))),
            }
        }
        "augmented_assignment_expression" => {
            let Some(target) = expr.child_by_field("left").and_then(target) else {
                return unsupported_stmt(LANG, expr);
            };
            let Some(op) = expr
                .child_by_field("operator")
                .and_then(|op| augmented_op(op.text()))
            else {
                return unsupported_stmt(LANG, expr);
            };
            Some(compound_assign(target, op, expr_field(expr, "right")))
        }
        "update_expression" => update_assign(LANG, expr),
        "call_expression" => Some(read_expr(expr)),
        _ => unsupported_stmt(LANG, expr),
    }
}

fn read_if(node: &SyntaxNode) -> Node {
    let orelse = node
        .child_by_field("alternative")
        .map(|clause| read_body(clause.first_named_child()))
        .unwrap_or_default();
    Node::if_stmt(
        expr_field(node, "condition"),
        read_body(node.child_by_field("consequence")),
        orelse,
    )
}

fn read_for(node: &SyntaxNode) -> Node {
    let variable = node.child_by_field("initializer").and_then(|init| match init.kind() {
        "lexical_declaration" | "variable_declaration" => init
            .named_children()
            .find(|child| child.kind() == "variable_declarator")
            .and_then(|declarator| declarator.child_by_field("name")),
        "assignment_expression" => init.child_by_field("left"),
        "expression_statement" => init
            .first_named_child()
            .filter(|expr| expr.kind() == "assignment_expression")
            .and_then(|expr| expr.child_by_field("left")),
        _ => None,
    });
    let target = loop_variable(LANG, variable);

    let test = node.child_by_field("condition").and_then(|cond| match cond.kind() {
        "expression_statement" => cond.first_named_child(),
        "empty_statement" | ";" => None,
        _ => Some(cond),
    });
    let iter = test
        .map(read_expr)
        .and_then(|test| counted_bound(&target, &test))
        .unwrap_or_else(|| placeholder_bound(LANG, node));

    Node::for_range(target, iter, read_body(node.child_by_field("body")))
}

fn target(node: &SyntaxNode) -> Option<Node> {
    dotted_name(node).map(Node::name)
}

fn dotted_name(node: &SyntaxNode) -> Option<String> {
    match node.kind() {
        "identifier" | "this" => Some(node.text().to_string()),
        "member_expression" => {
            if node.children.iter().any(|child| child.kind() == "optional_chain") {
                return None;
            }
            let object = dotted_name(node.child_by_field("object")?)?;
            let property = node
                .child_by_field("property")
                .filter(|property| property.kind() == "property_identifier")?;
            Some(format!("{object}.{}", property.text()))
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
        "identifier" | "this" | "member_expression" => match dotted_name(node) {
            Some(id) => Node::name(id),
            None => unsupported_expr(LANG, node),
        },
        "number" => number_literal(LANG, node),
        "string" => string_literal(LANG, node),
        "template_string" if !node.named_children().any(|c| c.kind() == "template_substitution") => {
            string_literal(LANG, node)
        }
        "true" => Node::bool(true),
        "false" => Node::bool(false),
        "null" | "undefined" => Node::null(),
        "binary_expression" => read_binary(node),
        "unary_expression" => {
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
        "call_expression" => read_call(node),
        _ => unsupported_expr(LANG, node),
    }
}

fn read_binary(node: &SyntaxNode) -> Node {
    let op = node.child_by_field("operator").and_then(|op| match op.text() {
        "===" => Some(BinaryOp::Eq),
        "!==" => Some(BinaryOp::Ne),
        other => BinaryOp::from_symbol(other),
    });
    match (node.child_by_field("left"), op, node.child_by_field("right")) {
        (Some(left), Some(op), Some(right)) => Node::binary(read_expr(left), op, read_expr(right)),
        _ => unsupported_expr(LANG, node),
    }
}

fn read_call(node: &SyntaxNode) -> Node {
    if node.children.iter().any(|child| child.kind() == "optional_chain") {
        return unsupported_expr(LANG, node);
    }
    let func = expr_field(node, "function");
    let args = match node.child_by_field("arguments") {
        Some(args) if args.kind() == "arguments" => args.named_children().map(read_expr).collect(),
        Some(other) => vec![unsupported_expr(LANG, other)],
        None => Vec::new(),
    };
    Node::call(func, args)
}

//! Java reader.
//!
//! Snippets may be bare statements, top-level methods or whole classes. A
//! `public class Main` (or `Snippet`) made only of static methods is the
//! wrapper the Java writer synthesizes, so it is unwrapped: its methods
//! become top-level functions and the body of `main` becomes loose
//! top-level statements.

use super::{
    augmented_op, compound_assign, counted_bound, loop_variable, negate, number_literal,
    parse_int, placeholder_bound, string_literal, unsupported_expr, unsupported_stmt,
    update_assign,
};
use crate::ir::{BinaryOp, Node, Param};
use crate::language::Language;
use crate::native::{Grammar, SyntaxNode};
use crate::traits::{Collaborator, ParseError, Reader};
use std::sync::Arc;

const LANG: Language = Language::Java;

/// Names the Java writer gives its synthesized wrapper class.
pub(crate) const WRAPPER_CLASSES: [&str; 2] = ["Main", "Snippet"];

/// Java reader over the tree-sitter-java node vocabulary.
#[derive(Clone)]
pub struct JavaReader {
    collaborator: Arc<dyn Collaborator>,
}

impl JavaReader {
    pub fn new() -> Self {
        Self::with_collaborator(Arc::new(Grammar::new(LANG)))
    }

    pub fn with_collaborator(collaborator: Arc<dyn Collaborator>) -> Self {
        Self { collaborator }
    }
}

impl Default for JavaReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JavaReader {
    fn language(&self) -> Language {
        LANG
    }

    fn read(&self, source: &str) -> Result<Node, ParseError> {
        let root = self.collaborator.parse_native(source)?;
        let mut body = Vec::new();
        for item in root.named_children() {
            match wrapper_members(item) {
                Some(members) => body.extend(members.into_iter().flat_map(unwrap_member)),
                None => body.extend(read_stmt(item)),
            }
        }
        Ok(Node::module(body))
    }
}

/// Parse Java source into IR with the built-in grammar.
pub fn read_java(source: &str) -> Result<Node, ParseError> {
    JavaReader::new().read(source)
}

fn has_modifier(node: &SyntaxNode, modifier: &str) -> bool {
    node.named_children()
        .find(|child| child.kind() == "modifiers")
        .is_some_and(|modifiers| modifiers.children.iter().any(|m| m.kind() == modifier))
}

/// Members of a synthesized wrapper class, or `None` for any other item.
fn wrapper_members(node: &SyntaxNode) -> Option<Vec<&SyntaxNode>> {
    if node.kind() != "class_declaration" || !has_modifier(node, "public") {
        return None;
    }
    let name = node.child_by_field("name")?;
    if !WRAPPER_CLASSES.contains(&name.text()) {
        return None;
    }
    let members: Vec<_> = node.child_by_field("body")?.named_children().collect();
    let all_static = !members.is_empty()
        && members
            .iter()
            .all(|member| member.kind() == "method_declaration" && has_modifier(member, "static"));
    all_static.then_some(members)
}

fn unwrap_member(method: &SyntaxNode) -> Vec<Node> {
    let is_entry_point = method
        .child_by_field("name")
        .is_some_and(|name| name.text() == "main")
        && method
            .child_by_field("type")
            .is_some_and(|ty| ty.kind() == "void_type");
    if is_entry_point {
        read_body(method.child_by_field("body"))
    } else {
        read_method(method).into_iter().collect()
    }
}

fn read_statements(node: &SyntaxNode) -> Vec<Node> {
    node.named_children().filter_map(read_stmt).collect()
}

/// Body of a compound statement: a `{ ... }` block or a single statement.
fn read_body(node: Option<&SyntaxNode>) -> Vec<Node> {
    match node {
        Some(block) if block.kind() == "block" => read_statements(block),
        Some(stmt) => read_stmt(stmt).into_iter().collect(),
        None => Vec::new(),
    }
}

fn read_stmt(node: &SyntaxNode) -> Option<Node> {
    match node.kind() {
        "class_declaration" => read_class(node),
        "method_declaration" => read_method(node),
        "local_variable_declaration" => read_variable(node),
        "expression_statement" => read_expression_statement(node),
        "return_statement" => Some(Node::return_stmt(
            node.first_named_child().map(read_expr),
        )),
        "if_statement" => Some(Node::if_stmt(
            expr_field(node, "condition"),
            read_body(node.child_by_field("consequence")),
            read_body(node.child_by_field("alternative")),
        )),
        "while_statement" => Some(Node::while_loop(
            expr_field(node, "condition"),
            read_body(node.child_by_field("body")),
        )),
        "for_statement" => Some(read_for(node)),
        "enhanced_for_statement" => Some(Node::for_range(
            loop_variable(LANG, node.child_by_field("name")),
            placeholder_bound(LANG, node),
            read_body(node.child_by_field("body")),
        )),
        ";" => None,
        _ => unsupported_stmt(LANG, node),
    }
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
        "method_declaration" => read_method(node),
        "field_declaration" => read_variable(node),
        _ => unsupported_stmt(LANG, node),
    }
}

fn read_method(node: &SyntaxNode) -> Option<Node> {
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
            "formal_parameter" => param
                .child_by_field("name")
                .map(|name| Param::new(name.text())),
            _ => {
                tracing::debug!(kind = param.kind(), "dropping unsupported parameter");
                None
            }
        })
        .collect()
}

/// Local or field declaration with a single declarator.
fn read_variable(node: &SyntaxNode) -> Option<Node> {
    let declarators: Vec<_> = node.children_by_field("declarator").collect();
    let [declarator] = declarators.as_slice() else {
        return unsupported_stmt(LANG, node);
    };
    let name = declarator.child_by_field("name")?;
    let value = declarator
        .child_by_field("value")
        .map(read_expr)
        .unwrap_or_else(Node::null);
    Some(Node::assign(Node::name(name.text()), value))
}

fn read_expression_statement(node: &SyntaxNode) -> Option<Node> {
    let expr = node.first_named_child()?;
    match expr.kind() {
        "assignment_expression" => read_assignment(expr),
        "update_expression" => update_assign(LANG, expr),
        "method_invocation" => Some(read_expr(expr)),
        _ => unsupported_stmt(LANG, expr),
    }
}

fn read_assignment(node: &SyntaxNode) -> Option<Node> {
    let Some(target) = node.child_by_field("left").and_then(target) else {
        return unsupported_stmt(LANG, node);
    };
    if node
        .child_by_field("right")
        .is_some_and(|right| right.kind() == "assignment_expression")
    {
        return unsupported_stmt(LANG, node);
    }
    let value = expr_field(node, "right");
    match node.child_by_field("operator").map(SyntaxNode::text) {
        Some("=") => Some(Node::assign(target, value)),
        Some(op) => match augmented_op(op) {
            Some(op) => Some(compound_assign(target, op, value)),
            None => unsupported_stmt(LANG, node),
        },
        None => unsupported_stmt(LANG, node),
    }
}

fn read_for(node: &SyntaxNode) -> Node {
    let variable = node.child_by_field("init").and_then(|init| match init.kind() {
        "local_variable_declaration" => init
            .child_by_field("declarator")
            .and_then(|declarator| declarator.child_by_field("name")),
        "assignment_expression" => init.child_by_field("left"),
        _ => None,
    });
    let target = loop_variable(LANG, variable);
    let iter = node
        .child_by_field("condition")
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
        "field_access" => {
            let object = dotted_name(node.child_by_field("object")?)?;
            let field = node
                .child_by_field("field")
                .filter(|field| field.kind() == "identifier")?;
            Some(format!("{object}.{}", field.text()))
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
        "identifier" | "this" | "field_access" => match dotted_name(node) {
            Some(id) => Node::name(id),
            None => unsupported_expr(LANG, node),
        },
        "decimal_integer_literal" | "hex_integer_literal" | "binary_integer_literal"
        | "decimal_floating_point_literal" => number_literal(LANG, node),
        "octal_integer_literal" => octal_literal(node),
        "string_literal" | "character_literal" => string_literal(LANG, node),
        "true" => Node::bool(true),
        "false" => Node::bool(false),
        "null_literal" => Node::null(),
        "binary_expression" => read_binary(node),
        "unary_expression" => {
            let negated = node
                .child_by_field("operator")
                .filter(|op| op.text() == "-")
                .and(node.child_by_field("operand"))
                .and_then(|operand| negate(read_expr(operand)));
            negated.unwrap_or_else(|| unsupported_expr(LANG, node))
        }
        "parenthesized_expression" | "condition" => match node.first_named_child() {
            Some(inner) => read_expr(inner),
            None => unsupported_expr(LANG, node),
        },
        "method_invocation" => read_invocation(node),
        _ => unsupported_expr(LANG, node),
    }
}

/// `017` is octal in Java.
fn octal_literal(node: &SyntaxNode) -> Node {
    let digits = node.text().trim_start_matches('0');
    let literal = if digits.is_empty() {
        Some(0)
    } else {
        parse_int(&format!("0o{digits}"))
    };
    match literal {
        Some(value) => Node::int(value),
        None => unsupported_expr(LANG, node),
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

/// `a.b.c(x)` calls the dotted name `a.b.c`.
fn read_invocation(node: &SyntaxNode) -> Node {
    let Some(name) = node.child_by_field("name") else {
        return unsupported_expr(LANG, node);
    };
    let func = match node.child_by_field("object") {
        None => Node::name(name.text()),
        Some(object) => match dotted_name(object) {
            Some(object) => Node::name(format!("{object}.{}", name.text())),
            None => unsupported_expr(LANG, node),
        },
    };
    let args = node
        .child_by_field("arguments")
        .map(|args| args.named_children().map(read_expr).collect())
        .unwrap_or_default();
    Node::call(func, args)
}

//! Input readers - parse source code into IR.
//!
//! All readers apply the same fallback policy to grammar outside the
//! supported subset:
//!
//! - an unsupported statement is dropped from its enclosing body
//! - an unsupported expression becomes a null literal in place
//! - a missing optional part (no `else`, bare `return`) stays absent
//!
//! None of these are errors; each is logged at debug level.

pub mod java;
pub mod javascript;
pub mod python;

pub use java::{JavaReader, read_java};
pub use javascript::{JavaScriptReader, read_javascript};
pub use python::{PythonReader, read_python};

use crate::ir::{BinaryOp, Literal, Node};
use crate::language::Language;
use crate::native::SyntaxNode;

/// Bound used for loops whose iteration source is not a counted range.
pub const PLACEHOLDER_BOUND: i64 = 10;

/// Loop variable used when a loop has no plain identifier to count with.
pub const SYNTHESIZED_LOOP_VAR: &str = "i";

fn unsupported_stmt(language: Language, node: &SyntaxNode) -> Option<Node> {
    tracing::debug!(
        %language,
        kind = node.kind(),
        line = node.line,
        "dropping unsupported statement"
    );
    None
}

fn unsupported_expr(language: Language, node: &SyntaxNode) -> Node {
    tracing::debug!(
        %language,
        kind = node.kind(),
        line = node.line,
        "replacing unsupported expression with null"
    );
    Node::null()
}

fn placeholder_bound(language: Language, node: &SyntaxNode) -> Node {
    tracing::debug!(
        %language,
        kind = node.kind(),
        line = node.line,
        "loop is not a counted range, using placeholder bound"
    );
    Node::int(PLACEHOLDER_BOUND)
}

/// Loop variable from a plain identifier, otherwise a synthesized one.
fn loop_variable(language: Language, node: Option<&SyntaxNode>) -> Node {
    match node {
        Some(node) if node.kind() == "identifier" => Node::name(node.text()),
        _ => {
            tracing::debug!(%language, "synthesizing loop variable");
            Node::name(SYNTHESIZED_LOOP_VAR)
        }
    }
}

/// Bound of a C-style loop test over `var`: `var < n` gives `n`, and
/// `var <= n` gives `n + 1`.
fn counted_bound(var: &Node, test: &Node) -> Option<Node> {
    let Node::BinaryOp { op, left, right } = test else {
        return None;
    };
    if left.as_ref() != var {
        return None;
    }
    match op {
        BinaryOp::Lt => Some(right.as_ref().clone()),
        BinaryOp::Le => Some(Node::binary(
            right.as_ref().clone(),
            BinaryOp::Add,
            Node::int(1),
        )),
        _ => None,
    }
}

/// `x op= value` as `x = x op value`.
fn compound_assign(target: Node, op: BinaryOp, value: Node) -> Node {
    Node::assign(target.clone(), Node::binary(target, op, value))
}

/// Operator of an augmented assignment token such as `+=`.
fn augmented_op(token: &str) -> Option<BinaryOp> {
    token.strip_suffix('=').and_then(BinaryOp::from_symbol)
}

/// `x++` / `x--` (either side) as an assignment.
fn update_assign(language: Language, node: &SyntaxNode) -> Option<Node> {
    let operand = node.first_named_child()?;
    if !matches!(operand.kind(), "identifier" | "member_expression" | "field_access") {
        return unsupported_stmt(language, node);
    }
    let op = if node.has_token("++") {
        BinaryOp::Add
    } else if node.has_token("--") {
        BinaryOp::Sub
    } else {
        return unsupported_stmt(language, node);
    };
    Some(compound_assign(Node::name(operand.text()), op, Node::int(1)))
}

fn parse_int(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .trim_end_matches(['l', 'L'])
        .to_string();
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else {
        lower.parse().ok()
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let value: f64 = digits
        .trim_end_matches(['f', 'F', 'd', 'D'])
        .parse()
        .ok()?;
    value.is_finite().then_some(value)
}

/// Integer or float literal; anything else (complex, bigint) is unsupported.
fn number_literal(language: Language, node: &SyntaxNode) -> Node {
    let text = node.text();
    if let Some(value) = parse_int(text) {
        Node::int(value)
    } else if let Some(value) = parse_float(text) {
        Node::float(value)
    } else {
        unsupported_expr(language, node)
    }
}

/// Negative numeric literal for `-<number>`.
fn negate(node: Node) -> Option<Node> {
    match node {
        Node::Literal {
            value: Literal::Int(value),
        } => value.checked_neg().map(Node::int),
        Node::Literal {
            value: Literal::Float(value),
        } => Some(Node::float(-value)),
        _ => None,
    }
}

/// Text between the quotes of a single-line string literal.
///
/// Returns `None` for prefixed strings other than `u` (raw, bytes,
/// formatted), for multi-line strings and for unbalanced quotes.
fn string_payload(text: &str) -> Option<&str> {
    let quote_at = text.find(['"', '\'', '`'])?;
    let (prefix, quoted) = text.split_at(quote_at);
    if !prefix.chars().all(|c| c == 'u' || c == 'U') {
        return None;
    }
    let delimiter = ["\"\"\"", "'''", "\"", "'", "`"]
        .into_iter()
        .find(|delim| quoted.starts_with(delim))?;
    let inner = quoted
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)?;
    if quoted.len() < delimiter.len() * 2 || inner.contains('\n') {
        return None;
    }
    Some(inner)
}

fn string_literal(language: Language, node: &SyntaxNode) -> Node {
    match string_payload(node.text()) {
        Some(inner) => Node::string(inner),
        None => unsupported_expr(language, node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0b101"), Some(5));
        assert_eq!(parse_int("0o17"), Some(15));
        assert_eq!(parse_int("10L"), Some(10));
        assert_eq!(parse_int("2.5"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("2.5"), Some(2.5));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("1.5f"), Some(1.5));
        assert_eq!(parse_float("10j"), None);
    }

    #[test]
    fn test_string_payload() {
        assert_eq!(string_payload("\"hello\""), Some("hello"));
        assert_eq!(string_payload("'hi'"), Some("hi"));
        assert_eq!(string_payload("\"\""), Some(""));
        assert_eq!(string_payload("u'x'"), Some("x"));
        assert_eq!(string_payload("\"\"\"doc\"\"\""), Some("doc"));
        assert_eq!(string_payload("`plain`"), Some("plain"));
        assert_eq!(string_payload("r'\\d'"), None);
        assert_eq!(string_payload("f\"{x}\""), None);
        assert_eq!(string_payload("\"\"\"a\nb\"\"\""), None);
    }

    #[test]
    fn test_counted_bound() {
        let i = Node::name("i");
        let lt = Node::binary(Node::name("i"), BinaryOp::Lt, Node::name("n"));
        assert_eq!(counted_bound(&i, &lt), Some(Node::name("n")));

        let le = Node::binary(Node::name("i"), BinaryOp::Le, Node::int(9));
        assert_eq!(
            counted_bound(&i, &le),
            Some(Node::binary(Node::int(9), BinaryOp::Add, Node::int(1)))
        );

        let other_var = Node::binary(Node::name("j"), BinaryOp::Lt, Node::name("n"));
        assert_eq!(counted_bound(&i, &other_var), None);

        let gt = Node::binary(Node::name("i"), BinaryOp::Gt, Node::int(0));
        assert_eq!(counted_bound(&i, &gt), None);
    }

    #[test]
    fn test_negate() {
        assert_eq!(negate(Node::int(3)), Some(Node::int(-3)));
        assert_eq!(negate(Node::float(0.5)), Some(Node::float(-0.5)));
        assert_eq!(negate(Node::name("x")), None);
    }

    #[test]
    fn test_augmented_op() {
        assert_eq!(augmented_op("+="), Some(BinaryOp::Add));
        assert_eq!(augmented_op("/="), Some(BinaryOp::Div));
        assert_eq!(augmented_op("%="), None);
        assert_eq!(augmented_op("//="), None);
    }
}

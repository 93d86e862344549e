//! JSON text encoding of IR trees.
//!
//! Each node is an object tagged by `"type"`, children in source order:
//!
//! ```json
//! {"type": "Return", "value": {"type": "Name", "id": "x"}}
//! ```
//!
//! The encoding is for inspecting trees (`--dump-ir`) and for hand-written
//! fixtures, not for long-term storage. Decoding validates shape, so a
//! decoded tree is always one a reader could have produced.

use super::{Node, ShapeError};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed IR JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid IR tree: {0}")]
    Shape(#[from] ShapeError),
}

/// Encode a tree as pretty-printed JSON.
pub fn to_json(node: &Node) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(node)
}

/// Decode a tree and check its shape.
pub fn from_json(text: &str) -> Result<Node, DecodeError> {
    let node: Node = serde_json::from_str(text)?;
    node.validate()?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BinaryOp, Literal, Param};

    fn sample() -> Node {
        Node::module(vec![
            Node::function(
                "check",
                vec![Param::new("x"), Param::with_default("limit", "10")],
                vec![
                    Node::if_stmt(
                        Node::binary(Node::name("x"), BinaryOp::Gt, Node::int(0)),
                        vec![Node::return_stmt(Some(Node::string("positive")))],
                        vec![Node::return_stmt(None)],
                    ),
                    Node::for_range(
                        Node::name("i"),
                        Node::name("limit"),
                        vec![Node::call(Node::name("print"), vec![Node::float(2.5)])],
                    ),
                ],
            ),
            Node::assign(Node::name("flag"), Node::bool(true)),
            Node::assign(Node::name("nothing"), Node::null()),
        ])
    }

    #[test]
    fn test_round_trip_is_identity() {
        let tree = sample();
        let text = to_json(&tree).unwrap();
        assert_eq!(from_json(&text).unwrap(), tree);
    }

    #[test]
    fn test_tag_layout() {
        let text = to_json(&Node::return_stmt(Some(Node::name("x")))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "Return");
        assert_eq!(value["value"]["type"], "Name");
        assert_eq!(value["value"]["id"], "x");
    }

    #[test]
    fn test_literal_kinds_survive() {
        for literal in [
            Literal::Null,
            Literal::Bool(false),
            Literal::Int(-3),
            Literal::Float(1.0),
            Literal::Str("hi".into()),
        ] {
            let node = Node::literal(literal);
            let text = to_json(&node).unwrap();
            assert_eq!(from_json(&text).unwrap(), node);
        }
    }

    #[test]
    fn test_operator_spelling() {
        let text = to_json(&Node::binary(Node::int(1), BinaryOp::Le, Node::int(2))).unwrap();
        assert!(text.contains("\"op\": \"<=\""));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = from_json(r#"{"type": "Lambda", "body": []}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_bad_shape_rejected() {
        let err = from_json(r#"{"type": "Module", "body": [{"type": "Name", "id": "x"}]}"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }
}

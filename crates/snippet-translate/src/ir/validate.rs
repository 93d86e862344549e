//! Structural shape checks.
//!
//! The type system already guarantees that required children exist; this
//! module checks the rules it cannot express: where each variant may
//! appear, that `Module` is root-only, and that function and class names are
//! non-empty. Nothing here looks at identifiers beyond emptiness.

use super::{Node, Position};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{node} cannot appear in {position} position")]
    Misplaced {
        node: &'static str,
        position: Position,
    },

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
}

impl Node {
    /// Check the structural rules of the tree rooted at `self`.
    ///
    /// Any variant may be a root; a `Module` may only be a root.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Node::Module { body } => body.iter().try_for_each(check_statement),
            node if node.is_statement() => check_statement(node),
            node => check_expression(node),
        }
    }
}

fn misplaced(node: &Node, position: Position) -> ShapeError {
    ShapeError::Misplaced {
        node: node.tag(),
        position,
    }
}

fn check_block(body: &[Node]) -> Result<(), ShapeError> {
    body.iter().try_for_each(check_statement)
}

fn check_statement(node: &Node) -> Result<(), ShapeError> {
    match node {
        Node::Function { name, body, .. } => {
            if name.is_empty() {
                return Err(ShapeError::EmptyName("Function"));
            }
            check_block(body)
        }
        Node::Class { name, body } => {
            if name.is_empty() {
                return Err(ShapeError::EmptyName("Class"));
            }
            body.iter().try_for_each(check_member)
        }
        Node::Return { value } => value.as_deref().map_or(Ok(()), check_expression),
        Node::Assign { target, value } => {
            check_expression(target)?;
            check_expression(value)
        }
        Node::If { test, body, orelse } => {
            check_expression(test)?;
            check_block(body)?;
            check_block(orelse)
        }
        Node::For { target, iter, body } => {
            if !matches!(target.as_ref(), Node::Name { .. }) {
                return Err(misplaced(target, Position::LoopTarget));
            }
            check_expression(iter)?;
            check_block(body)
        }
        Node::While { test, body } => {
            check_expression(test)?;
            check_block(body)
        }
        Node::Call { .. } => check_expression(node),
        Node::Module { .. } | Node::BinaryOp { .. } | Node::Name { .. } | Node::Literal { .. } => {
            Err(misplaced(node, Position::Statement))
        }
    }
}

fn check_member(node: &Node) -> Result<(), ShapeError> {
    match node {
        Node::Function { .. } | Node::Assign { .. } => check_statement(node),
        _ => Err(misplaced(node, Position::ClassMember)),
    }
}

fn check_expression(node: &Node) -> Result<(), ShapeError> {
    match node {
        Node::Call { func, args } => {
            check_expression(func)?;
            args.iter().try_for_each(check_expression)
        }
        Node::BinaryOp { left, right, .. } => {
            check_expression(left)?;
            check_expression(right)
        }
        Node::Name { id } if id.is_empty() => Err(ShapeError::EmptyName("Name")),
        Node::Name { .. } | Node::Literal { .. } => Ok(()),
        _ => Err(misplaced(node, Position::Expression)),
    }
}

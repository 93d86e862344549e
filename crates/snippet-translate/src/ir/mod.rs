//! The shared intermediate representation.
//!
//! Every reader produces a [`Node::Module`] and every writer consumes one.
//! A tree owns all of its children; it is built once by a reader in a single
//! top-down pass and never mutated afterwards.
//!
//! Nodes play one of two roles inside their parent:
//!
//! - *statement position*: `Function`, `Class`, `Return`, `Assign`, `If`,
//!   `For`, `While`, `Call`
//! - *expression position*: `Call`, `BinaryOp`, `Name`, `Literal`
//!
//! `Class` bodies hold only `Function` and `Assign` members, and `Module`
//! only ever appears at the root. [`Node::validate`] checks these rules.

mod json;
mod structure_eq;
mod validate;

pub use json::{DecodeError, from_json, to_json};
pub use structure_eq::StructureEq;
pub use validate::ShapeError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the IR tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Root of every parsed snippet.
    Module { body: Vec<Node> },

    Function {
        name: String,
        params: Vec<Param>,
        body: Vec<Node>,
    },

    /// A class; members are `Function` or `Assign` nodes.
    Class { name: String, body: Vec<Node> },

    /// `None` is a bare `return`.
    Return {
        #[serde(default)]
        value: Option<Box<Node>>,
    },

    Assign { target: Box<Node>, value: Box<Node> },

    /// `elif` is a nested `If` as the only statement of `orelse`.
    If {
        test: Box<Node>,
        body: Vec<Node>,
        #[serde(default)]
        orelse: Vec<Node>,
    },

    /// Counts `target` up from 0 while it is below `iter`.
    For {
        target: Box<Node>,
        iter: Box<Node>,
        body: Vec<Node>,
    },

    While { test: Box<Node>, body: Vec<Node> },

    Call { func: Box<Node>, args: Vec<Node> },

    BinaryOp {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// An identifier, or a dotted path of identifiers (`self.total`).
    Name { id: String },

    Literal { value: Literal },
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// Source text of the default value, kept exactly as written.
    #[serde(default)]
    pub default: Option<String>,
}

/// Literal values.
///
/// String payloads are the source spelling between the quotes; escape
/// sequences are kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Binary operators shared by all three surface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
}

/// The role a node plays inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Root,
    Statement,
    Expression,
    ClassMember,
    LoopTarget,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::Root => "root",
            Position::Statement => "statement",
            Position::Expression => "expression",
            Position::ClassMember => "class member",
            Position::LoopTarget => "loop target",
        })
    }
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 10] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::Le,
        BinaryOp::Ge,
    ];

    /// Operator spelling, identical in every surface language.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == symbol)
    }

    pub fn is_comparison(self) -> bool {
        !matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

// Builders
impl Node {
    pub fn module(body: Vec<Node>) -> Self {
        Node::Module { body }
    }

    pub fn function(name: impl Into<String>, params: Vec<Param>, body: Vec<Node>) -> Self {
        Node::Function {
            name: name.into(),
            params,
            body,
        }
    }

    pub fn class(name: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Class {
            name: name.into(),
            body,
        }
    }

    pub fn return_stmt(value: Option<Node>) -> Self {
        Node::Return {
            value: value.map(Box::new),
        }
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Node::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn if_stmt(test: Node, body: Vec<Node>, orelse: Vec<Node>) -> Self {
        Node::If {
            test: Box::new(test),
            body,
            orelse,
        }
    }

    pub fn for_range(target: Node, iter: Node, body: Vec<Node>) -> Self {
        Node::For {
            target: Box::new(target),
            iter: Box::new(iter),
            body,
        }
    }

    pub fn while_loop(test: Node, body: Vec<Node>) -> Self {
        Node::While {
            test: Box::new(test),
            body,
        }
    }

    pub fn call(func: Node, args: Vec<Node>) -> Self {
        Node::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn binary(left: Node, op: BinaryOp, right: Node) -> Self {
        Node::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn name(id: impl Into<String>) -> Self {
        Node::Name { id: id.into() }
    }

    pub fn literal(value: Literal) -> Self {
        Node::Literal { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::literal(Literal::Str(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Node::literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Node::literal(Literal::Float(value))
    }

    pub fn bool(value: bool) -> Self {
        Node::literal(Literal::Bool(value))
    }

    pub fn null() -> Self {
        Node::literal(Literal::Null)
    }
}

impl Node {
    /// Variant name, as used in the JSON encoding.
    pub fn tag(&self) -> &'static str {
        match self {
            Node::Module { .. } => "Module",
            Node::Function { .. } => "Function",
            Node::Class { .. } => "Class",
            Node::Return { .. } => "Return",
            Node::Assign { .. } => "Assign",
            Node::If { .. } => "If",
            Node::For { .. } => "For",
            Node::While { .. } => "While",
            Node::Call { .. } => "Call",
            Node::BinaryOp { .. } => "BinaryOp",
            Node::Name { .. } => "Name",
            Node::Literal { .. } => "Literal",
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::Function { .. }
                | Node::Class { .. }
                | Node::Return { .. }
                | Node::Assign { .. }
                | Node::If { .. }
                | Node::For { .. }
                | Node::While { .. }
                | Node::Call { .. }
        )
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Node::Call { .. } | Node::BinaryOp { .. } | Node::Name { .. } | Node::Literal { .. }
        )
    }

    /// Top-level statements of a module, or `None` for any other node.
    pub fn module_body(&self) -> Option<&[Node]> {
        match self {
            Node::Module { body } => Some(body),
            _ => None,
        }
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, Node::Literal { value: Literal::Null })
    }
}

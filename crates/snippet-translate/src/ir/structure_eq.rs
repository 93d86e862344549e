//! Structural equality for IR trees.
//!
//! `structure_eq` compares IR trees ignoring "surface hints": details that
//! record how one language happened to spell something rather than what the
//! snippet says.
//!
//! # Hint Fields (normalized during comparison)
//!
//! - `Param::default` - only the presence of a default is compared, not its
//!   text (`b=0` and `b = 0` are the same parameter)
//!
//! # Core Fields (must match exactly)
//!
//! - All names, literal values, operators
//! - Control flow structure
//! - Expression trees

use super::{Node, Param};

/// Trait for structural equality comparison.
///
/// Unlike `PartialEq`, this ignores surface hint fields that differ between
/// languages but don't change the translated snippet.
pub trait StructureEq {
    fn structure_eq(&self, other: &Self) -> bool;
}

impl StructureEq for Node {
    fn structure_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Module { body: a }, Node::Module { body: b }) => vec_structure_eq(a, b),

            (
                Node::Function {
                    name: n1,
                    params: p1,
                    body: b1,
                },
                Node::Function {
                    name: n2,
                    params: p2,
                    body: b2,
                },
            ) => n1 == n2 && vec_structure_eq(p1, p2) && vec_structure_eq(b1, b2),

            (Node::Class { name: n1, body: b1 }, Node::Class { name: n2, body: b2 }) => {
                n1 == n2 && vec_structure_eq(b1, b2)
            }

            (Node::Return { value: a }, Node::Return { value: b }) => {
                option_structure_eq(a.as_deref(), b.as_deref())
            }

            (
                Node::Assign {
                    target: t1,
                    value: v1,
                },
                Node::Assign {
                    target: t2,
                    value: v2,
                },
            ) => t1.structure_eq(t2) && v1.structure_eq(v2),

            (
                Node::If {
                    test: t1,
                    body: b1,
                    orelse: o1,
                },
                Node::If {
                    test: t2,
                    body: b2,
                    orelse: o2,
                },
            ) => t1.structure_eq(t2) && vec_structure_eq(b1, b2) && vec_structure_eq(o1, o2),

            (
                Node::For {
                    target: t1,
                    iter: i1,
                    body: b1,
                },
                Node::For {
                    target: t2,
                    iter: i2,
                    body: b2,
                },
            ) => t1.structure_eq(t2) && i1.structure_eq(i2) && vec_structure_eq(b1, b2),

            (Node::While { test: t1, body: b1 }, Node::While { test: t2, body: b2 }) => {
                t1.structure_eq(t2) && vec_structure_eq(b1, b2)
            }

            (Node::Call { func: f1, args: a1 }, Node::Call { func: f2, args: a2 }) => {
                f1.structure_eq(f2) && vec_structure_eq(a1, a2)
            }

            (
                Node::BinaryOp {
                    op: o1,
                    left: l1,
                    right: r1,
                },
                Node::BinaryOp {
                    op: o2,
                    left: l2,
                    right: r2,
                },
            ) => o1 == o2 && l1.structure_eq(l2) && r1.structure_eq(r2),

            (Node::Name { id: a }, Node::Name { id: b }) => a == b,
            (Node::Literal { value: a }, Node::Literal { value: b }) => a == b,

            _ => false,
        }
    }
}

// Ignore the default's text - it's a surface hint
impl StructureEq for Param {
    fn structure_eq(&self, other: &Self) -> bool {
        self.name == other.name && self.default.is_some() == other.default.is_some()
    }
}

// Helper functions

fn vec_structure_eq<T: StructureEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y))
}

fn option_structure_eq<T: StructureEq>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.structure_eq(y),
        _ => false,
    }
}

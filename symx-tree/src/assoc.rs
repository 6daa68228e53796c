//! Associativity transforms for the n-ary operator tags.
//!
//! [`associate`] merges any chain of identical n-ary operators into one flat node
//! (`(+ a (+ b c))` becomes `(+ a b c)`); [`deassociate`] is its inverse, rewriting a flat node
//! into a strictly binary right-leaning chain for algorithms that only understand binary
//! operators. Both recurse into every child first, so nested mixed operators are each handled
//! independently.

use crate::expr::{Expr, Op};

/// The tags [`associate_all`] and [`deassociate_all`] operate on.
pub const NARY_OPS: [Op; 6] = [Op::Add, Op::Mul, Op::And, Op::Or, Op::Union, Op::Intersect];

/// Recursively merges chains of `op` into single flat nodes.
pub fn associate(expr: &Expr, op: Op) -> Expr {
    expr.map_bottom_up(&|node| match node {
        Expr::Op(tag, children) if tag == op => {
            let mut flat = Vec::with_capacity(children.len());
            for child in children {
                match child {
                    Expr::Op(inner, grandchildren) if inner == op => flat.extend(grandchildren),
                    other => flat.push(other),
                }
            }
            Expr::Op(tag, flat)
        }
        other => other,
    })
}

/// Recursively rewrites flat `op` nodes into right-leaning binary chains.
pub fn deassociate(expr: &Expr, op: Op) -> Expr {
    expr.map_bottom_up(&|node| match node {
        Expr::Op(tag, mut children) if tag == op && children.len() > 2 => {
            let mut chain = match children.pop() {
                Some(last) => last,
                None => return Expr::Op(tag, children),
            };
            while let Some(operand) = children.pop() {
                chain = Expr::Op(op, vec![operand, chain]);
            }
            chain
        }
        other => other,
    })
}

/// Flattens every tag in the commutative/associative set.
pub fn associate_all(expr: &Expr) -> Expr {
    NARY_OPS
        .iter()
        .fold(expr.clone(), |acc, &op| associate(&acc, op))
}

/// De-flattens every tag in the commutative/associative set.
pub fn deassociate_all(expr: &Expr) -> Expr {
    NARY_OPS
        .iter()
        .fold(expr.clone(), |acc, &op| deassociate(&acc, op))
}

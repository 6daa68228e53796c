//! Structural JSON encoding for [`Expr`] trees.
//!
//! The encoding is a direct serialization of the tree shape, so a decoded tree is structurally
//! identical to the one that was encoded. It exists for transport between processes (parser
//! front ends, grading back ends) and for test fixtures, not for human consumption; use the
//! [`Display`](std::fmt::Display) impl on [`Expr`] for that.

use crate::expr::Expr;

/// An error produced while decoding a serialized expression tree.
#[derive(Debug, thiserror::Error)]
#[error("malformed expression tree: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Serializes a tree to its JSON representation.
pub fn to_json(expr: &Expr) -> Result<String, serde_json::Error> {
    serde_json::to_string(expr)
}

/// Deserializes a tree from its JSON representation.
///
/// Input that is not valid JSON, or valid JSON that does not describe an expression tree, is
/// rejected with a [`DecodeError`].
pub fn from_json(text: &str) -> Result<Expr, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

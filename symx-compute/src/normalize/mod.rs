//! The normalization pipeline.
//!
//! Every comparison starts by rewriting both trees into a canonical shape. The passes run in a
//! fixed order; each is total, side-effect-free and independently invocable:
//!
//! 1. [`normalize_function_names`] — synonym collapse, `exp(x)` to `e^x`, explicit-base `log`.
//! 2. [`normalize_applied_functions`] — powered and primed function heads (`sin^2 x`, `f(x)'`).
//! 3. [`normalize_negative_numbers`] — fold `Neg` into literals, drop unary `+`.
//! 4. [`normalize_geometry_arg_order`] — orient angles and segments deterministically.
//! 5. [`associate_all`](symx_tree::assoc::associate_all) — flatten commutative operator chains.
//!
//! Normalization is idempotent up to syntactic equality.

mod applied;
mod function_names;
mod geometry;
mod negatives;

pub use applied::normalize_applied_functions;
pub use function_names::normalize_function_names;
pub use geometry::normalize_geometry_arg_order;
pub use negatives::normalize_negative_numbers;

use symx_tree::assoc::associate_all;
use symx_tree::Expr;

/// Runs the full pipeline.
pub fn normalize(expr: &Expr) -> Expr {
    let expr = normalize_function_names(expr);
    let expr = normalize_applied_functions(&expr);
    let expr = normalize_negative_numbers(&expr);
    let expr = normalize_geometry_arg_order(&expr);
    associate_all(&expr)
}

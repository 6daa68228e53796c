//! Normalization, numeric evaluation and equivalence checking for `symx` expression trees.
//!
//! The crate answers one question in two registers: are two [`Expr`](symx_tree::Expr) trees the
//! same thing? [`equals_via_syntax`] compares how they are *written*; [`Context::equals`]
//! compares what they *denote*, by normalizing both trees and sampling them over the complex
//! plane. The semantic check is probabilistic: agreement across every trial is strong evidence,
//! not proof.
//!
//! ```
//! use symx_compute::{Context, EqualityOptions};
//! use symx_tree::Expr;
//!
//! let x = || Expr::sym("x");
//! let lhs = Expr::add(vec![
//!     Expr::pow(Expr::call("sin", vec![x()]), Expr::int(2)),
//!     Expr::pow(Expr::call("cos", vec![x()]), Expr::int(2)),
//! ]);
//!
//! let mut ctxt = Context::with_seed(0);
//! assert!(ctxt.equals(&lhs, &Expr::int(1), &EqualityOptions::default()));
//! ```

pub mod assume;
pub mod complex;
pub mod context;
pub mod equality;
pub mod error;
pub mod funcs;
pub mod matching;
pub mod normalize;

mod eval;

pub use complex::Complex;
pub use context::Context;
pub use equality::{equals_via_syntax, EqualityOptions};
pub use error::{EvalError, Inconclusive};
pub use matching::{match_tree, MatchParams, MatchResult};
pub use normalize::normalize;

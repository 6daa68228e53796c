//! Canonical expression trees shared by every component of the `symx` engine.
//!
//! External parsers (LaTeX, MathML, linear text, ...) produce [`Expr`] values and external
//! printers consume them; everything in between — normalization, matching, numeric equivalence
//! checking — operates on this one representation. The tree is immutable from the consumer's
//! perspective: every transform returns a new tree.
//!
//! The crate also provides the associativity transforms ([`assoc::associate`] /
//! [`assoc::deassociate`]) and a JSON structural encoding ([`encode`]) that round-trips a tree
//! exactly.

pub mod assoc;
pub mod encode;
pub mod expr;

pub use expr::{Expr, Number, Op};

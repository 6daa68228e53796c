//! Assumptions about free variables, consulted when the evaluator draws sample values.
//!
//! Assumptions are ordinary expression trees (`n ∈ Z`, `x ∈ R and y > 0`, ...) collected in an
//! [`Assumptions`] store owned by a [`Context`](crate::Context). Only the sampling domain of a
//! variable is read out of them: a variable asserted to lie in `Z` is drawn from small integers,
//! one asserted to lie in `R` from the real line, anything else from the complex unit square.

use symx_tree::{Expr, Op};

/// The sampling domain of a single variable.
///
/// The variants are ordered from least to most restrictive so that several applicable
/// assumptions combine by taking the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VarDomain {
    Complex,
    Real,
    Integer,
}

/// A set of assumed propositions.
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    facts: Vec<Expr>,
}

impl Assumptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fact: Expr) {
        self.facts.push(fact);
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.facts.iter()
    }

    /// The domain the named variable should be sampled from.
    ///
    /// A membership assertion constrains the variable when it appears as a direct fact or as any
    /// conjunct of an `And`. Disjuncts of an `Or` do not constrain: `n ∈ Z or x > 0` does not
    /// pin `n` down.
    pub fn domain_of(&self, var: &str) -> VarDomain {
        self.facts
            .iter()
            .map(|fact| domain_from(fact, var))
            .max()
            .unwrap_or(VarDomain::Complex)
    }
}

fn domain_from(fact: &Expr, var: &str) -> VarDomain {
    match fact {
        Expr::Op(Op::In, children) if children.len() == 2 => {
            membership_domain(&children[0], &children[1], var)
        }
        // `Z ∋ n` reads right to left
        Expr::Op(Op::Ni, children) if children.len() == 2 => {
            membership_domain(&children[1], &children[0], var)
        }
        Expr::Op(Op::And, conjuncts) => conjuncts
            .iter()
            .map(|conjunct| domain_from(conjunct, var))
            .max()
            .unwrap_or(VarDomain::Complex),
        _ => VarDomain::Complex,
    }
}

fn membership_domain(element: &Expr, set: &Expr, var: &str) -> VarDomain {
    if element.as_symbol() != Some(var) {
        return VarDomain::Complex;
    }
    match set.as_symbol() {
        Some("Z") => VarDomain::Integer,
        Some("R") => VarDomain::Real,
        _ => VarDomain::Complex,
    }
}

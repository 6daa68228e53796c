//! The mutable state one comparison session carries: assumptions and a random source.

use crate::assume::Assumptions;
use crate::equality::{self, EqualityOptions};
use crate::error::Inconclusive;
use rand::rngs::StdRng;
use rand::SeedableRng;
use symx_tree::Expr;

/// A comparison session.
///
/// Owns the assumption store and the random number generator the evaluator draws from. There is
/// no global state: independent contexts are fully isolated and may live on different threads.
pub struct Context {
    pub(crate) assumptions: Assumptions,
    pub(crate) rng: StdRng,
}

impl Context {
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A context whose random draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            assumptions: Assumptions::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Adds a proposition the evaluator may rely on, such as `n ∈ Z`.
    pub fn assume(&mut self, fact: Expr) {
        self.assumptions.add(fact);
    }

    pub fn clear_assumptions(&mut self) {
        self.assumptions.clear();
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Semantic equivalence; [`Inconclusive`] is surfaced to the caller.
    pub fn try_equals(
        &mut self,
        a: &Expr,
        b: &Expr,
        options: &EqualityOptions,
    ) -> Result<bool, Inconclusive> {
        equality::try_equals(self, a, b, options)
    }

    /// Semantic equivalence. An inconclusive comparison counts as "not shown equal" and comes
    /// back `false`; use [`try_equals`](Self::try_equals) to distinguish the two.
    pub fn equals(&mut self, a: &Expr, b: &Expr, options: &EqualityOptions) -> bool {
        self.try_equals(a, b, options).unwrap_or(false)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

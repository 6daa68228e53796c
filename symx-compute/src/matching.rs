//! Wildcard matching of one tree against a pattern.
//!
//! A pattern is an ordinary expression in which some symbols are declared wildcards. An
//! ordinary node must match exactly; a wildcard matches any subtree and binds it. Matching is
//! positional, with one exception: inside a commutative operator whose pattern operands mention
//! a wildcard, every pairing of pattern operands to tree operands is tried. That exception is
//! what lets the pattern `F(x) + c` recognize an antiderivative no matter where the `+ c`
//! landed in the sum.

use crate::equality::{equals_via_syntax, EqualityOptions};
use std::collections::HashMap;
use symx_tree::{Expr, Op};

/// Commutative nodes larger than this are matched positionally; the bijection search is
/// factorial in the operand count.
pub const MAX_COMMUTATIVE_OPERANDS: usize = 6;

/// Per-wildcard constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wildcard {
    /// Restricts the wildcard to numeric literals (including negated ones).
    pub numbers_only: bool,
}

/// Declares which pattern symbols are wildcards.
#[derive(Debug, Clone, Default)]
pub struct MatchParams {
    wildcards: HashMap<String, Wildcard>,
}

impl MatchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` an unconstrained wildcard.
    pub fn wildcard(mut self, name: &str) -> Self {
        self.wildcards.insert(name.to_string(), Wildcard::default());
        self
    }

    /// Declares `name` a wildcard that only matches numeric literals.
    pub fn numeric_wildcard(mut self, name: &str) -> Self {
        self.wildcards
            .insert(name.to_string(), Wildcard { numbers_only: true });
        self
    }

    fn get(&self, name: &str) -> Option<Wildcard> {
        self.wildcards.get(name).copied()
    }
}

/// The bindings of a successful match. Empty when the pattern used no wildcards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    bindings: HashMap<String, Expr>,
}

impl MatchResult {
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> &HashMap<String, Expr> {
        &self.bindings
    }
}

/// Matches `tree` against `pattern`. `None` is the ordinary negative outcome.
pub fn match_tree(tree: &Expr, pattern: &Expr, params: &MatchParams) -> Option<MatchResult> {
    let mut result = MatchResult::default();
    if matches_at(tree, pattern, params, &mut result) {
        Some(result)
    } else {
        None
    }
}

fn matches_at(
    tree: &Expr,
    pattern: &Expr,
    params: &MatchParams,
    out: &mut MatchResult,
) -> bool {
    if let Expr::Symbol(name) = pattern {
        if let Some(wildcard) = params.get(name) {
            return bind_wildcard(tree, name, wildcard, out);
        }
    }
    match (tree, pattern) {
        (Expr::Number(x), Expr::Number(y)) => x == y,
        (Expr::Symbol(x), Expr::Symbol(y)) => x == y,
        (Expr::Blank, Expr::Blank) => true,
        (Expr::Apply(tree_head, tree_args), Expr::Apply(pat_head, pat_args)) => {
            matches_at(tree_head, pat_head, params, out)
                && tree_args.len() == pat_args.len()
                && tree_args
                    .iter()
                    .zip(pat_args)
                    .all(|(t, p)| matches_at(t, p, params, out))
        }
        (Expr::Op(tree_tag, tree_children), Expr::Op(pat_tag, pat_children)) => {
            if tree_tag != pat_tag || tree_children.len() != pat_children.len() {
                return false;
            }
            if tree_tag.is_commutative()
                && tree_children.len() <= MAX_COMMUTATIVE_OPERANDS
                && pat_children.iter().any(|p| mentions_wildcard(p, params))
            {
                let mut used = vec![false; tree_children.len()];
                return commutative_match(tree_children, pat_children, &mut used, 0, params, out);
            }
            tree_children
                .iter()
                .zip(pat_children)
                .all(|(t, p)| matches_at(t, p, params, out))
        }
        _ => false,
    }
}

fn bind_wildcard(tree: &Expr, name: &str, wildcard: Wildcard, out: &mut MatchResult) -> bool {
    if wildcard.numbers_only && !is_numeric_literal(tree) {
        return false;
    }
    if let Some(previous) = out.bindings.get(name) {
        // a repeated wildcard must bind the same thing everywhere
        return equals_via_syntax(previous, tree, &EqualityOptions::default());
    }
    out.bindings.insert(name.to_string(), tree.clone());
    true
}

fn is_numeric_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Number(_) => true,
        Expr::Op(Op::Neg, children) if children.len() == 1 => {
            matches!(children[0], Expr::Number(_))
        }
        _ => false,
    }
}

fn mentions_wildcard(pattern: &Expr, params: &MatchParams) -> bool {
    pattern.post_order_iter().any(|node| {
        matches!(node, Expr::Symbol(name) if params.get(name).is_some())
    })
}

/// Backtracking search for a pairing of pattern operands to tree operands. Bindings made along
/// a failed branch are rolled back by restoring a snapshot.
fn commutative_match(
    tree_children: &[Expr],
    pat_children: &[Expr],
    used: &mut [bool],
    idx: usize,
    params: &MatchParams,
    out: &mut MatchResult,
) -> bool {
    if idx == pat_children.len() {
        return true;
    }
    for j in 0..tree_children.len() {
        if used[j] {
            continue;
        }
        let snapshot = out.clone();
        if matches_at(&tree_children[j], &pat_children[idx], params, out) {
            used[j] = true;
            if commutative_match(tree_children, pat_children, used, idx + 1, params, out) {
                return true;
            }
            used[j] = false;
        }
        *out = snapshot;
    }
    false
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sin_x() -> Expr {
        Expr::call("sin", vec![Expr::sym("x")])
    }

    #[test]
    fn literal_patterns_match_exactly() {
        let params = MatchParams::new();
        assert!(match_tree(&sin_x(), &sin_x(), &params).is_some());
        assert!(match_tree(&sin_x(), &Expr::call("cos", vec![Expr::sym("x")]), &params).is_none());
    }

    #[test]
    fn wildcard_binds_a_subtree() {
        let params = MatchParams::new().wildcard("c");
        let pattern = Expr::add(vec![sin_x(), Expr::sym("c")]);
        let tree = Expr::add(vec![sin_x(), Expr::int(7)]);

        let result = match_tree(&tree, &pattern, &params).unwrap();
        assert_eq!(result.get("c"), Some(&Expr::int(7)));
    }

    #[test]
    fn commutative_operands_may_reorder_around_a_wildcard() {
        // the constant appears first in the tree, last in the pattern
        let params = MatchParams::new().wildcard("c");
        let pattern = Expr::add(vec![sin_x(), Expr::sym("c")]);
        let tree = Expr::add(vec![Expr::int(7), sin_x()]);

        let result = match_tree(&tree, &pattern, &params).unwrap();
        assert_eq!(result.get("c"), Some(&Expr::int(7)));
    }

    #[test]
    fn numeric_wildcard_rejects_non_literals() {
        let params = MatchParams::new().numeric_wildcard("c");
        let pattern = Expr::add(vec![sin_x(), Expr::sym("c")]);

        let tree = Expr::add(vec![sin_x(), Expr::neg(Expr::int(3))]);
        assert!(match_tree(&tree, &pattern, &params).is_some());

        let tree = Expr::add(vec![sin_x(), Expr::call("cos", vec![Expr::sym("x")])]);
        assert!(match_tree(&tree, &pattern, &params).is_none());
    }

    #[test]
    fn repeated_wildcard_must_agree() {
        let params = MatchParams::new().wildcard("c");
        // c * x + c
        let pattern = Expr::add(vec![
            Expr::mul(vec![Expr::sym("c"), Expr::sym("x")]),
            Expr::sym("c"),
        ]);

        let consistent = Expr::add(vec![
            Expr::mul(vec![Expr::int(2), Expr::sym("x")]),
            Expr::int(2),
        ]);
        assert!(match_tree(&consistent, &pattern, &params).is_some());

        let inconsistent = Expr::add(vec![
            Expr::mul(vec![Expr::int(2), Expr::sym("x")]),
            Expr::int(3),
        ]);
        assert!(match_tree(&inconsistent, &pattern, &params).is_none());
    }

    #[test]
    fn non_commutative_positions_stay_fixed() {
        let params = MatchParams::new().wildcard("c");
        // pattern c / x must not match x / 5 with c = 5
        let pattern = Expr::div(Expr::sym("c"), Expr::sym("x"));
        let tree = Expr::div(Expr::sym("x"), Expr::int(5));
        assert!(match_tree(&tree, &pattern, &params).is_none());
    }

    #[test]
    fn large_commutative_nodes_fall_back_to_positional() {
        let params = MatchParams::new().wildcard("c");
        let mut tree_terms: Vec<Expr> = (0..7).map(Expr::int).collect();
        let mut pat_terms = tree_terms.clone();
        pat_terms[6] = Expr::sym("c");
        tree_terms.swap(0, 6);

        // 7 operands exceed the bijection cap, and positionally the first operands differ
        let tree = Expr::add(tree_terms);
        let pattern = Expr::add(pat_terms);
        assert!(match_tree(&tree, &pattern, &params).is_none());
    }
}

use symx_tree::{Expr, Op};

/// Folds negation into numeric literals and drops unary `+`, bottom up.
///
/// `-(3)` becomes the literal `-3`, `-(2x)` becomes `(-2)x`, `--e` becomes `e`, and `+e`
/// becomes `e`. A `Neg` wrapping an already-negative literal is left alone, so the pass is
/// stable: `--3` folds the inner negation to `-3` and keeps the outer one.
pub fn normalize_negative_numbers(expr: &Expr) -> Expr {
    expr.map_bottom_up(&|node| match node {
        Expr::Op(Op::Plus, mut children) if children.len() == 1 => match children.pop() {
            Some(child) => child,
            None => Expr::Op(Op::Plus, children),
        },
        Expr::Op(Op::Neg, mut children) if children.len() == 1 => match children.pop() {
            Some(Expr::Number(n)) if n.is_positive() => Expr::Number(n.neg()),
            Some(Expr::Op(Op::Neg, mut inner)) if inner.len() == 1 => match inner.pop() {
                Some(child) => child,
                None => Expr::Op(Op::Neg, inner),
            },
            Some(Expr::Op(Op::Mul, mut factors))
                if matches!(
                    factors.first().and_then(Expr::as_number),
                    Some(n) if n.is_positive()
                ) =>
            {
                if let Some(n) = factors[0].as_number() {
                    factors[0] = Expr::Number(n.neg());
                }
                Expr::Op(Op::Mul, factors)
            }
            Some(other) => Expr::neg(other),
            None => Expr::Op(Op::Neg, children),
        },
        other => other,
    })
}

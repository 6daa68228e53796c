//! Sampling-based semantic comparison.

use super::{tags_coercible, EqualityOptions};
use crate::complex::Complex;
use crate::context::Context;
use crate::error::Inconclusive;
use crate::eval::{sample_variables, Trial};
use crate::normalize::normalize;
use symx_tree::{Expr, Op};

/// How many agreeing sample draws are required before two trees count as equal.
pub(crate) const TRIALS: usize = 20;

/// How many failed draws (division by zero, poles, non-finite values) are tolerated across one
/// comparison before giving up with [`Inconclusive`].
pub(crate) const MAX_RESAMPLES: usize = 200;

const REL_EPS: f64 = 1e-12;
const ABS_EPS: f64 = 5e-9;
const ABS_FLOOR: f64 = 1e-5;

pub(crate) fn try_equals(
    ctxt: &mut Context,
    a: &Expr,
    b: &Expr,
    options: &EqualityOptions,
) -> Result<bool, Inconclusive> {
    // a blank sheds its wildcard meaning here and samples as one shared variable
    if !options.allow_blanks && (a.contains_blank() || b.contains_blank()) {
        return Ok(false);
    }
    let a = normalize(a);
    let b = normalize(b);
    sem_eq(ctxt, &a, &b, options)
}

/// Structural dispatch over already-normalized trees.
fn sem_eq(
    ctxt: &mut Context,
    a: &Expr,
    b: &Expr,
    options: &EqualityOptions,
) -> Result<bool, Inconclusive> {
    let a = canonical_direction(a.clone());
    let b = canonical_direction(b.clone());

    if is_scalar(&a) && is_scalar(&b) {
        return sample_eq(ctxt, &a, &b, options);
    }
    let (Expr::Op(tag_a, children_a), Expr::Op(tag_b, children_b)) = (&a, &b) else {
        return Ok(false);
    };

    if tag_a == tag_b {
        return match tag_a {
            Op::Eq | Op::Ne | Op::Lt | Op::Le
                if children_a.len() == 2
                    && children_b.len() == 2
                    && children_a.iter().chain(children_b.iter()).all(is_scalar) =>
            {
                let ordered = matches!(tag_a, Op::Lt | Op::Le);
                relation_eq(
                    ctxt,
                    (&children_a[0], &children_a[1]),
                    (&children_b[0], &children_b[1]),
                    ordered,
                )
            }
            // memberships, set containments, negation, and relations over non-scalar
            // operands compare operand by operand
            Op::Eq
            | Op::Ne
            | Op::Lt
            | Op::Le
            | Op::In
            | Op::NotIn
            | Op::Subset
            | Op::NotSubset
            | Op::SubsetEq
            | Op::NotSubsetEq
            | Op::Not => pairwise(ctxt, children_a, children_b, options),
            // unordered operand sets
            Op::And | Op::Or | Op::Union | Op::Intersect | Op::Add | Op::Mul => {
                multiset_eq(ctxt, children_a, children_b, options)
            }
            Op::Tuple | Op::Vector | Op::AltVector | Op::Array | Op::Interval { .. } => {
                pairwise(ctxt, children_a, children_b, options)
            }
            _ => Ok(false),
        };
    }
    if tags_coercible(*tag_a, *tag_b, options) {
        return pairwise(ctxt, children_a, children_b, options);
    }
    Ok(false)
}

/// Rewrites a relation so both sides of a comparison use the same direction: `a > b` becomes
/// `b < a`, `S ∋ x` becomes `x ∈ S`, `A ⊃ B` becomes `B ⊂ A`, and so on.
fn canonical_direction(expr: Expr) -> Expr {
    let (op, mut children) = match expr {
        Expr::Op(op, children) => (op, children),
        other => return other,
    };
    let (op, swap) = match op {
        Op::Gt => (Op::Lt, true),
        Op::Ge => (Op::Le, true),
        Op::Ni => (Op::In, true),
        Op::NotNi => (Op::NotIn, true),
        Op::Superset => (Op::Subset, true),
        Op::NotSuperset => (Op::NotSubset, true),
        Op::SupersetEq => (Op::SubsetEq, true),
        Op::NotSupersetEq => (Op::NotSubsetEq, true),
        other => (other, false),
    };
    if swap && children.len() == 2 {
        children.swap(0, 1);
    }
    Expr::Op(op, children)
}

/// Whether the tree denotes a single complex value, so that it can be sampled.
fn is_scalar(expr: &Expr) -> bool {
    expr.post_order_iter().all(|node| match node {
        Expr::Op(op, _) => matches!(
            op,
            Op::Add
                | Op::Mul
                | Op::Neg
                | Op::Plus
                | Op::Div
                | Op::Pow
                | Op::Factorial
                | Op::Prime
                | Op::Angle
                | Op::LineSegment
        ),
        _ => true,
    })
}

/// Element-by-element comparison; lengths must agree.
fn pairwise(
    ctxt: &mut Context,
    left: &[Expr],
    right: &[Expr],
    options: &EqualityOptions,
) -> Result<bool, Inconclusive> {
    if left.len() != right.len() {
        return Ok(false);
    }
    let mut inconclusive = false;
    for (x, y) in left.iter().zip(right) {
        match sem_eq(ctxt, x, y, options) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(Inconclusive) => inconclusive = true,
        }
    }
    if inconclusive {
        Err(Inconclusive)
    } else {
        Ok(true)
    }
}

/// Unordered comparison: searches for a bijection between the operand lists under which every
/// pair compares equal.
fn multiset_eq(
    ctxt: &mut Context,
    left: &[Expr],
    right: &[Expr],
    options: &EqualityOptions,
) -> Result<bool, Inconclusive> {
    if left.len() != right.len() {
        return Ok(false);
    }
    let mut used = vec![false; right.len()];
    let mut inconclusive = false;
    if pair_up(ctxt, left, right, &mut used, 0, options, &mut inconclusive) {
        Ok(true)
    } else if inconclusive {
        Err(Inconclusive)
    } else {
        Ok(false)
    }
}

fn pair_up(
    ctxt: &mut Context,
    left: &[Expr],
    right: &[Expr],
    used: &mut [bool],
    idx: usize,
    options: &EqualityOptions,
    inconclusive: &mut bool,
) -> bool {
    if idx == left.len() {
        return true;
    }
    for j in 0..right.len() {
        if used[j] {
            continue;
        }
        match sem_eq(ctxt, &left[idx], &right[j], options) {
            Ok(true) => {
                used[j] = true;
                if pair_up(ctxt, left, right, used, idx + 1, options, inconclusive) {
                    return true;
                }
                used[j] = false;
            }
            Ok(false) => {}
            Err(Inconclusive) => *inconclusive = true,
        }
    }
    false
}

/// Samples both scalar trees at shared random points; all draws must agree.
fn sample_eq(
    ctxt: &mut Context,
    a: &Expr,
    b: &Expr,
    options: &EqualityOptions,
) -> Result<bool, Inconclusive> {
    let vars = sample_variables(&[a, b]);
    let mut completed = 0;
    let mut failed = 0;
    while completed < TRIALS {
        let mut trial = Trial::draw(&vars, &ctxt.assumptions, &mut ctxt.rng);
        let va = trial.eval(a, &mut ctxt.rng);
        let vb = trial.eval(b, &mut ctxt.rng);
        match (va, vb) {
            (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => {
                if !values_close(x, y, options) {
                    return Ok(false);
                }
                completed += 1;
            }
            _ => {
                failed += 1;
                if failed > MAX_RESAMPLES {
                    return Err(Inconclusive);
                }
            }
        }
    }
    Ok(true)
}

/// Two relations are equivalent when the difference of one is a consistent nonzero constant
/// multiple of the difference of the other; for ordered relations the constant must in
/// addition be real and positive, since multiplying by a negative flips the direction.
fn relation_eq(
    ctxt: &mut Context,
    (lhs_a, rhs_a): (&Expr, &Expr),
    (lhs_b, rhs_b): (&Expr, &Expr),
    ordered: bool,
) -> Result<bool, Inconclusive> {
    let diff_a = Expr::add(vec![lhs_a.clone(), Expr::neg(rhs_a.clone())]);
    let diff_b = Expr::add(vec![lhs_b.clone(), Expr::neg(rhs_b.clone())]);
    let vars = sample_variables(&[&diff_a, &diff_b]);

    let mut ratio: Option<Complex> = None;
    let mut completed = 0;
    let mut failed = 0;
    while completed < TRIALS {
        let mut trial = Trial::draw(&vars, &ctxt.assumptions, &mut ctxt.rng);
        let va = trial.eval(&diff_a, &mut ctxt.rng);
        let vb = trial.eval(&diff_b, &mut ctxt.rng);
        let (x, y) = match (va, vb) {
            (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => (x, y),
            _ => {
                failed += 1;
                if failed > MAX_RESAMPLES {
                    return Err(Inconclusive);
                }
                continue;
            }
        };

        // both differences vanish at this draw (identical identities); nothing to learn
        if x.modulus() <= ABS_EPS && y.modulus() <= ABS_EPS {
            completed += 1;
            continue;
        }
        let k = match x.div(y) {
            Ok(k) if k.is_finite() => k,
            _ => return Ok(false),
        };
        if k.modulus() <= ABS_EPS {
            return Ok(false);
        }
        if ordered && !(k.re > 0.0 && k.im.abs() <= 1e-8 * k.modulus()) {
            return Ok(false);
        }
        match ratio {
            Some(k0) if !values_close(k, k0, &EqualityOptions::default()) => return Ok(false),
            Some(_) => {}
            None => ratio = Some(k),
        }
        completed += 1;
    }
    Ok(true)
}

/// Tolerance-based closeness of two sampled values.
///
/// Built-in tolerance: relative `1e-12`, or absolute `5e-9` once the larger magnitude clears
/// `1e-5` (the floor keeps genuinely tiny values like `1e-30` and `2e-30` apart). The
/// configured `allowed_error_in_numbers` widens the bound on top.
fn values_close(x: Complex, y: Complex, options: &EqualityOptions) -> bool {
    let d = (x - y).modulus();
    let m = x.modulus().max(y.modulus());
    if d <= REL_EPS * m {
        return true;
    }
    if m >= ABS_FLOOR && d <= ABS_EPS {
        return true;
    }
    let allowed = options.allowed_error_in_numbers;
    if allowed <= 0.0 {
        return false;
    }
    if options.allowed_error_is_absolute {
        d <= allowed
    } else {
        d <= allowed * m
    }
}

//! Positional syntactic comparison of normalized trees.

use super::{tags_coercible, EqualityOptions};
use crate::normalize::normalize;
use symx_tree::{Expr, Number, Op};

/// Whether the two trees are written the same way, after normalization.
///
/// The comparison is positional: tags and operand order must agree exactly, apart from the
/// container coercions the options allow. Numeric literals compare by value (`2` equals `2.0`),
/// widened by the configured tolerance.
pub fn equals_via_syntax(a: &Expr, b: &Expr, options: &EqualityOptions) -> bool {
    if (a.contains_blank() || b.contains_blank()) && !options.allow_blanks {
        return false;
    }
    syntactic_eq(&normalize(a), &normalize(b), options, false)
}

/// The comparison itself, assuming both sides are already normalized. `in_exponent` tracks
/// whether the current position sits inside a `Pow` exponent, where the numeric tolerance is
/// gated separately.
pub(crate) fn syntactic_eq(
    a: &Expr,
    b: &Expr,
    options: &EqualityOptions,
    in_exponent: bool,
) -> bool {
    match (a, b) {
        (Expr::Number(x), Expr::Number(y)) => numbers_close(*x, *y, options, in_exponent),
        (Expr::Symbol(x), Expr::Symbol(y)) => x == y,
        (Expr::Blank, Expr::Blank) => options.allow_blanks,
        (Expr::Apply(head_a, args_a), Expr::Apply(head_b, args_b)) => {
            syntactic_eq(head_a, head_b, options, in_exponent)
                && args_a.len() == args_b.len()
                && args_a
                    .iter()
                    .zip(args_b)
                    .all(|(x, y)| syntactic_eq(x, y, options, in_exponent))
        }
        (Expr::Op(tag_a, children_a), Expr::Op(tag_b, children_b)) => {
            if tag_a != tag_b && !tags_coercible(*tag_a, *tag_b, options) {
                return false;
            }
            if children_a.len() != children_b.len() {
                return false;
            }
            if *tag_a == Op::Pow && children_a.len() == 2 {
                return syntactic_eq(&children_a[0], &children_b[0], options, in_exponent)
                    && syntactic_eq(&children_a[1], &children_b[1], options, true);
            }
            children_a
                .iter()
                .zip(children_b)
                .all(|(x, y)| syntactic_eq(x, y, options, in_exponent))
        }
        _ => false,
    }
}

fn numbers_close(x: Number, y: Number, options: &EqualityOptions, in_exponent: bool) -> bool {
    let (a, b) = (x.as_f64(), y.as_f64());
    if a == b {
        return true;
    }
    if in_exponent && !options.include_error_in_number_exponents {
        return false;
    }
    let allowed = options.allowed_error_in_numbers;
    if allowed <= 0.0 {
        return false;
    }
    if options.allowed_error_is_absolute {
        (a - b).abs() <= allowed
    } else {
        (a - b).abs() <= allowed * a.abs().max(b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> EqualityOptions {
        EqualityOptions::default()
    }

    #[test]
    fn operand_order_matters() {
        // 1 + 2x vs x*2 + 1
        let a = Expr::add(vec![
            Expr::int(1),
            Expr::mul(vec![Expr::int(2), Expr::sym("x")]),
        ]);
        let b = Expr::add(vec![
            Expr::mul(vec![Expr::sym("x"), Expr::int(2)]),
            Expr::int(1),
        ]);
        assert!(equals_via_syntax(&a, &a, &opts()));
        assert!(!equals_via_syntax(&a, &b, &opts()));
    }

    #[test]
    fn normalization_is_applied_first() {
        // asin(x) and arcsin(x) are spellings of the same tree
        let a = Expr::call("asin", vec![Expr::sym("x")]);
        let b = Expr::call("arcsin", vec![Expr::sym("x")]);
        assert!(equals_via_syntax(&a, &b, &opts()));
    }

    #[test]
    fn integers_and_floats_compare_by_value() {
        assert!(equals_via_syntax(&Expr::int(2), &Expr::float(2.0), &opts()));
        assert!(!equals_via_syntax(&Expr::int(2), &Expr::float(2.1), &opts()));
    }

    #[test]
    fn tolerance_widen_is_opt_in() {
        let a = Expr::float(1.0);
        let b = Expr::float(1.05);
        assert!(!equals_via_syntax(&a, &b, &opts()));

        let loose = EqualityOptions {
            allowed_error_in_numbers: 0.1,
            ..Default::default()
        };
        assert!(equals_via_syntax(&a, &b, &loose));
    }

    #[test]
    fn exponent_tolerance_is_gated() {
        let a = Expr::pow(Expr::sym("x"), Expr::float(2.0));
        let b = Expr::pow(Expr::sym("x"), Expr::float(2.01));
        let loose = EqualityOptions {
            allowed_error_in_numbers: 0.1,
            ..Default::default()
        };
        assert!(!equals_via_syntax(&a, &b, &loose));

        let loose_exponents = EqualityOptions {
            include_error_in_number_exponents: true,
            ..loose
        };
        assert!(equals_via_syntax(&a, &b, &loose_exponents));
    }

    #[test]
    fn blanks_compare_only_when_allowed() {
        let a = Expr::add(vec![Expr::sym("x"), Expr::Blank]);
        assert!(!equals_via_syntax(&a, &a, &opts()));

        let allow = EqualityOptions {
            allow_blanks: true,
            ..Default::default()
        };
        assert!(equals_via_syntax(&a, &a, &allow));
    }

    #[test]
    fn tuple_coerces_to_vector_positionally() {
        let tuple = Expr::Op(Op::Tuple, vec![Expr::int(1), Expr::int(2)]);
        let vector = Expr::Op(Op::Vector, vec![Expr::int(1), Expr::int(2)]);
        assert!(equals_via_syntax(&tuple, &vector, &opts()));

        let strict = EqualityOptions {
            coerce_tuples_arrays: false,
            ..Default::default()
        };
        assert!(!equals_via_syntax(&tuple, &vector, &strict));
    }
}

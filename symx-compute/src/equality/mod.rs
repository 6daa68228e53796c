//! Expression equivalence, in two registers.
//!
//! [`equals_via_syntax`] asks "are these written the same way?": both trees are normalized and
//! then compared position by position. Commutative operands are *not* reordered, so `1 + 2x`
//! and `x*2 + 1` are different syntactically. This comparison can never report a false
//! positive.
//!
//! [`Context::equals`](crate::Context::equals) asks "do these denote the same thing?": after
//! normalization, scalar trees are compared by evaluating both at random points of the complex
//! plane, relations by testing whether their differences are a consistent constant multiple of
//! each other, and containers element by element. Sampling is probabilistic evidence, not a
//! proof, and a pathological pair of expressions can in principle fool it.

mod numeric;
mod syntax;

pub use syntax::equals_via_syntax;

pub(crate) use numeric::try_equals;

use symx_tree::Op;

/// Per-call knobs for both comparison registers.
#[derive(Debug, Clone)]
pub struct EqualityOptions {
    /// Extra tolerance granted when comparing numeric values, on top of the built-in epsilon.
    pub allowed_error_in_numbers: f64,

    /// Whether [`allowed_error_in_numbers`](Self::allowed_error_in_numbers) is an absolute
    /// difference rather than a fraction of the larger magnitude.
    pub allowed_error_is_absolute: bool,

    /// Whether the extra tolerance also applies to literals appearing in exponents.
    pub include_error_in_number_exponents: bool,

    /// Whether trees containing the blank placeholder may compare equal at all.
    pub allow_blanks: bool,

    /// Whether tuples coerce to vectors, open intervals and (for arrays) closed intervals.
    pub coerce_tuples_arrays: bool,

    /// Whether the two vector notations coerce to each other.
    pub coerce_vectors: bool,
}

impl Default for EqualityOptions {
    fn default() -> Self {
        Self {
            allowed_error_in_numbers: 0.0,
            allowed_error_is_absolute: false,
            include_error_in_number_exponents: false,
            allow_blanks: false,
            coerce_tuples_arrays: true,
            coerce_vectors: true,
        }
    }
}

/// Whether two container tags may stand for the same object under the given options.
///
/// The table is deliberately sparse: a vector never coerces directly to an interval, even
/// though both coerce to a tuple.
pub(crate) fn tags_coercible(a: Op, b: Op, options: &EqualityOptions) -> bool {
    let pair = |x: Op, y: Op| (a == x && b == y) || (a == y && b == x);
    let open = Op::Interval {
        left_closed: false,
        right_closed: false,
    };
    let closed = Op::Interval {
        left_closed: true,
        right_closed: true,
    };

    if options.coerce_tuples_arrays
        && (pair(Op::Tuple, Op::Vector)
            || pair(Op::Tuple, Op::AltVector)
            || pair(Op::Tuple, open)
            || pair(Op::Array, closed))
    {
        return true;
    }
    options.coerce_vectors && pair(Op::Vector, Op::AltVector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_table_is_sparse() {
        let options = EqualityOptions::default();
        let open = Op::Interval {
            left_closed: false,
            right_closed: false,
        };
        let closed = Op::Interval {
            left_closed: true,
            right_closed: true,
        };

        assert!(tags_coercible(Op::Tuple, Op::Vector, &options));
        assert!(tags_coercible(Op::Vector, Op::Tuple, &options));
        assert!(tags_coercible(Op::Tuple, open, &options));
        assert!(tags_coercible(Op::Array, closed, &options));
        assert!(tags_coercible(Op::Vector, Op::AltVector, &options));

        assert!(!tags_coercible(Op::Vector, open, &options));
        assert!(!tags_coercible(Op::Array, open, &options));
        assert!(!tags_coercible(Op::Tuple, closed, &options));
    }

    #[test]
    fn coercion_can_be_disabled() {
        let options = EqualityOptions {
            coerce_tuples_arrays: false,
            coerce_vectors: false,
            ..Default::default()
        };
        assert!(!tags_coercible(Op::Tuple, Op::Vector, &options));
        assert!(!tags_coercible(Op::Vector, Op::AltVector, &options));
    }
}

//! Errors produced while evaluating and comparing expressions.

/// An error raised while numerically evaluating an expression at a sampled point.
///
/// These are per-sample failures: the evaluator discards the draw and retries with fresh values,
/// so they normally never reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The divisor evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The argument of a logarithm evaluated to exactly zero.
    #[error("logarithm of zero")]
    LogOfZero,

    /// The operation has no value at the sampled point (a pole, a blank, a non-numeric subtree).
    #[error("`{0}` is undefined at the sampled point")]
    Undefined(String),

    /// The function name has no numeric implementation.
    #[error("unknown function: `{0}`")]
    UnknownFunction(String),

    /// A known function was applied to the wrong number of arguments.
    #[error("`{name}` expects {expected} argument(s), got {actual}")]
    WrongArity {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Too many sample draws failed to evaluate, so the comparison could not be decided.
///
/// Returned by [`Context::try_equals`](crate::Context::try_equals);
/// [`Context::equals`](crate::Context::equals) collapses this case to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("comparison inconclusive: too many sample draws failed to evaluate")]
pub struct Inconclusive;

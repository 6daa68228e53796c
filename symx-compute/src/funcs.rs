//! The named-function vocabulary: canonical names, inverse pairs, and numeric dispatch.
//!
//! Names arriving from parsers are canonicalized through [`canonical_name`] (so `asin`, `ln` and
//! `nCr` collapse to `arcsin`, `log` and `binom`); everything downstream, the normalizer and the
//! evaluator alike, deals in canonical names only.

use crate::complex::Complex;
use crate::error::EvalError;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("asin", "arcsin"),
        ("acos", "arccos"),
        ("atan", "arctan"),
        ("asec", "arcsec"),
        ("acsc", "arccsc"),
        ("acot", "arccot"),
        ("asinh", "arcsinh"),
        ("acosh", "arccosh"),
        ("atanh", "arctanh"),
        ("asech", "arcsech"),
        ("acsch", "arccsch"),
        ("acoth", "arccoth"),
        ("ln", "log"),
        ("nCr", "binom"),
    ])
});

const INVERSE_PAIRS: [(&str, &str); 12] = [
    ("sin", "arcsin"),
    ("cos", "arccos"),
    ("tan", "arctan"),
    ("sec", "arcsec"),
    ("csc", "arccsc"),
    ("cot", "arccot"),
    ("sinh", "arcsinh"),
    ("cosh", "arccosh"),
    ("tanh", "arctanh"),
    ("sech", "arcsech"),
    ("csch", "arccsch"),
    ("coth", "arccoth"),
];

static INVERSES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (name, arc) in INVERSE_PAIRS {
        map.insert(name, arc);
        map.insert(arc, name);
    }
    map
});

static KNOWN: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set: HashSet<&'static str> = INVERSES.keys().copied().collect();
    set.extend([
        "exp", "log", "sqrt", "abs", "gamma", "binom", "floor", "ceil", "round", "sign", "re",
        "im", "arg", "conj", "atan2",
    ]);
    set
});

/// Maps a synonym to its canonical name; canonical and unknown names pass through unchanged.
pub fn canonical_name(name: &str) -> &str {
    SYNONYMS.get(name).copied().unwrap_or(name)
}

/// Whether the (canonicalized) name has a numeric implementation.
pub fn is_known(name: &str) -> bool {
    KNOWN.contains(canonical_name(name))
}

/// The inverse of a circular or hyperbolic function, in either direction.
pub fn inverse_of(name: &str) -> Option<&'static str> {
    INVERSES.get(canonical_name(name)).copied()
}

/// Evaluates a known function at the given arguments.
pub fn apply(name: &str, args: &[Complex]) -> Result<Complex, EvalError> {
    let name = canonical_name(name);
    let exactly = |expected: usize| -> Result<(), EvalError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(EvalError::WrongArity {
                name: name.to_string(),
                expected,
                actual: args.len(),
            })
        }
    };
    let unary = || -> Result<Complex, EvalError> {
        exactly(1)?;
        Ok(args[0])
    };

    match name {
        "sin" => Ok(unary()?.sin()),
        "cos" => Ok(unary()?.cos()),
        "tan" => unary()?.tan(),
        "sec" => unary()?.sec(),
        "csc" => unary()?.csc(),
        "cot" => unary()?.cot(),
        "sinh" => Ok(unary()?.sinh()),
        "cosh" => Ok(unary()?.cosh()),
        "tanh" => unary()?.tanh(),
        "sech" => unary()?.sech(),
        "csch" => unary()?.csch(),
        "coth" => unary()?.coth(),
        "arcsin" => unary()?.asin(),
        "arccos" => unary()?.acos(),
        "arctan" => unary()?.atan(),
        "arcsec" => unary()?.asec(),
        "arccsc" => unary()?.acsc(),
        "arccot" => unary()?.acot(),
        "arcsinh" => unary()?.asinh(),
        "arccosh" => unary()?.acosh(),
        "arctanh" => unary()?.atanh(),
        "arcsech" => unary()?.asech(),
        "arccsch" => unary()?.acsch(),
        "arccoth" => unary()?.acoth(),
        "exp" => Ok(unary()?.exp()),
        "log" => unary()?.ln(),
        "sqrt" => Ok(unary()?.sqrt()),
        "abs" => Ok(Complex::from(unary()?.modulus())),
        "gamma" => unary()?.gamma(),
        "floor" => Ok(unary()?.floor()),
        "ceil" => Ok(unary()?.ceil()),
        "round" => Ok(unary()?.round()),
        "sign" => Ok(unary()?.signum()),
        "re" => Ok(Complex::from(unary()?.re)),
        "im" => Ok(Complex::from(unary()?.im)),
        "arg" => Ok(Complex::from(unary()?.argument())),
        "conj" => Ok(unary()?.conj()),
        "binom" => {
            exactly(2)?;
            binom(args[0], args[1])
        }
        "atan2" => {
            exactly(2)?;
            Ok(Complex::from(args[0].re.atan2(args[1].re)))
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

/// `binom(n, k) = gamma(n + 1) / (gamma(k + 1) gamma(n - k + 1))`
fn binom(n: Complex, k: Complex) -> Result<Complex, EvalError> {
    let numer = (n + Complex::ONE).gamma()?;
    let denom = (k + Complex::ONE).gamma()? * (n - k + Complex::ONE).gamma()?;
    numer.div(denom)
}

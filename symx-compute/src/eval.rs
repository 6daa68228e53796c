//! Per-trial numeric evaluation of scalar expression trees.
//!
//! A [`Trial`] holds one random draw: a value for every free variable, plus the coefficients of
//! the random affine stand-ins for unknown function heads. The stand-ins are drawn lazily the
//! first time a head is encountered and keyed by the head's rendering, so `f`, `f'` and `f^2`
//! are three independent functions while every occurrence of `f` across *both* trees under
//! comparison sees the same one.

use crate::assume::{Assumptions, VarDomain};
use crate::complex::Complex;
use crate::error::EvalError;
use crate::funcs;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use symx_tree::{Expr, Op};

pub(crate) struct Trial {
    bindings: BTreeMap<String, Complex>,
    opaque: BTreeMap<String, Vec<Complex>>,
}

/// The free variables of the given trees that need a sample value. The bound constants `pi`,
/// `e` and `i` are excluded. Blanks sample as one shared variable, so every blank across both
/// trees sees the same value. The set is ordered so a seeded run draws identically every time.
pub(crate) fn sample_variables(exprs: &[&Expr]) -> BTreeSet<String> {
    let mut vars = BTreeSet::new();
    for expr in exprs {
        vars.extend(expr.variables());
        if expr.contains_blank() {
            vars.insert(BLANK_VAR.to_string());
        }
    }
    for constant in ["pi", "e", "i"] {
        vars.remove(constant);
    }
    vars
}

/// The binding name blanks evaluate through.
const BLANK_VAR: &str = "_";

fn random_complex(rng: &mut StdRng) -> Complex {
    Complex::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
}

impl Trial {
    /// Draws a value for every variable according to its assumed domain.
    pub fn draw(vars: &BTreeSet<String>, assumptions: &Assumptions, rng: &mut StdRng) -> Trial {
        let mut bindings = BTreeMap::new();
        for var in vars {
            let value = match assumptions.domain_of(var) {
                VarDomain::Integer => Complex::from(rng.gen_range(-10i64..=10) as f64),
                VarDomain::Real => Complex::from(rng.gen_range(-1.0..=1.0)),
                VarDomain::Complex => random_complex(rng),
            };
            bindings.insert(var.clone(), value);
        }
        Trial {
            bindings,
            opaque: BTreeMap::new(),
        }
    }

    pub fn eval(&mut self, expr: &Expr, rng: &mut StdRng) -> Result<Complex, EvalError> {
        match expr {
            Expr::Number(n) => Ok(Complex::from(n.as_f64())),
            Expr::Blank => self
                .bindings
                .get(BLANK_VAR)
                .copied()
                .ok_or_else(|| EvalError::Undefined(BLANK_VAR.to_string())),
            Expr::Symbol(name) => match name.as_str() {
                "pi" => Ok(Complex::PI),
                "e" => Ok(Complex::E),
                "i" => Ok(Complex::I),
                _ => self
                    .bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::Undefined(name.clone())),
            },
            Expr::Apply(head, args) => {
                let values = self.eval_args(args, rng)?;
                if let Some(name) = head.as_symbol() {
                    if funcs::is_known(name) {
                        return funcs::apply(name, &values);
                    }
                }
                self.opaque_value(head.to_string(), &values, rng)
            }
            Expr::Op(op, children) => match op {
                // geometric objects have no numeric value; treat them as opaque functions of
                // their points so they compare equal exactly when their points do
                Op::Angle | Op::LineSegment => {
                    let values = self.eval_args(children, rng)?;
                    let key = if *op == Op::Angle { "∠" } else { "segment" };
                    self.opaque_value(key.to_string(), &values, rng)
                }
                // a bare derivative mark, not applied to anything
                Op::Prime => self.opaque_value(expr.to_string(), &[], rng),
                _ => self.eval_op(*op, children, rng),
            },
        }
    }

    fn eval_args(&mut self, args: &[Expr], rng: &mut StdRng) -> Result<Vec<Complex>, EvalError> {
        args.iter().map(|arg| self.eval(arg, rng)).collect()
    }

    fn eval_op(
        &mut self,
        op: Op,
        children: &[Expr],
        rng: &mut StdRng,
    ) -> Result<Complex, EvalError> {
        match op {
            Op::Add => children.iter().try_fold(Complex::ZERO, |acc, child| {
                Ok(acc + self.eval(child, rng)?)
            }),
            Op::Mul => children.iter().try_fold(Complex::ONE, |acc, child| {
                Ok(acc * self.eval(child, rng)?)
            }),
            Op::Neg if children.len() == 1 => Ok(-self.eval(&children[0], rng)?),
            Op::Plus if children.len() == 1 => self.eval(&children[0], rng),
            Op::Div if children.len() == 2 => {
                let num = self.eval(&children[0], rng)?;
                let den = self.eval(&children[1], rng)?;
                num.div(den)
            }
            Op::Pow if children.len() == 2 => {
                let base = self.eval(&children[0], rng)?;
                let exp = self.eval(&children[1], rng)?;
                base.powc(exp)
            }
            Op::Factorial if children.len() == 1 => {
                (self.eval(&children[0], rng)? + Complex::ONE).gamma()
            }
            // relations, containers and the rest have no scalar value
            _ => Err(EvalError::Undefined(format!("{op:?}"))),
        }
    }

    /// The value of an unknown function head at the given arguments: a random affine form
    /// `c0 + c1*a1 + ... + cn*an` whose coefficients are drawn once per trial and head.
    fn opaque_value(
        &mut self,
        key: String,
        args: &[Complex],
        rng: &mut StdRng,
    ) -> Result<Complex, EvalError> {
        let coeffs = self.opaque.entry(key).or_default();
        while coeffs.len() < args.len() + 1 {
            coeffs.push(random_complex(rng));
        }
        let mut acc = coeffs[0];
        for (c, arg) in coeffs[1..].iter().zip(args) {
            acc = acc + *c * *arg;
        }
        Ok(acc)
    }
}

//! A complex number kernel over machine floats.
//!
//! Every analytic function here is built from the exponential and the principal logarithm, so
//! branch behavior is internally consistent: `sqrt`, `powc` and the twelve inverse functions all
//! agree on which side of a branch cut a point falls. Fallible operations (anything that divides
//! or takes a logarithm) return [`EvalError`] instead of silently producing NaN; the evaluator
//! treats such errors as a bad sample draw and retries.

use crate::error::EvalError;
use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::{Add, Mul, Neg, Sub};

/// A complex number with [`f64`] components.
///
/// Equality of computed values is always tolerance-based (see the equality module); the derived
/// [`PartialEq`] is bitwise and only suitable for exact sentinels like [`Complex::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// Lanczos approximation, g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };
    pub const PI: Complex = Complex { re: PI, im: 0.0 };
    pub const E: Complex = Complex {
        re: std::f64::consts::E,
        im: 0.0,
    };

    pub fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// The modulus `|z|`.
    pub fn modulus(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// The principal argument, in `(-pi, pi]`.
    pub fn argument(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn conj(self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    /// Multiplies by a real scalar.
    pub fn scale(self, k: f64) -> Complex {
        Complex::new(self.re * k, self.im * k)
    }

    pub fn div(self, rhs: Complex) -> Result<Complex, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        Ok(Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        ))
    }

    pub fn recip(self) -> Result<Complex, EvalError> {
        Complex::ONE.div(self)
    }

    /// Integer power by repeated squaring. Negative exponents of zero fail.
    pub fn powi(self, n: i64) -> Result<Complex, EvalError> {
        if n < 0 {
            return self.powi(-n)?.recip();
        }
        let mut acc = Complex::ONE;
        let mut base = self;
        let mut exp = n;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            exp >>= 1;
        }
        Ok(acc)
    }

    /// Principal-branch complex power `exp(w * ln z)`.
    ///
    /// `0^w` is 1 when `w = 0`, 0 when `re w > 0`, and an error otherwise.
    pub fn powc(self, w: Complex) -> Result<Complex, EvalError> {
        if self.is_zero() {
            return if w.is_zero() {
                Ok(Complex::ONE)
            } else if w.re > 0.0 {
                Ok(Complex::ZERO)
            } else {
                Err(EvalError::DivisionByZero)
            };
        }
        Ok((w * self.ln()?).exp())
    }

    pub fn exp(self) -> Complex {
        let r = self.re.exp();
        Complex::new(r * self.im.cos(), r * self.im.sin())
    }

    /// Principal logarithm; the imaginary part is the principal argument.
    pub fn ln(self) -> Result<Complex, EvalError> {
        if self.is_zero() {
            return Err(EvalError::LogOfZero);
        }
        Ok(Complex::new(self.modulus().ln(), self.argument()))
    }

    /// Principal square root (non-negative real part; the cut is the negative real axis).
    pub fn sqrt(self) -> Complex {
        if self.is_zero() {
            return Complex::ZERO;
        }
        let r = self.modulus().sqrt();
        let half = self.argument() / 2.0;
        Complex::new(r * half.cos(), r * half.sin())
    }

    // Circular functions, via `e^(iz)`.

    pub fn sin(self) -> Complex {
        let iz = Complex::I * self;
        (iz.exp() - (-iz).exp()) * Complex::new(0.0, -0.5)
    }

    pub fn cos(self) -> Complex {
        let iz = Complex::I * self;
        (iz.exp() + (-iz).exp()).scale(0.5)
    }

    pub fn tan(self) -> Result<Complex, EvalError> {
        self.sin().div(self.cos())
    }

    pub fn sec(self) -> Result<Complex, EvalError> {
        self.cos().recip()
    }

    pub fn csc(self) -> Result<Complex, EvalError> {
        self.sin().recip()
    }

    pub fn cot(self) -> Result<Complex, EvalError> {
        self.cos().div(self.sin())
    }

    // Hyperbolic functions, via `e^z`.

    pub fn sinh(self) -> Complex {
        (self.exp() - (-self).exp()).scale(0.5)
    }

    pub fn cosh(self) -> Complex {
        (self.exp() + (-self).exp()).scale(0.5)
    }

    pub fn tanh(self) -> Result<Complex, EvalError> {
        self.sinh().div(self.cosh())
    }

    pub fn sech(self) -> Result<Complex, EvalError> {
        self.cosh().recip()
    }

    pub fn csch(self) -> Result<Complex, EvalError> {
        self.sinh().recip()
    }

    pub fn coth(self) -> Result<Complex, EvalError> {
        self.cosh().div(self.sinh())
    }

    // Inverse functions, via the principal logarithm.

    /// `asin z = -i ln(iz + sqrt(1 - z^2))`
    pub fn asin(self) -> Result<Complex, EvalError> {
        let iz = Complex::I * self;
        let root = (Complex::ONE - self * self).sqrt();
        Ok((iz + root).ln()? * -Complex::I)
    }

    pub fn acos(self) -> Result<Complex, EvalError> {
        Ok(Complex::new(FRAC_PI_2, 0.0) - self.asin()?)
    }

    /// `atan z = -(i/2) ln((1 + iz) / (1 - iz))`
    pub fn atan(self) -> Result<Complex, EvalError> {
        let iz = Complex::I * self;
        let ratio = (Complex::ONE + iz).div(Complex::ONE - iz)?;
        Ok(ratio.ln()? * Complex::new(0.0, -0.5))
    }

    pub fn asec(self) -> Result<Complex, EvalError> {
        self.recip()?.acos()
    }

    pub fn acsc(self) -> Result<Complex, EvalError> {
        self.recip()?.asin()
    }

    pub fn acot(self) -> Result<Complex, EvalError> {
        self.recip()?.atan()
    }

    /// `asinh z = ln(z + sqrt(z^2 + 1))`
    pub fn asinh(self) -> Result<Complex, EvalError> {
        (self + (self * self + Complex::ONE).sqrt()).ln()
    }

    /// `acosh z = ln(z + sqrt(z + 1) sqrt(z - 1))`, keeping the standard branch on `(-inf, 1)`.
    pub fn acosh(self) -> Result<Complex, EvalError> {
        (self + (self + Complex::ONE).sqrt() * (self - Complex::ONE).sqrt()).ln()
    }

    /// `atanh z = (1/2) ln((1 + z) / (1 - z))`
    pub fn atanh(self) -> Result<Complex, EvalError> {
        let ratio = (Complex::ONE + self).div(Complex::ONE - self)?;
        Ok(ratio.ln()?.scale(0.5))
    }

    pub fn asech(self) -> Result<Complex, EvalError> {
        self.recip()?.acosh()
    }

    pub fn acsch(self) -> Result<Complex, EvalError> {
        self.recip()?.asinh()
    }

    pub fn acoth(self) -> Result<Complex, EvalError> {
        self.recip()?.atanh()
    }

    // Componentwise rounding, plus the complex sign `z / |z|`.

    pub fn floor(self) -> Complex {
        Complex::new(self.re.floor(), self.im.floor())
    }

    pub fn ceil(self) -> Complex {
        Complex::new(self.re.ceil(), self.im.ceil())
    }

    pub fn round(self) -> Complex {
        Complex::new(self.re.round(), self.im.round())
    }

    pub fn signum(self) -> Complex {
        if self.is_zero() {
            Complex::ZERO
        } else {
            self.scale(1.0 / self.modulus())
        }
    }

    /// The gamma function by the Lanczos approximation, with reflection for `re z < 1/2`.
    ///
    /// Poles at the non-positive integers surface as [`EvalError::DivisionByZero`].
    pub fn gamma(self) -> Result<Complex, EvalError> {
        if self.re < 0.5 {
            // gamma(z) = pi / (sin(pi z) * gamma(1 - z))
            let s = (Complex::PI * self).sin();
            return Complex::PI.div(s * (Complex::ONE - self).gamma()?);
        }
        let z = self - Complex::ONE;
        let mut x = Complex::new(LANCZOS[0], 0.0);
        for (i, &c) in LANCZOS.iter().enumerate().skip(1) {
            x = x + Complex::new(c, 0.0).div(z + Complex::new(i as f64, 0.0))?;
        }
        let t = z + Complex::new(LANCZOS_G + 0.5, 0.0);
        let p = t.powc(z + Complex::new(0.5, 0.0))?;
        Ok(p * (-t).exp() * x * Complex::new((2.0 * PI).sqrt(), 0.0))
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Complex {
        Complex::new(re, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

//! Complex amplitudes
//!
//! Immutable value type; every operation returns a new value.

use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::error::{SimError, SimResult};

/// A complex number `re + im·i`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely real value
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Build from magnitude and angle
    pub fn polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    pub fn add(self, o: Self) -> Self {
        Self::new(self.re + o.re, self.im + o.im)
    }

    pub fn sub(self, o: Self) -> Self {
        Self::new(self.re - o.re, self.im - o.im)
    }

    pub fn mul(self, o: Self) -> Self {
        Self::new(
            self.re * o.re - self.im * o.im,
            self.re * o.im + self.im * o.re,
        )
    }

    /// Divide by `o`. A zero-magnitude divisor yields NaN/Inf components;
    /// use [`Complex::try_div`] where that must be an error.
    pub fn div(self, o: Self) -> Self {
        let m = o.magnitude_squared();
        Self::new(
            (self.re * o.re + self.im * o.im) / m,
            (self.im * o.re - self.re * o.im) / m,
        )
    }

    /// Checked division
    pub fn try_div(self, o: Self) -> SimResult<Self> {
        if o.magnitude_squared() == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Ok(self.div(o))
    }

    /// Multiply by a real scalar
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.re * k, self.im * k)
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Signed angle in (-π, π]
    pub fn phase(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Phase as a fraction of a full turn, in (-0.5, 0.5]
    pub fn hue(self) -> f64 {
        self.phase() / (2.0 * PI)
    }

    /// Approximate equality, component-wise
    pub fn approx_eq(self, o: Self, eps: f64) -> bool {
        (self.re - o.re).abs() < eps && (self.im - o.im).abs() < eps
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, o: Complex) -> Complex {
        Complex::add(self, o)
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, o: Complex) -> Complex {
        Complex::sub(self, o)
    }
}

impl Mul for Complex {
    type Output = Complex;
    fn mul(self, o: Complex) -> Complex {
        Complex::mul(self, o)
    }
}

impl Div for Complex {
    type Output = Complex;
    fn div(self, o: Complex) -> Complex {
        Complex::div(self, o)
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::real(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_mul_i_squared() {
        let i = Complex::new(0.0, 1.0);
        assert!((i * i).approx_eq(Complex::real(-1.0), EPS));
    }

    #[test]
    fn test_div_inverts_mul() {
        let a = Complex::new(3.0, -2.0);
        let b = Complex::new(0.5, 1.5);
        assert!(((a * b) / b).approx_eq(a, EPS));
    }

    #[test]
    fn test_div_by_zero_propagates_non_finite() {
        let q = Complex::ONE / Complex::ZERO;
        assert!(!q.re.is_finite());
    }

    #[test]
    fn test_try_div_by_zero() {
        assert_eq!(
            Complex::ONE.try_div(Complex::ZERO),
            Err(SimError::DivisionByZero)
        );
        assert!(Complex::ONE.try_div(Complex::real(2.0)).is_ok());
    }

    #[test]
    fn test_magnitude() {
        let z = Complex::new(3.0, 4.0);
        assert_eq!(z.magnitude_squared(), 25.0);
        assert_eq!(z.magnitude(), 5.0);
    }

    #[test]
    fn test_phase_range() {
        assert!((Complex::real(-1.0).phase() - PI).abs() < EPS);
        assert!((Complex::new(0.0, -1.0).phase() + PI / 2.0).abs() < EPS);
        assert_eq!(Complex::ONE.phase(), 0.0);
    }

    #[test]
    fn test_polar() {
        let z = Complex::polar(2.0, FRAC_PI_4);
        assert!((z.magnitude() - 2.0).abs() < EPS);
        assert!((z.phase() - FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn test_sub_and_neg() {
        let a = Complex::new(1.0, 2.0);
        assert!((a - a).approx_eq(Complex::ZERO, EPS));
        assert!((-a + a).approx_eq(Complex::ZERO, EPS));
    }
}

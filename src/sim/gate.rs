//! Quantum gates acting on one object's on/off flag
//!
//! - **X**: bit flip
//! - **Z**: phase flip when on
//! - **T**: π/4 phase rotation when on
//! - **H**: Hadamard, the only gate that branches a universe in two

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;
use std::iter::{Chain, Once, once};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::complex::Complex;
use super::error::SimError;
use super::universe::Universe;

/// Output of applying a gate to one universe: one or two universes
pub(crate) type Branches = Chain<Once<Universe>, std::option::IntoIter<Universe>>;

/// Gate kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    X,
    Z,
    T,
    H,
}

impl Gate {
    /// Every gate, in the order key presses are processed
    pub const ALL: [Gate; 4] = [Gate::X, Gate::Z, Gate::T, Gate::H];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gate::X => "X",
            Gate::Z => "Z",
            Gate::T => "T",
            Gate::H => "H",
        }
    }

    /// Whether applying this gate can add universes
    pub fn branches(&self) -> bool {
        matches!(self, Gate::H)
    }

    /// Apply to a single universe that already satisfied its controls.
    ///
    /// `target` must already be checked against the object count; the
    /// controller does this in `apply_gate` before any universe is touched.
    pub(crate) fn apply(self, mut universe: Universe, target: usize) -> Branches {
        let on = universe.objects[target].on_off;
        let split = match self {
            Gate::X => {
                universe.objects[target].on_off = !on;
                None
            }
            Gate::Z => {
                if on {
                    universe.amplitude = -universe.amplitude;
                }
                None
            }
            Gate::T => {
                if on {
                    universe.amplitude = universe.amplitude * Complex::polar(1.0, FRAC_PI_4);
                }
                None
            }
            Gate::H => {
                universe.amplitude = universe.amplitude.scale(FRAC_1_SQRT_2);
                let mut flipped = universe.clone();
                flipped.objects[target].on_off = !on;
                if on {
                    universe.amplitude = -universe.amplitude;
                }
                Some(flipped)
            }
        };
        once(universe).chain(split)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gate {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Gate::X),
            "Z" => Ok(Gate::Z),
            "T" => Ok(Gate::T),
            "H" => Ok(Gate::H),
            _ => Err(SimError::UnknownGate(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn single(gate: Gate, u: Universe) -> Universe {
        let mut out: Vec<_> = gate.apply(u, 0).collect();
        assert_eq!(out.len(), 1);
        out.remove(0)
    }

    #[test]
    fn test_parse() {
        assert_eq!("X".parse::<Gate>(), Ok(Gate::X));
        assert_eq!("h".parse::<Gate>(), Ok(Gate::H));
        assert_eq!(
            "CNOT".parse::<Gate>(),
            Err(SimError::UnknownGate("CNOT".to_string()))
        );
        assert!("".parse::<Gate>().is_err());
    }

    #[test]
    fn test_x_flips() {
        let u = single(Gate::X, Universe::new(1));
        assert!(u.objects[0].on_off);
        assert_eq!(u.amplitude, Complex::ONE);
    }

    #[test]
    fn test_z_and_t_identity_when_off() {
        let u = Universe::new(1).with_amplitude(Complex::new(0.6, 0.8));
        assert_eq!(single(Gate::Z, u.clone()).amplitude, u.amplitude);
        assert_eq!(single(Gate::T, u.clone()).amplitude, u.amplitude);
    }

    #[test]
    fn test_z_negates_when_on() {
        let u = Universe::new(1).with_pattern(&[true]);
        assert_eq!(single(Gate::Z, u).amplitude, Complex::real(-1.0));
    }

    #[test]
    fn test_t_rotates_when_on() {
        let u = Universe::new(1).with_pattern(&[true]);
        let out = single(Gate::T, u);
        assert!((out.amplitude.phase() - FRAC_PI_4).abs() < EPS);
        assert!((out.amplitude.magnitude() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_h_from_off() {
        let out: Vec<_> = Gate::H.apply(Universe::new(1), 0).collect();
        assert_eq!(out.len(), 2);
        assert!(!out[0].objects[0].on_off);
        assert!(out[1].objects[0].on_off);
        assert!(out[0].amplitude.approx_eq(Complex::real(FRAC_1_SQRT_2), EPS));
        assert!(out[1].amplitude.approx_eq(Complex::real(FRAC_1_SQRT_2), EPS));
    }

    #[test]
    fn test_h_from_on_negates_kept_branch() {
        let u = Universe::new(1).with_pattern(&[true]);
        let out: Vec<_> = Gate::H.apply(u, 0).collect();
        assert!(out[0].objects[0].on_off);
        assert!(out[0].amplitude.approx_eq(Complex::real(-FRAC_1_SQRT_2), EPS));
        assert!(!out[1].objects[0].on_off);
        assert!(out[1].amplitude.approx_eq(Complex::real(FRAC_1_SQRT_2), EPS));
    }
}

//! A single branch of the multiverse
//!
//! Each universe carries its own amplitude and a full copy of every tracked
//! object. Branching clones the whole universe so no two branches alias state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::complex::Complex;
use super::object::ObjectState;

/// One coherent branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub amplitude: Complex,
    pub objects: Vec<ObjectState>,
}

impl Universe {
    /// A universe with amplitude 1 and every object at its spawn point
    pub fn new(object_count: usize) -> Self {
        Self {
            amplitude: Complex::ONE,
            objects: (0..object_count).map(ObjectState::spawn).collect(),
        }
    }

    /// Builder-style amplitude override
    pub fn with_amplitude(mut self, amplitude: Complex) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Builder-style on/off pattern override (extra flags are ignored)
    pub fn with_pattern(mut self, pattern: &[bool]) -> Self {
        for (obj, &on) in self.objects.iter_mut().zip(pattern) {
            obj.on_off = on;
        }
        self
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Probability weight
    pub fn probability(&self) -> f64 {
        self.amplitude.magnitude_squared()
    }

    /// Discrete state of every object, in index order
    pub fn pattern(&self) -> Vec<bool> {
        self.objects.iter().map(|o| o.on_off).collect()
    }

    /// True when every listed control object is on (vacuously true for none)
    pub fn controls_on(&self, controls: &[usize]) -> bool {
        controls.iter().all(|&c| self.objects[c].on_off)
    }

    /// Advance continuous physics for this branch's copy of the world
    pub fn physics_step(&mut self, dt: f64, pointer: DVec2, pointer_held: bool, radius: f64) {
        for obj in &mut self.objects {
            obj.integrate(dt, pointer, pointer_held, radius);
        }
    }
}

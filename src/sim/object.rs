//! Per-object state inside a single universe

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{default_position, lerp};

/// One tracked object as seen from one universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Discrete degree of freedom that gates act on
    pub on_off: bool,
    /// Grabbed by the pointer
    #[serde(default)]
    pub selected: bool,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            on_off: false,
            selected: false,
        }
    }
}

impl ObjectState {
    /// Object `index` at its spawn position
    pub fn spawn(index: usize) -> Self {
        Self {
            position: default_position(index),
            ..Default::default()
        }
    }

    /// Is the pointer close enough to interact with this object
    pub fn within_reach(&self, pointer: DVec2, radius: f64) -> bool {
        self.position.distance(pointer) < radius
    }

    /// Integrate velocity, then update pointer selection and drag
    pub fn integrate(&mut self, dt: f64, pointer: DVec2, pointer_held: bool, radius: f64) {
        self.position += self.velocity * dt;

        // Grab needs proximity; release only needs the button up
        self.selected |= pointer_held && self.within_reach(pointer, radius);
        self.selected &= pointer_held;

        if self.selected {
            self.position = lerp(self.position, pointer, dt);
        }
    }

    /// Continuous state within tolerance of another copy of the same object
    pub fn continuous_close(&self, other: &Self, position_tol: f64, velocity_tol: f64) -> bool {
        self.position.distance(other.position) <= position_tol
            && self.velocity.distance(other.velocity) <= velocity_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_spawn_positions() {
        assert_eq!(ObjectState::spawn(0).position, DVec2::new(1.0, 1.0));
        assert_eq!(ObjectState::spawn(1).position, DVec2::new(2.0, 1.0));
        assert!(!ObjectState::spawn(0).on_off);
    }

    #[test]
    fn test_velocity_integration() {
        let mut obj = ObjectState {
            velocity: DVec2::new(2.0, -1.0),
            ..ObjectState::spawn(0)
        };
        obj.integrate(0.5, DVec2::new(100.0, 100.0), false, 0.5);
        assert_eq!(obj.position, DVec2::new(2.0, 0.5));
        assert!(!obj.selected);
    }

    #[test]
    fn test_grab_requires_proximity() {
        let mut obj = ObjectState::spawn(0);
        obj.integrate(DT, DVec2::new(3.0, 3.0), true, 0.5);
        assert!(!obj.selected);

        obj.integrate(DT, DVec2::new(1.2, 1.0), true, 0.5);
        assert!(obj.selected);
    }

    #[test]
    fn test_drag_keeps_selection_while_held() {
        let mut obj = ObjectState::spawn(0);
        obj.integrate(DT, DVec2::new(1.1, 1.0), true, 0.5);
        assert!(obj.selected);

        // Pointer jumps far away but the button stays down
        let far = DVec2::new(10.0, 5.0);
        let before = obj.position;
        obj.integrate(DT, far, true, 0.5);
        assert!(obj.selected);
        // Eased toward the pointer, not snapped
        assert!(obj.position.distance(far) < before.distance(far));
        assert!(obj.position.distance(far) > 1.0);

        obj.integrate(DT, far, false, 0.5);
        assert!(!obj.selected);
    }

    #[test]
    fn test_continuous_close() {
        let a = ObjectState::spawn(0);
        let mut b = a.clone();
        b.position.x += 0.4;
        assert!(a.continuous_close(&b, 0.5, 0.5));
        b.velocity.y = 1.0;
        assert!(!a.continuous_close(&b, 0.5, 0.5));
    }
}

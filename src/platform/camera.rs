//! 2D camera mapping normalized screen space to world space

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Axis-aligned view of the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera2d {
    pub lower_left: DVec2,
    pub upper_right: DVec2,
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            lower_left: DVec2::ZERO,
            upper_right: DVec2::new(WORLD_WIDTH, WORLD_HEIGHT),
        }
    }
}

impl Camera2d {
    /// Camera showing `[0, size]` in both axes
    pub fn with_size(size: DVec2) -> Self {
        Self {
            lower_left: DVec2::ZERO,
            upper_right: size,
        }
    }

    pub fn extent(&self) -> DVec2 {
        self.upper_right - self.lower_left
    }

    /// Normalized screen point (0..1, y up) to world coordinates
    pub fn to_world(&self, screen: DVec2) -> DVec2 {
        self.lower_left + screen * self.extent()
    }

    /// World point to normalized screen coordinates
    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        (world - self.lower_left) / self.extent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let cam = Camera2d::default();
        assert_eq!(cam.to_world(DVec2::ZERO), DVec2::ZERO);
        assert_eq!(cam.to_world(DVec2::ONE), DVec2::new(16.0, 9.0));
    }

    #[test]
    fn test_offset_camera() {
        let cam = Camera2d {
            lower_left: DVec2::new(-1.0, -1.0),
            upper_right: DVec2::new(1.0, 1.0),
        };
        assert_eq!(cam.to_world(DVec2::new(0.5, 0.5)), DVec2::ZERO);
        assert_eq!(cam.to_screen(DVec2::new(1.0, -1.0)), DVec2::new(1.0, 0.0));
    }
}

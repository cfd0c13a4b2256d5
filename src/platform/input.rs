//! Input edge tracking
//!
//! The OS layer reports levels (key down, button down, cursor position).
//! `InputTracker` keeps the previous frame's levels and turns them into the
//! edge-triggered `FrameInput` the simulation consumes.

use glam::DVec2;

use super::camera::Camera2d;
use crate::sim::{FrameInput, Gate, GateKeys};

/// Raw levels sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    /// Cursor in normalized screen space, (0,0) bottom-left to (1,1) top-right
    pub cursor: DVec2,
    /// Primary pointer button is down
    pub button_down: bool,
    /// Gate keys currently held
    pub keys_down: GateKeys,
}

impl RawInput {
    /// Mark a gate key as held
    pub fn with_key(mut self, gate: Gate) -> Self {
        match gate {
            Gate::X => self.keys_down.x = true,
            Gate::Z => self.keys_down.z = true,
            Gate::T => self.keys_down.t = true,
            Gate::H => self.keys_down.h = true,
        }
        self
    }
}

/// Converts per-frame levels into per-frame edges
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    prev: RawInput,
    camera: Camera2d,
}

impl InputTracker {
    pub fn new(camera: Camera2d) -> Self {
        Self {
            prev: RawInput::default(),
            camera,
        }
    }

    pub fn camera(&self) -> &Camera2d {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera2d) {
        self.camera = camera;
    }

    /// Build this frame's input and remember the levels for the next one
    pub fn next_frame(&mut self, raw: RawInput) -> FrameInput {
        let prev = std::mem::replace(&mut self.prev, raw);
        let held = raw.keys_down;
        let was = prev.keys_down;
        FrameInput {
            pointer: self.camera.to_world(raw.cursor),
            pointer_held: raw.button_down,
            pointer_just_pressed: raw.button_down && !prev.button_down,
            pointer_just_released: !raw.button_down && prev.button_down,
            gates: GateKeys {
                x: held.x && !was.x,
                z: held.z && !was.z,
                t: held.t && !was.t,
                h: held.h && !was.h,
            },
        }
    }
}

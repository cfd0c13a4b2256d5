//! Per-frame step
//!
//! One frame runs to completion: hover detection, gates from key presses,
//! physics for every universe, simplify, then the render hand-off.

use std::collections::BTreeSet;

use glam::DVec2;

use super::error::SimResult;
use super::gate::Gate;
use super::multiverse::MultiverseController;
use crate::renderer::RenderFrame;

/// Gate keys pressed this frame (edge, not level)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateKeys {
    pub x: bool,
    pub z: bool,
    pub t: bool,
    pub h: bool,
}

impl GateKeys {
    /// Pressed gates in processing order
    pub fn pressed(&self) -> impl Iterator<Item = Gate> + '_ {
        Gate::ALL.into_iter().filter(|g| self.is_pressed(*g))
    }

    pub fn is_pressed(&self, gate: Gate) -> bool {
        match gate {
            Gate::X => self.x,
            Gate::Z => self.z,
            Gate::T => self.t,
            Gate::H => self.h,
        }
    }

    pub fn any(&self) -> bool {
        self.x || self.z || self.t || self.h
    }
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Pointer position in world coordinates
    pub pointer: DVec2,
    /// Pointer button is down
    pub pointer_held: bool,
    /// Pointer button went down this frame. Not read by `step`, which
    /// grabs from `pointer_held` and proximity every frame; kept for UI
    /// consumers such as a click cursor.
    pub pointer_just_pressed: bool,
    /// Pointer button went up this frame (UI only, like `pointer_just_pressed`)
    pub pointer_just_released: bool,
    /// Gate keys pressed this frame
    pub gates: GateKeys,
}

impl MultiverseController {
    /// Object indices within reach of the pointer in at least one universe
    pub fn hovered_objects(&self, pointer: DVec2) -> BTreeSet<usize> {
        let radius = self.settings().interaction_radius;
        self.universes()
            .iter()
            .flat_map(|u| u.objects.iter().enumerate())
            .filter(|(_, obj)| obj.within_reach(pointer, radius))
            .map(|(i, _)| i)
            .collect()
    }

    /// Advance one frame and hand the result to the renderer
    pub fn step(&mut self, dt: f64, input: &FrameInput) -> SimResult<RenderFrame<'_>> {
        if input.gates.any() {
            for target in self.hovered_objects(input.pointer) {
                for gate in input.gates.pressed() {
                    self.apply_gate(gate, target, &[])?;
                }
            }
        }

        let radius = self.settings().interaction_radius;
        for u in self.universes_mut() {
            u.physics_step(dt, input.pointer, input.pointer_held, radius);
        }

        self.simplify()?;

        self.time += dt;
        self.frame += 1;
        Ok(RenderFrame::new(self.universes(), self.time, self.frame))
    }
}

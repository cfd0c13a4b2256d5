//! Superposition - a puzzle game played across a multiverse of branches
//!
//! Core modules:
//! - `sim`: Multiverse simulation (complex amplitudes, gates, merge/prune/normalize)
//! - `renderer`: Per-frame hand-off to a compositing backend
//! - `platform`: Input edge tracking and camera transform
//! - `settings`: Tunable tolerances and frame bounds
//! - `demo`: Seeded scripted input for headless runs

pub mod demo;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::{RenderFrame, RenderSink, UniverseView};
pub use settings::{MergePolicy, Settings};
pub use sim::{Complex, FrameInput, Gate, MultiverseController, SimError, SimResult};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Number of tracked objects in a level
    pub const DEFAULT_OBJECT_COUNT: usize = 2;

    /// Universes with |amplitude|² at or below this are dropped
    pub const PRUNE_THRESHOLD: f64 = 1e-6;
    /// Pointer distance (world units) at which an object can be hovered or grabbed
    pub const INTERACTION_RADIUS: f64 = 0.5;
    /// Max position/velocity distance for continuous-state equivalence
    pub const MERGE_TOLERANCE: f64 = 0.5;

    /// Frame time bounds (seconds)
    pub const MIN_FRAME_TIME: f64 = 0.001;
    pub const MAX_FRAME_TIME: f64 = 0.1;

    /// Visible world extent (world units)
    pub const WORLD_WIDTH: f64 = 16.0;
    pub const WORLD_HEIGHT: f64 = 9.0;
}

/// Clamp a raw frame delta into the simulation's accepted range
#[inline]
pub fn clamp_dt(raw: f64, min: f64, max: f64) -> f64 {
    if raw.is_nan() {
        return min;
    }
    // Upper bound wins if the bounds are inverted
    raw.max(min).min(max)
}

/// Linear interpolation between two points
#[inline]
pub fn lerp(from: DVec2, to: DVec2, amount: f64) -> DVec2 {
    from * (1.0 - amount) + to * amount
}

/// Default spawn position of the object at `index`
#[inline]
pub fn default_position(index: usize) -> DVec2 {
    DVec2::new(index as f64 + 1.0, 1.0)
}

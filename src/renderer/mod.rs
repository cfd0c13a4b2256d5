//! Rendering hand-off
//!
//! The simulation does not draw. Each frame it exposes every surviving
//! universe with its probability interval and hue; a backend draws each one
//! offscreen and composites it weighted by that interval.

pub mod frame;
pub mod uniforms;

pub use frame::{RenderFrame, RenderSink, UniverseView, UniverseViews};
pub use uniforms::{CompositeUniforms, ObjectInstance, UniformBatch, UniverseDraw};

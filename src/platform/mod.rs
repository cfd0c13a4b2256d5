//! Platform abstraction layer
//!
//! Bridges raw device state into simulation input:
//! - Key/button edge detection across frames
//! - Screen to world coordinate mapping

pub mod camera;
pub mod input;

pub use camera::Camera2d;
pub use input::{InputTracker, RawInput};

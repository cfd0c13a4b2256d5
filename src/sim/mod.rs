//! Multiverse simulation module
//!
//! All quantum bookkeeping lives here. This module is pure and synchronous:
//! - No rendering or platform dependencies
//! - No global state; a level is an explicit `MultiverseController`
//! - Universe order is stable within a frame but carries no meaning

pub mod complex;
pub mod error;
pub mod gate;
pub mod multiverse;
pub mod object;
pub mod tick;
pub mod universe;

pub use complex::Complex;
pub use error::{SimError, SimResult};
pub use gate::Gate;
pub use multiverse::{MultiverseController, equivalent};
pub use object::ObjectState;
pub use tick::{FrameInput, GateKeys};
pub use universe::Universe;

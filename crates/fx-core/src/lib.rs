//! Platform-free core of the dashboard background effects.
//!
//! Holds the per-frame simulation (particle field, proximity links, network
//! pulses), the static network geometry, pointer state, and the frame
//! scheduler. Drawing goes through the [`Surface`] trait so the same effects
//! run on a browser canvas, a native driver, or a recording surface in tests.

pub mod color;
pub mod config;
pub mod constants;
pub mod effect;
pub mod error;
pub mod linker;
pub mod network;
pub mod particles;
pub mod pointer;
pub mod pulses;
pub mod random;
pub mod render;
pub mod scheduler;
pub mod surface;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use effect::*;
pub use error::*;
pub use linker::*;
pub use network::*;
pub use particles::*;
pub use pointer::*;
pub use pulses::*;
pub use random::*;
pub use scheduler::*;
pub use surface::*;

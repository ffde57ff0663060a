//! Ember Core
//!
//! Foundational types shared by the animation and particle crates:
//!
//! - [`errors`]: the [`EmberError`] type raised when decoded data is ingested
//! - [`time`]: the per-frame [`FrameClock`]
//! - [`node`]: node handles and read-only world transforms
//! - [`blend`]: filter mode to blend factor tables
//! - [`math`]: scalar helpers and attribute packing

pub mod blend;
pub mod errors;
pub mod math;
pub mod node;
pub mod time;

pub use blend::{BlendFactor, BlendPair, EmitterFilterMode, LayerFilterMode, emitter_blend, layer_blend};
pub use errors::{EmberError, Result};
pub use node::{NodeArena, NodeHandle, WorldNode};
pub use time::FrameClock;

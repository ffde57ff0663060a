//! Ember
//!
//! Keyframe sampling and particle lifecycle simulation for animated
//! MDX-style models.
//!
//! - [`animation`]: clocks, state tracks, typed keyframe tracks, layers and
//!   event objects
//! - [`particles`]: emitter definitions, the particle simulator and quad
//!   geometry
//! - [`core`]: errors, frame clock, node transforms and blend tables

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub use ember_animation as animation;
pub use ember_core as core;
pub use ember_particles as particles;

pub use ember_animation::{
    EventObject, EventTrigger, InstancePlayback, KeyframeTrack, LayerDefinition, Sequence, StateSample, TrackStore,
    resolve_clock,
};
pub use ember_core::{EmberError, FrameClock, NodeArena, NodeHandle, Result, WorldNode};
pub use ember_particles::{CameraBasis, EmitterDefinition, EmitterParams, Particle, ParticleEmitter, SimulationSettings};

//! Ember Particles
//!
//! Particle lifecycle simulation for MDX-style emitters.
//!
//! Each frame, for every live particle, [`Particle::update`] integrates
//! physics, runs the [`lifecycle`] interpolator and rebuilds the particle's
//! quad through [`geometry`]. [`ParticleEmitter`] owns particles, spawns them
//! within the [`SimulationSettings`] budget and retires them when they expire.

pub mod camera;
pub mod definition;
pub mod emitter;
pub mod geometry;
pub mod lifecycle;
pub mod particle;
pub mod settings;
pub mod ubersplat;

pub use camera::CameraBasis;
pub use definition::{
    EmitterDefinition, EmitterParams, HeadOrTail, Interval, LifecycleIntervals, SplatRecord, UberSplatRecord,
};
pub use emitter::{EmitterFrameStats, ParticleEmitter};
pub use geometry::{ParticleQuad, ParticleVertex, QuadInput, emit_quad};
pub use lifecycle::{AtlasCell, LifePhase, LifecycleSample, interpolate, life_factor};
pub use particle::{Particle, ParticlePhase};
pub use settings::SimulationSettings;
pub use ubersplat::{UberSplatPhase, UberSplatSample, UberSplatTimeline};

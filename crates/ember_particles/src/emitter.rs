//! Emitter instances: own their particles, spawn within budget, retire
//! expired particles and hand out vertex data.

use std::sync::Arc;

use rand::RngExt;

use ember_core::blend::{BlendPair, emitter_blend};
use ember_core::node::{NodeArena, NodeHandle};

use crate::camera::CameraBasis;
use crate::definition::{EmitterDefinition, EmitterParams, HeadOrTail};
use crate::geometry::ParticleVertex;
use crate::particle::Particle;
use crate::settings::SimulationSettings;

/// Counters reported by [`ParticleEmitter::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitterFrameStats {
    pub spawned: usize,
    pub expired: usize,
    pub live: usize,
}

/// One emitter of one model instance.
///
/// Particles never outlive their emitter. Dropping the emitter drops its
/// particles; [`ParticleEmitter::drain`] retires them early, e.g. when the
/// instance is hidden.
#[derive(Debug)]
pub struct ParticleEmitter {
    definition: Arc<EmitterDefinition>,
    node: NodeHandle,
    settings: SimulationSettings,
    particles: Vec<Particle>,
    free: Vec<Particle>,
    accumulator: f32,
}

impl ParticleEmitter {
    #[must_use]
    pub fn new(definition: Arc<EmitterDefinition>, node: NodeHandle, settings: SimulationSettings) -> Self {
        Self {
            definition,
            node,
            settings,
            particles: Vec::new(),
            free: Vec::new(),
            accumulator: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn definition(&self) -> &EmitterDefinition {
        &self.definition
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// Re-attaches the emitter to another node. Live particles keep the node
    /// they were emitted from.
    pub fn set_node(&mut self, node: NodeHandle) {
        self.node = node;
    }

    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn blend(&self) -> BlendPair {
        emitter_blend(self.definition.filter_mode)
    }

    /// Emits `count` emissions right away, ignoring the rate accumulator but
    /// not the particle cap. Used by event-driven emitters such as splats.
    pub fn emit<R: RngExt>(&mut self, count: usize, params: &EmitterParams, nodes: &NodeArena, rng: &mut R) -> usize {
        let Some(node) = nodes.get(self.node) else {
            return 0;
        };

        let kinds: &[bool] = match self.definition.head_or_tail {
            HeadOrTail::Head => &[true],
            HeadOrTail::Tail => &[false],
            HeadOrTail::Both => &[true, false],
        };

        let mut spawned = 0;
        for _ in 0..count {
            if self.particles.len() + kinds.len() > self.settings.max_particles {
                break;
            }
            for &head in kinds {
                let mut particle = self.free.pop().unwrap_or_default();
                particle.reset(&self.definition, params, self.node, node, head, rng);
                self.particles.push(particle);
                spawned += 1;
            }
        }
        spawned
    }

    /// Runs one frame: spawns owed emissions, then advances every live
    /// particle by the same `dt` and retires those that expired.
    pub fn update<R: RngExt>(
        &mut self,
        dt: f32,
        params: &EmitterParams,
        nodes: &NodeArena,
        camera: &CameraBasis,
        rng: &mut R,
    ) -> EmitterFrameStats {
        let mut stats = EmitterFrameStats::default();

        if nodes.contains_key(self.node) {
            let rate = params.emission_rate.max(0.0);
            self.accumulator = (self.accumulator + rate * dt).min(self.settings.max_backlog.max(0.0));

            let owed = self.accumulator.floor() as u32;
            let allowed = owed.min(self.settings.max_spawn_per_frame);
            if allowed > 0 {
                let per_emission = self.definition.head_or_tail.particles_per_emission();
                stats.spawned = self.emit(allowed as usize, params, nodes, rng);
                self.accumulator -= (stats.spawned / per_emission) as f32;
                // Emissions skipped at the particle cap are dropped, not owed.
                if stats.spawned / per_emission < allowed as usize {
                    self.accumulator = self.accumulator.fract();
                }
            }
        } else {
            if !self.particles.is_empty() {
                log::warn!(
                    "emitter '{}': node {:?} no longer resolves, retiring {} particles",
                    self.definition.name,
                    self.node,
                    self.particles.len()
                );
            }
            self.accumulator = 0.0;
        }

        let mut index = 0;
        while index < self.particles.len() {
            if self.particles[index].update(dt, &self.definition, nodes, camera) {
                let dead = self.particles.swap_remove(index);
                self.recycle(dead);
                stats.expired += 1;
            } else {
                index += 1;
            }
        }

        stats.live = self.particles.len();
        log::trace!(
            "emitter '{}': +{} -{} live {}",
            self.definition.name,
            stats.spawned,
            stats.expired,
            stats.live
        );
        stats
    }

    /// Appends four vertices per live particle.
    pub fn write_vertices(&self, out: &mut Vec<ParticleVertex>) {
        out.reserve(self.particles.len() * 4);
        for particle in &self.particles {
            out.extend_from_slice(&particle.quad.to_vertices());
        }
    }

    /// Retires every live particle.
    pub fn drain(&mut self) -> usize {
        let count = self.particles.len();
        while let Some(particle) = self.particles.pop() {
            self.recycle(particle);
        }
        self.accumulator = 0.0;
        count
    }

    fn recycle(&mut self, particle: Particle) {
        if self.free.len() < self.settings.max_particles {
            self.free.push(particle);
        }
    }
}

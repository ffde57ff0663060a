//! Per-particle simulation state.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3, Vec4};
use rand::RngExt;

use ember_core::node::{NodeArena, NodeHandle, WorldNode};

use crate::camera::CameraBasis;
use crate::definition::{EmitterDefinition, EmitterParams};
use crate::geometry::{ParticleQuad, QuadInput, emit_quad};
use crate::lifecycle::{AtlasCell, interpolate, life_factor};

/// Lifecycle state of a [`Particle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticlePhase {
    /// Reset but not yet updated.
    #[default]
    Spawning,
    Alive,
    /// Health ran out or the node disappeared. Terminal until the next reset.
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Particle {
    /// Node this particle was emitted from.
    pub node: NodeHandle,
    pub phase: ParticlePhase,
    /// Remaining life in seconds.
    pub health: f32,
    pub head: bool,
    /// Simulation-space position: node space for model-space emitters,
    /// world space otherwise.
    pub location: Vec3,
    pub world_location: Vec3,
    pub velocity: Vec3,
    /// Downward acceleration, pre-scaled by the node's world Z scale.
    pub gravity: f32,
    /// Node world scale captured at spawn.
    pub node_scale: Vec3,
    pub color: Vec4,
    pub scale: f32,
    pub atlas: AtlasCell,
    pub quad: ParticleQuad,
}

/// Uniform draw from `[-extent, extent]`, or zero for an empty range.
fn random_signed<R: RngExt>(rng: &mut R, extent: f32) -> f32 {
    let extent = extent.abs();
    if extent > 0.0 && extent.is_finite() {
        rng.random_range(-extent..=extent)
    } else {
        0.0
    }
}

impl Particle {
    /// Re-initializes this particle as a fresh emission from `node`.
    pub fn reset<R: RngExt>(
        &mut self,
        definition: &EmitterDefinition,
        params: &EmitterParams,
        handle: NodeHandle,
        node: &WorldNode,
        head: bool,
        rng: &mut R,
    ) {
        let scale = node.world_scale;
        let half_width = params.width * 0.5;
        let half_length = params.length * 0.5;
        let latitude = params.latitude.to_radians();

        self.node = handle;
        self.phase = ParticlePhase::Spawning;
        self.health = definition.lifespan;
        self.head = head;
        self.gravity = params.gravity * scale.z;
        self.node_scale = scale;
        self.scale = 1.0;
        self.atlas = AtlasCell::default();
        self.color = definition.lifecycle.colors[0];

        let mut location = node.pivot
            + Vec3::new(
                random_signed(rng, half_width),
                0.0,
                random_signed(rng, half_length),
            );

        let mut rotation = Quat::from_rotation_z(FRAC_PI_2) * Quat::from_rotation_y(random_signed(rng, latitude));

        if !definition.model_space {
            location = node.transform_point(location);
            rotation = node.world_rotation * rotation;
        }

        let speed = params.speed + random_signed(rng, params.variation);
        let velocity = rotation * Vec3::Z * speed * scale;

        if !head {
            location -= velocity * (definition.tail_length * 0.5);
        }

        self.location = location;
        self.velocity = velocity;
        self.world_location = if definition.model_space {
            node.transform_point(location)
        } else {
            location
        };
    }

    /// Advances the particle by `dt` seconds and rebuilds its quad.
    ///
    /// Returns `true` once the particle expired. A particle whose node no
    /// longer resolves expires immediately without moving.
    pub fn update(
        &mut self,
        dt: f32,
        definition: &EmitterDefinition,
        nodes: &NodeArena,
        camera: &CameraBasis,
    ) -> bool {
        let Some(node) = nodes.get(self.node) else {
            log::debug!("particle node {:?} is gone, retiring particle", self.node);
            self.health = 0.0;
            self.phase = ParticlePhase::Expired;
            return true;
        };

        self.health -= dt;
        self.velocity.z -= self.gravity * dt;
        self.location += self.velocity * dt;

        let world_velocity = if definition.model_space {
            self.world_location = node.transform_point(self.location);
            node.world_matrix.transform_vector3(self.velocity)
        } else {
            self.world_location = self.location;
            self.velocity
        };

        let sample = interpolate(
            &definition.lifecycle,
            definition.columns,
            life_factor(definition.lifespan, self.health),
            self.head,
        );
        self.color = sample.color;
        self.scale = sample.scale;
        self.atlas = sample.atlas;

        self.quad = emit_quad(
            &QuadInput {
                position: self.world_location,
                velocity: world_velocity,
                scale: self.scale,
                node_scale: self.node_scale,
                head: self.head,
                xy_quad: definition.xy_quad,
                tail_length: definition.tail_length,
                atlas: self.atlas,
                color: self.color,
            },
            camera,
        );

        let expired = self.is_expired();
        self.phase = if expired {
            ParticlePhase::Expired
        } else {
            ParticlePhase::Alive
        };
        expired
    }

    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn random_signed_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            let value = random_signed(&mut rng, -2.5);
            assert!((-2.5..=2.5).contains(&value));
        }
    }

    #[test]
    fn random_signed_empty_range_is_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_signed(&mut rng, 0.0), 0.0);
        assert_eq!(random_signed(&mut rng, f32::NAN), 0.0);
        assert_eq!(random_signed(&mut rng, f32::INFINITY), 0.0);
    }
}

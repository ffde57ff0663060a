//! Read-only node transforms published by the skeleton each frame.
//!
//! Particles and emitters refer to nodes through [`NodeHandle`] keys. When an
//! instance is destroyed its nodes are removed from the [`NodeArena`], and
//! every handle pointing at them stops resolving.

use glam::{Affine3A, Quat, Vec3};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Non-owning reference to a node's world transform.
    pub struct NodeHandle;
}

/// Arena of node world transforms, owned by the skeleton collaborator.
pub type NodeArena = SlotMap<NodeHandle, WorldNode>;

/// World-space state of a single skeleton node for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldNode {
    /// Pivot point in model space.
    pub pivot: Vec3,
    /// Model-to-world matrix.
    pub world_matrix: Affine3A,
    /// World rotation.
    pub world_rotation: Quat,
    /// Non-uniform world scale.
    pub world_scale: Vec3,
}

impl Default for WorldNode {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            world_matrix: Affine3A::IDENTITY,
            world_rotation: Quat::IDENTITY,
            world_scale: Vec3::ONE,
        }
    }
}

impl WorldNode {
    /// Builds a node from a pivot and world TRS components.
    #[must_use]
    pub fn from_trs(pivot: Vec3, translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            pivot,
            world_matrix: Affine3A::from_scale_rotation_translation(scale, rotation, translation),
            world_rotation: rotation,
            world_scale: scale,
        }
    }

    /// Transforms a model-space point into world space.
    #[inline]
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.world_matrix.transform_point3(point)
    }
}

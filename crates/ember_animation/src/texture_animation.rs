//! UV transform tracks shared by the layers that reference them.

use glam::{Quat, Vec3, Vec4};

use crate::animated::AnimatedValue;
use crate::clock::{InstancePlayback, Sequence};

/// Animated translation, rotation and scale of a layer's texture
/// coordinates. Missing tracks hold the identity transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureAnimation {
    pub translation: Option<AnimatedValue<Vec3>>,
    /// Quaternion components in `xyzw` order.
    pub rotation: Option<AnimatedValue<Vec4>>,
    pub scale: Option<AnimatedValue<Vec3>>,
}

impl TextureAnimation {
    #[must_use]
    pub fn translation(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> Vec3 {
        self.translation
            .as_ref()
            .map_or(Vec3::ZERO, |anim| anim.value(playback, sequences, Vec3::ZERO))
    }

    #[must_use]
    pub fn rotation(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> Quat {
        let identity = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let value = self
            .rotation
            .as_ref()
            .map_or(identity, |anim| anim.value(playback, sequences, identity));
        Quat::from_vec4(value)
    }

    #[must_use]
    pub fn scale(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> Vec3 {
        self.scale
            .as_ref()
            .map_or(Vec3::ONE, |anim| anim.value(playback, sequences, Vec3::ONE))
    }

    #[must_use]
    pub fn is_translation_variant(&self, sequence: &Sequence) -> bool {
        self.translation.as_ref().is_some_and(|anim| anim.is_variant(sequence))
    }

    #[must_use]
    pub fn is_rotation_variant(&self, sequence: &Sequence) -> bool {
        self.rotation.as_ref().is_some_and(|anim| anim.is_variant(sequence))
    }

    #[must_use]
    pub fn is_scale_variant(&self, sequence: &Sequence) -> bool {
        self.scale.as_ref().is_some_and(|anim| anim.is_variant(sequence))
    }
}

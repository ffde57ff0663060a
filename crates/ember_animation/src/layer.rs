//! Material layers: blend state plus animated alpha and texture slot.

use bitflags::bitflags;
use glam::{Quat, Vec3};
use smallvec::SmallVec;

use ember_core::blend::{BlendPair, LayerFilterMode, layer_blend};

use crate::animated::AnimatedValue;
use crate::clock::{InstancePlayback, Sequence};
use crate::texture_animation::TextureAnimation;

bitflags! {
    /// Shading flags stored on MDX layers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayerFlags: u32 {
        const UNSHADED = 0x1;
        const SPHERE_ENVIRONMENT_MAP = 0x2;
        const TWO_SIDED = 0x10;
        const UNFOGGED = 0x20;
        const NO_DEPTH_TEST = 0x40;
        const NO_DEPTH_SET = 0x80;
    }
}

/// Fixed-function state a layer needs from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRenderState {
    pub blend: Option<BlendPair>,
    pub alpha_test: bool,
    pub depth_mask: bool,
    pub depth_test: bool,
    pub cull_back_faces: bool,
}

/// Which layer properties animate during a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerVariants {
    pub alpha: bool,
    pub slot: bool,
    pub translation: bool,
    pub rotation: bool,
    pub scale: bool,
}

#[derive(Debug, Clone)]
pub struct LayerDefinition {
    pub filter_mode: LayerFilterMode,
    pub flags: LayerFlags,
    pub texture_id: u32,
    pub alpha: f32,
    pub alpha_anim: Option<AnimatedValue<f32>>,
    pub texture_anim: Option<AnimatedValue<u32>>,
    pub texture_animation: Option<TextureAnimation>,
    variants: SmallVec<[LayerVariants; 8]>,
}

impl LayerDefinition {
    #[must_use]
    pub fn new(
        filter_mode: LayerFilterMode,
        flags: LayerFlags,
        texture_id: u32,
        alpha: f32,
        alpha_anim: Option<AnimatedValue<f32>>,
        texture_anim: Option<AnimatedValue<u32>>,
        sequences: &[Sequence],
    ) -> Self {
        let mut layer = Self {
            filter_mode,
            flags,
            texture_id,
            alpha,
            alpha_anim,
            texture_anim,
            texture_animation: None,
            variants: SmallVec::new(),
        };
        layer.rebuild_variants(sequences);
        layer
    }

    /// Attaches the UV transform tracks and refreshes the variant table.
    #[must_use]
    pub fn with_texture_animation(mut self, animation: TextureAnimation, sequences: &[Sequence]) -> Self {
        self.texture_animation = Some(animation);
        self.rebuild_variants(sequences);
        self
    }

    fn rebuild_variants(&mut self, sequences: &[Sequence]) {
        let uv = self.texture_animation.as_ref();
        self.variants = sequences
            .iter()
            .map(|sequence| LayerVariants {
                alpha: self.alpha_anim.as_ref().is_some_and(|anim| anim.is_variant(sequence)),
                slot: self.texture_anim.as_ref().is_some_and(|anim| anim.is_variant(sequence)),
                translation: uv.is_some_and(|anim| anim.is_translation_variant(sequence)),
                rotation: uv.is_some_and(|anim| anim.is_rotation_variant(sequence)),
                scale: uv.is_some_and(|anim| anim.is_scale_variant(sequence)),
            })
            .collect();
    }

    /// Variant table entry for `sequence`.
    #[must_use]
    pub fn variants(&self, sequence: usize) -> LayerVariants {
        self.variants.get(sequence).copied().unwrap_or_default()
    }

    /// Whether the texture slot changes in any sequence.
    #[must_use]
    pub fn has_slot_anim(&self) -> bool {
        self.variants.iter().any(|v| v.slot)
    }

    #[must_use]
    pub fn has_translation_anim(&self) -> bool {
        self.variants.iter().any(|v| v.translation)
    }

    #[must_use]
    pub fn has_rotation_anim(&self) -> bool {
        self.variants.iter().any(|v| v.rotation)
    }

    #[must_use]
    pub fn has_scale_anim(&self) -> bool {
        self.variants.iter().any(|v| v.scale)
    }

    /// UV translation, zero without texture animation.
    #[must_use]
    pub fn translation(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> Vec3 {
        self.texture_animation
            .as_ref()
            .map_or(Vec3::ZERO, |anim| anim.translation(playback, sequences))
    }

    /// UV rotation, identity without texture animation.
    #[must_use]
    pub fn rotation(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> Quat {
        self.texture_animation
            .as_ref()
            .map_or(Quat::IDENTITY, |anim| anim.rotation(playback, sequences))
    }

    /// UV scale, one without texture animation.
    #[must_use]
    pub fn scale(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> Vec3 {
        self.texture_animation
            .as_ref()
            .map_or(Vec3::ONE, |anim| anim.scale(playback, sequences))
    }

    #[must_use]
    pub fn alpha(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> f32 {
        self.alpha_anim
            .as_ref()
            .map_or(self.alpha, |anim| anim.value(playback, sequences, self.alpha))
    }

    #[must_use]
    pub fn texture_id(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> u32 {
        self.texture_anim
            .as_ref()
            .map_or(self.texture_id, |anim| anim.value(playback, sequences, self.texture_id))
    }

    #[must_use]
    pub fn render_state(&self) -> LayerRenderState {
        let opaque = matches!(self.filter_mode, LayerFilterMode::None | LayerFilterMode::Transparent);

        LayerRenderState {
            blend: layer_blend(self.filter_mode),
            alpha_test: self.filter_mode == LayerFilterMode::Transparent,
            depth_mask: opaque && !self.flags.contains(LayerFlags::NO_DEPTH_SET),
            depth_test: !self.flags.contains(LayerFlags::NO_DEPTH_TEST),
            cull_back_faces: !self.flags.contains(LayerFlags::TWO_SIDED),
        }
    }
}

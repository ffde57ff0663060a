//! Filter mode to blend state mapping.
//!
//! Layers and emitters encode blending differently in MDX data. Both tables
//! live here as plain functions so that every consumer (layers, particle
//! emitters, splat event objects) resolves blend state the same way.

use serde::{Deserialize, Serialize};

use crate::errors::{EmberError, Result};

/// Renderer-agnostic blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
}

/// `(source, destination)` blend factors.
pub type BlendPair = (BlendFactor, BlendFactor);

/// Material layer filter modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayerFilterMode {
    #[default]
    None,
    Transparent,
    Blend,
    Additive,
    AddAlpha,
    Modulate,
    Modulate2x,
}

impl LayerFilterMode {
    pub fn from_raw(value: u32) -> Result<Self> {
        Ok(match value {
            0 => Self::None,
            1 => Self::Transparent,
            2 => Self::Blend,
            3 => Self::Additive,
            4 => Self::AddAlpha,
            5 => Self::Modulate,
            6 => Self::Modulate2x,
            _ => {
                return Err(EmberError::UnknownFilterMode {
                    kind: "layer",
                    value,
                });
            }
        })
    }
}

/// Particle emitter and splat filter modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmitterFilterMode {
    #[default]
    Blend,
    Additive,
    Modulate,
    Modulate2x,
    AlphaKey,
}

impl EmitterFilterMode {
    pub fn from_raw(value: u32) -> Result<Self> {
        Ok(match value {
            0 => Self::Blend,
            1 => Self::Additive,
            2 => Self::Modulate,
            3 => Self::Modulate2x,
            4 => Self::AlphaKey,
            _ => {
                return Err(EmberError::UnknownFilterMode {
                    kind: "emitter",
                    value,
                });
            }
        })
    }
}

/// Blend factors for a layer, or `None` when the layer is opaque or
/// alpha tested.
#[must_use]
pub fn layer_blend(mode: LayerFilterMode) -> Option<BlendPair> {
    use BlendFactor::{DstColor, One, OneMinusSrcAlpha, SrcAlpha, SrcColor, Zero};

    match mode {
        LayerFilterMode::None | LayerFilterMode::Transparent => None,
        LayerFilterMode::Blend => Some((SrcAlpha, OneMinusSrcAlpha)),
        LayerFilterMode::Additive => Some((One, One)),
        LayerFilterMode::AddAlpha => Some((SrcAlpha, One)),
        LayerFilterMode::Modulate => Some((Zero, SrcColor)),
        LayerFilterMode::Modulate2x => Some((DstColor, SrcColor)),
    }
}

/// Blend factors for particle emitters and splats. Emitters always blend.
#[must_use]
pub fn emitter_blend(mode: EmitterFilterMode) -> BlendPair {
    use BlendFactor::{DstColor, One, OneMinusSrcAlpha, SrcAlpha, SrcColor, Zero};

    match mode {
        EmitterFilterMode::Blend => (SrcAlpha, OneMinusSrcAlpha),
        EmitterFilterMode::Additive | EmitterFilterMode::AlphaKey => (SrcAlpha, One),
        EmitterFilterMode::Modulate => (Zero, SrcColor),
        EmitterFilterMode::Modulate2x => (DstColor, SrcColor),
    }
}

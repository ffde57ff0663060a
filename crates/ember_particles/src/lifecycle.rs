//! Maps elapsed life onto the authored phases of a particle.

use glam::Vec4;

use ember_core::math::lerp;

use crate::definition::{Interval, LifecycleIntervals};

/// Which half of its life a particle is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifePhase {
    Life,
    Decay,
}

/// Column/row cell of a texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtlasCell {
    pub column: u32,
    pub row: u32,
}

impl AtlasCell {
    /// Cell of a linear atlas index. A zero column count is treated as one.
    #[inline]
    #[must_use]
    pub fn from_index(index: u32, columns: u32) -> Self {
        let columns = columns.max(1);
        Self {
            column: index % columns,
            row: index / columns,
        }
    }

    /// Opposite corner `(column + 1, row + 1)`.
    #[inline]
    #[must_use]
    pub fn far_corner(self) -> (u32, u32) {
        (self.column.saturating_add(1), self.row.saturating_add(1))
    }
}

/// Visual attributes of a particle at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleSample {
    pub phase: LifePhase,
    /// Local progress through the phase, in `[0, 1]`.
    pub factor: f32,
    pub color: Vec4,
    pub scale: f32,
    pub atlas_index: u32,
    pub atlas: AtlasCell,
}

/// Fraction of `lifespan` already consumed given the remaining `health`.
#[inline]
#[must_use]
pub fn life_factor(lifespan: f32, health: f32) -> f32 {
    if lifespan > 0.0 {
        (lifespan - health) / lifespan
    } else {
        1.0
    }
}

/// Interpolates color, scale and atlas slot for `life_factor`.
///
/// `life_factor == time_middle` already belongs to the decay phase.
#[must_use]
pub fn interpolate(lifecycle: &LifecycleIntervals, columns: u32, life_factor: f32, head: bool) -> LifecycleSample {
    let time_middle = lifecycle.time_middle;

    let (phase, factor, first, interval) = if life_factor < time_middle {
        let interval = if head { lifecycle.head_life } else { lifecycle.tail_life };
        (LifePhase::Life, life_factor / time_middle, 0, interval)
    } else {
        let interval = if head { lifecycle.head_decay } else { lifecycle.tail_decay };
        (
            LifePhase::Decay,
            (life_factor - time_middle) / (1.0 - time_middle),
            1,
            interval,
        )
    };

    let factor = factor.min(1.0);
    let atlas_index = atlas_index(interval, factor);

    LifecycleSample {
        phase,
        factor,
        color: lifecycle.colors[first].lerp(lifecycle.colors[first + 1], factor),
        scale: lerp(lifecycle.scaling[first], lifecycle.scaling[first + 1], factor),
        atlas_index,
        atlas: AtlasCell::from_index(atlas_index, columns),
    }
}

// Negative and NaN positions saturate to slot 0.
#[inline]
fn atlas_index(interval: Interval, factor: f32) -> u32 {
    lerp(interval.start, interval.end, factor).floor() as u32
}

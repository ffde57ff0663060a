//! Emitter definitions shared by every instance of a model, and the
//! per-frame parameters sampled for each emitter instance.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use ember_core::blend::EmitterFilterMode;
use ember_core::errors::{EmberError, Result};

/// An atlas sub-range played during one life phase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Interval {
    pub start: f32,
    pub end: f32,
    /// Authored repeat count. Carried for tooling; the atlas index spans
    /// `start..end` once per phase.
    #[serde(default)]
    pub repeat: u32,
}

impl Interval {
    #[must_use]
    pub const fn new(start: f32, end: f32, repeat: u32) -> Self {
        Self { start, end, repeat }
    }
}

/// Phase layout of a particle's life.
///
/// Life is split at `time_middle`: the first phase blends `colors[0]` to
/// `colors[1]` and `scaling[0]` to `scaling[1]`, the second blends
/// `colors[1]` to `colors[2]` and `scaling[1]` to `scaling[2]`. A two-point
/// scale ramp holds its end through the second phase. Colors are in byte
/// range (`0..=255` per channel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLifecycle")]
pub struct LifecycleIntervals {
    pub time_middle: f32,
    pub head_life: Interval,
    pub head_decay: Interval,
    pub tail_life: Interval,
    pub tail_decay: Interval,
    pub colors: [Vec4; 3],
    pub scaling: [f32; 3],
}

impl LifecycleIntervals {
    pub fn new(
        time_middle: f32,
        head: [Interval; 2],
        tail: [Interval; 2],
        colors: &[Vec4],
        scaling: &[f32],
    ) -> Result<Self> {
        let colors: [Vec4; 3] = colors.try_into().map_err(|_| EmberError::RampLength {
            ramp: "color",
            expected: &[3],
            actual: colors.len(),
        })?;
        let scaling: [f32; 3] = match *scaling {
            [a, b] => [a, b, b],
            [a, b, c] => [a, b, c],
            _ => {
                return Err(EmberError::RampLength {
                    ramp: "scale",
                    expected: &[2, 3],
                    actual: scaling.len(),
                });
            }
        };

        let lifecycle = Self {
            time_middle,
            head_life: head[0],
            head_decay: head[1],
            tail_life: tail[0],
            tail_decay: tail[1],
            colors,
            scaling,
        };
        lifecycle.validate()?;
        Ok(lifecycle)
    }

    pub fn validate(&self) -> Result<()> {
        let inside = self.time_middle > 0.0 && self.time_middle < 1.0;
        if !inside {
            return Err(EmberError::InvalidTimeMiddle(self.time_middle));
        }
        Ok(())
    }
}

/// Serialized form of [`LifecycleIntervals`], with ramps of any length.
#[derive(Deserialize)]
struct RawLifecycle {
    time_middle: f32,
    head_life: Interval,
    head_decay: Interval,
    tail_life: Interval,
    tail_decay: Interval,
    colors: Vec<Vec4>,
    scaling: Vec<f32>,
}

impl TryFrom<RawLifecycle> for LifecycleIntervals {
    type Error = EmberError;

    fn try_from(raw: RawLifecycle) -> Result<Self> {
        Self::new(
            raw.time_middle,
            [raw.head_life, raw.head_decay],
            [raw.tail_life, raw.tail_decay],
            &raw.colors,
            &raw.scaling,
        )
    }
}

/// Which particle kinds an emitter produces per emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadOrTail {
    #[default]
    Head,
    Tail,
    Both,
}

impl HeadOrTail {
    #[must_use]
    pub fn from_raw(value: u32) -> Self {
        match value {
            1 => Self::Tail,
            2 => Self::Both,
            _ => Self::Head,
        }
    }

    #[inline]
    #[must_use]
    pub fn particles_per_emission(self) -> usize {
        match self {
            Self::Head | Self::Tail => 1,
            Self::Both => 2,
        }
    }
}

/// Static description of a particle emitter, owned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterDefinition {
    #[serde(default)]
    pub name: String,
    /// Seconds a particle lives.
    pub lifespan: f32,
    pub lifecycle: LifecycleIntervals,
    /// Atlas columns.
    pub columns: u32,
    /// Atlas rows.
    pub rows: u32,
    /// Length of tail ribbons relative to velocity.
    #[serde(default)]
    pub tail_length: f32,
    /// Particles stay in node space and follow the node after spawning.
    #[serde(default)]
    pub model_space: bool,
    /// Use fixed XY-plane quads instead of camera billboards.
    #[serde(default)]
    pub xy_quad: bool,
    #[serde(default)]
    pub head_or_tail: HeadOrTail,
    #[serde(default)]
    pub filter_mode: EmitterFilterMode,
    #[serde(default)]
    pub texture_id: u32,
}

impl EmitterDefinition {
    pub fn validate(&self) -> Result<()> {
        let positive = self.lifespan > 0.0 && self.lifespan.is_finite();
        if !positive {
            return Err(EmberError::InvalidLifespan(self.lifespan));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(EmberError::InvalidAtlas {
                columns: self.columns,
                rows: self.rows,
            });
        }
        self.lifecycle.validate()
    }

    /// Deserializes and validates a definition.
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        log::debug!(
            "loaded emitter '{}': lifespan {}s, {}x{} atlas, {:?}",
            definition.name,
            definition.lifespan,
            definition.columns,
            definition.rows,
            definition.head_or_tail
        );
        Ok(definition)
    }
}

/// Per-frame emitter values, sampled from the emitter's animation tracks by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterParams {
    pub width: f32,
    pub length: f32,
    /// Launch cone half-angle in degrees.
    pub latitude: f32,
    pub speed: f32,
    pub variation: f32,
    pub gravity: f32,
    /// Emissions per second.
    pub emission_rate: f32,
}

/// A decoded splat lookup row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplatRecord {
    pub columns: u32,
    pub rows: u32,
    pub scale: f32,
    /// Seconds of the first phase.
    pub lifespan: f32,
    /// Seconds of the second phase.
    pub decay: f32,
    pub uv_lifespan: Interval,
    pub uv_decay: Interval,
    pub colors: [Vec4; 3],
    #[serde(default)]
    pub blend_mode: EmitterFilterMode,
}

impl SplatRecord {
    pub fn lifecycle(&self) -> Result<LifecycleIntervals> {
        let total = self.lifespan + self.decay;
        if total.is_nan() || total <= 0.0 {
            return Err(EmberError::InvalidLifespan(total));
        }

        let phases = [self.uv_lifespan, self.uv_decay];
        LifecycleIntervals::new(
            self.lifespan / total,
            phases,
            phases,
            &self.colors,
            &[self.scale, self.scale],
        )
    }

    /// Ground splats: head quads laid flat in the XY plane, no motion.
    pub fn emitter_definition(&self) -> Result<EmitterDefinition> {
        let definition = EmitterDefinition {
            name: String::from("splat"),
            lifespan: self.lifespan + self.decay,
            lifecycle: self.lifecycle()?,
            columns: self.columns,
            rows: self.rows,
            tail_length: 0.0,
            model_space: false,
            xy_quad: true,
            head_or_tail: HeadOrTail::Head,
            filter_mode: self.blend_mode,
            texture_id: 0,
        };
        definition.validate()?;
        Ok(definition)
    }
}

/// A decoded ubersplat lookup row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UberSplatRecord {
    pub scale: f32,
    pub birth_time: f32,
    pub pause_time: f32,
    pub decay: f32,
    pub colors: [Vec4; 3],
    #[serde(default)]
    pub blend_mode: EmitterFilterMode,
}

impl UberSplatRecord {
    #[must_use]
    pub fn lifespan(&self) -> f32 {
        self.birth_time + self.pause_time + self.decay
    }
}

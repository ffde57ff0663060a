//! Typed keyframe tracks with MDX interpolation modes.

use ember_core::errors::{EmberError, Result};
use serde::{Deserialize, Serialize};

use crate::clock::Frame;
use crate::values::{Interpolatable, bezier_weights, hermite_weights};

/// MDX keyframe interpolation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Hold each key until the next one.
    #[default]
    DontInterp,
    Linear,
    Hermite,
    Bezier,
}

impl InterpolationMode {
    pub fn from_raw(value: u32) -> Result<Self> {
        Ok(match value {
            0 => Self::DontInterp,
            1 => Self::Linear,
            2 => Self::Hermite,
            3 => Self::Bezier,
            _ => return Err(EmberError::UnknownInterpolation(value)),
        })
    }

    /// Hermite and Bezier keys carry in/out tangents.
    #[inline]
    #[must_use]
    pub fn has_tangents(self) -> bool {
        matches!(self, Self::Hermite | Self::Bezier)
    }
}

/// A decoded keyframe track.
///
/// Frames are expected in ascending order, as written by the exporters.
/// `in_tans`/`out_tans` are parallel to `values` for Hermite and Bezier
/// tracks and empty otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    frames: Vec<Frame>,
    values: Vec<T>,
    in_tans: Vec<T>,
    out_tans: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track without tangents. Tangent modes fall back to linear.
    pub fn try_new(frames: Vec<Frame>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        check_lengths(&frames, values.len(), "values")?;

        let interpolation = if interpolation.has_tangents() {
            log::debug!("{interpolation:?} track built without tangents, using linear");
            InterpolationMode::Linear
        } else {
            interpolation
        };

        Ok(Self {
            frames,
            values,
            in_tans: Vec::new(),
            out_tans: Vec::new(),
            interpolation,
        })
    }

    /// Builds a Hermite or Bezier track.
    pub fn with_tangents(
        frames: Vec<Frame>,
        values: Vec<T>,
        in_tans: Vec<T>,
        out_tans: Vec<T>,
        interpolation: InterpolationMode,
    ) -> Result<Self> {
        check_lengths(&frames, values.len(), "values")?;
        check_lengths(&frames, in_tans.len(), "in tangents")?;
        check_lengths(&frames, out_tans.len(), "out tangents")?;

        Ok(Self {
            frames,
            values,
            in_tans,
            out_tans,
            interpolation,
        })
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Samples the track at `frame`, considering only keys inside
    /// `[start, end]`.
    ///
    /// Returns `None` when no key falls inside the window. Before the first
    /// key the first value holds, after the last key the last value holds.
    #[must_use]
    pub fn sample_in_range(&self, frame: Frame, start: Frame, end: Frame) -> Option<T> {
        let mut first = None;
        let mut floor = None;
        let mut ceil = None;

        for (index, &key) in self.frames.iter().enumerate() {
            if key < start || key > end {
                continue;
            }
            first.get_or_insert(index);

            if key <= frame {
                floor = Some(index);
            } else {
                ceil = Some(index);
                break;
            }
        }

        let first = first?;
        let Some(floor) = floor else {
            return Some(self.values[first]);
        };
        let Some(ceil) = ceil else {
            return Some(self.values[floor]);
        };

        let f0 = self.frames[floor];
        let f1 = self.frames[ceil];
        let t = if f1 > f0 {
            (frame - f0) as f32 / (f1 - f0) as f32
        } else {
            0.0
        };

        Some(self.interpolate(floor, ceil, t.clamp(0.0, 1.0)))
    }

    /// Whether keys inside `[start, end]` carry more than one distinct value.
    #[must_use]
    pub fn is_variant(&self, start: Frame, end: Frame) -> bool {
        let mut in_range = self
            .frames
            .iter()
            .zip(&self.values)
            .filter(|&(&key, _)| key >= start && key <= end)
            .map(|(_, value)| value);

        match in_range.next() {
            Some(first) => in_range.any(|value| value != first),
            None => false,
        }
    }

    fn interpolate(&self, floor: usize, ceil: usize, t: f32) -> T {
        let v0 = self.values[floor];
        let v1 = self.values[ceil];

        if !T::CONTINUOUS {
            return v0;
        }

        match self.interpolation {
            InterpolationMode::DontInterp => v0,
            InterpolationMode::Linear => T::interpolate_linear(v0, v1, t),
            InterpolationMode::Hermite => {
                T::weighted_sum(v0, self.out_tans[floor], self.in_tans[ceil], v1, hermite_weights(t))
            }
            InterpolationMode::Bezier => {
                T::weighted_sum(v0, self.out_tans[floor], self.in_tans[ceil], v1, bezier_weights(t))
            }
        }
    }
}

fn check_lengths(frames: &[Frame], actual: usize, what: &'static str) -> Result<()> {
    if frames.is_empty() {
        return Err(EmberError::EmptyTrack);
    }
    if frames.len() != actual {
        return Err(EmberError::TrackLengthMismatch {
            what,
            expected: frames.len(),
            actual,
        });
    }
    Ok(())
}

//! Closed set of track value shapes.

use glam::{Vec3, Vec4};

use crate::clock::{ClockSample, Frame};
use crate::tracks::KeyframeTrack;

/// Keyframe data of any supported value shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackData {
    Uint(KeyframeTrack<u32>),
    Float(KeyframeTrack<f32>),
    Vector3(KeyframeTrack<Vec3>),
    Vector4(KeyframeTrack<Vec4>),
}

/// A sampled value, tagged with its shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Uint(u32),
    Float(f32),
    Vector3(Vec3),
    Vector4(Vec4),
}

impl TrackData {
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        match self {
            Self::Uint(track) => track.frames(),
            Self::Float(track) => track.frames(),
            Self::Vector3(track) => track.frames(),
            Self::Vector4(track) => track.frames(),
        }
    }

    #[must_use]
    pub fn sample_in_range(&self, frame: Frame, start: Frame, end: Frame) -> Option<TrackValue> {
        Some(match self {
            Self::Uint(track) => TrackValue::Uint(track.sample_in_range(frame, start, end)?),
            Self::Float(track) => TrackValue::Float(track.sample_in_range(frame, start, end)?),
            Self::Vector3(track) => TrackValue::Vector3(track.sample_in_range(frame, start, end)?),
            Self::Vector4(track) => TrackValue::Vector4(track.sample_in_range(frame, start, end)?),
        })
    }

    #[must_use]
    pub fn sample_clock(&self, clock: ClockSample) -> Option<TrackValue> {
        self.sample_in_range(clock.time, clock.start, clock.end)
    }

    #[must_use]
    pub fn is_variant(&self, start: Frame, end: Frame) -> bool {
        match self {
            Self::Uint(track) => track.is_variant(start, end),
            Self::Float(track) => track.is_variant(start, end),
            Self::Vector3(track) => track.is_variant(start, end),
            Self::Vector4(track) => track.is_variant(start, end),
        }
    }
}

impl TrackValue {
    #[must_use]
    pub fn as_float(self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(value),
            Self::Uint(value) => Some(value as f32),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uint(self) -> Option<u32> {
        match self {
            Self::Uint(value) => Some(value),
            _ => None,
        }
    }
}

impl From<KeyframeTrack<u32>> for TrackData {
    fn from(track: KeyframeTrack<u32>) -> Self {
        Self::Uint(track)
    }
}

impl From<KeyframeTrack<f32>> for TrackData {
    fn from(track: KeyframeTrack<f32>) -> Self {
        Self::Float(track)
    }
}

impl From<KeyframeTrack<Vec3>> for TrackData {
    fn from(track: KeyframeTrack<Vec3>) -> Self {
        Self::Vector3(track)
    }
}

impl From<KeyframeTrack<Vec4>> for TrackData {
    fn from(track: KeyframeTrack<Vec4>) -> Self {
        Self::Vector4(track)
    }
}

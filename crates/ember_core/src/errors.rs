//! Error Types
//!
//! This module defines the error types used throughout Ember.
//!
//! # Overview
//!
//! The frame loop never fails: sampling and simulation degrade to zeroed or
//! default values. [`EmberError`] only surfaces where decoded asset data
//! enters the engine, i.e. when definitions, tracks and settings are
//! constructed or deserialized.
//!
//! ```rust,ignore
//! use ember::core::errors::Result;
//!
//! fn build() -> Result<LifecycleIntervals> {
//!     LifecycleIntervals::new(0.5, intervals, colors, scaling)
//! }
//! ```

use thiserror::Error;

/// The main error type for Ember.
#[derive(Error, Debug)]
pub enum EmberError {
    // ========================================================================
    // Lifecycle Definition Errors
    // ========================================================================
    /// The phase boundary must lie strictly inside normalized life.
    #[error("time middle must be in (0, 1), got {0}")]
    InvalidTimeMiddle(f32),

    /// Lifespans must be positive and finite.
    #[error("lifespan must be positive, got {0}")]
    InvalidLifespan(f32),

    /// A color or scale ramp has the wrong number of control points.
    #[error("{ramp} ramp expects {expected:?} control points, got {actual}")]
    RampLength {
        /// Which ramp was malformed
        ramp: &'static str,
        /// Accepted point counts
        expected: &'static [usize],
        /// Provided point count
        actual: usize,
    },

    /// Texture atlas dimensions must be non-zero.
    #[error("invalid atlas dimensions {columns}x{rows}")]
    InvalidAtlas {
        /// Atlas column count
        columns: u32,
        /// Atlas row count
        rows: u32,
    },

    // ========================================================================
    // Track & Sequence Errors
    // ========================================================================
    /// A keyframe track was constructed without keys.
    #[error("keyframe track is empty")]
    EmptyTrack,

    /// Parallel keyframe arrays disagree in length.
    #[error("track {what} length mismatch: expected {expected}, got {actual}")]
    TrackLengthMismatch {
        /// Which array was inconsistent
        what: &'static str,
        /// Number of frames in the track
        expected: usize,
        /// Length of the offending array
        actual: usize,
    },

    /// Unknown MDX interpolation type.
    #[error("unknown interpolation type {0}")]
    UnknownInterpolation(u32),

    /// A global sequence must cycle over a positive number of frames.
    #[error("global sequence has zero length")]
    ZeroLengthSequence,

    /// Unknown filter mode value.
    #[error("unknown {kind} filter mode {value}")]
    UnknownFilterMode {
        /// Layer or emitter
        kind: &'static str,
        /// The raw value
        value: u32,
    },

    /// An event object node name with an unrecognised type prefix.
    #[error("unknown event object type in node name '{0}'")]
    UnknownEventType(String),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, EmberError>`.
pub type Result<T> = std::result::Result<T, EmberError>;

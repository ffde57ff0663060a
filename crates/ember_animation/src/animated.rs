//! Keyframe tracks bound to their driving clock.

use std::sync::Arc;

use crate::clock::{GlobalSequence, InstancePlayback, Sequence, resolve_clock};
use crate::tracks::KeyframeTrack;
use crate::values::Interpolatable;

/// A keyframe track bound to the clock that drives it.
///
/// The track is shared by every instance of the owning model.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue<T: Interpolatable> {
    pub track: Arc<KeyframeTrack<T>>,
    pub global_sequence: Option<GlobalSequence>,
}

impl<T: Interpolatable> AnimatedValue<T> {
    #[must_use]
    pub fn new(track: Arc<KeyframeTrack<T>>, global_sequence: Option<GlobalSequence>) -> Self {
        Self { track, global_sequence }
    }

    /// Current value for `playback`, or `default` when no clock applies or
    /// the window holds no keys.
    #[must_use]
    pub fn value(&self, playback: &InstancePlayback, sequences: &[Sequence], default: T) -> T {
        resolve_clock(self.global_sequence, playback, sequences)
            .and_then(|clock| self.track.sample_in_range(clock.time, clock.start, clock.end))
            .unwrap_or(default)
    }

    /// Whether the value changes while `sequence` plays.
    #[must_use]
    pub fn is_variant(&self, sequence: &Sequence) -> bool {
        match self.global_sequence {
            Some(global) => self.track.is_variant(0, global.length()),
            None => self.track.is_variant(sequence.interval.start, sequence.interval.end),
        }
    }
}

//! Clock resolution for animated entities.
//!
//! An animated entity either follows a [`GlobalSequence`], a shared clock that
//! cycles regardless of what the instance is playing, or the instance's
//! active [`Sequence`]. [`resolve_clock`] picks one and returns the time
//! position together with its valid frame window.

use serde::{Deserialize, Serialize};

use ember_core::errors::{EmberError, Result};

/// Time in animation frames (milliseconds for MDX data).
pub type Frame = u32;

/// A shared clock with a fixed, positive cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GlobalSequence {
    length: Frame,
}

impl GlobalSequence {
    pub fn new(length: Frame) -> Result<Self> {
        if length == 0 {
            return Err(EmberError::ZeroLengthSequence);
        }
        Ok(Self { length })
    }

    #[inline]
    #[must_use]
    pub fn length(self) -> Frame {
        self.length
    }

    /// Current phase for a running counter.
    #[inline]
    #[must_use]
    pub fn phase(self, counter: u32) -> Frame {
        counter % self.length
    }
}

impl TryFrom<u32> for GlobalSequence {
    type Error = EmberError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<GlobalSequence> for u32 {
    fn from(value: GlobalSequence) -> Self {
        value.length
    }
}

/// A closed frame window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SequenceInterval {
    pub start: Frame,
    pub end: Frame,
}

impl SequenceInterval {
    #[must_use]
    pub const fn new(start: Frame, end: Frame) -> Self {
        Self { start, end }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, frame: Frame) -> bool {
        frame >= self.start && frame <= self.end
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Frame {
        self.end.saturating_sub(self.start)
    }
}

/// A named animation sequence of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    pub interval: SequenceInterval,
    /// Sequences flagged non-looping hold their last frame under
    /// [`SequenceLoopMode::Default`].
    #[serde(default)]
    pub non_looping: bool,
}

impl Sequence {
    #[must_use]
    pub fn new(name: impl Into<String>, start: Frame, end: Frame) -> Self {
        Self {
            name: name.into(),
            interval: SequenceInterval::new(start, end),
            non_looping: false,
        }
    }
}

/// How an instance behaves at the end of its active sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SequenceLoopMode {
    /// Hold the last frame.
    Never,
    /// Loop unless the sequence is flagged non-looping.
    #[default]
    Default,
    /// Always loop.
    Always,
}

/// Per-instance playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstancePlayback {
    /// Active sequence, `None` when nothing plays.
    pub sequence: Option<usize>,
    /// Local frame within the active sequence's interval.
    pub frame: Frame,
    /// Global sequence counter.
    pub counter: u32,
    pub loop_mode: SequenceLoopMode,
    /// Set once a non-looping sequence reached its end.
    pub ended: bool,
}

impl InstancePlayback {
    /// Convert a raw sequence index where `-1` means "none".
    #[must_use]
    pub fn sequence_from_raw(index: i32) -> Option<usize> {
        usize::try_from(index).ok()
    }

    /// Starts playing `sequence` from its first frame. An out-of-range index
    /// stops playback.
    pub fn set_sequence(&mut self, sequence: Option<usize>, sequences: &[Sequence]) {
        self.ended = false;
        match sequence.and_then(|index| sequences.get(index).map(|s| (index, s))) {
            Some((index, seq)) => {
                self.sequence = Some(index);
                self.frame = seq.interval.start;
            }
            None => {
                if let Some(index) = sequence {
                    log::warn!("sequence {index} out of range ({} sequences)", sequences.len());
                }
                self.sequence = None;
                self.frame = 0;
            }
        }
    }

    /// Advances local and global time by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: u32, sequences: &[Sequence]) {
        self.counter = self.counter.wrapping_add(dt_ms);

        let Some(seq) = self.sequence.and_then(|index| sequences.get(index)) else {
            return;
        };
        if self.ended {
            return;
        }

        let interval = seq.interval;
        self.frame = self.frame.saturating_add(dt_ms);

        if self.frame > interval.end {
            let looping = match self.loop_mode {
                SequenceLoopMode::Never => false,
                SequenceLoopMode::Default => !seq.non_looping,
                SequenceLoopMode::Always => true,
            };

            if looping {
                let span = interval.duration() + 1;
                self.frame = interval.start + (self.frame - interval.start) % span;
            } else {
                self.frame = interval.end;
                self.ended = true;
            }
        }
    }
}

/// Output of [`resolve_clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    pub time: Frame,
    pub start: Frame,
    pub end: Frame,
}

impl ClockSample {
    #[inline]
    #[must_use]
    pub fn interval(&self) -> SequenceInterval {
        SequenceInterval::new(self.start, self.end)
    }
}

/// Resolves which clock drives an animated entity for this instance.
///
/// Returns `None` when the entity has no global sequence and the instance
/// plays nothing (or an unknown sequence); callers then use their static
/// default value.
#[must_use]
pub fn resolve_clock(
    global_sequence: Option<GlobalSequence>,
    playback: &InstancePlayback,
    sequences: &[Sequence],
) -> Option<ClockSample> {
    if let Some(global) = global_sequence {
        return Some(ClockSample {
            time: global.phase(playback.counter),
            start: 0,
            end: global.length(),
        });
    }

    let sequence = sequences.get(playback.sequence?)?;
    Some(ClockSample {
        time: playback.frame,
        start: sequence.interval.start,
        end: sequence.interval.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_global_sequence_is_rejected() {
        assert!(GlobalSequence::new(0).is_err());
    }

    #[test]
    fn raw_sentinel_maps_to_none() {
        assert_eq!(InstancePlayback::sequence_from_raw(-1), None);
        assert_eq!(InstancePlayback::sequence_from_raw(3), Some(3));
    }
}

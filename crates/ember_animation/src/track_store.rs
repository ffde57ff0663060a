//! Boolean state tracks and the reverse-scan keyframe sampler.

use std::sync::Arc;

use crate::clock::{ClockSample, Frame, SequenceInterval};

/// Result of sampling a [`TrackStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateSample {
    /// Whether the state is "on".
    pub on: bool,
    /// Index of the track entry that decided the outcome.
    pub index: usize,
}

impl StateSample {
    pub const OFF: Self = Self { on: false, index: 0 };

    #[inline]
    #[must_use]
    pub const fn new(on: bool, index: usize) -> Self {
        Self { on, index }
    }
}

/// Immutable list of state transition frames.
///
/// Entries keep their authoring order, which is not required to be sorted.
/// Definitions share a store through `Arc` and never copy it per instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackStore {
    frames: Arc<[Frame]>,
    ascending: bool,
}

impl TrackStore {
    #[must_use]
    pub fn new(frames: impl Into<Arc<[Frame]>>) -> Self {
        let frames = frames.into();
        let ascending = frames.windows(2).all(|pair| pair[0] <= pair[1]);
        Self { frames, ascending }
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether entries are in non-decreasing order.
    #[inline]
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Samples the state at `time` within the window `[start, end]`.
    ///
    /// Entries are scanned from last to first. An entry before `start` stops
    /// the scan with "off"; the first entry at or before `time` switches the
    /// state "on". Duplicate frames resolve to the entry latest in authoring
    /// order. Queries outside the window are always `(false, 0)`.
    #[must_use]
    pub fn sample(&self, time: Frame, start: Frame, end: Frame) -> StateSample {
        if time < start || time > end {
            return StateSample::OFF;
        }

        if self.ascending {
            return self.sample_ascending(time, start);
        }

        self.sample_scan(time, start)
    }

    #[inline]
    #[must_use]
    pub fn sample_interval(&self, time: Frame, interval: SequenceInterval) -> StateSample {
        self.sample(time, interval.start, interval.end)
    }

    #[inline]
    #[must_use]
    pub fn sample_clock(&self, clock: ClockSample) -> StateSample {
        self.sample(clock.time, clock.start, clock.end)
    }

    fn sample_scan(&self, time: Frame, start: Frame) -> StateSample {
        for (index, &frame) in self.frames.iter().enumerate().rev() {
            if frame < start {
                return StateSample::new(false, index);
            } else if frame <= time {
                return StateSample::new(true, index);
            }
        }

        StateSample::OFF
    }

    // With sorted entries the reverse scan always stops at the last entry
    // `<= time`: every entry after it is `> time >= start` and gets skipped.
    fn sample_ascending(&self, time: Frame, start: Frame) -> StateSample {
        let next = self.frames.partition_point(|&frame| frame <= time);
        if next == 0 {
            return StateSample::OFF;
        }

        let index = next - 1;
        StateSample::new(self.frames[index] >= start, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_lookup_matches_reverse_scan() {
        let store = TrackStore::new(vec![5, 10, 10, 20, 35, 35, 60]);
        assert!(store.is_ascending());

        for start in [0, 8, 10, 30] {
            for time in start..=70 {
                assert_eq!(
                    store.sample_ascending(time, start),
                    store.sample_scan(time, start),
                    "time={time} start={start}"
                );
            }
        }
    }

    #[test]
    fn unsorted_entries_are_detected() {
        assert!(!TrackStore::new(vec![30, 10, 20]).is_ascending());
        assert!(TrackStore::new(Vec::new()).is_ascending());
    }
}

//! Event objects: timed markers that spawn models, splats and ubersplats.

use std::sync::Arc;

use ember_core::errors::{EmberError, Result};

use crate::clock::{GlobalSequence, InstancePlayback, Sequence, resolve_clock};
use crate::track_store::{StateSample, TrackStore};

/// What an event object emits when its track fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventObjectKind {
    /// `SPN`: spawns a model.
    Spawn,
    /// `SPL` (or `FPT`): a textured ground splat.
    Splat,
    /// `UBR`: an ubersplat decal.
    UberSplat,
}

impl EventObjectKind {
    /// Parses a node name such as `SPLxBLOD` into its kind and lookup id.
    ///
    /// The kind is the first three characters, the id is everything after
    /// the fourth.
    pub fn parse(name: &str) -> Result<(Self, &str)> {
        let kind = match name.get(..3) {
            Some("SPN") => Self::Spawn,
            Some("SPL" | "FPT") => Self::Splat,
            Some("UBR") => Self::UberSplat,
            _ => return Err(EmberError::UnknownEventType(name.to_owned())),
        };
        Ok((kind, name.get(4..).unwrap_or("")))
    }
}

#[derive(Debug, Clone)]
pub struct EventObject {
    pub kind: EventObjectKind,
    /// Key into the kind's lookup table.
    pub id: String,
    pub tracks: Arc<TrackStore>,
    pub global_sequence: Option<GlobalSequence>,
}

impl EventObject {
    pub fn new(
        node_name: &str,
        tracks: Arc<TrackStore>,
        global_sequence: Option<GlobalSequence>,
    ) -> Result<Self> {
        let (kind, id) = EventObjectKind::parse(node_name)?;
        log::debug!("event object {node_name}: {kind:?} '{id}' with {} keys", tracks.len());

        Ok(Self {
            kind,
            id: id.to_owned(),
            tracks,
            global_sequence,
        })
    }

    /// Samples the event track for an instance. Without any clock the
    /// result is `(false, 0)`.
    #[must_use]
    pub fn value(&self, playback: &InstancePlayback, sequences: &[Sequence]) -> StateSample {
        match resolve_clock(self.global_sequence, playback, sequences) {
            Some(clock) => self.tracks.sample_clock(clock),
            None => StateSample::OFF,
        }
    }
}

/// Edge detector turning sampled states into one-shot emissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTrigger {
    last_fired: Option<usize>,
}

impl EventTrigger {
    /// Returns `true` once for each track entry that switches the state on.
    pub fn poll(&mut self, sample: StateSample) -> bool {
        if !sample.on {
            self.last_fired = None;
            return false;
        }
        if self.last_fired == Some(sample.index) {
            return false;
        }
        self.last_fired = Some(sample.index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_and_id() {
        assert_eq!(EventObjectKind::parse("SPLxBLOD").unwrap(), (EventObjectKind::Splat, "BLOD"));
        assert_eq!(EventObjectKind::parse("FPT1HRFT").unwrap(), (EventObjectKind::Splat, "HRFT"));
        assert_eq!(EventObjectKind::parse("UBR0ABC").unwrap(), (EventObjectKind::UberSplat, "ABC"));
        assert_eq!(EventObjectKind::parse("SPN").unwrap(), (EventObjectKind::Spawn, ""));
        assert!(EventObjectKind::parse("SND1ABCD").is_err());
        assert!(EventObjectKind::parse("SP").is_err());
    }
}

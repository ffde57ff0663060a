//! Birth, pause and decay timeline of ubersplat decals.

use glam::Vec4;

use crate::definition::UberSplatRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UberSplatPhase {
    Birth,
    Pause,
    Decay,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UberSplatSample {
    pub phase: UberSplatPhase,
    pub color: Vec4,
    pub scale: f32,
}

/// Birth, pause and decay timeline of a ground decal.
///
/// Color blends start to middle while the decal is born, holds the middle
/// color while paused, and blends middle to end while it decays.
#[derive(Debug, Clone, PartialEq)]
pub struct UberSplatTimeline {
    record: UberSplatRecord,
}

impl UberSplatTimeline {
    #[must_use]
    pub fn new(record: UberSplatRecord) -> Self {
        Self { record }
    }

    #[must_use]
    pub fn lifespan(&self) -> f32 {
        self.record.lifespan()
    }

    /// Samples the decal `elapsed` seconds after it was placed.
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> UberSplatSample {
        let record = &self.record;
        let [start, middle, end] = record.colors;
        let elapsed = elapsed.max(0.0);

        let birth_end = record.birth_time;
        let pause_end = birth_end + record.pause_time;
        let decay_end = pause_end + record.decay;

        let (phase, color) = if elapsed < birth_end {
            (UberSplatPhase::Birth, start.lerp(middle, elapsed / birth_end))
        } else if elapsed < pause_end {
            (UberSplatPhase::Pause, middle)
        } else if elapsed < decay_end {
            let t = (elapsed - pause_end) / record.decay;
            (UberSplatPhase::Decay, middle.lerp(end, t))
        } else {
            (UberSplatPhase::Finished, end)
        };

        UberSplatSample {
            phase,
            color,
            scale: record.scale,
        }
    }
}

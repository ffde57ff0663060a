use std::time::{Duration, Instant};

/// Frame clock shared by every layer and emitter updated in one frame.
///
/// `dt` is derived once per frame from wall-clock time (or supplied manually
/// with [`FrameClock::advance`]) and clamped to `max_frame_time` so a single
/// hitch does not launch particles across the map. `counter` accumulates
/// whole milliseconds and drives global sequences.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_update: Option<Instant>,
    /// Clamped time since last frame
    pub delta: Duration,
    /// Global sequence counter in milliseconds
    pub counter: u32,
    /// Total number of frames
    pub frame_count: u64,
    /// Upper bound on a single frame's delta, in seconds
    pub max_frame_time: f32,
    residual_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(max_frame_time: f32) -> Self {
        Self {
            last_update: None,
            delta: Duration::ZERO,
            counter: 0,
            frame_count: 0,
            max_frame_time: max_frame_time.max(0.0),
            residual_ms: 0.0,
        }
    }

    /// Samples wall-clock time. The first tick yields a zero delta.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = self.last_update.map_or(Duration::ZERO, |last| now - last);
        self.last_update = Some(now);
        self.advance(elapsed.as_secs_f32());
    }

    /// Advances the clock by `seconds` (clamped to `[0, max_frame_time]`).
    pub fn advance(&mut self, seconds: f32) {
        // NaN and negative bounds collapse to zero.
        let max = self.max_frame_time.max(0.0);
        let seconds = if seconds.is_finite() {
            if seconds > max {
                log::debug!("frame delta {seconds:.3}s clamped to {max:.3}s");
            }
            seconds.clamp(0.0, max)
        } else {
            log::warn!("non-finite frame delta {seconds}, treating as zero");
            0.0
        };
        self.delta = Duration::from_secs_f32(seconds);

        let ms = seconds * 1000.0 + self.residual_ms;
        let whole = ms.floor();
        self.residual_ms = ms - whole;
        self.counter = self.counter.wrapping_add(whole as u32);
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

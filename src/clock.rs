use std::time::Instant;

/// Wall-clock origin for shader time.
///
/// The origin is captured once and never reset, so successive samples
/// never go backwards.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    /// Start a clock at the current instant.
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Seconds since the origin, sampled now.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    /// Seconds between the origin and `now`. Instants before the origin read as zero.
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.origin).as_secs_f32()
    }
}

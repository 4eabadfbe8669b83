/// Milliseconds on the scene's virtual timeline.
pub type Millis = u64;

/// Converts page timestamps into a monotonic virtual clock.
///
/// Timers are scheduled on the virtual timeline, so a backgrounded tab that
/// wakes up after a long pause does not replay thousands of missed sparkle
/// ticks: each frame advances the clock by at most `max_step`.
pub struct FrameClock {
    elapsed: f64,
    last_real: Option<f64>,
    max_step: Millis,
}

impl FrameClock {
    pub const DEFAULT_MAX_STEP: Millis = 250;

    pub fn new() -> Self {
        Self::with_max_step(Self::DEFAULT_MAX_STEP)
    }

    pub fn with_max_step(max_step: Millis) -> Self {
        Self {
            elapsed: 0.0,
            last_real: None,
            max_step,
        }
    }

    /// Feed a real timestamp (e.g. `performance.now()`). Returns the new virtual time.
    pub fn tick(&mut self, real_ms: f64) -> Millis {
        if let Some(last) = self.last_real {
            // Going backwards counts as zero elapsed time
            let dt = (real_ms - last).max(0.0);
            self.elapsed += dt.min(self.max_step as f64);
        }
        self.last_real = Some(real_ms.max(self.last_real.unwrap_or(real_ms)));
        self.now()
    }

    pub fn now(&self) -> Millis {
        self.elapsed as Millis
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_starts_at_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12_345.0), 0);
        assert_eq!(clock.tick(12_361.0), 16);
    }

    #[test]
    fn fractional_frames_do_not_drift() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        for i in 1..=60 {
            clock.tick(i as f64 * 16.5);
        }
        assert_eq!(clock.now(), 990);
    }

    #[test]
    fn caps_large_jumps() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(60_000.0), FrameClock::DEFAULT_MAX_STEP);
    }

    #[test]
    fn never_goes_backwards() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        clock.tick(1_100.0);
        assert_eq!(clock.tick(900.0), 100);
        // Resumes measuring from the latest real time seen, not from the stale one
        assert_eq!(clock.tick(1_150.0), 150);
    }
}

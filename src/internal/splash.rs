use std::time::{Duration, Instant};

/// One-shot startup splash. Finished once `duration` has elapsed or it was skipped.
#[derive(Debug, Clone)]
pub struct Splash {
    started: Instant,
    duration: Duration,
    skipped: bool,
}

impl Splash {
    pub fn new(duration: Duration) -> Self {
        Self::starting_at(Instant::now(), duration)
    }

    pub fn starting_at(started: Instant, duration: Duration) -> Self {
        Self {
            started,
            duration,
            skipped: false,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.skipped || now.saturating_duration_since(self.started) >= self.duration
    }

    pub fn skip(&mut self) {
        self.skipped = true;
    }

    /// Fraction of the splash elapsed, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.is_finished(now) || self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finishes_after_duration() {
        let start = Instant::now();
        let splash = Splash::starting_at(start, Duration::from_secs(4));

        assert!(!splash.is_finished(start));
        assert!(!splash.is_finished(start + Duration::from_secs(3)));
        assert!(splash.is_finished(start + Duration::from_secs(4)));
    }

    #[test]
    fn test_zero_duration_is_immediately_done() {
        let start = Instant::now();
        let splash = Splash::starting_at(start, Duration::ZERO);
        assert!(splash.is_finished(start));
        assert_eq!(splash.progress(start), 1.0);
    }

    #[test]
    fn test_skip() {
        let start = Instant::now();
        let mut splash = Splash::starting_at(start, Duration::from_secs(60));
        splash.skip();
        assert!(splash.is_finished(start));
    }

    #[test]
    fn test_progress_halfway() {
        let start = Instant::now();
        let splash = Splash::starting_at(start, Duration::from_secs(4));
        let p = splash.progress(start + Duration::from_secs(2));
        assert!((p - 0.5).abs() < 1e-9);
    }
}

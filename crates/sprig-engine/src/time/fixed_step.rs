use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Fixed-rate step counter.
///
/// Frames are counted from a fixed start instant, so rounding never drifts:
/// after `t` seconds exactly `floor(t * fps)` frames have been reported in
/// total, however irregularly [`advance`](Self::advance) is called.
#[derive(Debug, Clone)]
pub struct FixedStep {
    delta: f32,
    frame_duration: Duration,
    start: Instant,
    last_frame: u64,
}

impl FixedStep {
    /// Steps at `fps` frames per second, starting now.
    pub fn new(fps: u32) -> Result<Self> {
        Self::starting_at(fps, Instant::now())
    }

    pub fn starting_at(fps: u32, start: Instant) -> Result<Self> {
        if fps == 0 {
            return Err(Error::invalid("fixed step rate", fps));
        }
        let frame_duration = Duration::from_secs_f64(1.0 / fps as f64);
        Ok(Self { delta: 1.0 / fps as f32, frame_duration, start, last_frame: 0 })
    }

    /// Starts counting again from `start`.
    pub fn restart(&mut self, start: Instant) {
        self.start = start;
        self.last_frame = 0;
    }

    /// Seconds per step.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Number of whole steps that elapsed since the previous call.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let frame = self.frame_at(now);
        let passed = frame.saturating_sub(self.last_frame);
        self.last_frame = self.last_frame.max(frame);
        u32::try_from(passed).unwrap_or(u32::MAX)
    }

    /// Instant at which the next step becomes due.
    pub fn next_deadline(&self) -> Instant {
        let next = u32::try_from(self.last_frame + 1).unwrap_or(u32::MAX);
        self.start + self.frame_duration * next
    }

    fn frame_at(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.start).as_nanos();
        (elapsed / self.frame_duration.as_nanos().max(1)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert!(FixedStep::new(0).is_err());
    }

    #[test]
    fn counts_whole_frames() {
        let t0 = Instant::now();
        let mut step = FixedStep::starting_at(50, t0).unwrap();
        assert_eq!(step.delta(), 0.02);

        assert_eq!(step.advance(t0 + ms(5)), 0);
        assert_eq!(step.advance(t0 + ms(21)), 1);
        assert_eq!(step.advance(t0 + ms(39)), 0);
        assert_eq!(step.advance(t0 + ms(100)), 4);
    }

    #[test]
    fn irregular_polling_does_not_drift() {
        let t0 = Instant::now();
        let mut step = FixedStep::starting_at(50, t0).unwrap();
        let total: u32 = (1..=100).map(|i| step.advance(t0 + ms(i * 7))).sum();
        // 700 ms at 50 fps
        assert_eq!(total, 35);
    }

    #[test]
    fn deadline_follows_last_frame() {
        let t0 = Instant::now();
        let mut step = FixedStep::starting_at(10, t0).unwrap();
        assert_eq!(step.next_deadline(), t0 + ms(100));
        step.advance(t0 + ms(250));
        assert_eq!(step.next_deadline(), t0 + ms(300));
    }

    #[test]
    fn restart_discards_elapsed_frames() {
        let t0 = Instant::now();
        let mut step = FixedStep::starting_at(10, t0).unwrap();
        step.restart(t0 + ms(1000));
        assert_eq!(step.advance(t0 + ms(1150)), 1);
    }
}

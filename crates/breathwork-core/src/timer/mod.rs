//! Single-phase countdown timer on a monotonic clock.
//!
//! A [`Timer`] measures one phase. It is started once and never restarted:
//! the exercise builds a fresh timer for every phase it advances into.
//!
//! ```rust
//! use std::{sync::Arc, time::Duration};
//!
//! use breathwork_core::timer::{ManualClock, Timer};
//!
//! let clock = ManualClock::new();
//! let mut timer = Timer::with_clock(10.0, 3.0, Arc::new(clock.clone())).unwrap();
//! timer.start().unwrap();
//!
//! clock.advance(Duration::from_secs(8));
//! assert!(timer.in_countdown());
//!
//! clock.advance(Duration::from_secs(2));
//! assert!(timer.is_expired());
//! assert_eq!(timer.remaining(), 0.0);
//! ```

pub mod clock;

use std::{sync::Arc, time::Instant};

pub use clock::{Clock, ManualClock, MonotonicClock};

use crate::error::{BreathworkError, Result};

/// Drift-free countdown for one phase.
///
/// Everything except the start instant is derived on demand from the clock:
///
/// - `elapsed = now - start` (0 before start)
/// - `remaining = max(0, duration - elapsed)`
/// - `expired = running && elapsed >= duration`
/// - `in_countdown = running && threshold > 0 && 0 < remaining <= threshold`
#[derive(Debug, Clone)]
pub struct Timer {
    duration: f64,
    countdown_threshold: f64,
    started_at: Option<Instant>,
    running: bool,
    clock: Arc<dyn Clock>,
}

impl Timer {
    /// Creates a timer on the process monotonic clock.
    ///
    /// # Errors
    ///
    /// Returns [`BreathworkError::InvalidTimer`] if `duration` is not a
    /// positive finite number or `countdown_threshold` is negative.
    pub fn new(duration: f64, countdown_threshold: f64) -> Result<Self> {
        Self::with_clock(duration, countdown_threshold, Arc::new(MonotonicClock))
    }

    /// Creates a timer reading time from `clock`.
    ///
    /// # Errors
    ///
    /// Same as [`Timer::new`].
    pub fn with_clock(
        duration: f64,
        countdown_threshold: f64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(BreathworkError::invalid_timer(format!(
                "Duration must be positive (got {duration})"
            )));
        }
        if !countdown_threshold.is_finite() || countdown_threshold < 0.0 {
            return Err(BreathworkError::invalid_timer(format!(
                "Countdown threshold must be non-negative (got {countdown_threshold})"
            )));
        }

        Ok(Self {
            duration,
            countdown_threshold,
            started_at: None,
            running: false,
            clock,
        })
    }

    /// Captures the start instant.
    ///
    /// # Errors
    ///
    /// Returns [`BreathworkError::TimerAlreadyRunning`] when called twice.
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(BreathworkError::TimerAlreadyRunning);
        }
        self.started_at = Some(self.clock.now());
        self.running = true;
        Ok(())
    }

    /// Configured duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Configured countdown window in seconds (0 disables it).
    pub fn countdown_threshold(&self) -> f64 {
        self.countdown_threshold
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since start, or 0 if never started.
    pub fn elapsed(&self) -> f64 {
        match self.started_at {
            Some(started_at) => self
                .clock
                .now()
                .saturating_duration_since(started_at)
                .as_secs_f64(),
            None => 0.0,
        }
    }

    /// Seconds left, clamped to `[0, duration]`.
    pub fn remaining(&self) -> f64 {
        if !self.running {
            return self.duration;
        }
        (self.duration - self.elapsed()).clamp(0.0, self.duration)
    }

    /// Whether the full duration has passed since start.
    pub fn is_expired(&self) -> bool {
        self.running && self.elapsed() >= self.duration
    }

    /// Whether the remaining time lies in `(0, countdown_threshold]`.
    pub fn in_countdown(&self) -> bool {
        if !self.running || self.countdown_threshold == 0.0 {
            return false;
        }
        let remaining = self.remaining();
        remaining > 0.0 && remaining <= self.countdown_threshold
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn manual_timer(duration: f64, threshold: f64) -> (ManualClock, Timer) {
        let clock = ManualClock::new();
        let timer = Timer::with_clock(duration, threshold, Arc::new(clock.clone())).unwrap();
        (clock, timer)
    }

    #[test]
    fn test_rejects_invalid_construction() {
        assert!(matches!(
            Timer::new(0.0, 3.0),
            Err(BreathworkError::InvalidTimer { .. })
        ));
        assert!(Timer::new(-1.0, 3.0).is_err());
        assert!(Timer::new(f64::NAN, 3.0).is_err());
        assert!(Timer::new(5.0, -0.5).is_err());
        assert!(Timer::new(5.0, 0.0).is_ok());
    }

    #[test]
    fn test_not_started_state() {
        let (clock, timer) = manual_timer(10.0, 3.0);
        clock.advance(Duration::from_secs(20));
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(), 0.0);
        assert_eq!(timer.remaining(), 10.0);
        assert!(!timer.is_expired());
        assert!(!timer.in_countdown());
    }

    #[test]
    fn test_fresh_start_has_full_duration() {
        let (_clock, mut timer) = manual_timer(30.0, 5.0);
        timer.start().unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 30.0);
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_start_twice_fails() {
        let (_clock, mut timer) = manual_timer(30.0, 5.0);
        timer.start().unwrap();
        assert_eq!(timer.start(), Err(BreathworkError::TimerAlreadyRunning));
    }

    #[test]
    fn test_expiry_is_sticky_and_remaining_clamped() {
        let (clock, mut timer) = manual_timer(2.0, 0.0);
        timer.start().unwrap();

        clock.advance(Duration::from_millis(1999));
        assert!(!timer.is_expired());
        assert!(timer.remaining() > 0.0);

        clock.advance(Duration::from_millis(1));
        assert!(timer.is_expired());
        assert_eq!(timer.remaining(), 0.0);

        clock.advance(Duration::from_secs(60));
        assert!(timer.is_expired());
        assert_eq!(timer.remaining(), 0.0);
        assert!(timer.elapsed() >= 62.0);
    }

    #[test]
    fn test_countdown_window_bounds() {
        let (clock, mut timer) = manual_timer(10.0, 3.0);
        timer.start().unwrap();

        clock.advance(Duration::from_millis(6900));
        assert!(!timer.in_countdown(), "3.1s remaining is outside the window");

        clock.advance(Duration::from_millis(100));
        assert!(timer.in_countdown(), "exactly 3s remaining is inside");

        clock.advance(Duration::from_millis(2900));
        assert!(timer.in_countdown(), "0.1s remaining is inside");

        clock.advance(Duration::from_millis(100));
        assert!(!timer.in_countdown(), "0s remaining belongs to expiry");
        assert!(timer.is_expired());
    }

    #[test]
    fn test_zero_threshold_disables_countdown() {
        let (clock, mut timer) = manual_timer(5.0, 0.0);
        timer.start().unwrap();
        for _ in 0..50 {
            assert!(!timer.in_countdown());
            clock.advance(Duration::from_millis(100));
        }
    }

    #[test]
    fn test_expired_timer_cannot_restart() {
        let (clock, mut timer) = manual_timer(5.0, 1.0);
        timer.start().unwrap();
        clock.advance(Duration::from_secs(5));
        assert!(timer.is_expired());

        assert_eq!(timer.start(), Err(BreathworkError::TimerAlreadyRunning));
        assert!(timer.is_expired());
    }

    #[test]
    fn test_elapsed_on_monotonic_clock() {
        let mut timer = Timer::new(100.0, 0.0).unwrap();
        timer.start().unwrap();
        let first = timer.elapsed();
        let second = timer.elapsed();
        assert!(second >= first);
        assert!(timer.remaining() <= 100.0);
    }
}

//! Display implementations for phases, timers and exercises.
//!
//! These are compact, log-friendly one-liners; the countdown screen itself
//! is laid out by [`super::frame`].

use std::fmt;

use crate::{exercise::Exercise, models::Phase, timer::Timer};

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s) - {}", self.kind(), self.duration(), self.state())
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_running() {
            write!(f, "Timer({}s, not started)", self.duration())
        } else if self.is_expired() {
            write!(f, "Timer({}s, expired)", self.duration())
        } else {
            write!(
                f,
                "Timer({}s, {:.1}s remaining)",
                self.duration(),
                self.remaining()
            )
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_started() {
            write!(f, "Exercise(not started)")
        } else if self.is_complete() {
            write!(f, "Exercise(completed)")
        } else {
            let position = self.current_index().map_or(0, |index| index + 1);
            write!(f, "Exercise(phase {}/{})", position, self.phases().len())
        }
    }
}

//! The render/event loop that drives an exercise in real time.
//!
//! A [`Session`] owns an [`Exercise`] and polls its timer every tick. It
//! redraws only when the whole-second remaining value changes, plays cues
//! through an [`AudioSink`], advances on expiry and checks its
//! [`CancelToken`] at every suspension point.
//!
//! ```text
//! ┌──────────────┐  frames   ┌──────────────┐
//! │              │──────────▶│ DisplaySink  │
//! │   Session    │           └──────────────┘
//! │  (tick loop) │   cues    ┌──────────────┐
//! │              │──────────▶│  AudioSink   │
//! └──────┬───────┘           └──────────────┘
//!        │ start / advance / enter_countdown
//!        ▼
//! ┌──────────────┐
//! │   Exercise   │
//! └──────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Session`] with clock, timing and cancellation
//! - [`cancel`]: Shared cancellation flag
//! - [`sink`]: Display and audio boundaries
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use breathwork_core::{
//!     config::ExerciseConfig,
//!     display::Frame,
//!     models::{Phase, PhaseColor},
//!     session::{DisplaySink, SessionBuilder, SessionOutcome, Silent},
//!     timer::ManualClock,
//! };
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl DisplaySink for Counter {
//!     fn show_countdown(&mut self, _frame: &Frame<'_>) {
//!         self.0 += 1;
//!     }
//!     fn show_instruction(&mut self, _text: &str, _color: PhaseColor) {}
//!     fn show_transition(&mut self, _from: Option<&Phase>, _to: &Phase) {}
//! }
//!
//! let config = ExerciseConfig::builder()
//!     .hold_duration(2)
//!     .step_durations([1])
//!     .build()
//!     .unwrap();
//! let mut session = SessionBuilder::new(config)
//!     .with_clock(Arc::new(ManualClock::new()))
//!     .build();
//!
//! let mut display = Counter::default();
//! let outcome = session.run(&mut display, &Silent).unwrap();
//!
//! assert_eq!(outcome, SessionOutcome::Completed);
//! assert!(display.0 > 0);
//! ```

pub mod builder;
pub mod cancel;
pub mod sink;


use std::{collections::BTreeSet, sync::Arc, time::Duration};

use log::{debug, info, trace, warn};
use sink::LiveDisplay;

pub use builder::SessionBuilder;
pub use cancel::CancelToken;
pub use sink::{AudioSink, CueKind, DisplaySink, Silent};

use crate::{
    config::{DisplayMode, TimingSettings},
    display::{Frame, INTERRUPTION_MESSAGE},
    error::{BreathworkError, Result},
    exercise::Exercise,
    models::PhaseColor,
    timer::{Clock, Timer},
};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every phase ran to the end
    Completed,
    /// The cancellation token fired first
    Interrupted,
}

impl SessionOutcome {
    /// Whether the exercise ran to the end.
    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Completed)
    }
}

/// Per-phase bookkeeping of what the loop already drew and played.
#[derive(Debug, Default)]
struct Tracking {
    last_remaining: Option<u64>,
    cued: BTreeSet<u64>,
}

impl Tracking {
    fn reset(&mut self) {
        self.last_remaining = None;
        self.cued.clear();
    }
}

/// A single run of an exercise against a display and an audio sink.
#[derive(Debug)]
pub struct Session {
    exercise: Exercise,
    clock: Arc<dyn Clock>,
    timing: TimingSettings,
    cancel: CancelToken,
}

impl Session {
    /// Runs the exercise to completion or cancellation.
    ///
    /// The display's `stop_live` hook runs on every exit path, errors
    /// included. After an interruption the display additionally receives
    /// [`INTERRUPTION_MESSAGE`].
    ///
    /// # Errors
    ///
    /// Only state-contract violations surface here, e.g. running a session
    /// a second time (`BreathworkError::AlreadyCompleted`).
    pub fn run<D, A>(&mut self, display: &mut D, audio: &A) -> Result<SessionOutcome>
    where
        D: DisplaySink + ?Sized,
        A: AudioSink + ?Sized,
    {
        let result = {
            let mut live = LiveDisplay::start(display);
            self.drive(&mut *live, audio)
        };

        match result {
            Ok(()) => {
                info!("Session completed");
                Ok(SessionOutcome::Completed)
            }
            Err(BreathworkError::Interrupted) => {
                info!("Session interrupted at {}", self.exercise);
                display.show_instruction(INTERRUPTION_MESSAGE, PhaseColor::Yellow);
                Ok(SessionOutcome::Interrupted)
            }
            Err(err) => {
                warn!("Session aborted: {err}");
                Err(err)
            }
        }
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn timing(&self) -> &TimingSettings {
        &self.timing
    }

    /// A clone of the token this session observes.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn drive<D, A>(&mut self, display: &mut D, audio: &A) -> Result<()>
    where
        D: DisplaySink + ?Sized,
        A: AudioSink + ?Sized,
    {
        self.check_cancelled()?;
        self.exercise.start()?;
        let mut tracking = Tracking::default();

        while !self.exercise.is_complete() {
            self.check_cancelled()?;

            let countdown_due = match (self.exercise.current_phase(), self.exercise.timer()) {
                (Some(phase), Some(timer)) => timer.in_countdown() && phase.is_in_progress(),
                _ => break,
            };
            if countdown_due {
                self.exercise.enter_countdown()?;
                debug!("Countdown started for {:?}", self.exercise.current_index());
            }

            let Some(timer) = self.exercise.timer() else {
                break;
            };
            let remaining = whole_seconds(timer.remaining());
            let expired = timer.is_expired();

            if tracking.last_remaining != Some(remaining) {
                self.redraw(display, remaining);
                self.play_cues(audio, remaining, &mut tracking.cued);
                tracking.last_remaining = Some(remaining);
            }

            if expired {
                if !self.exercise.advance_phase()? {
                    break;
                }
                tracking.reset();

                if let Some(index) = self.exercise.current_index() {
                    let phases = self.exercise.phases();
                    let from = index.checked_sub(1).and_then(|prev| phases.get(prev));
                    if let Some(to) = phases.get(index) {
                        display.show_transition(from, to);
                    }
                }
                if self.exercise.config().display_mode() == DisplayMode::Plain {
                    self.pause(self.timing.transition_pause)?;
                }
            }

            self.pause(self.timing.tick_interval)?;
        }

        self.finish(display)
    }

    /// Shows the terminal frame if the loop left without reaching it.
    fn finish<D>(&mut self, display: &mut D) -> Result<()>
    where
        D: DisplaySink + ?Sized,
    {
        if self.exercise.is_complete() {
            return Ok(());
        }

        if self.exercise.timer().is_some_and(Timer::is_expired) {
            self.exercise.advance_phase()?;
        }
        if self.exercise.current_phase().is_some() {
            self.redraw(display, 0);
            self.pause(self.timing.final_hold)?;
        }
        Ok(())
    }

    fn redraw<D>(&self, display: &mut D, remaining: u64)
    where
        D: DisplaySink + ?Sized,
    {
        let (Some(index), Some(phase)) =
            (self.exercise.current_index(), self.exercise.current_phase())
        else {
            return;
        };

        trace!("Redraw phase {index} at {remaining}s");
        display.show_countdown(&Frame {
            remaining_secs: remaining,
            phase,
            index,
            phases: self.exercise.phases(),
        });
    }

    fn play_cues<A>(&self, audio: &A, remaining: u64, cued: &mut BTreeSet<u64>)
    where
        A: AudioSink + ?Sized,
    {
        let config = self.exercise.config();
        if !config.audio_enabled() {
            return;
        }

        let threshold = u64::from(config.countdown_beep_threshold());
        if (1..=threshold).contains(&remaining) && cued.insert(remaining) {
            trace!("Countdown cue at {remaining}s");
            audio.cue(CueKind::Countdown);
        }

        let is_marker = self
            .exercise
            .current_phase()
            .is_some_and(|phase| phase.is_completion_marker());
        if remaining == 0 && !is_marker && cued.insert(0) {
            trace!("Transition cue");
            audio.cue(CueKind::Transition);
        }
    }

    /// Sleeps in tick-sized slices, checking for cancellation between them.
    fn pause(&self, duration: Duration) -> Result<()> {
        let mut left = duration;
        loop {
            self.check_cancelled()?;
            if left.is_zero() {
                return Ok(());
            }
            let slice = left.min(self.timing.tick_interval);
            self.clock.sleep(slice);
            left -= slice;
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(BreathworkError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Whole seconds left, rounded down.
fn whole_seconds(remaining: f64) -> u64 {
    if remaining.is_finite() && remaining > 0.0 {
        remaining.floor() as u64
    } else {
        0
    }
}

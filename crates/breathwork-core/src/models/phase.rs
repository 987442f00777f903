//! Phase model definition and its lifecycle transitions.

use log::debug;

use super::{PhaseColor, PhaseKind, PhaseState};
use crate::error::{BreathworkError, Result};

/// Label of the optional preparation phase.
pub const PREPARATION_LABEL: &str = "Prepare";

/// Label of every hold phase.
pub const HOLD_LABEL: &str = "Hold";

/// Label of the synthetic phase that marks the end of an exercise.
pub const COMPLETE_LABEL: &str = "Complete";

/// A single named step of an exercise.
///
/// The lifecycle state is private: it only changes through [`Phase::start`],
/// [`Phase::enter_countdown`] and [`Phase::complete`], each of which rejects
/// out-of-order calls without touching the state. A phase knows nothing about
/// time; the session decides when each transition happens.
///
/// Equality compares kind, duration, label and color. The lifecycle state is
/// deliberately left out so freshly generated phases compare equal to ones
/// that already ran.
#[derive(Debug, Clone)]
pub struct Phase {
    kind: PhaseKind,
    duration: u32,
    label: String,
    color: PhaseColor,
    state: PhaseState,
}

impl Phase {
    /// Creates a phase in the [`PhaseState::NotStarted`] state.
    pub fn new(kind: PhaseKind, duration: u32, label: impl Into<String>, color: PhaseColor) -> Self {
        Self {
            kind,
            duration,
            label: label.into(),
            color,
            state: PhaseState::NotStarted,
        }
    }

    /// Preparation phase shown before the first breathing step.
    pub fn preparation(duration: u32) -> Self {
        Self::new(PhaseKind::Breathing, duration, PREPARATION_LABEL, PhaseColor::Blue)
    }

    /// Breathing step labeled with its own duration, e.g. `Breathe 30s`.
    pub fn breathing(duration: u32) -> Self {
        Self::new(
            PhaseKind::Breathing,
            duration,
            format!("Breathe {duration}s"),
            PhaseColor::Cyan,
        )
    }

    /// Breath-hold step.
    pub fn hold(duration: u32) -> Self {
        Self::new(PhaseKind::Hold, duration, HOLD_LABEL, PhaseColor::Yellow)
    }

    /// One-second terminal marker appended to every exercise.
    pub fn completion() -> Self {
        Self::new(PhaseKind::Breathing, 1, COMPLETE_LABEL, PhaseColor::Blue)
    }

    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    /// Duration in whole seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> PhaseColor {
        self.color
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    /// Whether this is the synthetic end-of-exercise marker.
    pub fn is_completion_marker(&self) -> bool {
        self.label == COMPLETE_LABEL
    }

    /// Moves the phase from `NotStarted` to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`BreathworkError::InvalidTransition`] from any other state.
    pub fn start(&mut self) -> Result<()> {
        self.transition("start", &[PhaseState::NotStarted], PhaseState::InProgress)
    }

    /// Moves the phase from `InProgress` to `Countdown`.
    ///
    /// # Errors
    ///
    /// Returns [`BreathworkError::InvalidTransition`] from any other state.
    pub fn enter_countdown(&mut self) -> Result<()> {
        self.transition(
            "enter countdown for",
            &[PhaseState::InProgress],
            PhaseState::Countdown,
        )
    }

    /// Moves the phase from `InProgress` or `Countdown` to `Completed`.
    ///
    /// # Errors
    ///
    /// Returns [`BreathworkError::InvalidTransition`] from any other state.
    pub fn complete(&mut self) -> Result<()> {
        self.transition(
            "complete",
            &[PhaseState::InProgress, PhaseState::Countdown],
            PhaseState::Completed,
        )
    }

    pub fn is_not_started(&self) -> bool {
        self.state == PhaseState::NotStarted
    }

    pub fn is_in_progress(&self) -> bool {
        self.state == PhaseState::InProgress
    }

    pub fn is_in_countdown(&self) -> bool {
        self.state == PhaseState::Countdown
    }

    pub fn is_completed(&self) -> bool {
        self.state == PhaseState::Completed
    }

    fn transition(
        &mut self,
        action: &'static str,
        allowed: &[PhaseState],
        next: PhaseState,
    ) -> Result<()> {
        if !allowed.contains(&self.state) {
            return Err(BreathworkError::InvalidTransition {
                action,
                state: self.state,
            });
        }
        debug!("Phase '{}': {} -> {}", self.label, self.state, next);
        self.state = next;
        Ok(())
    }
}

impl PartialEq for Phase {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.duration == other.duration
            && self.label == other.label
            && self.color == other.color
    }
}

impl Eq for Phase {}

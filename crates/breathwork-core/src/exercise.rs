//! Phase sequence construction and the current-phase cursor.
//!
//! An [`Exercise`] turns an [`ExerciseConfig`] into a fixed list of phases:
//!
//! ```text
//! [Prepare]  Breathe d1  Hold  Breathe d2  Hold  ...  Breathe dn  Hold  Complete
//! ```
//!
//! It then walks that list one phase at a time, owning the single live
//! [`Timer`] of the current phase. Advancing is only allowed once that timer
//! has expired, so a driver can never run ahead of real time.

use std::sync::Arc;

use log::{debug, info};

use crate::{
    config::ExerciseConfig,
    error::{BreathworkError, Result},
    models::Phase,
    timer::{Clock, MonotonicClock, Timer},
};

/// Builds the ordered phase list for `config`.
///
/// The result is fully determined by the configuration:
///
/// 1. `Prepare` when `preparation_duration > 0`
/// 2. for each step `d`: `Breathe {d}s` then `Hold`
/// 3. a one-second `Complete` marker
pub fn generate_phases(config: &ExerciseConfig) -> Vec<Phase> {
    let mut phases = Vec::with_capacity(config.step_durations().len() * 2 + 2);

    if config.preparation_duration() > 0 {
        phases.push(Phase::preparation(config.preparation_duration()));
    }

    for &duration in config.step_durations() {
        phases.push(Phase::breathing(duration));
        phases.push(Phase::hold(config.hold_duration()));
    }

    phases.push(Phase::completion());
    phases
}

/// A complete breath-hold exercise and its progress.
#[derive(Debug)]
pub struct Exercise {
    config: ExerciseConfig,
    phases: Vec<Phase>,
    current_index: Option<usize>,
    timer: Option<Timer>,
    started: bool,
    completed: bool,
    clock: Arc<dyn Clock>,
}

impl Exercise {
    /// Creates an exercise timed by the process monotonic clock.
    pub fn new(config: ExerciseConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock))
    }

    /// Creates an exercise whose phase timers read from `clock`.
    pub fn with_clock(config: ExerciseConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            phases: Vec::new(),
            current_index: None,
            timer: None,
            started: false,
            completed: false,
            clock,
        }
    }

    /// Generates the phases and starts the first one with a fresh timer.
    ///
    /// # Errors
    ///
    /// Returns `BreathworkError::AlreadyStarted` while a run is active and
    /// `BreathworkError::AlreadyCompleted` after a finished run that was not
    /// reset.
    pub fn start(&mut self) -> Result<()> {
        if self.completed {
            return Err(BreathworkError::AlreadyCompleted);
        }
        if self.started {
            return Err(BreathworkError::AlreadyStarted);
        }

        self.phases = generate_phases(&self.config);
        self.started = true;
        self.completed = false;
        self.activate(0)?;

        info!("Exercise started with {} phases", self.phases.len());
        Ok(())
    }

    /// Completes the current phase and moves to the next one.
    ///
    /// Returns `Ok(true)` when a new phase became current and `Ok(false)`
    /// when the exercise is (or already was) finished.
    ///
    /// # Errors
    ///
    /// Returns `BreathworkError::NotStarted` before [`Exercise::start`] and
    /// `BreathworkError::PhaseNotComplete` while the current timer has not
    /// expired. Neither moves the cursor.
    pub fn advance_phase(&mut self) -> Result<bool> {
        if !self.started {
            return Err(BreathworkError::NotStarted);
        }
        if self.completed {
            return Ok(false);
        }
        if self.timer.as_ref().is_some_and(|timer| !timer.is_expired()) {
            return Err(BreathworkError::PhaseNotComplete);
        }

        if let Some(phase) = self.current_index.and_then(|index| self.phases.get_mut(index)) {
            phase.complete()?;
        }

        let next = self.current_index.map_or(0, |index| index + 1);
        if next < self.phases.len() {
            self.activate(next)?;
            Ok(true)
        } else {
            self.completed = true;
            self.current_index = None;
            self.timer = None;
            info!("Exercise completed");
            Ok(false)
        }
    }

    /// Moves the current phase into its countdown state.
    ///
    /// # Errors
    ///
    /// Propagates the phase transition error when the current phase is not
    /// `InProgress`, and reports `NotStarted`/`AlreadyCompleted` when there
    /// is no current phase.
    pub fn enter_countdown(&mut self) -> Result<()> {
        match self.current_index.and_then(|index| self.phases.get_mut(index)) {
            Some(phase) => phase.enter_countdown(),
            None if self.completed => Err(BreathworkError::AlreadyCompleted),
            None => Err(BreathworkError::NotStarted),
        }
    }

    /// The phase currently running, if any.
    pub fn current_phase(&self) -> Option<&Phase> {
        self.current_index.and_then(|index| self.phases.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Timer of the current phase, if any.
    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    /// All phases, empty until the exercise is started.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Discards all progress so the exercise can be started again.
    ///
    /// The current timer is dropped; the next [`Exercise::start`] builds a
    /// new one.
    pub fn reset(&mut self) {
        self.phases.clear();
        self.current_index = None;
        self.timer = None;
        self.started = false;
        self.completed = false;
        debug!("Exercise reset");
    }

    fn activate(&mut self, index: usize) -> Result<()> {
        let total = self.phases.len();
        let Some(phase) = self.phases.get_mut(index) else {
            return Err(BreathworkError::NotStarted);
        };
        phase.start()?;

        let mut timer = Timer::with_clock(
            f64::from(phase.duration()),
            f64::from(self.config.countdown_beep_threshold()),
            Arc::clone(&self.clock),
        )?;
        timer.start()?;

        debug!(
            "Phase {}/{} '{}' started ({}s)",
            index + 1,
            total,
            phase.label(),
            phase.duration()
        );
        self.current_index = Some(index);
        self.timer = Some(timer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        models::{PhaseKind, PhaseState},
        timer::ManualClock,
    };

    fn config(hold: i64, steps: &[i64], countdown: i64, prep: i64) -> ExerciseConfig {
        ExerciseConfig::builder()
            .hold_duration(hold)
            .step_durations(steps.to_vec())
            .countdown_beep_threshold(countdown)
            .preparation_duration(prep)
            .build()
            .unwrap()
    }

    fn manual_exercise(config: ExerciseConfig) -> (ManualClock, Exercise) {
        let clock = ManualClock::new();
        let exercise = Exercise::with_clock(config, Arc::new(clock.clone()));
        (clock, exercise)
    }

    fn summary(phases: &[Phase]) -> Vec<(PhaseKind, u32, String)> {
        phases
            .iter()
            .map(|p| (p.kind(), p.duration(), p.label().to_string()))
            .collect()
    }

    #[test]
    fn test_generate_default_sequence() {
        let phases = generate_phases(&config(60, &[30, 20, 10], 5, 0));
        let expected = vec![
            (PhaseKind::Breathing, 30, "Breathe 30s".to_string()),
            (PhaseKind::Hold, 60, "Hold".to_string()),
            (PhaseKind::Breathing, 20, "Breathe 20s".to_string()),
            (PhaseKind::Hold, 60, "Hold".to_string()),
            (PhaseKind::Breathing, 10, "Breathe 10s".to_string()),
            (PhaseKind::Hold, 60, "Hold".to_string()),
            (PhaseKind::Breathing, 1, "Complete".to_string()),
        ];
        assert_eq!(summary(&phases), expected);
    }

    #[test]
    fn test_generate_with_preparation() {
        let phases = generate_phases(&config(45, &[15], 0, 10));
        assert_eq!(phases.len(), 4);
        assert_eq!(phases[0], Phase::preparation(10));
        assert_eq!(phases[1], Phase::breathing(15));
        assert_eq!(phases[2], Phase::hold(45));
        assert_eq!(phases[3], Phase::completion());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let cfg = config(90, &[40, 30, 20, 10], 3, 5);
        assert_eq!(generate_phases(&cfg), generate_phases(&cfg));
        assert_eq!(
            summary(&generate_phases(&cfg)),
            summary(&generate_phases(&cfg.clone()))
        );
    }

    #[test]
    fn test_start_activates_first_phase() {
        let (_clock, mut exercise) = manual_exercise(config(60, &[30], 5, 0));
        assert!(exercise.phases().is_empty());
        assert!(exercise.current_phase().is_none());

        exercise.start().unwrap();
        assert!(exercise.is_started());
        assert_eq!(exercise.current_index(), Some(0));
        assert!(exercise.current_phase().unwrap().is_in_progress());

        let timer = exercise.timer().unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.duration(), 30.0);
        assert_eq!(timer.countdown_threshold(), 5.0);
    }

    #[test]
    fn test_start_twice_fails() {
        let (_clock, mut exercise) = manual_exercise(ExerciseConfig::default());
        exercise.start().unwrap();
        assert_eq!(exercise.start(), Err(BreathworkError::AlreadyStarted));
    }

    #[test]
    fn test_advance_before_start_fails() {
        let (_clock, mut exercise) = manual_exercise(ExerciseConfig::default());
        assert_eq!(exercise.advance_phase(), Err(BreathworkError::NotStarted));
    }

    #[test]
    fn test_advance_before_expiry_fails_without_moving() {
        let (clock, mut exercise) = manual_exercise(config(60, &[30], 5, 0));
        exercise.start().unwrap();
        clock.advance(Duration::from_secs(29));

        assert_eq!(
            exercise.advance_phase(),
            Err(BreathworkError::PhaseNotComplete)
        );
        assert_eq!(exercise.current_index(), Some(0));
        assert!(exercise.current_phase().unwrap().is_in_progress());
    }

    #[test]
    fn test_advance_after_expiry_moves_one_and_replaces_timer() {
        let (clock, mut exercise) = manual_exercise(config(60, &[30], 5, 0));
        exercise.start().unwrap();
        clock.advance(Duration::from_secs(30));

        assert_eq!(exercise.advance_phase(), Ok(true));
        assert_eq!(exercise.current_index(), Some(1));
        assert!(exercise.phases()[0].is_completed());
        assert!(exercise.phases()[1].is_in_progress());
        assert!(exercise.phases()[2].is_not_started());

        let timer = exercise.timer().unwrap();
        assert_eq!(timer.duration(), 60.0);
        assert_eq!(timer.remaining(), 60.0);
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_advance_from_countdown_state() {
        let (clock, mut exercise) = manual_exercise(config(60, &[30], 5, 0));
        exercise.start().unwrap();
        clock.advance(Duration::from_secs(27));
        assert!(exercise.timer().unwrap().in_countdown());
        exercise.enter_countdown().unwrap();
        assert_eq!(
            exercise.current_phase().unwrap().state(),
            PhaseState::Countdown
        );

        clock.advance(Duration::from_secs(3));
        assert_eq!(exercise.advance_phase(), Ok(true));
        assert!(exercise.phases()[0].is_completed());
    }

    #[test]
    fn test_run_to_completion() {
        let (clock, mut exercise) = manual_exercise(config(2, &[3, 1], 0, 0));
        exercise.start().unwrap();

        let mut advances = 0;
        loop {
            let remaining = exercise.timer().unwrap().remaining();
            clock.advance(Duration::from_secs_f64(remaining));
            if !exercise.advance_phase().unwrap() {
                break;
            }
            advances += 1;

            let index = exercise.current_index().unwrap();
            for (i, phase) in exercise.phases().iter().enumerate() {
                match i.cmp(&index) {
                    std::cmp::Ordering::Less => assert!(phase.is_completed()),
                    std::cmp::Ordering::Equal => assert!(phase.state().is_active()),
                    std::cmp::Ordering::Greater => assert!(phase.is_not_started()),
                }
            }
        }

        assert_eq!(advances, 4);
        assert!(exercise.is_complete());
        assert_eq!(exercise.current_index(), None);
        assert!(exercise.current_phase().is_none());
        assert!(exercise.timer().is_none());
        assert!(exercise.phases().iter().all(Phase::is_completed));

        assert_eq!(exercise.advance_phase(), Ok(false));
        assert_eq!(exercise.start(), Err(BreathworkError::AlreadyCompleted));
    }

    #[test]
    fn test_reset_allows_restart() {
        let (clock, mut exercise) = manual_exercise(config(1, &[1], 0, 0));
        exercise.start().unwrap();
        for _ in 0..3 {
            clock.advance(Duration::from_secs(1));
            exercise.advance_phase().unwrap();
        }
        assert!(exercise.is_complete());

        exercise.reset();
        assert!(!exercise.is_started());
        assert!(!exercise.is_complete());
        assert!(exercise.phases().is_empty());

        clock.advance(Duration::from_secs(5));
        exercise.start().unwrap();
        assert_eq!(exercise.current_index(), Some(0));
        assert!(exercise.phases().iter().skip(1).all(Phase::is_not_started));

        // A fresh timer, not the expired one from the first run
        let timer = exercise.timer().unwrap();
        assert_eq!(timer.remaining(), 1.0);
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_enter_countdown_without_current_phase() {
        let (_clock, mut exercise) = manual_exercise(ExerciseConfig::default());
        assert_eq!(exercise.enter_countdown(), Err(BreathworkError::NotStarted));
    }
}

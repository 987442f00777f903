//! Builder for creating and configuring Session instances.

use std::{sync::Arc, time::Duration};

use super::{CancelToken, Session};
use crate::{
    config::{ExerciseConfig, TimingSettings},
    exercise::Exercise,
    timer::{Clock, MonotonicClock},
};

/// Shortest tick the loop accepts; a zero tick would never yield.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Builder for creating and configuring Session instances.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    config: ExerciseConfig,
    clock: Option<Arc<dyn Clock>>,
    timing: TimingSettings,
    cancel: Option<CancelToken>,
}

impl SessionBuilder {
    /// Creates a new builder for a validated configuration.
    pub fn new(config: ExerciseConfig) -> Self {
        Self {
            config,
            clock: None,
            timing: TimingSettings::default(),
            cancel: None,
        }
    }

    /// Sets the time source shared by the loop and every phase timer.
    ///
    /// Defaults to [`MonotonicClock`]. Tests pass a
    /// [`ManualClock`](crate::timer::ManualClock) so a full session runs
    /// instantly.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides tick interval and pauses.
    pub fn with_timing(mut self, timing: TimingSettings) -> Self {
        self.timing = timing;
        self
    }

    /// Uses an existing cancellation token, typically one a signal handler
    /// already holds a clone of.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the configured session.
    pub fn build(self) -> Session {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock));
        let mut timing = self.timing;
        timing.tick_interval = timing.tick_interval.max(MIN_TICK);

        Session {
            exercise: Exercise::with_clock(self.config, Arc::clone(&clock)),
            clock,
            timing,
            cancel: self.cancel.unwrap_or_default(),
        }
    }
}

//! Core library for the breathwork breath-hold trainer.
//!
//! An exercise alternates breathing phases with breath holds of a fixed
//! length, optionally preceded by a preparation phase and always followed by
//! a one-second `Complete` marker. This crate models that sequence and drives
//! it in real time; it never touches a terminal directly.
//!
//! # Architecture
//!
//! - **Configuration** ([`config`]): validated exercise parameters plus
//!   display and timing constants
//! - **Domain Models** ([`models`]): [`Phase`] and its forward-only
//!   lifecycle
//! - **Timing** ([`timer`]): countdown timers over an injectable [`Clock`]
//! - **Exercise** ([`exercise`]): phase generation and the phase cursor
//! - **Session** ([`session`]): the tick loop, redraw gating, audio cues
//!   and cancellation
//! - **Display** ([`display`]): terminal-independent frame layout the CLI
//!   renders
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use breathwork_core::{
//!     session::Silent, ExerciseConfig, ManualClock, SessionBuilder, SessionOutcome,
//! };
//! # use breathwork_core::{display::Frame, models::{Phase, PhaseColor}, session::DisplaySink};
//! # struct NoDisplay;
//! # impl DisplaySink for NoDisplay {
//! #     fn show_countdown(&mut self, _frame: &Frame<'_>) {}
//! #     fn show_instruction(&mut self, _text: &str, _color: PhaseColor) {}
//! #     fn show_transition(&mut self, _from: Option<&Phase>, _to: &Phase) {}
//! # }
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let steps = breathwork_core::config::parse_step_durations("3,2,1")?;
//! let config = ExerciseConfig::builder()
//!     .hold_duration(5)
//!     .step_durations(steps)
//!     .build()?;
//!
//! // A simulated clock runs the whole exercise without waiting.
//! let mut session = SessionBuilder::new(config)
//!     .with_clock(Arc::new(ManualClock::new()))
//!     .build();
//!
//! let outcome = session.run(&mut NoDisplay, &Silent)?;
//! assert_eq!(outcome, SessionOutcome::Completed);
//! assert_eq!(session.exercise().phases().len(), 7);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod exercise;
pub mod models;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use config::{DisplayMode, DisplaySettings, ExerciseConfig, TimingSettings};
pub use error::{BreathworkError, Result};
pub use exercise::{generate_phases, Exercise};
pub use models::{Phase, PhaseColor, PhaseKind, PhaseState};
pub use session::{
    AudioSink, CancelToken, CueKind, DisplaySink, Session, SessionBuilder, SessionOutcome,
};
pub use timer::{Clock, ManualClock, MonotonicClock, Timer};

//! Data models for exercise phases.
//!
//! A [`Phase`] is one named step of an exercise (breathing or hold) with a
//! fixed duration, a label, a semantic color tag and a small forward-only
//! lifecycle. Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use breathwork_core::models::{Phase, PhaseKind, PhaseState};
//!
//! let mut phase = Phase::breathing(30);
//! assert_eq!(phase.kind(), PhaseKind::Breathing);
//! assert_eq!(phase.label(), "Breathe 30s");
//!
//! phase.start().unwrap();
//! phase.enter_countdown().unwrap();
//! phase.complete().unwrap();
//! assert_eq!(phase.state(), PhaseState::Completed);
//!
//! // Completed phases cannot be restarted
//! assert!(phase.start().is_err());
//! ```

pub mod phase;
pub mod status;


pub use phase::{Phase, COMPLETE_LABEL, HOLD_LABEL, PREPARATION_LABEL};
pub use status::{PhaseColor, PhaseKind, PhaseState};

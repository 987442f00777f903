//! Terminal-independent presentation of an exercise.
//!
//! This module decides *what* the screen shows; the CLI renderer decides
//! *how* it reaches the terminal.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Session loop   │    │  frame layout   │    │    Renderer     │
//! │  (Frame: phase, │───▶│ (Lines / Spans, │───▶│ (crossterm via  │
//! │   remaining)    │    │  plain line)    │    │   termimad)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`ascii`]: five-row glyphs for the `MM:SS` clock
//! - [`frame`]: boxed clock, progress sidebar, message box, plain countdown line
//! - [`models`]: `Display` implementations for domain types
//!
//! ## Usage
//!
//! ```rust
//! use breathwork_core::{
//!     config::DisplaySettings,
//!     display::{rich_frame, Frame},
//!     models::Phase,
//! };
//!
//! let phases = vec![Phase::breathing(30), Phase::hold(60), Phase::completion()];
//! let frame = Frame { remaining_secs: 42, phase: &phases[1], index: 1, phases: &phases };
//!
//! let lines = rich_frame(&frame, &DisplaySettings::default());
//! assert!(lines[0].text().contains(" HOLD "));
//! ```

pub mod ascii;
pub mod frame;
pub mod models;

pub use ascii::ascii_time;
pub use frame::{
    clock_box, message_box, plain_line, rich_frame, sidebar, transition_message, Frame, Line,
    Progress, SidebarEntry, Span, SpanStyle,
};

/// Shown once an exercise ran through all of its phases.
pub const COMPLETION_MESSAGE: &str = "Exercise Complete! Great job!";

/// Title of the rich completion box.
pub const COMPLETION_TITLE: &str = "Congratulations";

/// Shown after the user cancels a running exercise.
pub const INTERRUPTION_MESSAGE: &str = "Exercise interrupted by user";

/// Prefix of error lines.
pub const ERROR_PREFIX: &str = "Error:";

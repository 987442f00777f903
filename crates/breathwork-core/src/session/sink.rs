//! Output boundaries of a session: where frames are drawn and cues played.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use crate::{
    display::Frame,
    models::{Phase, PhaseColor},
};

/// Kind of audible cue requested by the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    /// One tick per second inside the countdown window
    Countdown,
    /// Phase boundary reached
    Transition,
}

impl CueKind {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CueKind::Countdown => "countdown",
            CueKind::Transition => "transition",
        }
    }
}

impl fmt::Display for CueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a session draws its state.
///
/// Methods are infallible: a display that fails to write recovers or logs
/// on its own side, and timing never waits on it.
pub trait DisplaySink {
    /// Claims the screen for a live session (clear, hide cursor, ...).
    fn start_live(&mut self) {}

    /// Releases the screen. Always called once after `start_live`, also on
    /// error and cancellation.
    fn stop_live(&mut self) {}

    /// Draws the countdown for the current phase.
    fn show_countdown(&mut self, frame: &Frame<'_>);

    /// Draws a standalone message.
    fn show_instruction(&mut self, text: &str, color: PhaseColor);

    /// Announces a phase change. Displays that redraw in place may ignore it.
    fn show_transition(&mut self, from: Option<&Phase>, to: &Phase);
}

/// Where a session sends audible cues.
///
/// Implementations must never block the caller for long nor fail past this
/// boundary; the simplest fallback is the terminal bell.
pub trait AudioSink {
    fn cue(&self, kind: CueKind);
}

/// An audio sink that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn cue(&self, _kind: CueKind) {}
}

/// Scope guard around a live display session.
///
/// Calls `start_live` on creation and `stop_live` on drop, so the screen is
/// released on every exit path of the loop.
pub(crate) struct LiveDisplay<'a, D: DisplaySink + ?Sized> {
    sink: &'a mut D,
}

impl<'a, D: DisplaySink + ?Sized> LiveDisplay<'a, D> {
    pub(crate) fn start(sink: &'a mut D) -> Self {
        sink.start_live();
        Self { sink }
    }
}

impl<D: DisplaySink + ?Sized> Deref for LiveDisplay<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.sink
    }
}

impl<D: DisplaySink + ?Sized> DerefMut for LiveDisplay<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.sink
    }
}

impl<D: DisplaySink + ?Sized> Drop for LiveDisplay<'_, D> {
    fn drop(&mut self) {
        self.sink.stop_live();
    }
}

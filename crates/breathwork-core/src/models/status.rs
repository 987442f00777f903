//! Kind, state and color enumerations for exercise phases.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of phase kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Free breathing
    Breathing,

    /// Breath hold
    Hold,
}

impl FromStr for PhaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breathing" => Ok(PhaseKind::Breathing),
            "hold" => Ok(PhaseKind::Hold),
            _ => Err(format!("Invalid phase kind: {s}")),
        }
    }
}

impl PhaseKind {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Breathing => "breathing",
            PhaseKind::Hold => "hold",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle states of a phase.
///
/// States only ever move forward:
///
/// ```text
/// NotStarted ──▶ InProgress ──▶ Countdown ──▶ Completed
///                     │                           ▲
///                     └───────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    /// Phase is waiting its turn
    #[default]
    NotStarted,

    /// Phase is running
    InProgress,

    /// Phase is running and inside its countdown window
    Countdown,

    /// Phase has finished
    Completed,
}

impl FromStr for PhaseState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" | "notstarted" => Ok(PhaseState::NotStarted),
            "in_progress" | "inprogress" => Ok(PhaseState::InProgress),
            "countdown" => Ok(PhaseState::Countdown),
            "completed" => Ok(PhaseState::Completed),
            _ => Err(format!("Invalid phase state: {s}")),
        }
    }
}

impl PhaseState {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseState::NotStarted => "not_started",
            PhaseState::InProgress => "in_progress",
            PhaseState::Countdown => "countdown",
            PhaseState::Completed => "completed",
        }
    }

    /// Whether the phase is currently running (in progress or counting down).
    pub fn is_active(&self) -> bool {
        matches!(self, PhaseState::InProgress | PhaseState::Countdown)
    }
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic color tag attached to phases and messages.
///
/// The terminal renderer decides how each tag is drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhaseColor {
    #[default]
    Cyan,
    Yellow,
    Green,
    Red,
    White,
    Blue,
}

impl FromStr for PhaseColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cyan" => Ok(PhaseColor::Cyan),
            "yellow" => Ok(PhaseColor::Yellow),
            "green" => Ok(PhaseColor::Green),
            "red" => Ok(PhaseColor::Red),
            "white" => Ok(PhaseColor::White),
            "blue" => Ok(PhaseColor::Blue),
            _ => Err(format!("Invalid color: {s}")),
        }
    }
}

impl PhaseColor {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseColor::Cyan => "cyan",
            PhaseColor::Yellow => "yellow",
            PhaseColor::Green => "green",
            PhaseColor::Red => "red",
            PhaseColor::White => "white",
            PhaseColor::Blue => "blue",
        }
    }
}

impl fmt::Display for PhaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Exercise configuration and presentation settings.
//!
//! [`ExerciseConfig`] is the validated, immutable input of an exercise. It can
//! only be obtained through [`ExerciseConfigBuilder::build`] (or
//! [`Default`]), so every value in circulation already satisfies the bounds
//! below:
//!
//! | Field                      | Bound                   |
//! |----------------------------|-------------------------|
//! | `hold_duration`            | 1..=300 seconds         |
//! | `step_durations`           | non-empty, each 1..=120 |
//! | `countdown_beep_threshold` | >= 0 seconds            |
//! | `preparation_duration`     | >= 0 seconds            |
//!
//! [`DisplaySettings`] and [`TimingSettings`] carry the layout and pacing
//! constants. They are plain values handed to the renderer and the session,
//! never process-wide state.
//!
//! ```rust
//! use breathwork_core::config::{parse_step_durations, DisplayMode, ExerciseConfig};
//!
//! let config = ExerciseConfig::builder()
//!     .hold_duration(90)
//!     .step_durations(parse_step_durations("40, 30,20").unwrap())
//!     .display_mode(DisplayMode::Plain)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.step_durations(), &[40, 30, 20]);
//!
//! let err = ExerciseConfig::builder().hold_duration(301).build().unwrap_err();
//! assert!(err.to_string().contains("300 seconds"));
//! ```

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{BreathworkError, Result};

/// Shortest allowed hold, in seconds.
pub const MIN_HOLD_DURATION: i64 = 1;
/// Longest allowed hold, in seconds.
pub const MAX_HOLD_DURATION: i64 = 300;
/// Shortest allowed breathing step, in seconds.
pub const MIN_STEP_DURATION: i64 = 1;
/// Longest allowed breathing step, in seconds.
pub const MAX_STEP_DURATION: i64 = 120;

pub const DEFAULT_HOLD_DURATION: u32 = 60;
pub const DEFAULT_STEP_DURATIONS: &str = "30,20,10";
pub const DEFAULT_COUNTDOWN_THRESHOLD: u32 = 5;

const STEPS_EXAMPLE: &str = "(e.g., '30,20,10')";

/// How the exercise is drawn in the terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Boxed ASCII-art clock with a progress sidebar
    #[default]
    #[serde(rename = "tui")]
    Rich,

    /// A single self-updating text line
    #[serde(rename = "plain")]
    Plain,
}

impl DisplayMode {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Rich => "tui",
            DisplayMode::Plain => "plain",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tui" | "rich" => Ok(DisplayMode::Rich),
            "plain" => Ok(DisplayMode::Plain),
            _ => Err(format!("Invalid display mode: {s}")),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated configuration of a breath-hold exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseConfig {
    hold_duration: u32,
    step_durations: Vec<u32>,
    countdown_beep_threshold: u32,
    preparation_duration: u32,
    audio_enabled: bool,
    display_mode: DisplayMode,
}

impl ExerciseConfig {
    /// Starts a builder pre-filled with the defaults.
    pub fn builder() -> ExerciseConfigBuilder {
        ExerciseConfigBuilder::new()
    }

    /// Duration of every hold phase, in seconds.
    pub fn hold_duration(&self) -> u32 {
        self.hold_duration
    }

    /// Breathing step durations in exercise order, in seconds.
    pub fn step_durations(&self) -> &[u32] {
        &self.step_durations
    }

    /// Seconds before a phase ends at which countdown cues start (0 disables).
    pub fn countdown_beep_threshold(&self) -> u32 {
        self.countdown_beep_threshold
    }

    /// Duration of the preparation phase, 0 when there is none.
    pub fn preparation_duration(&self) -> u32 {
        self.preparation_duration
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            hold_duration: DEFAULT_HOLD_DURATION,
            step_durations: vec![30, 20, 10],
            countdown_beep_threshold: DEFAULT_COUNTDOWN_THRESHOLD,
            preparation_duration: 0,
            audio_enabled: true,
            display_mode: DisplayMode::Rich,
        }
    }
}

/// Builder for [`ExerciseConfig`].
///
/// Values are accepted as signed integers so out-of-range input (including
/// negatives typed on the command line) reaches validation and produces a
/// message naming the field and the violated bound.
#[derive(Debug, Clone)]
pub struct ExerciseConfigBuilder {
    hold_duration: i64,
    step_durations: Vec<i64>,
    countdown_beep_threshold: i64,
    preparation_duration: i64,
    audio_enabled: bool,
    display_mode: DisplayMode,
}

impl ExerciseConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            hold_duration: i64::from(DEFAULT_HOLD_DURATION),
            step_durations: vec![30, 20, 10],
            countdown_beep_threshold: i64::from(DEFAULT_COUNTDOWN_THRESHOLD),
            preparation_duration: 0,
            audio_enabled: true,
            display_mode: DisplayMode::Rich,
        }
    }

    pub fn hold_duration(mut self, seconds: i64) -> Self {
        self.hold_duration = seconds;
        self
    }

    pub fn step_durations(mut self, seconds: impl IntoIterator<Item = i64>) -> Self {
        self.step_durations = seconds.into_iter().collect();
        self
    }

    pub fn countdown_beep_threshold(mut self, seconds: i64) -> Self {
        self.countdown_beep_threshold = seconds;
        self
    }

    pub fn preparation_duration(mut self, seconds: i64) -> Self {
        self.preparation_duration = seconds;
        self
    }

    pub fn audio_enabled(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }

    pub fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Validates every field and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BreathworkError::InvalidInput` for the first field that
    /// violates its bound, checked in the order hold, steps, countdown,
    /// preparation.
    pub fn build(self) -> Result<ExerciseConfig> {
        let hold = self.hold_duration;
        if hold < MIN_HOLD_DURATION {
            return Err(BreathworkError::invalid_input("hold_duration")
                .with_reason(format!("Hold duration must be positive (got {hold})")));
        }
        if hold > MAX_HOLD_DURATION {
            return Err(BreathworkError::invalid_input("hold_duration").with_reason(format!(
                "Hold duration cannot exceed {MAX_HOLD_DURATION} seconds (got {hold})"
            )));
        }

        if self.step_durations.is_empty() {
            return Err(BreathworkError::invalid_input("step_durations").with_reason(
                "Step durations cannot be empty. Provide at least one breathing step duration.",
            ));
        }

        let mut step_durations = Vec::with_capacity(self.step_durations.len());
        for (i, &duration) in self.step_durations.iter().enumerate() {
            let position = i + 1;
            if duration < MIN_STEP_DURATION {
                return Err(BreathworkError::invalid_input("step_durations").with_reason(format!(
                    "All step durations must be positive. Step {position} has invalid duration: {duration}"
                )));
            }
            if duration > MAX_STEP_DURATION {
                return Err(BreathworkError::invalid_input("step_durations").with_reason(format!(
                    "Step durations cannot exceed {MAX_STEP_DURATION} seconds. Step {position} has duration: {duration}"
                )));
            }
            step_durations.push(to_seconds("step_durations", duration)?);
        }

        let countdown = self.countdown_beep_threshold;
        if countdown < 0 {
            return Err(BreathworkError::invalid_input("countdown_beep_threshold").with_reason(
                format!("Countdown beep threshold must be non-negative (got {countdown})"),
            ));
        }

        let preparation = self.preparation_duration;
        if preparation < 0 {
            return Err(BreathworkError::invalid_input("preparation_duration").with_reason(
                format!("Preparation duration must be non-negative (got {preparation})"),
            ));
        }

        Ok(ExerciseConfig {
            hold_duration: to_seconds("hold_duration", hold)?,
            step_durations,
            countdown_beep_threshold: to_seconds("countdown_beep_threshold", countdown)?,
            preparation_duration: to_seconds("preparation_duration", preparation)?,
            audio_enabled: self.audio_enabled,
            display_mode: self.display_mode,
        })
    }
}

impl Default for ExerciseConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn to_seconds(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        BreathworkError::invalid_input(field)
            .with_reason(format!("Value {value} is out of range for a duration in seconds"))
    })
}

/// Parses a comma-separated list of step durations such as `"30, 20,10"`.
///
/// Only the syntax is checked here; bounds are enforced by
/// [`ExerciseConfigBuilder::build`].
///
/// # Errors
///
/// Returns `BreathworkError::InvalidInput` for blank input, an empty item or
/// an item that is not an integer.
pub fn parse_step_durations(steps: &str) -> Result<Vec<i64>> {
    if steps.trim().is_empty() {
        return Err(BreathworkError::invalid_input("step_durations").with_reason(format!(
            "Step durations cannot be empty. Provide at least one breathing step duration {STEPS_EXAMPLE}"
        )));
    }

    steps
        .split(',')
        .enumerate()
        .map(|(i, part)| {
            let part = part.trim();
            if part.is_empty() {
                return Err(BreathworkError::invalid_input("step_durations").with_reason(format!(
                    "Invalid steps format '{steps}'. Empty value at position {}. Must be comma-separated positive integers {STEPS_EXAMPLE}",
                    i + 1
                )));
            }
            part.parse::<i64>().map_err(|_| {
                BreathworkError::invalid_input("step_durations").with_reason(format!(
                    "Invalid steps format '{steps}'. Must be comma-separated positive integers {STEPS_EXAMPLE}"
                ))
            })
        })
        .collect()
}

/// Side of the clock box on which the progress sidebar is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarPosition {
    Left,
    #[default]
    Right,
}

/// Layout constants for the rich display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Outer width of the clock box, borders included
    pub box_width: usize,
    /// Blank rows above the clock digits
    pub padding_top: usize,
    /// Blank rows below the clock digits
    pub padding_bottom: usize,
    pub sidebar_enabled: bool,
    pub sidebar_width: usize,
    pub sidebar_position: SidebarPosition,
    /// Spaces between the box and the sidebar
    pub sidebar_padding: usize,
    pub progress_completed: &'static str,
    pub progress_current: &'static str,
    pub progress_pending: &'static str,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            box_width: 40,
            padding_top: 3,
            padding_bottom: 3,
            sidebar_enabled: true,
            sidebar_width: 25,
            sidebar_position: SidebarPosition::Right,
            sidebar_padding: 2,
            progress_completed: "✓",
            progress_current: "▶",
            progress_pending: " ",
        }
    }
}

/// Pacing constants for the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    /// Sleep between two polls of the timer
    pub tick_interval: Duration,
    /// Pause after a transition notice in plain mode
    pub transition_pause: Duration,
    /// How long the terminal frame stays up when forced after the loop
    pub final_hold: Duration,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            transition_pause: Duration::from_secs(1),
            final_hold: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(result: Result<ExerciseConfig>) -> String {
        result.unwrap_err().reason()
    }

    #[test]
    fn test_default_config_is_valid() {
        let built = ExerciseConfig::builder().build().unwrap();
        assert_eq!(built, ExerciseConfig::default());
        assert_eq!(built.hold_duration(), 60);
        assert_eq!(built.step_durations(), &[30, 20, 10]);
        assert_eq!(built.countdown_beep_threshold(), 5);
        assert_eq!(built.preparation_duration(), 0);
        assert!(built.audio_enabled());
        assert_eq!(built.display_mode(), DisplayMode::Rich);
    }

    #[test]
    fn test_hold_bounds() {
        assert_eq!(
            reason_of(ExerciseConfig::builder().hold_duration(0).build()),
            "Hold duration must be positive (got 0)"
        );
        assert_eq!(
            reason_of(ExerciseConfig::builder().hold_duration(301).build()),
            "Hold duration cannot exceed 300 seconds (got 301)"
        );
        assert!(ExerciseConfig::builder().hold_duration(1).build().is_ok());
        assert!(ExerciseConfig::builder().hold_duration(300).build().is_ok());
    }

    #[test]
    fn test_hold_error_names_field() {
        let err = ExerciseConfig::builder().hold_duration(-5).build().unwrap_err();
        assert_eq!(err.field(), Some("hold_duration"));
        assert!(err.to_string().contains("hold_duration"));
    }

    #[test]
    fn test_empty_steps_rejected() {
        let reason = reason_of(
            ExerciseConfig::builder()
                .step_durations(Vec::new())
                .build(),
        );
        assert!(reason.to_lowercase().contains("step durations cannot be empty"));
    }

    #[test]
    fn test_step_bounds_report_position() {
        assert_eq!(
            reason_of(ExerciseConfig::builder().step_durations([30, 0, 10]).build()),
            "All step durations must be positive. Step 2 has invalid duration: 0"
        );
        assert_eq!(
            reason_of(ExerciseConfig::builder().step_durations([121]).build()),
            "Step durations cannot exceed 120 seconds. Step 1 has duration: 121"
        );
        assert!(ExerciseConfig::builder().step_durations([1, 120]).build().is_ok());
    }

    #[test]
    fn test_countdown_and_preparation_must_be_non_negative() {
        let err = ExerciseConfig::builder()
            .countdown_beep_threshold(-1)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("countdown_beep_threshold"));

        let err = ExerciseConfig::builder()
            .preparation_duration(-3)
            .build()
            .unwrap_err();
        assert_eq!(
            err.reason(),
            "Preparation duration must be non-negative (got -3)"
        );

        let config = ExerciseConfig::builder()
            .countdown_beep_threshold(0)
            .preparation_duration(15)
            .build()
            .unwrap();
        assert_eq!(config.countdown_beep_threshold(), 0);
        assert_eq!(config.preparation_duration(), 15);
    }

    #[test]
    fn test_huge_preparation_is_out_of_range() {
        let err = ExerciseConfig::builder()
            .preparation_duration(i64::from(u32::MAX) + 1)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("preparation_duration"));
    }

    #[test]
    fn test_parse_step_durations() {
        assert_eq!(parse_step_durations("30,20,10").unwrap(), vec![30, 20, 10]);
        assert_eq!(parse_step_durations(" 5 , 6 ").unwrap(), vec![5, 6]);
        assert_eq!(parse_step_durations("-4").unwrap(), vec![-4]);
    }

    #[test]
    fn test_parse_step_durations_errors() {
        let err = parse_step_durations("   ").unwrap_err();
        assert!(err.reason().starts_with("Step durations cannot be empty"));

        let err = parse_step_durations("30,,10").unwrap_err();
        assert!(err.reason().contains("Empty value at position 2"));

        let err = parse_step_durations("30,abc").unwrap_err();
        assert_eq!(
            err.reason(),
            "Invalid steps format '30,abc'. Must be comma-separated positive integers (e.g., '30,20,10')"
        );
    }

    #[test]
    fn test_display_mode_literals() {
        assert_eq!(DisplayMode::Rich.as_str(), "tui");
        assert_eq!(DisplayMode::Plain.to_string(), "plain");
        assert_eq!(serde_json::to_string(&DisplayMode::Rich).unwrap(), "\"tui\"");
        assert_eq!("plain".parse::<DisplayMode>().unwrap(), DisplayMode::Plain);
        assert!("fancy".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_settings_defaults() {
        let display = DisplaySettings::default();
        assert_eq!(display.box_width, 40);
        assert_eq!(display.sidebar_position, SidebarPosition::Right);

        let timing = TimingSettings::default();
        assert_eq!(timing.tick_interval, Duration::from_millis(100));
        assert_eq!(timing.transition_pause, Duration::from_secs(1));
    }
}

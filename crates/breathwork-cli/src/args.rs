use breathwork_core::{
    config::{
        parse_step_durations, DEFAULT_COUNTDOWN_THRESHOLD, DEFAULT_HOLD_DURATION,
        DEFAULT_STEP_DURATIONS,
    },
    DisplayMode, ExerciseConfig, Result,
};
use clap::{ArgAction, Parser, ValueEnum};

/// Guided breath-hold trainer
///
/// Runs a sequence of breathing phases, each followed by a breath hold of
/// the same length, and finishes with a short completion marker. A large
/// countdown clock and a progress sidebar are shown by default; `--plain`
/// switches to a single updating line.
#[derive(Parser, Debug)]
#[command(version, about, name = "breathwork")]
pub struct Args {
    /// Breath-hold duration in seconds (1-300)
    #[arg(
        short = 'H',
        long = "hold",
        default_value_t = i64::from(DEFAULT_HOLD_DURATION),
        allow_negative_numbers = true
    )]
    pub hold: i64,

    /// Comma-separated breathing step durations in seconds (1-120 each)
    #[arg(short, long, default_value = DEFAULT_STEP_DURATIONS, allow_hyphen_values = true)]
    pub steps: String,

    /// Seconds before the end of a phase at which countdown beeps start (0 disables)
    #[arg(
        short,
        long,
        default_value_t = i64::from(DEFAULT_COUNTDOWN_THRESHOLD),
        allow_negative_numbers = true
    )]
    pub countdown: i64,

    /// Preparation phase in seconds before the first breathing step (0 skips it)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub preparation: i64,

    /// Full-screen clock with progress sidebar (default)
    #[arg(long, conflicts_with = "plain", action = ArgAction::SetTrue)]
    pub tui: bool,

    /// Single-line countdown for simple terminals and logs
    #[arg(long, action = ArgAction::SetTrue)]
    pub plain: bool,

    /// Audio cues
    #[arg(short, long, value_enum, default_value_t = AudioMode::Beep)]
    pub audio: AudioMode,
}

/// Audio cue mode selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioMode {
    /// System sounds, falling back to the terminal bell
    Beep,
    /// No audio at all
    Off,
}

impl Args {
    pub fn display_mode(&self) -> DisplayMode {
        match (self.tui, self.plain) {
            (false, true) => DisplayMode::Plain,
            _ => DisplayMode::Rich,
        }
    }

    /// Validates the arguments into an exercise configuration.
    ///
    /// # Errors
    ///
    /// Returns `BreathworkError::InvalidInput` for a malformed step list or
    /// any value outside its bounds.
    pub fn exercise_config(&self) -> Result<ExerciseConfig> {
        let steps = parse_step_durations(&self.steps)?;

        ExerciseConfig::builder()
            .hold_duration(self.hold)
            .step_durations(steps)
            .countdown_beep_threshold(self.countdown)
            .preparation_duration(self.preparation)
            .audio_enabled(self.audio == AudioMode::Beep)
            .display_mode(self.display_mode())
            .build()
    }
}

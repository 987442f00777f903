use std::sync::{Arc, Mutex};

use breathwork_core::{
    display::{rich_frame, Frame},
    session::{AudioSink, CueKind, DisplaySink},
    DisplaySettings, ExerciseConfig, ManualClock, Phase, PhaseColor, SessionBuilder,
    SessionOutcome,
};

/// A display that renders every frame through the rich layout and keeps the
/// top border plus the frame position.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<(usize, u64, String)>,
    pub instructions: Vec<String>,
    pub transitions: Vec<String>,
    pub live_sessions: usize,
    pub stopped: usize,
    settings: DisplaySettings,
}

impl DisplaySink for RecordingDisplay {
    fn start_live(&mut self) {
        self.live_sessions += 1;
    }

    fn stop_live(&mut self) {
        self.stopped += 1;
    }

    fn show_countdown(&mut self, frame: &Frame<'_>) {
        let lines = rich_frame(frame, &self.settings);
        let top = lines.first().map(|line| line.text()).unwrap_or_default();
        self.frames.push((frame.index, frame.remaining_secs, top));
    }

    fn show_instruction(&mut self, text: &str, _color: PhaseColor) {
        self.instructions.push(text.to_string());
    }

    fn show_transition(&mut self, _from: Option<&Phase>, to: &Phase) {
        self.transitions.push(to.label().to_string());
    }
}

/// Thread-safe cue recorder.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub cues: Arc<Mutex<Vec<CueKind>>>,
}

impl RecordingAudio {
    pub fn count(&self, kind: CueKind) -> usize {
        self.cues
            .lock()
            .expect("cue log poisoned")
            .iter()
            .filter(|cue| **cue == kind)
            .count()
    }
}

impl AudioSink for RecordingAudio {
    fn cue(&self, kind: CueKind) {
        self.cues.lock().expect("cue log poisoned").push(kind);
    }
}

/// Runs a whole exercise on a simulated clock.
pub fn run_simulated(
    config: ExerciseConfig,
) -> (SessionOutcome, RecordingDisplay, RecordingAudio, ManualClock) {
    let clock = ManualClock::new();
    let mut session = SessionBuilder::new(config)
        .with_clock(Arc::new(clock.clone()))
        .build();
    let mut display = RecordingDisplay::default();
    let audio = RecordingAudio::default();

    let outcome = session
        .run(&mut display, &audio)
        .expect("session should not fail");
    (outcome, display, audio, clock)
}

mod common;

use std::{sync::Arc, thread, time::Duration};

use breathwork_core::{
    display::INTERRUPTION_MESSAGE, session::CueKind, ExerciseConfig, MonotonicClock,
    SessionBuilder, SessionOutcome,
};
use common::{run_simulated, RecordingAudio, RecordingDisplay};

#[test]
fn test_default_exercise_end_to_end() {
    let (outcome, display, _, clock) = run_simulated(ExerciseConfig::default());

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(display.live_sessions, 1);
    assert_eq!(display.stopped, 1);
    assert!(display.instructions.is_empty());

    // 30 + 60 + 20 + 60 + 10 + 60 + 1 simulated seconds
    assert_eq!(clock.elapsed(), Duration::from_secs(241));

    // The first frame shows the full breathing phase in a labelled box.
    let (index, remaining, top) = &display.frames[0];
    assert_eq!((*index, *remaining), (0, 30));
    assert!(top.contains(" BREATHE 30S "));

    assert_eq!(
        display.transitions,
        vec!["Hold", "Breathe 20s", "Hold", "Breathe 10s", "Hold", "Complete"]
    );
}

#[test]
fn test_default_exercise_cues() {
    let (_, _, audio, _) = run_simulated(ExerciseConfig::default());

    // 5..=1 for each of the six timed phases, none for the marker
    assert_eq!(audio.count(CueKind::Countdown), 30);
    assert_eq!(audio.count(CueKind::Transition), 6);
}

#[test]
fn test_every_phase_is_drawn_down_to_zero() {
    let config = ExerciseConfig::builder()
        .hold_duration(4)
        .step_durations([3, 2])
        .preparation_duration(2)
        .build()
        .unwrap();
    let (outcome, display, _, _) = run_simulated(config);

    assert_eq!(outcome, SessionOutcome::Completed);
    for index in 0..6 {
        let last = display
            .frames
            .iter()
            .filter(|(frame_index, _, _)| *frame_index == index)
            .map(|(_, remaining, _)| *remaining)
            .last();
        assert_eq!(last, Some(0), "phase {index} never reached zero");
    }
    assert!(display.frames[0].2.contains(" PREPARE "));
}

#[test]
fn test_cancel_from_another_thread() {
    let config = ExerciseConfig::builder()
        .hold_duration(300)
        .step_durations([120])
        .audio_enabled(false)
        .build()
        .unwrap();
    let mut session = SessionBuilder::new(config)
        .with_clock(Arc::new(MonotonicClock))
        .build();
    let token = session.cancel_token();

    let runner = thread::spawn(move || {
        let mut display = RecordingDisplay::default();
        let outcome = session.run(&mut display, &RecordingAudio::default());
        (outcome, display)
    });

    thread::sleep(Duration::from_millis(250));
    token.cancel();

    let (outcome, display) = runner.join().expect("session thread panicked");
    assert_eq!(outcome.unwrap(), SessionOutcome::Interrupted);
    assert_eq!(display.stopped, 1);
    assert_eq!(display.instructions, vec![INTERRUPTION_MESSAGE.to_string()]);
    assert!(display.frames.iter().all(|(index, _, _)| *index == 0));
}

#[test]
fn test_real_clock_floors_first_frame() {
    let config = ExerciseConfig::builder()
        .hold_duration(1)
        .step_durations([1])
        .audio_enabled(false)
        .build()
        .unwrap();

    // A frozen clock still sees the full second on the first poll.
    let (_, simulated, _, _) = run_simulated(config.clone());
    assert_eq!((simulated.frames[0].0, simulated.frames[0].1), (0, 1));

    // The monotonic clock has moved on by then, so every one-second phase
    // is only ever drawn at zero.
    let mut session = SessionBuilder::new(config)
        .with_clock(Arc::new(MonotonicClock))
        .build();
    let mut display = RecordingDisplay::default();
    let outcome = session
        .run(&mut display, &RecordingAudio::default())
        .expect("session should not fail");

    assert_eq!(outcome, SessionOutcome::Completed);
    let frames: Vec<(usize, u64)> = display
        .frames
        .iter()
        .map(|(index, remaining, _)| (*index, *remaining))
        .collect();
    assert_eq!(frames, vec![(0, 0), (1, 0), (2, 0)]);
}

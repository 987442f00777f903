//! System sound cues
//!
//! Each cue spawns the platform's sound player and returns immediately; the
//! child is reaped on a detached thread. Without a known player, or when
//! spawning fails, the terminal bell is rung instead.

use std::{
    io::{self, Write},
    process::{Child, Command, Stdio},
    sync::Mutex,
    thread,
};

use breathwork_core::session::{AudioSink, CueKind};
use log::{debug, warn};

/// A sound file and the program that plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sound {
    pub program: &'static str,
    pub path: &'static str,
}

/// Sound for `kind` on the current platform, if there is one.
pub fn platform_sound(kind: CueKind) -> Option<Sound> {
    let path = if cfg!(target_os = "macos") {
        match kind {
            CueKind::Countdown => "/System/Library/Sounds/Ping.aiff",
            CueKind::Transition => "/System/Library/Sounds/Glass.aiff",
        }
    } else if cfg!(target_os = "linux") {
        match kind {
            CueKind::Countdown => "/usr/share/sounds/freedesktop/stereo/message.oga",
            CueKind::Transition => "/usr/share/sounds/freedesktop/stereo/complete.oga",
        }
    } else {
        return None;
    };

    let program = if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "paplay"
    };
    Some(Sound { program, path })
}

/// Audio sink backed by system sound players and the terminal bell
pub struct SystemAudio<W: Write = io::Stdout> {
    bell: Mutex<W>,
    sounds: fn(CueKind) -> Option<Sound>,
}

impl SystemAudio<io::Stdout> {
    pub fn new() -> Self {
        Self::with_bell(io::stdout(), platform_sound)
    }
}

impl Default for SystemAudio<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> SystemAudio<W> {
    /// Create a sink with a custom bell writer and sound table
    pub fn with_bell(bell: W, sounds: fn(CueKind) -> Option<Sound>) -> Self {
        Self {
            bell: Mutex::new(bell),
            sounds,
        }
    }

    #[cfg(test)]
    fn into_bell(self) -> W {
        self.bell
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn ring(&self) {
        let Ok(mut out) = self.bell.lock() else {
            warn!("Bell writer poisoned");
            return;
        };
        if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            warn!("Failed to ring terminal bell: {e}");
        }
    }
}

impl<W: Write> AudioSink for SystemAudio<W> {
    fn cue(&self, kind: CueKind) {
        let Some(sound) = (self.sounds)(kind) else {
            self.ring();
            return;
        };

        match spawn(sound) {
            Ok(child) => reap(child),
            Err(e) => {
                debug!("{} unavailable for {kind} cue: {e}", sound.program);
                self.ring();
            }
        }
    }
}

fn spawn(sound: Sound) -> io::Result<Child> {
    Command::new(sound.program)
        .arg(sound.path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

fn reap(mut child: Child) {
    thread::spawn(move || {
        if let Err(e) = child.wait() {
            warn!("Failed to reap sound player: {e}");
        }
    });
}

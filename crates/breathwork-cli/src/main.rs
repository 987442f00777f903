//! Breathwork CLI Application
//!
//! Command-line breath-hold trainer. Parses and validates arguments, runs the
//! exercise loop on a blocking thread and turns Ctrl-C into a cooperative
//! cancellation of that loop.

mod args;
mod audio;
mod renderer;

use std::{
    io::{self, BufRead, IsTerminal},
    process::ExitCode,
    thread,
};

use anyhow::{Context, Result};
use args::Args;
use audio::SystemAudio;
use breathwork_core::{
    display::ERROR_PREFIX, CancelToken, ExerciseConfig, SessionBuilder, SessionOutcome,
};
use clap::{error::ErrorKind, Parser};
use log::{debug, info};
use renderer::TerminalRenderer;
use tokio::{signal, sync::oneshot, task};

const EXIT_FAILURE: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;
const EXIT_PROMPT: &str = "Press Enter to exit...";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{ERROR_PREFIX} {}", clap_message(&e));
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let config = match args.exercise_config() {
        Ok(config) => config,
        Err(e) => {
            debug!("Rejected configuration: {e}");
            eprintln!("{ERROR_PREFIX} {}", e.reason());
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match run(config).await {
        Ok(SessionOutcome::Completed) => ExitCode::SUCCESS,
        Ok(SessionOutcome::Interrupted) => ExitCode::from(EXIT_INTERRUPTED),
        Err(e) => {
            eprintln!("Unexpected error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(config: ExerciseConfig) -> Result<SessionOutcome> {
    let token = CancelToken::new();
    let watcher = tokio::spawn(cancel_on_ctrl_c(token.clone()));

    let mode = config.display_mode();
    let mut session = SessionBuilder::new(config).with_cancel_token(token).build();

    info!("Breathwork started");

    let (outcome, mut renderer) = task::spawn_blocking(move || {
        let mut renderer = TerminalRenderer::stdout(mode);
        let outcome = session.run(&mut renderer, &SystemAudio::new());
        (outcome, renderer)
    })
    .await
    .context("Exercise thread failed")?;
    watcher.abort();

    let outcome = outcome.context("Exercise aborted")?;
    if outcome.is_success() {
        renderer.show_completion();
        if io::stdin().is_terminal() {
            renderer.show_prompt(EXIT_PROMPT);
            wait_for_enter().await;
        }
    }
    Ok(outcome)
}

async fn cancel_on_ctrl_c(token: CancelToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Interrupt received");
            token.cancel();
        }
        Err(e) => debug!("Ctrl-C handler unavailable: {e}"),
    }
}

/// Returns on Enter, end of input or Ctrl-C.
async fn wait_for_enter() {
    let (tx, rx) = oneshot::channel();
    // Detached: an unanswered prompt must not hold up runtime shutdown.
    thread::spawn(move || {
        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            debug!("Failed to read from stdin: {e}");
        }
        let _ = tx.send(());
    });

    tokio::select! {
        _ = rx => {}
        _ = signal::ctrl_c() => {}
    }
}

/// First line of a clap error, without clap's own `error: ` prefix.
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

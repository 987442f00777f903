//! Terminal display for a running exercise
//!
//! Rich mode paints the boxed clock and sidebar in place using crossterm
//! (re-exported by termimad); plain mode writes one carriage-return line.
//! Write failures are logged and never interrupt the exercise.

use std::io::{self, Write};

use breathwork_core::{
    display::{
        message_box, plain_line, rich_frame, transition_message, Frame, Line, SpanStyle,
        COMPLETION_MESSAGE, COMPLETION_TITLE,
    },
    session::DisplaySink,
    DisplayMode, DisplaySettings, Phase, PhaseColor,
};
use log::warn;
use termimad::{
    crossterm::{
        cursor::{Hide, MoveTo, Show},
        queue,
        style::{Color, PrintStyledContent, Stylize},
        terminal::{Clear, ClearType},
    },
    MadSkin,
};

/// Maps a phase color tag onto a terminal color.
fn term_color(color: PhaseColor) -> Color {
    match color {
        PhaseColor::Cyan => Color::Cyan,
        PhaseColor::Yellow => Color::Yellow,
        PhaseColor::Green => Color::Green,
        PhaseColor::Red => Color::Red,
        PhaseColor::White => Color::White,
        PhaseColor::Blue => Color::Blue,
    }
}

/// Terminal renderer that switches between the rich and plain layouts
pub struct TerminalRenderer<W: Write> {
    out: W,
    mode: DisplayMode,
    settings: DisplaySettings,
    skin: MadSkin,
    last_frame: Option<Vec<Line>>,
}

impl TerminalRenderer<io::Stdout> {
    /// Create a renderer on standard output
    pub fn stdout(mode: DisplayMode) -> Self {
        Self::new(io::stdout(), mode, DisplaySettings::default())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, mode: DisplayMode, settings: DisplaySettings) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::White);
        skin.italic.set_fg(Color::Magenta);

        Self {
            out,
            mode,
            settings,
            skin,
            last_frame: None,
        }
    }

    /// Show the end-of-exercise message
    pub fn show_completion(&mut self) {
        let result = match self.mode {
            DisplayMode::Rich => {
                let lines = message_box(COMPLETION_TITLE, COMPLETION_MESSAGE, PhaseColor::Green);
                writeln!(self.out).and_then(|()| self.write_lines(&lines))
            }
            DisplayMode::Plain => writeln!(self.out, "\n{COMPLETION_MESSAGE}"),
        };
        report(result.and_then(|()| self.out.flush()));
    }

    /// Show a short prompt without a trailing newline
    pub fn show_prompt(&mut self, text: &str) {
        let result = match self.mode {
            DisplayMode::Rich => write!(self.out, "{}", self.skin.inline(&format!("*{text}*"))),
            DisplayMode::Plain => write!(self.out, "{text}"),
        };
        report(result.and_then(|()| self.out.flush()));
    }

    /// Consume the renderer, returning the underlying writer
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[Line]) -> io::Result<()> {
        for line in lines {
            for span in &line.spans {
                queue!(self.out, PrintStyledContent(styled(&span.text, span.style)))?;
            }
            queue!(self.out, Clear(ClearType::UntilNewLine))?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn report(result: io::Result<()>) {
    if let Err(e) = result {
        warn!("Terminal write failed: {e}");
    }
}

fn styled(text: &str, style: SpanStyle) -> termimad::crossterm::style::StyledContent<&str> {
    let mut content = text.stylize();
    if let Some(color) = style.color {
        content = content.with(term_color(color));
    }
    if style.bold {
        content = content.bold();
    }
    if style.dim {
        content = content.dim();
    }
    content
}

impl<W: Write> DisplaySink for TerminalRenderer<W> {
    fn start_live(&mut self) {
        self.last_frame = None;
        if self.mode == DisplayMode::Rich {
            let result = queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Hide)
                .and_then(|()| self.out.flush());
            report(result);
        }
    }

    fn stop_live(&mut self) {
        let result = match self.mode {
            DisplayMode::Rich => queue!(self.out, Show),
            DisplayMode::Plain => writeln!(self.out),
        };
        report(result.and_then(|()| self.out.flush()));
    }

    fn show_countdown(&mut self, frame: &Frame<'_>) {
        let result = match self.mode {
            DisplayMode::Rich => {
                let lines = rich_frame(frame, &self.settings);
                if self.last_frame.as_ref() == Some(&lines) {
                    return;
                }
                let drawn = queue!(self.out, MoveTo(0, 0)).and_then(|()| self.write_lines(&lines));
                self.last_frame = Some(lines);
                drawn
            }
            DisplayMode::Plain => write!(self.out, "{}", plain_line(frame)),
        };
        report(result.and_then(|()| self.out.flush()));
    }

    fn show_instruction(&mut self, text: &str, color: PhaseColor) {
        let result = match self.mode {
            DisplayMode::Rich => {
                let lines = message_box("", text, color);
                writeln!(self.out).and_then(|()| self.write_lines(&lines))
            }
            DisplayMode::Plain => writeln!(self.out, "\n{text}"),
        };
        report(result.and_then(|()| self.out.flush()));
    }

    fn show_transition(&mut self, from: Option<&Phase>, to: &Phase) {
        // The rich frame already shows the new phase in its title.
        if self.mode == DisplayMode::Plain {
            let result = writeln!(self.out, "\n{}", transition_message(from, to))
                .and_then(|()| self.out.flush());
            report(result);
        }
    }
}

//! Frame layout for the countdown display.
//!
//! Layout is kept free of terminal escape codes: a rich frame is a list of
//! [`Line`]s made of [`Span`]s tagged with a [`SpanStyle`], and the terminal
//! renderer decides how a style is drawn.
//!
//! ```text
//! ╭─────────────── HOLD ───────────────╮  ✓ Breathe 30s (30s)
//! │                                      │  ▶ Hold (60s)
//! │                                      │    Breathe 20s (20s)
//! │                                      │    ...
//! │     ███   ███         ███   ███      │
//! │    ...                               │
//! ╰──────────────────────────────────────╯
//! ```

use super::ascii::ascii_time;
use crate::{
    config::{DisplaySettings, SidebarPosition},
    models::{Phase, PhaseColor},
};

const BORDER_TOP_LEFT: char = '╭';
const BORDER_TOP_RIGHT: char = '╮';
const BORDER_BOTTOM_LEFT: char = '╰';
const BORDER_BOTTOM_RIGHT: char = '╯';
const BORDER_HORIZONTAL: char = '─';
const BORDER_VERTICAL: &str = "│";

/// Countdown state handed to a display for one redraw.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Whole seconds left in the current phase
    pub remaining_secs: u64,
    /// The current phase
    pub phase: &'a Phase,
    /// Position of `phase` within `phases`
    pub index: usize,
    /// Every phase of the exercise, for progress tracking
    pub phases: &'a [Phase],
}

impl Frame<'_> {
    pub fn minutes(&self) -> u64 {
        self.remaining_secs / 60
    }

    pub fn seconds(&self) -> u64 {
        self.remaining_secs % 60
    }
}

/// Visual treatment of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub color: Option<PhaseColor>,
    pub bold: bool,
    pub dim: bool,
}

impl SpanStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn colored(color: PhaseColor) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(color: PhaseColor) -> Self {
        Self {
            color: Some(color),
            bold: true,
            dim: false,
        }
    }

    pub fn dim() -> Self {
        Self {
            dim: true,
            ..Self::default()
        }
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank(width: usize) -> Self {
        Self::new(" ".repeat(width), SpanStyle::plain())
    }
}

/// One terminal row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// The row without any styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Width in terminal columns (one per char).
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.chars().count()).sum()
    }
}

/// Progress of a phase relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Done,
    Current,
    Pending,
}

/// One sidebar row describing a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub progress: Progress,
    pub indicator: &'static str,
    pub name: String,
    pub color: PhaseColor,
}

impl SidebarEntry {
    fn into_span(self) -> Span {
        let text = format!("{} {}", self.indicator, self.name);
        let style = match self.progress {
            Progress::Done => SpanStyle::dim(),
            Progress::Current => SpanStyle::bold(self.color),
            Progress::Pending => SpanStyle::colored(self.color),
        };
        Span::new(text, style)
    }
}

/// Builds the progress sidebar for `phases` with `current` as the active one.
pub fn sidebar(phases: &[Phase], current: usize, settings: &DisplaySettings) -> Vec<SidebarEntry> {
    phases
        .iter()
        .enumerate()
        .map(|(idx, phase)| {
            let (progress, indicator) = if idx < current || (idx == current && phase.is_completed()) {
                (Progress::Done, settings.progress_completed)
            } else if idx == current {
                (Progress::Current, settings.progress_current)
            } else {
                (Progress::Pending, settings.progress_pending)
            };

            SidebarEntry {
                progress,
                indicator,
                name: sidebar_name(phase, settings.sidebar_width),
                color: phase.color(),
            }
        })
        .collect()
}

fn sidebar_name(phase: &Phase, width: usize) -> String {
    let name = if phase.is_completion_marker() {
        phase.label().to_string()
    } else {
        format!("{} ({}s)", phase.label(), phase.duration())
    };

    if name.chars().count() > width.saturating_sub(3) {
        let kept: String = name.chars().take(width.saturating_sub(6)).collect();
        format!("{kept}...")
    } else {
        name
    }
}

/// Lays out the boxed clock for `frame`, without the sidebar.
pub fn clock_box(frame: &Frame<'_>, settings: &DisplaySettings) -> Vec<Line> {
    let color = frame.phase.color();
    let border = SpanStyle::colored(color);
    let inner = settings.box_width.saturating_sub(2);
    let mut lines = Vec::new();

    lines.push(Line {
        spans: vec![Span::new(
            top_border(&frame.phase.label().to_uppercase(), settings.box_width),
            border,
        )],
    });

    let padding_row = || Line {
        spans: vec![
            Span::new(BORDER_VERTICAL, border),
            Span::blank(inner),
            Span::new(BORDER_VERTICAL, border),
        ],
    };

    lines.extend((0..settings.padding_top).map(|_| padding_row()));

    for row in ascii_time(frame.minutes(), frame.seconds()) {
        let padding = inner.saturating_sub(row.chars().count());
        let left = padding / 2;
        let mut line = Line::default();
        line.push(Span::new(BORDER_VERTICAL, border));
        line.push(Span::blank(left));
        line.push(Span::new(row, SpanStyle::bold(color)));
        line.push(Span::blank(padding - left));
        line.push(Span::new(BORDER_VERTICAL, border));
        lines.push(line);
    }

    lines.extend((0..settings.padding_bottom).map(|_| padding_row()));

    lines.push(Line {
        spans: vec![Span::new(bottom_border(settings.box_width), border)],
    });

    lines
}

/// Lays out `text` centered in a rounded box with `title` in its top border.
pub fn message_box(title: &str, text: &str, color: PhaseColor) -> Vec<Line> {
    let border = SpanStyle::colored(color);
    let text_width = text.chars().count();
    let inner = text_width.max(title.chars().count() + 2) + 4;
    let padding = inner - text_width;
    let left = padding / 2;

    let row = |content: Vec<Span>| {
        let mut line = Line::default();
        line.push(Span::new(BORDER_VERTICAL, border));
        line.spans.extend(content);
        line.push(Span::new(BORDER_VERTICAL, border));
        line
    };

    vec![
        Line {
            spans: vec![Span::new(top_border(title, inner + 2), border)],
        },
        row(vec![Span::blank(inner)]),
        row(vec![
            Span::blank(left),
            Span::new(text, SpanStyle::bold(color)),
            Span::blank(padding - left),
        ]),
        row(vec![Span::blank(inner)]),
        Line {
            spans: vec![Span::new(bottom_border(inner + 2), border)],
        },
    ]
}

fn bottom_border(box_width: usize) -> String {
    format!(
        "{BORDER_BOTTOM_LEFT}{}{BORDER_BOTTOM_RIGHT}",
        BORDER_HORIZONTAL.to_string().repeat(box_width.saturating_sub(2))
    )
}

fn top_border(title: &str, box_width: usize) -> String {
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(" {title} ")
    };
    let title_width = title.chars().count();
    let horizontal = BORDER_HORIZONTAL.to_string();

    let mut top = String::new();
    top.push(BORDER_TOP_LEFT);
    top.push_str(&horizontal.repeat(box_width.saturating_sub(title_width + 2) / 2));
    top.push_str(&title);

    let used = top.chars().count();
    top.push_str(&horizontal.repeat(box_width.saturating_sub(used + 1)));
    top.push(BORDER_TOP_RIGHT);
    top
}

/// Lays out the complete rich frame: clock box plus optional sidebar.
pub fn rich_frame(frame: &Frame<'_>, settings: &DisplaySettings) -> Vec<Line> {
    let main = clock_box(frame, settings);
    if !settings.sidebar_enabled || frame.phases.is_empty() {
        return main;
    }

    let side: Vec<Span> = sidebar(frame.phases, frame.index, settings)
        .into_iter()
        .map(SidebarEntry::into_span)
        .collect();
    let rows = main.len().max(side.len());
    let gap = Span::blank(settings.sidebar_padding);

    (0..rows)
        .map(|i| {
            let main_line = main.get(i).cloned().unwrap_or_else(|| Line {
                spans: vec![Span::blank(settings.box_width)],
            });
            let side_span = side.get(i).cloned();

            let mut line = Line::default();
            match settings.sidebar_position {
                SidebarPosition::Right => {
                    line.spans.extend(main_line.spans);
                    line.push(gap.clone());
                    line.spans.extend(side_span);
                }
                SidebarPosition::Left => {
                    let side_span = side_span.unwrap_or_else(|| Span::blank(0));
                    let fill = settings.sidebar_width.saturating_sub(side_span.text.chars().count());
                    line.push(side_span);
                    line.push(Span::blank(fill));
                    line.push(gap.clone());
                    line.spans.extend(main_line.spans);
                }
            }
            line
        })
        .collect()
}

/// Single-line countdown used in plain mode, e.g. `"\rHold: 00:42    "`.
pub fn plain_line(frame: &Frame<'_>) -> String {
    format!(
        "\r{}: {:02}:{:02}    ",
        frame.phase.label(),
        frame.minutes(),
        frame.seconds()
    )
}

/// Message shown between two phases in plain mode.
pub fn transition_message(from: Option<&Phase>, to: &Phase) -> String {
    match from {
        Some(from) => format!("Transitioning from {} to {}", from.kind(), to.kind()),
        None => format!("Starting {} phase", to.kind()),
    }
}

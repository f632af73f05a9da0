//! Run view and the terminal event sinks.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::Stylize;
use tracing::warn;

use archsecure::application::CancelToken;
use archsecure::domain::ports::{RunEvent, RunEventSink};
use archsecure::domain::value_objects::{RunStatus, RunSummary};

use crate::ui::context::UiContext;
use crate::ui::icon::Icon;
use crate::ui::input::is_cancel_key;
use crate::ui::live_region::LiveRegion;
use crate::ui::{spinner, theme};

/// One top-level option as shown during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRow {
    pub label: String,
    pub status: RunStatus,
    pub frame: usize,
    pub error: Option<String>,
}

impl RunRow {
    fn new(label: String) -> Self {
        Self {
            label,
            status: RunStatus::NotStarted,
            frame: 0,
            error: None,
        }
    }
}

fn status_icon(row: &RunRow, ui: &UiContext) -> String {
    match Icon::for_status(row.status) {
        Some(icon) => icon.colored(ui.color, ui.unicode),
        None => {
            let frame = spinner::frame(row.frame, ui.unicode).to_string();
            if ui.color {
                format!("{}", frame.with(theme::colors::WARNING))
            } else {
                frame
            }
        }
    }
}

pub fn render_row(row: &RunRow, ui: &UiContext) -> String {
    let mut out = format!("{} {}", status_icon(row, ui), row.label);
    if let Some(error) = &row.error {
        out.push_str("\n    ");
        if ui.color {
            out.push_str(&format!("{}", error.as_str().with(theme::colors::DIM)));
        } else {
            out.push_str(error);
        }
    }
    out
}

pub fn render_summary(summary: &RunSummary, cancelled: bool) -> String {
    let mut out = format!(
        "{} succeeded, {} failed, {} skipped",
        summary.succeeded, summary.failed, summary.skipped
    );
    if cancelled {
        out.push_str(" (cancelled)");
    }
    out
}

pub fn render(rows: &[RunRow], ui: &UiContext) -> String {
    rows.iter()
        .map(|row| render_row(row, ui))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply an event to the row list
fn apply(rows: &mut Vec<RunRow>, event: &RunEvent) {
    match event {
        RunEvent::Started { labels } => {
            *rows = labels.iter().cloned().map(RunRow::new).collect();
        }
        RunEvent::NodeStarted { index, .. } => {
            if let Some(row) = rows.get_mut(*index) {
                row.status = RunStatus::Running;
            }
        }
        RunEvent::Tick { index, frame } => {
            if let Some(row) = rows.get_mut(*index) {
                row.frame = *frame;
            }
        }
        RunEvent::NodeFinished {
            index,
            status,
            error,
            ..
        } => {
            if let Some(row) = rows.get_mut(*index) {
                row.status = *status;
                row.error = error.clone();
            }
        }
        RunEvent::Completed { .. } => {}
    }
}

struct ConsoleState {
    rows: Vec<RunRow>,
    region: LiveRegion,
    footer: Option<String>,
}

/// Repaints the run view in place; q/Esc/Ctrl+C cancel the run.
///
/// Expects the terminal in raw mode.
pub struct ConsoleSink {
    ui: UiContext,
    cancel: CancelToken,
    acknowledge: bool,
    state: Mutex<ConsoleState>,
}

impl ConsoleSink {
    pub fn new(ui: UiContext, cancel: CancelToken, acknowledge: bool) -> Self {
        Self {
            ui,
            cancel,
            acknowledge,
            state: Mutex::new(ConsoleState {
                rows: Vec::new(),
                region: LiveRegion::new(),
                footer: None,
            }),
        }
    }

    fn poll_cancel(&self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_cancel_key(key) {
                    self.cancel.cancel();
                }
            }
        }
        Ok(())
    }

    fn repaint(&self, state: &mut ConsoleState) -> io::Result<()> {
        let mut content = String::from("archsecure - applying selected options\n\n");
        content.push_str(&render(&state.rows, &self.ui));
        content.push('\n');
        match &state.footer {
            Some(footer) => {
                content.push('\n');
                content.push_str(footer);
            }
            None => content.push_str("\nq cancel after the current option"),
        }
        state.region.update(&mut io::stdout(), &content)
    }
}

impl RunEventSink for ConsoleSink {
    fn on_event(&self, event: RunEvent) {
        if let Err(err) = self.poll_cancel() {
            warn!(error = %err, "reading keys during run failed");
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        apply(&mut state.rows, &event);
        if let RunEvent::Completed { summary, cancelled } = &event {
            let mut footer = render_summary(summary, *cancelled);
            if self.acknowledge {
                footer.push_str("\npress any key to continue");
            }
            state.footer = Some(footer);
        }
        if let Err(err) = self.repaint(&mut state) {
            warn!(error = %err, "repainting run view failed");
        }
    }

    fn acknowledge(&self) {
        if !self.acknowledge {
            return;
        }
        let wait = || -> io::Result<()> {
            // Keys pressed while options were running do not count.
            while event::poll(Duration::ZERO)? {
                event::read()?;
            }
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        return Ok(());
                    }
                }
            }
        };
        if let Err(err) = wait() {
            warn!(error = %err, "waiting for acknowledgement failed");
        }
    }

    fn wants_ticks(&self) -> bool {
        self.ui.animation
    }
}

/// Line-per-option output for non-interactive runs
pub struct LineSink {
    ui: UiContext,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LineSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl RunEventSink for LineSink {
    fn on_event(&self, event: RunEvent) {
        let text = match event {
            RunEvent::NodeFinished {
                label,
                status,
                error,
                ..
            } => render_row(
                &RunRow {
                    label,
                    status,
                    frame: 0,
                    error,
                },
                &self.ui,
            ),
            RunEvent::Completed { summary, cancelled } => {
                format!("\n{}", render_summary(&summary, cancelled))
            }
            _ => return,
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }

    fn wants_ticks(&self) -> bool {
        false
    }
}

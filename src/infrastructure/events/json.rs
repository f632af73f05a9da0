//! JSON Event Sink
//!
//! Outputs run events as NDJSON for automation consumption.

use crate::domain::ports::{RunEvent, RunEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl RunEventSink for JsonEventSink {
    fn on_event(&self, event: RunEvent) {
        let json = match event {
            RunEvent::Started { labels } => {
                serde_json::json!({
                    "event": "start",
                    "command": "harden",
                    "options": labels,
                })
            }

            RunEvent::NodeStarted { index, label } => {
                serde_json::json!({
                    "event": "item_start",
                    "command": "harden",
                    "index": index,
                    "label": label,
                })
            }

            // Ticks are cosmetic; wants_ticks() keeps them from arriving here.
            RunEvent::Tick { .. } => return,

            RunEvent::NodeFinished {
                index,
                label,
                status,
                error,
            } => {
                let mut json = serde_json::json!({
                    "event": "item_finished",
                    "command": "harden",
                    "index": index,
                    "label": label,
                    "status": status,
                });
                if let Some(error) = error {
                    json["error"] = serde_json::Value::String(error);
                }
                json
            }

            RunEvent::Completed { summary, cancelled } => {
                let status = if cancelled {
                    "cancelled"
                } else if summary.failed == 0 {
                    "success"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "harden",
                    "status": status,
                    "succeeded": summary.succeeded,
                    "failed": summary.failed,
                    "skipped": summary.skipped,
                    "total": summary.total,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_ticks(&self) -> bool {
        false
    }
}

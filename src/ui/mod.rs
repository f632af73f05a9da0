//! Terminal UI
//!
//! - `menu` - option menu rendering
//! - `run_view` - run progress rendering and the console/line event sinks
//! - `input` - key mapping
//! - `context` / `terminal` - capability detection and output settings

pub mod context;
pub mod icon;
pub mod input;
pub mod live_region;
pub mod menu;
pub mod run_view;
pub mod spinner;
pub mod terminal;
pub mod theme;

use std::io::{self, Write};

use crossterm::{cursor, execute, terminal as term};

/// Raw mode on an alternate screen with a hidden cursor, undone on drop
/// (including during a panic unwind).
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        term::enable_raw_mode()?;
        let guard = RawModeGuard;
        execute!(io::stdout(), term::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }

    /// Clear the screen and home the cursor
    pub fn clear(&self, out: &mut impl Write) -> io::Result<()> {
        execute!(out, term::Clear(term::ClearType::All), cursor::MoveTo(0, 0))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, term::LeaveAlternateScreen);
        let _ = term::disable_raw_mode();
    }
}

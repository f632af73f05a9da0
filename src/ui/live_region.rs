use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};

/// Block of lines repainted in place
///
/// In raw mode `\n` does not return the carriage, so every line is written
/// with an explicit `\r\n`.
#[derive(Debug, Default)]
pub struct LiveRegion {
    last_lines: usize,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        let lines_to_clear = self.last_lines.min(u16::MAX as usize) as u16;
        if lines_to_clear > 0 {
            out.queue(cursor::MoveUp(lines_to_clear))?;
            out.queue(cursor::MoveToColumn(0))?;
            out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }

        let mut lines = 0;
        for line in content.lines() {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\r\n")?;
            lines += 1;
        }
        out.flush()?;

        self.last_lines = lines;
        Ok(())
    }
}

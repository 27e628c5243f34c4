//! Tracking of the physical cursor within the managed block.
//!
//! Rows are addressed relative to the top of the block, 0 being the topmost.
//! The terminal is never queried; the cursor position is known only because
//! every byte that moves it goes through here.

use std::cmp::Ordering;
use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::cursor::{MoveDown, MoveUp};
use crossterm::terminal::{Clear, ClearType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    row: usize,
    /// Rows that exist on the terminal below the block's top, the cursor's
    /// starting line included. Cursor-down cannot go past the last of them.
    extent: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { row: 0, extent: 1 }
    }
}

impl Cursor {
    pub(crate) fn row(&self) -> usize {
        self.row
    }

    /// Moves to column 0 of `target`.
    ///
    /// Upward and in-block downward moves are relative escapes; rows past the
    /// extent are created with line feeds so the terminal scrolls if needed.
    pub(crate) fn move_to(&mut self, out: &mut impl Write, target: usize) -> io::Result<()> {
        match target.cmp(&self.row) {
            Ordering::Less => {
                out.queue(MoveUp(rows(self.row - target)))?;
            }
            Ordering::Greater => {
                let last = self.extent - 1;
                let within = target.min(last);
                if within > self.row {
                    out.queue(MoveDown(rows(within - self.row)))?;
                }
                for _ in last.max(self.row)..target {
                    out.write_all(b"\n")?;
                }
                self.extent = self.extent.max(target + 1);
            }
            Ordering::Equal => {}
        }
        out.write_all(b"\r")?;
        self.row = target;
        Ok(())
    }

    pub(crate) fn clear_line(out: &mut impl Write) -> io::Result<()> {
        out.queue(Clear(ClearType::CurrentLine))?;
        Ok(())
    }
}

fn rows(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

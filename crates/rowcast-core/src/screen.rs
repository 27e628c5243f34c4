//! The state guarded by the renderer's single lock.
//!
//! Slot collection, cursor and output stream change together or not at all:
//! every method here runs inside one critical section of the caller.

use std::io::{self, Write};

use tracing::debug;

use crate::cursor::Cursor;
use crate::frame::Frame;
use crate::slot::{SlotEntry, SlotId, SlotSeq};

/// What [`Screen::paint`] did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Paint {
    Painted,
    Unregistered,
    Closing,
}

pub(crate) struct Screen<W> {
    slots: Vec<SlotEntry>,
    cursor: Cursor,
    out: W,
    seq: SlotSeq,
    closing: bool,
}

impl<W: Write> Screen<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            slots: Vec::new(),
            cursor: Cursor::default(),
            out,
            seq: SlotSeq::default(),
            closing: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor.row()
    }

    pub(crate) fn indices(&self) -> Vec<usize> {
        self.slots.iter().map(|slot| slot.index).collect()
    }

    pub(crate) fn is_closing(&self) -> bool {
        self.closing
    }

    pub(crate) fn next_id(&mut self) -> SlotId {
        self.seq.next_id()
    }

    /// Inserts `entry` at `at`, or appends it when `at` is past the end.
    /// Returns the position the slot ended up at.
    pub(crate) fn insert(&mut self, entry: SlotEntry, at: usize) -> usize {
        let index = at.min(self.slots.len());
        self.slots.insert(index, entry);
        self.reindex(index);
        index
    }

    /// Removes the slot with `id`, returning the position it occupied.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<usize> {
        let index = self.position(id)?;
        self.slots.remove(index);
        self.reindex(index);
        Some(index)
    }

    fn position(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    fn reindex(&mut self, from: usize) {
        for (index, slot) in self.slots.iter_mut().enumerate().skip(from) {
            slot.index = index;
        }
    }

    /// Stores `frame` as the slot's cache and repaints its row.
    ///
    /// Once the screen is closing the cursor is parked below the block and
    /// must stay there, so frames are dropped unpainted.
    pub(crate) fn paint(&mut self, id: SlotId, frame: Frame) -> io::Result<Paint> {
        if self.closing {
            return Ok(Paint::Closing);
        }
        let Some(index) = self.position(id) else {
            return Ok(Paint::Unregistered);
        };
        self.slots[index].cache = Some(frame);
        self.repaint(index)?;
        self.out.flush()?;
        Ok(Paint::Painted)
    }

    /// Reprints every row from `index` to the end from its cache.
    pub(crate) fn redraw_from(&mut self, index: usize) -> io::Result<()> {
        for row in index..self.slots.len() {
            self.repaint(row)?;
        }
        Ok(())
    }

    /// Redraws the rows that moved up after a removal at `index` and blanks
    /// the row the block no longer covers.
    pub(crate) fn close_gap(&mut self, index: usize) -> io::Result<()> {
        self.redraw_from(index)?;
        let vacated = self.slots.len();
        self.cursor.move_to(&mut self.out, vacated)?;
        Cursor::clear_line(&mut self.out)?;
        debug!(from = index, len = vacated, "closed gap");
        Ok(())
    }

    /// Cancels every slot and parks the cursor on the first row below the
    /// block. Returns `false` if the screen was already closing.
    pub(crate) fn begin_close(&mut self) -> bool {
        if self.closing {
            return false;
        }
        self.closing = true;
        for slot in &self.slots {
            slot.cancel.cancel();
        }
        true
    }

    pub(crate) fn park(&mut self) -> io::Result<()> {
        let end = self.slots.len();
        self.cursor.move_to(&mut self.out, end)?;
        Cursor::clear_line(&mut self.out)?;
        self.out.flush()
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn repaint(&mut self, index: usize) -> io::Result<()> {
        self.cursor.move_to(&mut self.out, index)?;
        Cursor::clear_line(&mut self.out)?;
        if let Some(frame) = &self.slots[index].cache {
            frame.write_to(&mut self.out)?;
        }
        Ok(())
    }
}

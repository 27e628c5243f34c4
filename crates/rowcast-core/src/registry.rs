//! The slot registry.
//!
//! [`Renderer`] owns the ordered slot collection, the cursor and the output
//! stream as one [`Screen`] behind one mutex. Creating a slot, repainting a
//! row, removing a slot and shutting down each take that lock for their
//! whole critical section, so the terminal only ever sees complete
//! move-clear-print sequences.

use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::frame::Frame;
use crate::profile::Profile;
use crate::screen::{Paint, Screen};
use crate::slot::{SlotEntry, SlotId};
use crate::worker;

/// State shared between the renderer handle and every slot worker.
pub(crate) struct Inner<W> {
    screen: Mutex<Screen<W>>,
    /// Parent of every slot's token.
    root: CancellationToken,
    workers: TaskTracker,
}

impl<W: Write> Inner<W> {
    fn lock(&self) -> MutexGuard<'_, Screen<W>> {
        // Each critical section leaves the screen consistent before it can
        // panic on I/O, so a poisoned lock still guards valid state.
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Caches `frame` for the slot and repaints its row.
    ///
    /// Returns `false` when the frame was refused: the renderer is closing
    /// or the slot is gone. The producer then sees `WorkerStopped`.
    pub(crate) fn apply(&self, id: SlotId, frame: Frame) -> bool {
        let mut screen = self.lock();
        match screen.paint(id, frame) {
            Ok(Paint::Painted) => true,
            Ok(Paint::Closing) => {
                debug!(slot = %id, "renderer closing, frame dropped");
                false
            }
            Ok(Paint::Unregistered) => {
                error!(slot = %id, "frame for a slot that is not registered");
                false
            }
            Err(err) => {
                warn!(slot = %id, error = %err, "failed to repaint slot");
                true
            }
        }
    }

    /// Removes the slot and closes the gap it leaves, unless the whole
    /// renderer is shutting down, in which case the row stays as it is.
    pub(crate) fn retire(&self, id: SlotId) {
        let mut screen = self.lock();
        if screen.is_closing() {
            debug!(slot = %id, "renderer closing, keeping row");
            return;
        }
        let Some(index) = screen.remove(id) else {
            error!(slot = %id, "retiring a slot that is not registered");
            return;
        };
        debug!(slot = %id, index, len = screen.len(), "slot removed");
        if let Err(err) = screen.close_gap(index).and_then(|()| screen.flush()) {
            warn!(slot = %id, error = %err, "failed to redraw after removal");
        }
    }
}

/// Renders independently updating lines in place.
///
/// Clones share the same block; any of them may create slots or shut the
/// renderer down.
pub struct Renderer<W = Stdout>
where
    W: Write + Send + 'static,
{
    inner: Arc<Inner<W>>,
}

impl Renderer<Stdout> {
    /// Renders to standard output. See [`with_writer`](Self::with_writer)
    /// for how writes are scheduled.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for Renderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Clone for Renderer<W>
where
    W: Write + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> Renderer<W>
where
    W: Write + Send + 'static,
{
    /// Renders to `out`. The block starts on the line `out`'s cursor is on.
    ///
    /// Workers write and flush `out` while holding a `std::sync::Mutex` on
    /// runtime threads, so a writer that blocks for long stalls every slot
    /// and the thread it runs on. Use a multi-threaded runtime, and put a
    /// slow sink behind a buffer.
    pub fn with_writer(out: W) -> Self {
        Self {
            inner: Arc::new(Inner {
                screen: Mutex::new(Screen::new(out)),
                root: CancellationToken::new(),
                workers: TaskTracker::new(),
            }),
        }
    }

    /// Creates a slot at `at_index` and returns the producer handle for it.
    ///
    /// A negative index is a no-op. An index at or past the end appends;
    /// otherwise the slot is inserted there, the slots below shift down one
    /// row and are redrawn from their last frames. Returns `None` for a
    /// negative index or once the renderer has shut down.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime, since the slot's worker is
    /// spawned immediately.
    pub fn create_slot(&self, at_index: isize) -> Option<Profile> {
        let Ok(at) = usize::try_from(at_index) else {
            debug!(at_index, "ignoring negative slot index");
            return None;
        };

        let mut screen = self.inner.lock();
        if screen.is_closing() {
            warn!(at_index, "slot requested after shutdown");
            return None;
        }

        let id = screen.next_id();
        let cancel = self.inner.root.child_token();
        let index = screen.insert(SlotEntry::new(id, cancel.clone()), at);
        if index + 1 < screen.len() {
            if let Err(err) = screen.redraw_from(index).and_then(|()| screen.flush()) {
                warn!(slot = %id, error = %err, "failed to redraw after insert");
            }
        }
        debug!(slot = %id, index, len = screen.len(), "slot created");

        let (tx, rx) = mpsc::channel(1);
        let (done_tx, done_rx) = oneshot::channel();
        self.inner.workers.spawn(worker::run(
            Arc::clone(&self.inner),
            id,
            rx,
            cancel.clone(),
            done_tx,
        ));
        drop(screen);

        Some(Profile::new(id, tx, cancel, done_rx))
    }

    /// Cancels every slot, parks the cursor on the line below the block and
    /// waits for all workers to stop.
    ///
    /// Rows keep their last content. Calling this more than once is harmless.
    ///
    /// # Errors
    /// Returns an error if the final cursor move cannot be written.
    pub async fn shutdown(&self) -> Result<()> {
        let parked = {
            let mut screen = self.inner.lock();
            if screen.begin_close() {
                self.inner.root.cancel();
                debug!(len = screen.len(), "renderer shutting down");
                screen.park()
            } else {
                Ok(())
            }
        };

        self.inner.workers.close();
        self.inner.workers.wait().await;
        parked.map_err(Into::into)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row the terminal cursor sits on, relative to the top of the block.
    pub fn cursor(&self) -> usize {
        self.inner.lock().cursor()
    }

    /// Stored index of every slot, in collection order.
    pub fn slot_indices(&self) -> Vec<usize> {
        self.inner.lock().indices()
    }
}

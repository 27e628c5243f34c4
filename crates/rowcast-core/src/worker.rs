//! Per-slot worker task.
//!
//! A worker is `Active` from spawn until it observes its cancellation token,
//! then tears its slot down and is `Closed` for good. Frames are applied in
//! arrival order; cancellation wins over a frame that is ready at the same
//! time.

use std::io::Write;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::registry::Inner;
use crate::slot::{Delivery, SlotId};

pub(crate) async fn run<W>(
    inner: Arc<Inner<W>>,
    id: SlotId,
    mut inbox: mpsc::Receiver<Delivery>,
    cancel: CancellationToken,
    done: oneshot::Sender<()>,
) where
    W: Write + Send + 'static,
{
    debug!(slot = %id, "worker started");
    let mut accepting = true;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            delivery = inbox.recv(), if accepting => match delivery {
                Some(Delivery { frame, ack }) => {
                    // A refused frame drops its ack unanswered.
                    if inner.apply(id, frame) {
                        let _ = ack.send(());
                    }
                }
                None => {
                    // Every sender is gone; nothing more can arrive.
                    debug!(slot = %id, "inbox closed, waiting for cancellation");
                    accepting = false;
                }
            },
        }
    }

    inbox.close();
    inner.retire(id);
    debug!(slot = %id, "worker closed");
    let _ = done.send(());
}

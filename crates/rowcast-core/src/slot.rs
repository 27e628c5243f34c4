use std::fmt;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::frame::Frame;

/// Stable identity of a slot for its whole lifetime.
///
/// Positions shift as slots come and go; ids never do and are never reused
/// within one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct SlotSeq {
    next: u64,
}

impl SlotSeq {
    pub(crate) fn next_id(&mut self) -> SlotId {
        let id = SlotId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Registry-side record of one managed row.
#[derive(Debug)]
pub(crate) struct SlotEntry {
    pub id: SlotId,
    /// Always equal to this entry's position in the registry collection.
    pub index: usize,
    /// Most recent frame the worker accepted; never rolled back.
    pub cache: Option<Frame>,
    pub cancel: CancellationToken,
}

impl SlotEntry {
    pub(crate) fn new(id: SlotId, cancel: CancellationToken) -> Self {
        Self {
            id,
            index: 0,
            cache: None,
            cancel,
        }
    }
}

/// A frame in flight from a profile to its worker.
///
/// The worker answers on `ack` once the frame is applied, which is what
/// turns the capacity-one channel into a rendezvous.
#[derive(Debug)]
pub(crate) struct Delivery {
    pub frame: Frame,
    pub ack: oneshot::Sender<()>,
}

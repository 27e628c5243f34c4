//! Producer-side handle of a slot.

use std::future::Future;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::component::Component;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::slot::{Delivery, SlotId};

/// Owns one slot's row on behalf of a single producer.
///
/// A profile is not meant to be shared: components are added and frames
/// rendered through `&mut self`/`&self` from one task or thread at a time.
/// Dropping a profile closes its slot.
pub struct Profile {
    id: SlotId,
    inbox: Option<mpsc::Sender<Delivery>>,
    cancel: CancellationToken,
    done: Option<oneshot::Receiver<()>>,
    components: Vec<Box<dyn Component>>,
}

impl Profile {
    pub(crate) fn new(
        id: SlotId,
        inbox: mpsc::Sender<Delivery>,
        cancel: CancellationToken,
        done: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            id,
            inbox: Some(inbox),
            cancel,
            done: Some(done),
            components: Vec::new(),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Inserts `component` at `at_index`, appending when the index is past
    /// the end. A negative index is ignored.
    pub fn add_component(&mut self, at_index: isize, component: impl Component + 'static) {
        let Ok(at) = usize::try_from(at_index) else {
            return;
        };
        let at = at.min(self.components.len());
        self.components.insert(at, Box::new(component));
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_none()
    }

    /// Evaluates every component, in order, into a frame.
    pub fn compose(&self) -> Frame {
        self.components.iter().map(|c| c.render()).collect()
    }

    /// Composes a frame now and hands it to the slot's worker.
    ///
    /// Components are evaluated before this returns; the returned future
    /// resolves once the worker has accepted and painted the frame, so a
    /// slow terminal only ever stalls this producer.
    ///
    /// # Errors
    /// `Error::ProfileClosed` after [`close`](Self::close), and
    /// `Error::WorkerStopped` once the renderer has shut down.
    pub fn render(&self) -> impl Future<Output = Result<()>> + Send + use<> {
        let handoff = self.handoff();
        async move {
            let (inbox, delivery, accepted) = handoff?;
            if inbox.send(delivery).await.is_err() {
                return Err(Error::WorkerStopped);
            }
            accepted.await.or(Err(Error::WorkerStopped))
        }
    }

    /// Blocking form of [`render`](Self::render) for producers on plain
    /// threads.
    ///
    /// # Errors
    /// Same as [`render`](Self::render).
    ///
    /// # Panics
    /// Panics if called from within an asynchronous execution context.
    pub fn render_blocking(&self) -> Result<()> {
        let (inbox, delivery, accepted) = self.handoff()?;
        if inbox.blocking_send(delivery).is_err() {
            return Err(Error::WorkerStopped);
        }
        accepted.blocking_recv().or(Err(Error::WorkerStopped))
    }

    fn handoff(&self) -> Result<(mpsc::Sender<Delivery>, Delivery, oneshot::Receiver<()>)> {
        let inbox = self.inbox.clone().ok_or(Error::ProfileClosed)?;
        let (ack, accepted) = oneshot::channel();
        let delivery = Delivery {
            frame: self.compose(),
            ack,
        };
        Ok((inbox, delivery, accepted))
    }

    /// Cancels the slot and waits until its worker has removed the row and
    /// redrawn the rows below. Later calls return immediately.
    pub async fn close(&mut self) {
        if let Some(done) = self.shut() {
            let _ = done.await;
        }
    }

    /// Blocking form of [`close`](Self::close).
    ///
    /// # Panics
    /// Panics if called from within an asynchronous execution context.
    pub fn close_blocking(&mut self) {
        if let Some(done) = self.shut() {
            let _ = done.blocking_recv();
        }
    }

    fn shut(&mut self) -> Option<oneshot::Receiver<()>> {
        self.cancel.cancel();
        self.inbox = None;
        let done = self.done.take();
        if done.is_some() {
            debug!(slot = %self.id, "profile closed");
        }
        done
    }
}

impl Drop for Profile {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("components", &self.components.len())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::registry::Renderer;
    use crate::testing::Capture;

    fn text(s: &'static str) -> impl Component {
        move || Some(s.to_string())
    }

    #[tokio::test]
    async fn components_keep_insertion_order() {
        let renderer = Renderer::with_writer(Capture::default());
        let mut profile = renderer.create_slot(0).unwrap();

        profile.add_component(0, text("b"));
        profile.add_component(0, text("a"));
        profile.add_component(9, text("d"));
        profile.add_component(2, text("c"));

        assert_eq!(profile.len(), 4);
        assert_eq!(profile.compose().text(), "abcd");
    }

    #[tokio::test]
    async fn negative_component_index_is_ignored() {
        let renderer = Renderer::with_writer(Capture::default());
        let mut profile = renderer.create_slot(0).unwrap();

        profile.add_component(-3, text("x"));

        assert!(profile.is_empty());
        assert_eq!(profile.compose(), Frame::default());
    }

    #[tokio::test]
    async fn absent_entries_are_kept_in_frame_but_not_printed() {
        let capture = Capture::default();
        let renderer = Renderer::with_writer(capture.clone());
        let mut profile = renderer.create_slot(0).unwrap();
        profile.add_component(0, text("left"));
        profile.add_component(1, || None::<String>);
        profile.add_component(2, text("right"));

        let frame = profile.compose();
        assert_eq!(frame.entries()[1], None);

        profile.render().await.unwrap();
        assert_eq!(capture.terminal().visible_rows(), vec!["leftright"]);
    }

    #[tokio::test]
    async fn dropping_a_profile_removes_its_row() {
        let capture = Capture::default();
        let renderer = Renderer::with_writer(capture.clone());
        let mut first = renderer.create_slot(0).unwrap();
        first.add_component(0, text("first"));
        first.render().await.unwrap();
        let _second = renderer.create_slot(1).unwrap();

        drop(first);
        for _ in 0..200 {
            if renderer.len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(renderer.len(), 1);
        assert!(capture.terminal().visible_rows().is_empty());
    }

    #[test]
    fn blocking_render_from_plain_threads() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let capture = Capture::default();
        let renderer = Renderer::with_writer(capture.clone());
        let mut profile = runtime.block_on(async { renderer.create_slot(0) }).unwrap();
        profile.add_component(0, text("from a thread"));

        let handle = std::thread::spawn(move || {
            profile.render_blocking().unwrap();
            profile.close_blocking();
            profile.render_blocking()
        });

        assert!(matches!(handle.join().unwrap(), Err(Error::ProfileClosed)));
        assert!(renderer.is_empty());
        runtime.block_on(renderer.shutdown()).unwrap();
    }
}

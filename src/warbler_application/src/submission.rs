//! Caller-facing handles for a registration running in the background.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use warbler_core::{RegistrationEvent, RegistrationOutcome};

/// Requests cancellation of a submission. Cloning shares the same request.
#[derive(Clone)]
pub struct Canceller(Arc<watch::Sender<bool>>);

impl Canceller {
    /// Takes effect only while the profile image is still being uploaded;
    /// once account creation has started the submission runs to the end.
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// The pipeline's side of a [`Canceller`].
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once cancellation is requested. If every [`Canceller`] is gone
    /// without cancelling, it never resolves.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

pub fn cancellation() -> (Canceller, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (Canceller(Arc::new(sender)), CancelSignal(receiver))
}

/// Event stream of one submission: upload progress, then exactly one
/// [`RegistrationEvent::Completed`].
///
/// Dropping the stream does not cancel the registration.
pub struct RegistrationSubmission {
    events: UnboundedReceiverStream<RegistrationEvent>,
    canceller: Canceller,
}

impl RegistrationSubmission {
    pub(crate) fn new(events: UnboundedReceiverStream<RegistrationEvent>, canceller: Canceller) -> Self {
        Self { events, canceller }
    }

    pub fn cancel(&self) {
        self.canceller.cancel();
    }

    pub fn canceller(&self) -> Canceller {
        self.canceller.clone()
    }

    /// Skips progress and waits for the terminal outcome.
    ///
    /// Returns `None` only if the pipeline task died without reporting one.
    pub async fn outcome(mut self) -> Option<RegistrationOutcome> {
        while let Some(event) = self.events.next().await {
            if let RegistrationEvent::Completed(outcome) = event {
                return Some(outcome);
            }
        }
        None
    }
}

impl Stream for RegistrationSubmission {
    type Item = RegistrationEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}

/// Handle for a submission driven through callbacks.
pub struct RegistrationHandle {
    canceller: Canceller,
    task: JoinHandle<()>,
}

impl RegistrationHandle {
    pub(crate) fn new(canceller: Canceller, task: JoinHandle<()>) -> Self {
        Self { canceller, task }
    }

    pub fn cancel(&self) {
        self.canceller.cancel();
    }

    /// Waits until the completion callback has run.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Registration callback task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn signal_fires_after_cancel() {
        let (canceller, mut signal) = cancellation();
        assert!(!signal.is_cancelled());

        canceller.cancel();

        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("cancellation should be observed");
        assert!(signal.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_canceller_never_cancels() {
        let (canceller, mut signal) = cancellation();
        drop(canceller);

        let waited = tokio::time::timeout(Duration::from_secs(60), signal.cancelled()).await;

        assert!(waited.is_err());
        assert!(!signal.is_cancelled());
    }
}

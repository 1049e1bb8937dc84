//! The canary: it compares every address seen in the swarm with the expected
//! ones and notifies the operator about the rest.
//!
//! The tracker and the peer listener report what they see as
//! [`CanaryEvent`](event::CanaryEvent)s through an [`EventSender`]. A single
//! [`Keeper`] task drains the channel and hands each event to the
//! [`Evaluator`](evaluator::Evaluator), which decides whether the
//! [`Notifier`](notifier::Notifier) has to run.
//!
//! ```text
//! HTTP tracker --\
//!                 >-- EventSender --> Keeper --> Evaluator --> Notifier
//! Peer listener -/
//! ```
pub mod evaluator;
pub mod event;
pub mod expected;
pub mod notifier;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tracing::debug;

use self::evaluator::Evaluator;
use self::event::CanaryEvent;

pub(crate) const CANARY_LOG_TARGET: &str = "CANARY";

const CHANNEL_BUFFER_SIZE: usize = 65_535;

/// The service that listens to canary events and evaluates them.
pub struct Keeper {
    pub evaluator: Arc<Evaluator>,
}

impl Keeper {
    #[must_use]
    pub fn new(evaluator: Arc<Evaluator>) -> Self {
        Self { evaluator }
    }

    #[must_use]
    pub fn new_active_instance(evaluator: Arc<Evaluator>) -> Box<dyn EventSender> {
        Self::new(evaluator).run_event_listener()
    }

    /// Spawns the task that drains the event channel. It ends when every
    /// sender has been dropped.
    #[must_use]
    pub fn run_event_listener(&self) -> Box<dyn EventSender> {
        let (sender, receiver) = mpsc::channel::<CanaryEvent>(CHANNEL_BUFFER_SIZE);

        let evaluator = self.evaluator.clone();

        tokio::spawn(async move { event_listener(receiver, evaluator).await });

        Box::new(Sender { sender })
    }
}

async fn event_listener(mut receiver: mpsc::Receiver<CanaryEvent>, evaluator: Arc<Evaluator>) {
    while let Some(event) = receiver.recv().await {
        event_handler(&event, &evaluator);
    }

    debug!(target: CANARY_LOG_TARGET, "event listener stopped");
}

fn event_handler(event: &CanaryEvent, evaluator: &Evaluator) {
    debug!(target: CANARY_LOG_TARGET, "event: {event:?}");

    drop(evaluator.handle(event));
}

/// A trait to allow sending canary events.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait EventSender: Sync + Send {
    async fn send_event(&self, event: CanaryEvent) -> Option<Result<(), SendError<CanaryEvent>>>;
}

/// An [`EventSender`] over the channel created by a [`Keeper`].
pub struct Sender {
    sender: mpsc::Sender<CanaryEvent>,
}

#[async_trait]
impl EventSender for Sender {
    async fn send_event(&self, event: CanaryEvent) -> Option<Result<(), SendError<CanaryEvent>>> {
        Some(self.sender.send(event).await)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future;
    use mockall::predicate::eq;
    use swarm_canary_primitives::info_hash::InfoHash;
    use tokio::sync::oneshot;

    use super::evaluator::Evaluator;
    use super::event::{CanaryEvent, Source};
    use super::expected::ExpectedAddresses;
    use super::notifier::{MockNotifier, Outcome};
    use super::Keeper;

    #[tokio::test]
    async fn the_keeper_should_hand_the_events_it_receives_to_the_evaluator() {
        let unexpected = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5));
        let (notified_tx, notified_rx) = oneshot::channel::<IpAddr>();
        let notified_tx = std::sync::Mutex::new(Some(notified_tx));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().with(eq(unexpected)).times(1).returning(move |ip| {
            if let Some(tx) = notified_tx.lock().unwrap().take() {
                tx.send(ip).unwrap();
            }
            Box::pin(future::ready(Ok(Outcome::StillRunning)))
        });

        let evaluator = Arc::new(Evaluator::new(
            ExpectedAddresses::new([IpAddr::V4(Ipv4Addr::LOCALHOST)]),
            Duration::from_secs(60),
            Arc::new(notifier),
        ));

        let sender = Keeper::new_active_instance(evaluator);

        let result = sender
            .send_event(CanaryEvent::new(unexpected, Source::Peer, InfoHash([1; 20]), Duration::ZERO))
            .await;

        assert!(matches!(result, Some(Ok(()))));
        assert_eq!(
            tokio::time::timeout(Duration::from_secs(5), notified_rx).await.unwrap().unwrap(),
            unexpected
        );
    }
}

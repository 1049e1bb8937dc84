use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use swarm_canary_primitives::DurationSinceUnixEpoch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::event::CanaryEvent;
use super::expected::{normalize, ExpectedAddresses};
use super::notifier::{Notifier, NOTIFIER_LOG_TARGET};
use super::CANARY_LOG_TARGET;

/// What the evaluator decided for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The address is in the expected set.
    Expected,
    /// The address is unexpected but it was notified within the cool-down window.
    Suppressed,
    /// The address is unexpected and the notifier has to run.
    Notify,
}

/// Compares observed addresses against the expected set and decides when to
/// notify.
///
/// It remembers when each unexpected address was last notified, so a peer
/// re-announcing every few seconds triggers a single notification per
/// cool-down window. Times are the event timestamps, not the wall clock.
pub struct Evaluator {
    expected: ExpectedAddresses,
    cooldown: Duration,
    notifier: Arc<dyn Notifier>,
    last_notified: Mutex<HashMap<IpAddr, DurationSinceUnixEpoch>>,
}

impl Evaluator {
    #[must_use]
    pub fn new(expected: ExpectedAddresses, cooldown: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            expected,
            cooldown,
            notifier,
            last_notified: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn expected(&self) -> &ExpectedAddresses {
        &self.expected
    }

    /// Decides what to do with an observation and records the notification
    /// time when the verdict is [`Verdict::Notify`].
    pub fn evaluate(&self, event: &CanaryEvent) -> Verdict {
        let ip = normalize(event.observed);

        if self.expected.contains(&ip) {
            return Verdict::Expected;
        }

        let mut last_notified = self.last_notified.lock();

        last_notified.retain(|_, at| event.timestamp.saturating_sub(*at) < self.cooldown);

        match last_notified.get(&ip) {
            Some(_) => Verdict::Suppressed,
            None => {
                last_notified.insert(ip, event.timestamp);
                Verdict::Notify
            }
        }
    }

    /// Evaluates the observation and, when it has to be notified, launches the
    /// notifier on its own task.
    ///
    /// It returns the notification task, if any. Dropping it leaves the
    /// notification running.
    pub fn handle(&self, event: &CanaryEvent) -> Option<JoinHandle<()>> {
        if let Some(previous) = event.previous_address {
            warn!(
                target: CANARY_LOG_TARGET,
                source = %event.source,
                "peer moved from {previous} to {}", event.observed
            );
        }

        match self.evaluate(event) {
            Verdict::Expected => {
                debug!(target: CANARY_LOG_TARGET, source = %event.source, "expected address {}", event.observed);
                None
            }
            Verdict::Suppressed => {
                info!(
                    target: CANARY_LOG_TARGET,
                    source = %event.source,
                    "unexpected address {} already notified", event.observed
                );
                None
            }
            Verdict::Notify => {
                warn!(
                    target: CANARY_LOG_TARGET,
                    source = %event.source,
                    info_hash = %event.info_hash,
                    "unexpected address {}", event.observed
                );

                let notifier = self.notifier.clone();
                let ip = normalize(event.observed);

                Some(tokio::spawn(async move {
                    match notifier.notify(ip).await {
                        Ok(outcome) => info!(target: NOTIFIER_LOG_TARGET, "notified {ip}: {outcome:?}"),
                        Err(err) => error!(target: NOTIFIER_LOG_TARGET, "could not notify {ip}: {err}"),
                    }
                }))
            }
        }
    }
}

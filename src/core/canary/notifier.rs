//! Runs the operator's command when the canary fires.
//!
//! The command is a template split on whitespace: the first word is the
//! program and the rest are its arguments. Every occurrence of
//! [`IP_PLACEHOLDER`] in any word is replaced by the observed address.
//!
//! ```text
//! notify-send "leak" %IP   ->   notify-send "leak" 203.0.113.5
//! ```
//!
//! The process is launched with null stdio and is not waited for beyond a
//! short completion check.
use std::net::IpAddr;
use std::panic::Location;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub const IP_PLACEHOLDER: &str = "%IP";

pub(super) const NOTIFIER_LOG_TARGET: &str = "NOTIFIER";

/// How a launched notification ended, as far as the caller waited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited(ExitStatus),
    StillRunning,
}

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("the notify command is empty, {location}")]
    EmptyCommand { location: &'static Location<'static> },

    #[error("failed to launch {program:?}: {source}, {location}")]
    NotifyFailed {
        program: String,
        source: Arc<std::io::Error>,
        location: &'static Location<'static>,
    },
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait Notifier: Sync + Send {
    /// Launches the notification for `ip`.
    ///
    /// # Errors
    ///
    /// Will return `Error::NotifyFailed` when the notification can't be launched.
    async fn notify(&self, ip: IpAddr) -> Result<Outcome, Error>;
}

/// Expands the command template for `ip`.
#[must_use]
pub fn arguments(template: &str, ip: &IpAddr) -> Vec<String> {
    let ip = ip.to_string();

    template
        .split_whitespace()
        .map(|word| word.replace(IP_PLACEHOLDER, &ip))
        .collect()
}

/// A [`Notifier`] that runs an OS command.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    template: String,
    completion_check: Duration,
}

impl CommandNotifier {
    #[must_use]
    pub fn new(template: &str, completion_check: Duration) -> Self {
        Self {
            template: template.to_owned(),
            completion_check,
        }
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    async fn notify(&self, ip: IpAddr) -> Result<Outcome, Error> {
        let mut words = arguments(&self.template, &ip).into_iter();

        let Some(program) = words.next() else {
            return Err(Error::EmptyCommand {
                location: Location::caller(),
            });
        };

        let mut child = Command::new(&program)
            .args(words)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| Error::NotifyFailed {
                program: program.clone(),
                source: Arc::new(err),
                location: Location::caller(),
            })?;

        debug!(target: NOTIFIER_LOG_TARGET, "launched {program:?} for {ip}");

        match tokio::time::timeout(self.completion_check, child.wait()).await {
            Ok(Ok(status)) => Ok(Outcome::Exited(status)),
            Ok(Err(err)) => Err(Error::NotifyFailed {
                program,
                source: Arc::new(err),
                location: Location::caller(),
            }),
            Err(_) => Ok(Outcome::StillRunning),
        }
    }
}

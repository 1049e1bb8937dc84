//! This module contains functions to handle signals.
use std::time::Duration;

use derive_more::Display;
use tokio::time::sleep;
use tracing::{error, info};

/// This is the message that the "launcher" spawned task receives from the main
/// application process to notify the service to shutdown.
#[derive(Copy, Clone, Debug, Display)]
pub enum Halted {
    Normal,
}

/// Resolves on `ctrl_c` or the `terminate` signal.
///
/// A handler that can't be installed never resolves. The other one still
/// can.
pub async fn global_shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to install the terminate signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {}
    }
}

/// Resolves when the `rx_halt` or the `global_shutdown_signal()` resolves.
///
/// A dropped halt sender is not a halt: only the global signal is waited for
/// then.
pub async fn shutdown_signal(rx_halt: tokio::sync::oneshot::Receiver<Halted>) {
    let halt = async {
        match rx_halt.await {
            Ok(signal) => signal,
            Err(_) => std::future::pending().await,
        }
    };

    tokio::select! {
        signal = halt => { info!("Halt signal processed: {}", signal) },
        () = global_shutdown_signal() => { info!("Global shutdown signal processed") }
    }
}

/// Same as `shutdown_signal()`, but shows a message when it resolves.
pub async fn shutdown_signal_with_message(rx_halt: tokio::sync::oneshot::Receiver<Halted>, message: String) {
    shutdown_signal(rx_halt).await;

    info!("{message}");
}

/// Waits for the shutdown signal and then gives the open connections of an
/// axum server `grace_period` to finish.
pub async fn graceful_shutdown(
    handle: axum_server::Handle,
    rx_halt: tokio::sync::oneshot::Receiver<Halted>,
    message: String,
    grace_period: Duration,
) {
    shutdown_signal_with_message(rx_halt, message).await;

    info!("Sending graceful shutdown signal");
    handle.graceful_shutdown(Some(grace_period));

    while handle.connection_count() > 0 {
        info!("remaining alive connections: {}", handle.connection_count());

        sleep(Duration::from_secs(1)).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{shutdown_signal, Halted};

    #[tokio::test]
    async fn the_shutdown_signal_should_resolve_on_halt() {
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        tx_halt.send(Halted::Normal).unwrap();

        tokio::time::timeout(Duration::from_secs(1), shutdown_signal(rx_halt))
            .await
            .expect("it should resolve once halted");
    }

    #[tokio::test]
    async fn a_dropped_halt_sender_should_not_resolve_the_shutdown_signal() {
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        drop(tx_halt);

        assert!(tokio::time::timeout(Duration::from_millis(100), shutdown_signal(rx_halt))
            .await
            .is_err());
    }
}

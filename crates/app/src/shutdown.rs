//! Stop signals for long-running commands

use std::io;

use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum StopSignalError {
    #[error("could not listen for Ctrl+C: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("could not listen for SIGTERM: {0}")]
    Terminate(#[source] io::Error),
}

/// Resolves on the first Ctrl+C, or SIGTERM on Unix.
pub(crate) async fn stop_requested() -> Result<(), StopSignalError> {
    let interrupt = async { signal::ctrl_c().await.map_err(StopSignalError::Interrupt) };

    #[cfg(unix)]
    let terminate = async {
        let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(StopSignalError::Terminate)?;
        stream.recv().await;

        Ok::<(), StopSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), StopSignalError>>();

    tokio::select! {
        result = interrupt => {
            result?;
            info!(signal = "interrupt", "stopping");
        }
        result = terminate => {
            result?;
            info!(signal = "terminate", "stopping");
        }
    }

    Ok(())
}

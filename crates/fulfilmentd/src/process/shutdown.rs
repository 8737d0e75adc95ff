use std::future;

use tracing::{info, warn};

use super::PROCESS_TARGET;

/// Resolves once the process receives an interrupt or termination signal.
///
/// A signal source that cannot be installed is logged and ignored; if none
/// can be installed the future never resolves.
pub(crate) async fn termination_signal() {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(source) => {
                warn!(
                    target: PROCESS_TARGET,
                    error = %source,
                    "failed to install interrupt handler"
                );
                future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(source) => {
                warn!(
                    target: PROCESS_TARGET,
                    error = %source,
                    "failed to install termination handler"
                );
                future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<&'static str>();

    let signal = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    info!(
        target: PROCESS_TARGET,
        signal,
        "shutdown signal received"
    );
}

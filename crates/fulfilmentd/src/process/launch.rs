//! Supervises daemon launch sequencing and runtime orchestration.

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use fulfilment::Dispatcher;

use crate::bootstrap::{ConfigLoader, Daemon, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::transport::{WebhookListener, webhook_router};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::termination_signal;

/// Runs the daemon using the production collaborators.
///
/// `register` installs the action handlers before the listener starts. The
/// call blocks until an interrupt or termination signal has been handled and
/// in-flight requests have drained.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, runtime construction or the
/// listener fails.
pub fn run_daemon<R>(register: R) -> Result<(), LaunchError>
where
    R: FnOnce(&mut Dispatcher),
{
    let reporter: Arc<dyn HealthReporter> = Arc::new(StructuredHealthReporter::new());
    run_daemon_with(&SystemConfigLoader, reporter, register, termination_signal())
}

/// Runs the daemon with injected collaborators.
pub(crate) fn run_daemon_with<R, F>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    register: R,
    shutdown: F,
) -> Result<(), LaunchError>
where
    R: FnOnce(&mut Dispatcher),
    F: Future<Output = ()> + Send + 'static,
{
    let mut daemon = bootstrap_with(loader, reporter)?;
    daemon.register_with(register);
    info!(
        target: PROCESS_TARGET,
        actions = ?daemon.dispatcher().registry().actions(),
        "starting daemon runtime"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| LaunchError::Runtime { source })?;
    runtime.block_on(serve(daemon, shutdown))
}

async fn serve<F>(daemon: Daemon, shutdown: F) -> Result<(), LaunchError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (config, dispatcher, reporter) = daemon.into_parts();

    let listener = match WebhookListener::bind(config.listen()).await {
        Ok(listener) => listener,
        Err(error) => {
            reporter.listener_failed(&error);
            return Err(error.into());
        }
    };
    reporter.listener_ready(listener.local_addr(), config.webhook_path());

    let router = webhook_router(config.webhook_path(), Arc::new(dispatcher));
    if let Err(error) = listener.serve(router, shutdown).await {
        reporter.listener_failed(&error);
        return Err(error.into());
    }

    info!(
        target: PROCESS_TARGET,
        "shutdown sequence completed"
    );
    Ok(())
}

//! TCP listener serving the webhook router.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::{TcpListener, lookup_host};
use tracing::{debug, info};

use fulfilment_config::ListenEndpoint;

use super::TRANSPORT_TARGET;
use super::errors::ListenerError;

/// Bound listener ready to serve webhook calls.
#[derive(Debug)]
pub struct WebhookListener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl WebhookListener {
    /// Resolves `endpoint` and binds the first address that accepts.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when resolution fails or no resolved
    /// address can be bound.
    pub async fn bind(endpoint: &ListenEndpoint) -> Result<Self, ListenerError> {
        let authority = endpoint.authority();
        let addresses = lookup_host(authority.as_str())
            .await
            .map_err(|source| ListenerError::Resolve {
                authority: authority.clone(),
                source,
            })?;

        let mut failure = None;
        for addr in addresses {
            match TcpListener::bind(addr).await {
                Ok(listener) => return Self::from_listener(listener),
                Err(source) => {
                    debug!(
                        target: TRANSPORT_TARGET,
                        %addr,
                        error = %source,
                        "bind attempt failed"
                    );
                    failure = Some(ListenerError::Bind { addr, source });
                }
            }
        }
        Err(failure.unwrap_or(ListenerError::ResolveEmpty { authority }))
    }

    fn from_listener(listener: TcpListener) -> Result<Self, ListenerError> {
        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::LocalAddr { source })?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Returns the address the listener is bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves `router` until `shutdown` resolves, then drains open requests.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Serve`] when the server loop fails.
    pub async fn serve<F>(self, router: Router, shutdown: F) -> Result<(), ListenerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            target: TRANSPORT_TARGET,
            address = %self.local_addr,
            "serving webhook calls"
        );
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ListenerError::Serve { source })
    }
}

//! Error types for webhook listener operations.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while binding or running the webhook listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Host name resolution failed.
    #[error("failed to resolve TCP address {authority}: {source}")]
    Resolve {
        /// `host:port` being resolved.
        authority: String,
        /// Resolver failure.
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("no TCP addresses resolved for {authority}")]
    ResolveEmpty {
        /// `host:port` being resolved.
        authority: String,
    },
    /// Every resolved address refused the bind; the last failure is kept.
    #[error("failed to bind TCP listener at {addr}: {source}")]
    Bind {
        /// Address that failed last.
        addr: SocketAddr,
        /// Bind failure.
        #[source]
        source: io::Error,
    },
    /// The bound socket did not report its local address.
    #[error("failed to read listener address: {source}")]
    LocalAddr {
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// The server loop stopped with an error.
    #[error("webhook server failed: {source}")]
    Serve {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

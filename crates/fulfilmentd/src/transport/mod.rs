//! HTTP transport hosting the webhook dispatcher.
//!
//! A single POST route feeds request headers and the raw body to the shared
//! [`fulfilment::Dispatcher`] and renders its answer verbatim. Dispatch runs
//! on the blocking pool so slow handlers never stall the accept loop.

mod errors;
mod headers;
mod listener;
mod routes;


pub use self::errors::ListenerError;
pub use self::headers::HttpHeaders;
pub use self::listener::WebhookListener;
pub use self::routes::webhook_router;

/// Tracing target for transport operations.
pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

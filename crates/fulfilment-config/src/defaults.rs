//! Built-in configuration defaults.

use fulfilment::DEFAULT_CREDENTIAL_HEADER;

use crate::endpoint::ListenEndpoint;
use crate::logging::LogFormat;

/// Default host the webhook server binds.
pub const DEFAULT_LISTEN_HOST: &str = "127.0.0.1";

/// Default TCP port the webhook server binds.
pub const DEFAULT_LISTEN_PORT: u16 = 5000;

/// Default route receiving webhook calls.
pub const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

/// Default identity stamped into fulfilment responses.
pub const DEFAULT_IDENTITY: &str = "fulfilmentd";

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default listening endpoint.
#[must_use]
pub fn default_listen() -> ListenEndpoint {
    ListenEndpoint::tcp(DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT)
}

/// Owned default webhook path, for serde.
#[must_use]
pub fn default_webhook_path() -> String {
    DEFAULT_WEBHOOK_PATH.to_owned()
}

/// Owned default identity, for serde.
#[must_use]
pub fn default_identity() -> String {
    DEFAULT_IDENTITY.to_owned()
}

/// Owned default credential header, for serde.
#[must_use]
pub fn default_credential_header() -> String {
    DEFAULT_CREDENTIAL_HEADER.to_owned()
}

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

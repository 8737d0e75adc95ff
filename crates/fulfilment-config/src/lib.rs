//! Layered configuration for the fulfilment daemon.
//!
//! [`Config`] is assembled by `ortho_config` from built-in defaults, an
//! optional TOML file selected with `--config-path`, `FULFILMENT_*`
//! environment variables, and command-line flags, in increasing order of
//! precedence. Loading only checks that each layer parses; call
//! [`Config::validate`] before using the result.

mod defaults;
mod endpoint;
mod logging;

use fulfilment::CredentialConfig;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::defaults::{
    DEFAULT_IDENTITY, DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_LOG_FILTER,
    DEFAULT_WEBHOOK_PATH, default_credential_header, default_identity, default_listen,
    default_log_filter, default_log_filter_string, default_log_format, default_webhook_path,
};
pub use self::endpoint::{EndpointParseError, ListenEndpoint};
pub use self::logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for the fulfilment daemon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "FULFILMENT")]
pub struct Config {
    /// Address the webhook server binds.
    #[serde(default = "default_listen")]
    pub listen: ListenEndpoint,
    /// Route receiving webhook calls.
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
    /// Identity stamped into every response's `source`.
    #[serde(default = "default_identity")]
    pub identity: String,
    /// Header carrying the shared secret.
    #[serde(default = "default_credential_header")]
    pub credential_header: String,
    /// Expected shared secret; unset admits unauthenticated calls.
    #[serde(default)]
    pub credential_value: Option<String>,
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            webhook_path: default_webhook_path(),
            identity: default_identity(),
            credential_header: default_credential_header(),
            credential_value: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Returns the listening endpoint.
    #[must_use]
    pub const fn listen(&self) -> &ListenEndpoint {
        &self.listen
    }

    /// Returns the webhook route.
    #[must_use]
    pub fn webhook_path(&self) -> &str {
        &self.webhook_path
    }

    /// Returns the dispatcher identity.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Builds the credential settings for the dispatcher.
    #[must_use]
    pub fn credential(&self) -> CredentialConfig {
        CredentialConfig::new(
            self.credential_header.as_str(),
            self.credential_value.clone(),
        )
    }

    /// Checks values that parse but cannot be served.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.trim().is_empty() {
            return Err(ConfigError::EmptyIdentity);
        }
        if !self.webhook_path.starts_with('/') {
            return Err(ConfigError::InvalidWebhookPath {
                path: self.webhook_path.clone(),
            });
        }
        if self.credential_header.trim().is_empty() {
            return Err(ConfigError::EmptyCredentialHeader);
        }
        if self
            .credential_value
            .as_deref()
            .is_some_and(str::is_empty)
        {
            return Err(ConfigError::EmptyCredentialValue);
        }
        if self.listen.port() == 0 {
            return Err(ConfigError::UnassignedPort {
                endpoint: self.listen.clone(),
            });
        }
        Ok(())
    }
}

/// Configuration values rejected by [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The identity was blank.
    #[error("identity must not be empty")]
    EmptyIdentity,
    /// The webhook path was not absolute.
    #[error("webhook path '{path}' must start with '/'")]
    InvalidWebhookPath {
        /// Rejected path.
        path: String,
    },
    /// The credential header name was blank.
    #[error("credential header must not be empty")]
    EmptyCredentialHeader,
    /// The credential value was set to an empty string.
    #[error("credential value must not be empty; omit it to disable authentication")]
    EmptyCredentialValue,
    /// The listening port was zero.
    #[error("listen endpoint '{endpoint}' must name a non-zero port")]
    UnassignedPort {
        /// Rejected endpoint.
        endpoint: ListenEndpoint,
    },
}

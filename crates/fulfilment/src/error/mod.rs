//! Error types for webhook dispatch failures.
//!
//! [`DispatchError`] describes every way a webhook call can fail between the
//! credential gate and response serialization. Each variant maps onto an HTTP
//! status through [`DispatchError::status_code`]. Only the credential and
//! unknown-action failures are rendered as responses by the dispatcher; the
//! remaining variants propagate to the caller so the hosting transport decides
//! how to surface them.

use thiserror::Error;

/// Boxed error used to wrap arbitrary handler failures.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced while authenticating, parsing, and dispatching a webhook.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A credential is configured but the request omitted its header.
    #[error("{header} http header is required")]
    MissingCredential {
        /// Name of the header that was expected.
        header: String,
    },

    /// The credential header was present but did not match.
    #[error("{header} is invalid")]
    InvalidCredential {
        /// Name of the header that carried the rejected value.
        header: String,
    },

    /// The body was not JSON or did not contain a usable `result` section.
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Human-readable description of the defect.
        message: String,
        /// Underlying decoder failure, when one exists.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// No handler is registered under the requested action key.
    #[error("no handler registered for action '{action}'")]
    UnknownAction {
        /// Action key carried by the request.
        action: String,
    },

    /// The request parameters could not be bound to the handler signature.
    #[error("cannot bind parameters for action '{action}': {source}")]
    Binding {
        /// Action whose handler rejected the parameters.
        action: String,
        /// Binding failure detail.
        #[source]
        source: BindingError,
    },

    /// The handler ran but reported a failure.
    #[error("handler for action '{action}' failed: {source}")]
    HandlerFailure {
        /// Action whose handler failed.
        action: String,
        /// Failure reported by the handler.
        #[source]
        source: HandlerError,
    },

    /// The fulfilment response could not be serialised.
    #[error("failed to serialise response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Returns the HTTP status associated with this failure.
    ///
    /// Credential problems map to 400 and 401, unknown actions to 404, and
    /// every other failure to 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredential { .. } => 400,
            Self::InvalidCredential { .. } => 401,
            Self::UnknownAction { .. } => 404,
            Self::MalformedRequest { .. }
            | Self::Binding { .. }
            | Self::HandlerFailure { .. }
            | Self::SerializeResponse(_) => 500,
        }
    }

    /// Returns `true` when the dispatcher answers this failure itself.
    ///
    /// Short-circuit failures become plain-text responses carrying
    /// [`Self::status_code`]; all others are returned as `Err`.
    #[must_use]
    pub const fn is_short_circuit(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::InvalidCredential { .. }
                | Self::UnknownAction { .. }
        )
    }

    /// Creates a missing credential error for the given header.
    pub fn missing_credential(header: impl Into<String>) -> Self {
        Self::MissingCredential {
            header: header.into(),
        }
    }

    /// Creates an invalid credential error for the given header.
    pub fn invalid_credential(header: impl Into<String>) -> Self {
        Self::InvalidCredential {
            header: header.into(),
        }
    }

    /// Creates a malformed request error from a decoder failure.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unknown action error.
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Wraps a binding failure for the given action.
    pub fn binding(action: impl Into<String>, source: BindingError) -> Self {
        Self::Binding {
            action: action.into(),
            source,
        }
    }

    /// Wraps a handler failure for the given action.
    pub fn handler_failure(action: impl Into<String>, source: HandlerError) -> Self {
        Self::HandlerFailure {
            action: action.into(),
            source,
        }
    }
}

/// Mismatch between request parameters and a handler's declared parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A required parameter was absent from the request.
    #[error("missing required parameter '{name}'")]
    MissingParameter {
        /// Name of the absent parameter.
        name: String,
    },

    /// The request carried a parameter the handler does not declare.
    #[error("unexpected parameter '{name}'")]
    UnexpectedParameter {
        /// Name of the undeclared parameter.
        name: String,
    },
}

impl BindingError {
    /// Creates a missing parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates an unexpected parameter error.
    pub fn unexpected(name: impl Into<String>) -> Self {
        Self::UnexpectedParameter { name: name.into() }
    }
}

/// Failure reported by an action handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A bound argument had the wrong shape for the handler.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: String,
        /// Description of the mismatch.
        message: String,
    },

    /// The handler rejected the request with a message.
    #[error("{message}")]
    Failed {
        /// Description supplied by the handler.
        message: String,
    },

    /// The handler propagated an arbitrary error.
    #[error("{source}")]
    Other {
        /// Wrapped error.
        #[source]
        source: BoxedError,
    },
}

impl HandlerError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a failure carrying only a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Wraps an arbitrary error raised inside a handler.
    pub fn other(source: impl Into<BoxedError>) -> Self {
        Self::Other {
            source: source.into(),
        }
    }
}

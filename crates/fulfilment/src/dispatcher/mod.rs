//! Webhook dispatch: authenticate, parse, route, invoke, respond.
//!
//! A [`Dispatcher`] is configured once with an agent identity, credential
//! settings, and a set of handlers, then shared read-only across request
//! workers. Each call walks the same pipeline:
//!
//! 1. check the credential header, before the body is looked at;
//! 2. parse the body into an action key and parameters;
//! 3. look up the handler for the action;
//! 4. bind the parameters to the handler's declaration;
//! 5. invoke the handler and serialise its fulfilment.
//!
//! Credential failures and unknown actions are answered with plain-text
//! responses. Everything else that goes wrong is returned as an error.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::credential::{CredentialConfig, CredentialGate, HeaderLookup};
use crate::error::DispatchError;
use crate::handler::ActionHandler;
use crate::registry::ActionRegistry;
use crate::request::IncomingRequest;
use crate::response::WebhookResponse;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes webhook calls to registered action handlers.
#[derive(Debug)]
pub struct Dispatcher {
    identity: String,
    gate: CredentialGate,
    registry: ActionRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher with no handlers.
    ///
    /// Logs a warning when `credential` carries no secret; the webhook then
    /// accepts unauthenticated calls.
    pub fn new(identity: impl Into<String>, credential: CredentialConfig) -> Self {
        let identity = identity.into();
        let gate = CredentialGate::new(credential);
        if !gate.is_enabled() {
            warn!(
                target: DISPATCH_TARGET,
                identity = %identity,
                header = gate.header_name(),
                "no credential value configured; webhook accepts unauthenticated requests"
            );
        }
        Self {
            identity,
            gate,
            registry: ActionRegistry::new(),
        }
    }

    /// Returns the identity stamped into every response's `source`.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the header inspected by the credential gate.
    #[must_use]
    pub fn credential_header(&self) -> &str {
        self.gate.header_name()
    }

    /// Returns whether calls must present the credential.
    #[must_use]
    pub const fn requires_credential(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Returns the handler registry.
    #[must_use]
    pub const fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Registers `handler` under `action`, replacing any existing handler.
    pub fn register<H>(&mut self, action: impl Into<String>, handler: H)
    where
        H: ActionHandler + 'static,
    {
        self.registry.register(action, handler);
    }

    /// Handles a raw webhook call.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed bodies, binding failures, handler
    /// failures, and serialisation failures. Credential failures and unknown
    /// actions are returned as `Ok` responses carrying their status.
    pub fn handle<H>(&self, headers: &H, body: &[u8]) -> Result<WebhookResponse, DispatchError>
    where
        H: HeaderLookup + ?Sized,
    {
        if let Err(rejection) = self.gate.check(headers) {
            return Ok(self.reject(&rejection));
        }
        debug!(
            target: DISPATCH_TARGET,
            body = %String::from_utf8_lossy(body),
            "received webhook request"
        );
        let request = IncomingRequest::parse(body)?;
        self.dispatch(request)
    }

    /// Handles a webhook call whose body is already decoded.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Self::handle`].
    pub fn handle_value<H>(
        &self,
        headers: &H,
        body: &Value,
    ) -> Result<WebhookResponse, DispatchError>
    where
        H: HeaderLookup + ?Sized,
    {
        if let Err(rejection) = self.gate.check(headers) {
            return Ok(self.reject(&rejection));
        }
        debug!(target: DISPATCH_TARGET, body = %body, "received webhook request");
        let request = IncomingRequest::from_value(body)?;
        self.dispatch(request)
    }

    fn dispatch(&self, request: IncomingRequest) -> Result<WebhookResponse, DispatchError> {
        let (action, parameters) = request.into_parts();
        let Some(handler) = self.registry.lookup(&action) else {
            return Ok(self.reject(&DispatchError::unknown_action(action)));
        };

        debug!(
            target: DISPATCH_TARGET,
            action = %action,
            parameters = parameters.len(),
            "dispatching action"
        );
        let arguments = handler
            .parameters()
            .bind(parameters)
            .map_err(|source| DispatchError::binding(action.as_str(), source))?;
        let fulfilment = handler
            .handle(&arguments)
            .map_err(|source| DispatchError::handler_failure(action.as_str(), source))?;

        let body = serde_json::to_string(&fulfilment.into_response(self.identity.as_str()))?;
        debug!(target: DISPATCH_TARGET, action = %action, response = %body, "action fulfilled");
        Ok(WebhookResponse::json(body))
    }

    fn reject(&self, rejection: &DispatchError) -> WebhookResponse {
        match rejection {
            DispatchError::UnknownAction { action } => warn!(
                target: DISPATCH_TARGET,
                identity = %self.identity,
                action = %action,
                "no handler registered for action"
            ),
            _ => error!(
                target: DISPATCH_TARGET,
                identity = %self.identity,
                status = rejection.status_code(),
                error = %rejection,
                "webhook call rejected"
            ),
        }
        WebhookResponse::from_error(rejection)
    }
}

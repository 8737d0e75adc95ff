//! In-process client for exercising a [`Dispatcher`] without a server.
//!
//! The client builds webhook bodies in the platform's shape and attaches the
//! credential header, so handler tests read like calls from the platform.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::response::WebhookResponse;

/// Sends synthetic webhook calls to a dispatcher.
#[derive(Debug)]
pub struct WebhookTestClient<'a> {
    dispatcher: &'a Dispatcher,
    headers: BTreeMap<String, String>,
}

impl<'a> WebhookTestClient<'a> {
    /// Creates a client that sends no headers.
    #[must_use]
    pub const fn new(dispatcher: &'a Dispatcher) -> Self {
        Self {
            dispatcher,
            headers: BTreeMap::new(),
        }
    }

    /// Sends `value` in the dispatcher's credential header.
    #[must_use]
    pub fn with_credential(self, value: impl Into<String>) -> Self {
        let header = self.dispatcher.credential_header().to_owned();
        self.with_header(header, value)
    }

    /// Sends an arbitrary header with every call.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Calls `action` with `parameters`.
    ///
    /// A `None` action is sent as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the dispatcher propagates.
    pub fn call(
        &self,
        action: Option<&str>,
        parameters: Map<String, Value>,
    ) -> Result<WebhookResponse, DispatchError> {
        let body = json!({"result": {"action": action, "parameters": parameters}});
        self.dispatcher.handle_value(&self.headers, &body)
    }

    /// Calls `action` without parameters.
    ///
    /// # Errors
    ///
    /// Returns whatever error the dispatcher propagates.
    pub fn call_action(&self, action: &str) -> Result<WebhookResponse, DispatchError> {
        self.call(Some(action), Map::new())
    }

    /// Sends a raw body, bypassing the request builder.
    ///
    /// # Errors
    ///
    /// Returns whatever error the dispatcher propagates.
    pub fn send_raw(&self, body: &[u8]) -> Result<WebhookResponse, DispatchError> {
        self.dispatcher.handle(&self.headers, body)
    }
}

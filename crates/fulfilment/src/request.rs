//! Webhook request parsing.
//!
//! The platform posts a JSON object whose `result` member names the matched
//! action and carries its parameters:
//!
//! ```json
//! {"result": {"action": "hello-world", "parameters": {"name": "Ada"}}}
//! ```
//!
//! An absent or `null` action is the empty action key and absent or `null`
//! parameters are an empty object. Any other member of the body, or of
//! `result`, is ignored.

use serde_json::{Map, Value};

use crate::error::DispatchError;

/// Action key and parameters extracted from a webhook body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    action: String,
    parameters: Map<String, Value>,
}

impl IncomingRequest {
    /// Creates a request directly from its parts.
    pub fn new(action: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            action: action.into(),
            parameters,
        }
    }

    /// Parses a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedRequest`] when the body is empty, is
    /// not JSON, lacks a `result` object, or carries a non-string action or
    /// non-object parameters.
    pub fn parse(body: &[u8]) -> Result<Self, DispatchError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DispatchError::malformed("request body is empty"));
        }
        let value: Value = serde_json::from_slice(body).map_err(DispatchError::from_json_error)?;
        Self::from_value(&value)
    }

    /// Extracts a request from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedRequest`] under the same conditions
    /// as [`Self::parse`], minus the JSON syntax checks.
    pub fn from_value(body: &Value) -> Result<Self, DispatchError> {
        let Value::Object(envelope) = body else {
            return Err(DispatchError::malformed("request body must be a JSON object"));
        };
        let result = match envelope.get("result") {
            Some(Value::Object(result)) => result,
            Some(_) => return Err(DispatchError::malformed("`result` must be an object")),
            None => return Err(DispatchError::malformed("request body has no `result` object")),
        };
        let action = match result.get("action") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(action)) => action.clone(),
            Some(_) => return Err(DispatchError::malformed("`result.action` must be a string")),
        };
        let parameters = match result.get("parameters") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(parameters)) => parameters.clone(),
            Some(_) => {
                return Err(DispatchError::malformed(
                    "`result.parameters` must be an object",
                ));
            }
        };
        Ok(Self { action, parameters })
    }

    /// Returns the action key.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the request parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Splits the request into its action key and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.action, self.parameters)
    }
}

//! Fulfilment payloads returned to the conversational platform.
//!
//! Handlers build a [`Fulfilment`]; the dispatcher stamps it with the agent
//! identity to produce the wire-level [`FulfilmentResponse`] and wraps the
//! serialised JSON in a [`WebhookResponse`] for the hosting transport.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DispatchError;

/// Content type of successful fulfilment responses.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of short-circuit error responses.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Conversational context the platform should activate after this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputContext {
    /// Context name.
    pub name: String,
    /// Number of turns the context stays active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,
    /// Parameters attached to the context.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl OutputContext {
    /// Creates a context with no lifespan or parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifespan: None,
            parameters: Map::new(),
        }
    }

    /// Sets the number of turns the context stays active.
    #[must_use]
    pub const fn with_lifespan(mut self, lifespan: u32) -> Self {
        self.lifespan = Some(lifespan);
        self
    }

    /// Attaches a parameter to the context.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Event the platform should trigger instead of answering directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupEvent {
    /// Event name.
    pub name: String,
    /// Data delivered with the event.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl FollowupEvent {
    /// Creates an event with no data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Map::new(),
        }
    }

    /// Attaches a data entry to the event.
    #[must_use]
    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }
}

/// Result produced by an action handler.
///
/// Every field is optional; an empty fulfilment is a valid answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fulfilment {
    speech: Option<String>,
    display_text: Option<String>,
    data: Option<Value>,
    context_out: Vec<OutputContext>,
    followup_event: Option<FollowupEvent>,
}

impl Fulfilment {
    /// Creates an empty fulfilment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            speech: None,
            display_text: None,
            data: None,
            context_out: Vec::new(),
            followup_event: None,
        }
    }

    /// Creates a fulfilment that speaks the given text.
    pub fn speech(text: impl Into<String>) -> Self {
        Self::new().with_speech(text)
    }

    /// Sets the spoken text.
    #[must_use]
    pub fn with_speech(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    /// Sets the text shown on screen-capable surfaces.
    #[must_use]
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    /// Sets the platform-specific data payload.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Appends an output context.
    #[must_use]
    pub fn with_context(mut self, context: OutputContext) -> Self {
        self.context_out.push(context);
        self
    }

    /// Sets the follow-up event.
    #[must_use]
    pub fn with_followup_event(mut self, event: FollowupEvent) -> Self {
        self.followup_event = Some(event);
        self
    }

    /// Returns the spoken text, if any.
    #[must_use]
    pub fn speech_text(&self) -> Option<&str> {
        self.speech.as_deref()
    }

    /// Returns the display text, if any.
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    /// Returns the output contexts in insertion order.
    #[must_use]
    pub fn context_out(&self) -> &[OutputContext] {
        &self.context_out
    }

    /// Stamps the fulfilment with the agent identity.
    pub fn into_response(self, source: impl Into<String>) -> FulfilmentResponse {
        FulfilmentResponse {
            speech: self.speech,
            display_text: self.display_text,
            data: self.data,
            context_out: self.context_out,
            source: source.into(),
            followup_event: self.followup_event,
        }
    }
}

/// Wire representation of a fulfilment.
///
/// All six keys are always serialised; unset values appear as `null` and
/// `contextOut` defaults to an empty array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfilmentResponse {
    /// Spoken text.
    pub speech: Option<String>,
    /// Display text.
    pub display_text: Option<String>,
    /// Platform-specific payload.
    pub data: Option<Value>,
    /// Output contexts.
    #[serde(default)]
    pub context_out: Vec<OutputContext>,
    /// Identity of the agent that produced the response.
    pub source: String,
    /// Follow-up event.
    pub followup_event: Option<FollowupEvent>,
}

/// Transport-neutral HTTP response produced by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl WebhookResponse {
    /// Creates a 200 response carrying a serialised fulfilment.
    #[must_use]
    pub const fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }

    /// Renders a dispatch failure as a plain-text response.
    #[must_use]
    pub fn from_error(error: &DispatchError) -> Self {
        Self {
            status: error.status_code(),
            content_type: TEXT_CONTENT_TYPE,
            body: error.to_string(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the content type header value.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning its body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Decodes the body as a fulfilment response.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not a serialised
    /// [`FulfilmentResponse`], which is always the case for short-circuit
    /// error responses.
    pub fn fulfilment(&self) -> Result<FulfilmentResponse, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

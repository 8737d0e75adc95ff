//! Webhook fulfilment for conversational agents.
//!
//! The `fulfilment` crate answers webhook calls from a conversational
//! platform. The platform posts the action it matched together with the
//! parameters it extracted; the crate authenticates the call, routes it to
//! the handler registered for that action, binds the parameters to the
//! handler's declaration, and serialises the handler's answer into the
//! platform's response shape.
//!
//! The crate is transport-neutral. A [`Dispatcher`] consumes headers and a
//! body and produces a [`WebhookResponse`] (status, content type, body);
//! hosting it behind an HTTP server is left to the embedding application.
//!
//! # Example
//!
//! ```
//! use fulfilment::{CredentialConfig, Dispatcher, Fulfilment, ParameterSpec, handler_fn};
//!
//! let mut dispatcher = Dispatcher::new("hello-agent", CredentialConfig::required("secret"));
//! dispatcher.register(
//!     "hello-world",
//!     handler_fn(ParameterSpec::new().optional("name", "World"), |args| {
//!         let name = args.str("name").unwrap_or("World");
//!         Ok(Fulfilment::speech(format!("Hello, {name}!")))
//!     }),
//! );
//!
//! let body = br#"{"result":{"action":"hello-world","parameters":{"name":"Ada"}}}"#;
//! let response = dispatcher
//!     .handle(&[("api-key", "secret")], body)
//!     .expect("dispatch succeeds");
//! assert_eq!(response.status(), 200);
//! ```

pub mod binding;
pub mod credential;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod registry;
pub mod request;
pub mod response;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use self::binding::{Arguments, ParameterSpec};
pub use self::credential::{
    CredentialConfig, CredentialGate, DEFAULT_CREDENTIAL_HEADER, HeaderLookup,
};
pub use self::dispatcher::Dispatcher;
pub use self::error::{BindingError, BoxedError, DispatchError, HandlerError};
pub use self::handler::{ActionHandler, FnHandler, handler_fn};
pub use self::registry::ActionRegistry;
pub use self::request::IncomingRequest;
pub use self::response::{
    FollowupEvent, Fulfilment, FulfilmentResponse, JSON_CONTENT_TYPE, OutputContext,
    TEXT_CONTENT_TYPE, WebhookResponse,
};

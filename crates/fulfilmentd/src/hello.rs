//! Sample `hello-world` action served by the stock daemon binary.

use fulfilment::{ActionHandler, Dispatcher, Fulfilment, ParameterSpec, handler_fn};

/// Action name answered by [`hello_world`].
pub const HELLO_WORLD_ACTION: &str = "hello-world";

/// Greets the optional `name` parameter, defaulting to `World`.
pub fn hello_world() -> impl ActionHandler {
    handler_fn(
        ParameterSpec::new().optional("name", "World"),
        |arguments| {
            let name = arguments.str("name").unwrap_or("World");
            Ok(Fulfilment::speech(format!("Hello, {name}!")))
        },
    )
}

/// Registers [`hello_world`] under [`HELLO_WORLD_ACTION`].
pub fn register_hello_world(dispatcher: &mut Dispatcher) {
    dispatcher.register(HELLO_WORLD_ACTION, hello_world());
}

#[cfg(test)]
mod tests {
    use fulfilment::{CredentialConfig, testing::WebhookTestClient};
    use rstest::rstest;
    use serde_json::{Map, json};

    use super::*;

    #[rstest]
    #[case::default_name(json!({}), "Hello, World!")]
    #[case::named(json!({"name": "Ada"}), "Hello, Ada!")]
    fn greets(#[case] parameters: serde_json::Value, #[case] expected: &str) {
        let mut dispatcher = Dispatcher::new("hello-test", CredentialConfig::disabled());
        register_hello_world(&mut dispatcher);
        let parameters: Map<String, serde_json::Value> =
            serde_json::from_value(parameters).expect("object");
        let response = WebhookTestClient::new(&dispatcher)
            .call(Some(HELLO_WORLD_ACTION), parameters)
            .expect("dispatch succeeds");
        let fulfilment = response.fulfilment().expect("json envelope");
        assert_eq!(fulfilment.speech.as_deref(), Some(expected));
    }
}

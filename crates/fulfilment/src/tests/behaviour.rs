//! Behavioural tests for webhook dispatch.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Map, Value, json};

use crate::testing::WebhookTestClient;
use crate::{
    CredentialConfig, DispatchError, Dispatcher, Fulfilment, HandlerError, ParameterSpec,
    WebhookResponse, handler_fn,
};

#[derive(Default)]
struct DispatchWorld {
    dispatcher: Option<Dispatcher>,
    outcome: Option<Result<WebhookResponse, DispatchError>>,
}

impl DispatchWorld {
    fn dispatcher(&self) -> &Dispatcher {
        self.dispatcher.as_ref().expect("dispatcher configured")
    }

    fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        self.dispatcher.as_mut().expect("dispatcher configured")
    }

    fn call(&mut self, action: &str, parameters: Map<String, Value>) {
        let outcome = WebhookTestClient::new(self.dispatcher()).call(Some(action), parameters);
        self.outcome = Some(outcome);
    }

    fn response(&self) -> &WebhookResponse {
        match self.outcome.as_ref().expect("webhook called") {
            Ok(response) => response,
            Err(error) => panic!("expected a response, dispatch failed: {error}"),
        }
    }

    fn error(&self) -> &DispatchError {
        match self.outcome.as_ref().expect("webhook called") {
            Err(error) => error,
            Ok(response) => panic!("expected dispatch to fail, got {response:?}"),
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

#[fixture]
fn world() -> RefCell<DispatchWorld> {
    RefCell::new(DispatchWorld::default())
}

#[given("an open dispatcher named \"{identity}\"")]
fn given_open_dispatcher(world: &RefCell<DispatchWorld>, identity: String) {
    world.borrow_mut().dispatcher = Some(Dispatcher::new(
        strip_quotes(&identity),
        CredentialConfig::disabled(),
    ));
}

#[given("a dispatcher named \"{identity}\" requiring \"{secret}\" in header \"{header}\"")]
fn given_guarded_dispatcher(
    world: &RefCell<DispatchWorld>,
    identity: String,
    secret: String,
    header: String,
) {
    let credential =
        CredentialConfig::required(strip_quotes(&secret)).with_header_name(strip_quotes(&header));
    world.borrow_mut().dispatcher = Some(Dispatcher::new(strip_quotes(&identity), credential));
}

#[given("the sample handlers are registered")]
fn given_sample_handlers(world: &RefCell<DispatchWorld>) {
    let mut state = world.borrow_mut();
    let dispatcher = state.dispatcher_mut();
    dispatcher.register(
        "hello-world",
        handler_fn(ParameterSpec::new().optional("name", "World"), |args| {
            let name = args.str("name").unwrap_or("World");
            Ok(Fulfilment::speech(format!("Hello, {name}!")))
        }),
    );
    dispatcher.register(
        "ping",
        handler_fn(ParameterSpec::new(), |_| Ok(Fulfilment::speech("pong"))),
    );
    dispatcher.register(
        "echo",
        handler_fn(ParameterSpec::new().required("text"), |args| {
            let text: String = args.get_as("text")?;
            Ok(Fulfilment::speech(text))
        }),
    );
    dispatcher.register(
        "maybe",
        handler_fn(ParameterSpec::new().optional("name", Value::Null), |args| {
            Ok(Fulfilment::speech(args.str("name").unwrap_or("nobody")))
        }),
    );
    dispatcher.register(
        "add",
        handler_fn(ParameterSpec::new().required("a").required("b"), |args| {
            let a: i64 = args.get_as("a")?;
            let b: i64 = args.get_as("b")?;
            let sum = a
                .checked_add(b)
                .ok_or_else(|| HandlerError::failed("sum overflows"))?;
            Ok(Fulfilment::speech(sum.to_string()))
        }),
    );
}

#[when("action \"{action}\" is called without parameters")]
fn when_called_without_parameters(world: &RefCell<DispatchWorld>, action: String) {
    world.borrow_mut().call(strip_quotes(&action), Map::new());
}

#[when("action \"{action}\" is called with name \"{name}\"")]
fn when_called_with_name(world: &RefCell<DispatchWorld>, action: String, name: String) {
    let mut parameters = Map::new();
    parameters.insert("name".to_owned(), json!(strip_quotes(&name)));
    world.borrow_mut().call(strip_quotes(&action), parameters);
}

#[when("action \"{action}\" is called with a {a} and b {b}")]
fn when_called_with_operands(world: &RefCell<DispatchWorld>, action: String, a: i64, b: i64) {
    let mut parameters = Map::new();
    parameters.insert("a".to_owned(), json!(a));
    parameters.insert("b".to_owned(), json!(b));
    world.borrow_mut().call(strip_quotes(&action), parameters);
}

#[when("action \"{action}\" is called with header \"{header}\" set to \"{value}\"")]
fn when_called_with_header(
    world: &RefCell<DispatchWorld>,
    action: String,
    header: String,
    value: String,
) {
    let outcome = {
        let state = world.borrow();
        WebhookTestClient::new(state.dispatcher())
            .with_header(strip_quotes(&header), strip_quotes(&value))
            .call_action(strip_quotes(&action))
    };
    world.borrow_mut().outcome = Some(outcome);
}

#[when("a body without a result section is sent")]
fn when_body_lacks_result(world: &RefCell<DispatchWorld>) {
    let outcome = {
        let state = world.borrow();
        WebhookTestClient::new(state.dispatcher()).send_raw(br#"{"action":"hello-world"}"#)
    };
    world.borrow_mut().outcome = Some(outcome);
}

#[then("the response status is {status}")]
fn then_status(world: &RefCell<DispatchWorld>, status: u16) {
    assert_eq!(world.borrow().response().status(), status);
}

#[then("the speech is \"{speech}\"")]
fn then_speech(world: &RefCell<DispatchWorld>, speech: String) {
    let fulfilment = world
        .borrow()
        .response()
        .fulfilment()
        .expect("fulfilment body");
    assert_eq!(fulfilment.speech.as_deref(), Some(strip_quotes(&speech)));
}

#[then("the source is \"{source}\"")]
fn then_source(world: &RefCell<DispatchWorld>, source: String) {
    let fulfilment = world
        .borrow()
        .response()
        .fulfilment()
        .expect("fulfilment body");
    assert_eq!(fulfilment.source, strip_quotes(&source));
}

#[then("dispatch fails with a binding error")]
fn then_binding_error(world: &RefCell<DispatchWorld>) {
    let state = world.borrow();
    assert!(
        matches!(state.error(), DispatchError::Binding { .. }),
        "unexpected error: {:?}",
        state.error()
    );
}

#[then("dispatch fails with a malformed request error")]
fn then_malformed_error(world: &RefCell<DispatchWorld>) {
    let state = world.borrow();
    assert!(
        matches!(state.error(), DispatchError::MalformedRequest { .. }),
        "unexpected error: {:?}",
        state.error()
    );
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "Hello world falls back to the default name"
)]
fn hello_world_default(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "Hello world greets the supplied name"
)]
fn hello_world_named(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "A handler without parameters answers"
)]
fn handler_without_parameters(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "A required parameter must be supplied"
)]
fn required_parameter(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "An optional parameter defaults to null"
)]
fn optional_parameter(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "Several required parameters are bound together"
)]
fn several_parameters(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "A wrong credential is rejected"
)]
fn wrong_credential(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "A misnamed credential header counts as missing"
)]
fn misnamed_credential(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "An authenticated call for an unknown action is not found"
)]
fn unknown_action(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/webhook_dispatch.feature",
    name = "A body without a result section fails dispatch"
)]
fn missing_result_section(world: RefCell<DispatchWorld>) {
    drop(world);
}

//! Behavioural tests for configuration layering.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ortho_config::OrthoConfig;
use once_cell::sync::Lazy;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use fulfilment_config::{
    Config, DEFAULT_IDENTITY, DEFAULT_WEBHOOK_PATH, ListenEndpoint, default_listen,
    default_log_filter, default_log_format,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    file_lines: RefCell<Vec<String>>,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            file_lines: RefCell::new(Vec::new()),
            cli_args: RefCell::new(vec![OsString::from("fulfilmentd")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        }
    }

    fn add_file_line(&self, line: String) {
        self.file_lines.borrow_mut().push(line);
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` on edition 2024; ENV_MUTEX keeps
        // scenarios from racing and `Drop` restores the previous values.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let mut args = self.cli_args.borrow().clone();
        let lines = self.file_lines.borrow();
        if !lines.is_empty() {
            let path = self.temp_dir.path().join("fulfilmentd.toml");
            if let Err(error) = fs::write(&path, lines.join("\n")) {
                panic!("failed to write configuration: {error}");
            }
            args.insert(1, OsString::from("--config-path"));
            args.insert(2, path.into_os_string());
        }

        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

fn parse_endpoint(raw: &str) -> ListenEndpoint {
    match raw.trim_matches('"').parse::<ListenEndpoint>() {
        Ok(endpoint) => endpoint,
        Err(error) => panic!("invalid endpoint '{raw}': {error}"),
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the listen endpoint to \"{endpoint}\"")]
fn given_file_endpoint(harness: &Harness, endpoint: String) {
    let parsed = parse_endpoint(&endpoint);
    harness.add_file_line(format!("listen = \"{parsed}\""));
}

#[given("a configuration file setting the credential value to \"{secret}\"")]
fn given_file_secret(harness: &Harness, secret: String) {
    harness.add_file_line(format!("credential_value = \"{}\"", secret.trim_matches('"')));
}

#[given("the environment overrides the listen endpoint to \"{endpoint}\"")]
fn given_environment_endpoint(harness: &Harness, endpoint: String) {
    harness.set_env("FULFILMENT_LISTEN", endpoint.trim_matches('"'));
}

#[when("the command line sets the listen endpoint to \"{endpoint}\"")]
fn when_cli_endpoint(harness: &Harness, endpoint: String) {
    harness.push_cli_arg("--listen");
    harness.push_cli_arg(endpoint.trim_matches('"'));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the listen endpoint to \"{endpoint}\"")]
fn then_resolved_endpoint(harness: &Harness, endpoint: String) {
    assert_eq!(harness.config().listen(), &parse_endpoint(&endpoint));
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.listen(), &default_listen());
    assert_eq!(config.webhook_path(), DEFAULT_WEBHOOK_PATH);
    assert_eq!(config.identity(), DEFAULT_IDENTITY);
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert!(config.credential_value.is_none());
    assert_eq!(config.validate(), Ok(()));
}

#[then("loading the configuration requires the credential \"{secret}\" in header \"{header}\"")]
fn then_credential_required(harness: &Harness, secret: String, header: String) {
    let credential = harness.config().credential();
    assert!(credential.is_enabled());
    assert_eq!(credential.expected_value(), Some(secret.trim_matches('"')));
    assert_eq!(credential.header_name(), header.trim_matches('"'));
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply without overrides"
)]
fn defaults_without_overrides(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The configuration file overrides the defaults"
)]
fn file_overrides_defaults(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_overrides_file(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The command line overrides every other layer"
)]
fn command_line_overrides_everything(harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The credential can be supplied from a file"
)]
fn credential_from_file(harness: Harness) {
    drop(harness);
}

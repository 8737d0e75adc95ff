//! Configuration fixtures covering the success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};

use fulfilment_config::Config;

use crate::bootstrap::ConfigLoader;

/// Returns a configuration suitable for in-process tests.
///
/// Compact logs keep test output readable when a subscriber is installed.
#[must_use]
pub fn test_config() -> Config {
    Config {
        identity: "daemon-test".to_owned(),
        log_format: fulfilment_config::LogFormat::Compact,
        ..Config::default()
    }
}

/// Loader that intentionally fails by passing an unsupported listen scheme.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("fulfilmentd"),
            OsString::from("--listen"),
            OsString::from("unix:///tmp/fulfilmentd.sock"),
        ];
        Config::load_from_iter(args)
    }
}

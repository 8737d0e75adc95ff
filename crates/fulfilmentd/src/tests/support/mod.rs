//! Test harness utilities for the daemon behavioural suites.

mod config_loader;
mod reporter;

pub use config_loader::{FailingConfigLoader, test_config};
pub use reporter::{HealthEvent, RecordingHealthReporter};

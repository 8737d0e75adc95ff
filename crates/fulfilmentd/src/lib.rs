//! Bootstrap and HTTP hosting for the fulfilment webhook daemon.
//!
//! The daemon loads its configuration through [`fulfilment_config`], installs
//! structured telemetry, builds a [`fulfilment::Dispatcher`] guarded by the
//! configured credential, and serves it on a single POST route. Embedders
//! supply their action handlers through the registration callback passed to
//! [`run_daemon`]; the stock binary registers only [`hello::hello_world`].
//!
//! Health reporting hooks emit structured telemetry at each lifecycle stage
//! so operators can see where a start-up failed without reading the code.

mod bootstrap;
mod health;
pub mod hello;
mod process;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, run_daemon};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{HttpHeaders, ListenerError, WebhookListener, webhook_router};

#[cfg(test)]
mod tests;

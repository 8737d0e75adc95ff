//! Action registry mapping action keys to handlers.
//!
//! The [`ActionRegistry`] owns every handler a dispatcher can invoke. Keys are
//! matched exactly, including the empty key. Registering a key twice replaces
//! the earlier handler.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::handler::ActionHandler;

const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Registry of action handlers.
///
/// # Example
///
/// ```
/// use fulfilment::{ActionRegistry, Fulfilment, ParameterSpec, handler_fn};
///
/// let mut registry = ActionRegistry::new();
/// registry.register(
///     "ping",
///     handler_fn(ParameterSpec::new(), |_| Ok(Fulfilment::speech("pong"))),
/// );
/// assert!(registry.contains("ping"));
/// assert!(registry.lookup("pong").is_none());
/// ```
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `action`, replacing any existing handler.
    pub fn register<H>(&mut self, action: impl Into<String>, handler: H)
    where
        H: ActionHandler + 'static,
    {
        let action = action.into();
        let replaced = self.handlers.insert(action.clone(), Box::new(handler));
        debug!(
            target: REGISTRY_TARGET,
            action = %action,
            replaced = replaced.is_some(),
            "registered action handler"
        );
    }

    /// Looks up the handler for `action`.
    #[must_use]
    pub fn lookup(&self, action: &str) -> Option<&dyn ActionHandler> {
        self.handlers.get(action).map(Box::as_ref)
    }

    /// Returns `true` when a handler is registered for `action`.
    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Returns the registered action keys in lexical order.
    #[must_use]
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions())
            .finish()
    }
}

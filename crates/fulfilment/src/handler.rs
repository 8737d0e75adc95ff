//! The action handler seam.
//!
//! An [`ActionHandler`] declares its parameters and turns bound
//! [`Arguments`] into a [`Fulfilment`]. Most handlers are closures wrapped
//! with [`handler_fn`]; types with state implement the trait directly.

use std::fmt;
use std::sync::Arc;

use crate::binding::{Arguments, ParameterSpec};
use crate::error::HandlerError;
use crate::response::Fulfilment;

/// Business logic bound to an action key.
///
/// Handlers may be invoked concurrently from several transport workers.
pub trait ActionHandler: Send + Sync {
    /// Returns the parameters this handler accepts.
    fn parameters(&self) -> &ParameterSpec;

    /// Produces a fulfilment from bound arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when the handler cannot answer.
    fn handle(&self, arguments: &Arguments) -> Result<Fulfilment, HandlerError>;
}

impl<H: ActionHandler + ?Sized> ActionHandler for Arc<H> {
    fn parameters(&self) -> &ParameterSpec {
        self.as_ref().parameters()
    }

    fn handle(&self, arguments: &Arguments) -> Result<Fulfilment, HandlerError> {
        self.as_ref().handle(arguments)
    }
}

impl<H: ActionHandler + ?Sized> ActionHandler for Box<H> {
    fn parameters(&self) -> &ParameterSpec {
        self.as_ref().parameters()
    }

    fn handle(&self, arguments: &Arguments) -> Result<Fulfilment, HandlerError> {
        self.as_ref().handle(arguments)
    }
}

/// Handler backed by a closure.
pub struct FnHandler<F> {
    parameters: ParameterSpec,
    logic: F,
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl<F> ActionHandler for FnHandler<F>
where
    F: Fn(&Arguments) -> Result<Fulfilment, HandlerError> + Send + Sync,
{
    fn parameters(&self) -> &ParameterSpec {
        &self.parameters
    }

    fn handle(&self, arguments: &Arguments) -> Result<Fulfilment, HandlerError> {
        (self.logic)(arguments)
    }
}

/// Wraps a closure as an [`ActionHandler`].
///
/// ```
/// use fulfilment::{Fulfilment, ParameterSpec, handler_fn};
///
/// let greet = handler_fn(ParameterSpec::new().optional("name", "World"), |args| {
///     let name = args.str("name").unwrap_or("World");
///     Ok(Fulfilment::speech(format!("Hello, {name}!")))
/// });
/// # let _ = greet;
/// ```
pub const fn handler_fn<F>(parameters: ParameterSpec, logic: F) -> FnHandler<F>
where
    F: Fn(&Arguments) -> Result<Fulfilment, HandlerError> + Send + Sync,
{
    FnHandler { parameters, logic }
}

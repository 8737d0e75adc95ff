//! Parameter declarations and argument binding.
//!
//! Handlers describe the parameters they accept with a [`ParameterSpec`].
//! At dispatch time the request's parameter object is checked against that
//! declaration: required names must be present, optional names fall back to
//! their defaults, and undeclared names are rejected unless the handler opts
//! into receiving them as extras.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{BindingError, HandlerError};

/// Declared parameters of an action handler.
///
/// Declaring a name twice replaces the earlier declaration, so a parameter is
/// always either required or optional, never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSpec {
    required: Vec<String>,
    optional: Vec<(String, Value)>,
    accepts_extra: bool,
}

impl ParameterSpec {
    /// Creates a declaration with no parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            required: Vec::new(),
            optional: Vec::new(),
            accepts_extra: false,
        }
    }

    /// Declares a parameter the request must supply.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.forget(&name);
        self.required.push(name);
        self
    }

    /// Declares a parameter with a default used when the request omits it.
    ///
    /// Pass [`Value::Null`] for a parameter whose absence the handler detects
    /// itself.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        let name = name.into();
        self.forget(&name);
        self.optional.push((name, default.into()));
        self
    }

    /// Accepts undeclared parameters and exposes them through
    /// [`Arguments::extras`].
    #[must_use]
    pub const fn accept_extra(mut self) -> Self {
        self.accepts_extra = true;
        self
    }

    /// Returns the required parameter names in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    /// Returns the optional parameter names in declaration order.
    pub fn optional_names(&self) -> impl Iterator<Item = &str> {
        self.optional.iter().map(|(name, _)| name.as_str())
    }

    /// Returns whether undeclared parameters are accepted.
    #[must_use]
    pub const fn accepts_extra(&self) -> bool {
        self.accepts_extra
    }

    /// Returns whether `name` is declared as required or optional.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.required_names().any(|declared| declared == name)
            || self.optional_names().any(|declared| declared == name)
    }

    /// Binds request parameters to this declaration.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::UnexpectedParameter`] when the request carries
    /// an undeclared name and extras are not accepted, and
    /// [`BindingError::MissingParameter`] when a required name is absent.
    pub fn bind(&self, parameters: Map<String, Value>) -> Result<Arguments, BindingError> {
        let mut values = Map::new();
        let mut extras = Map::new();
        for (name, value) in parameters {
            if self.declares(&name) {
                values.insert(name, value);
            } else if self.accepts_extra {
                extras.insert(name, value);
            } else {
                return Err(BindingError::unexpected(name));
            }
        }

        if let Some(absent) = self.required_names().find(|name| !values.contains_key(*name)) {
            return Err(BindingError::missing(absent));
        }

        for (name, default) in &self.optional {
            values
                .entry(name.as_str())
                .or_insert_with(|| default.clone());
        }

        Ok(Arguments { values, extras })
    }

    fn forget(&mut self, name: &str) {
        self.required.retain(|declared| declared != name);
        self.optional.retain(|(declared, _)| declared != name);
    }
}

/// Arguments bound for a single handler invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
    extras: Map<String, Value>,
}

impl Arguments {
    /// Builds arguments directly from declared values.
    ///
    /// Useful for exercising a handler without going through a dispatcher.
    #[must_use]
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            extras: Map::new(),
        }
    }

    /// Returns the raw value bound to a declared parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the bound value when it is a JSON string.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns whether the bound value is absent or JSON `null`.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).is_none_or(Value::is_null)
    }

    /// Deserialises a bound value into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidArgument`] when the name is not bound or
    /// the value does not have the shape `T` expects.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, HandlerError> {
        let value = self
            .get(name)
            .ok_or_else(|| HandlerError::invalid_argument(name, "argument is not bound"))?;
        T::deserialize(value).map_err(|error| HandlerError::invalid_argument(name, error.to_string()))
    }

    /// Returns parameters the handler did not declare.
    ///
    /// Always empty unless the handler's declaration accepts extras.
    #[must_use]
    pub const fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Returns the declared names that carry a bound value.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

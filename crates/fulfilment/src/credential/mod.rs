//! Shared-secret header authentication.
//!
//! When a credential value is configured every webhook call must carry it in
//! the configured header. Header names match ASCII case-insensitively; values
//! must match exactly. Without a configured value the gate admits everything.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use crate::error::DispatchError;

/// Header inspected when no other name is configured.
pub const DEFAULT_CREDENTIAL_HEADER: &str = "api-key";

/// Read access to request headers.
pub trait HeaderLookup {
    /// Returns the value of the header called `name`, matched ASCII
    /// case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> HeaderLookup for HashMap<String, String, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }
}

impl HeaderLookup for BTreeMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }
}

impl<'a> HeaderLookup for [(&'a str, &'a str)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

impl<'a, const N: usize> HeaderLookup for [(&'a str, &'a str); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

/// Credential settings for a dispatcher.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    header_name: String,
    expected_value: Option<String>,
}

impl CredentialConfig {
    /// Creates settings from a header name and optional secret.
    ///
    /// Only `None` disables the check; an empty secret is still enforced.
    pub fn new(header_name: impl Into<String>, expected_value: Option<String>) -> Self {
        Self {
            header_name: header_name.into(),
            expected_value,
        }
    }

    /// Creates settings that admit every request.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(DEFAULT_CREDENTIAL_HEADER, None)
    }

    /// Creates settings requiring `value` in the default header.
    pub fn required(value: impl Into<String>) -> Self {
        Self::new(DEFAULT_CREDENTIAL_HEADER, Some(value.into()))
    }

    /// Replaces the header name.
    #[must_use]
    pub fn with_header_name(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = header_name.into();
        self
    }

    /// Returns the header name.
    #[must_use]
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Returns the expected secret, if authentication is enabled.
    #[must_use]
    pub fn expected_value(&self) -> Option<&str> {
        self.expected_value.as_deref()
    }

    /// Returns whether requests must present the secret.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.expected_value.is_some()
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("header_name", &self.header_name)
            .field(
                "expected_value",
                &self.expected_value.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Admission check applied before a request body is read.
#[derive(Debug, Clone, Default)]
pub struct CredentialGate {
    config: CredentialConfig,
}

impl CredentialGate {
    /// Creates a gate enforcing `config`.
    #[must_use]
    pub const fn new(config: CredentialConfig) -> Self {
        Self { config }
    }

    /// Returns whether the gate rejects unauthenticated requests.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Returns the header name the gate inspects.
    #[must_use]
    pub fn header_name(&self) -> &str {
        self.config.header_name()
    }

    /// Checks the request headers against the configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingCredential`] when the header is absent
    /// and [`DispatchError::InvalidCredential`] when its value differs.
    pub fn check<H: HeaderLookup + ?Sized>(&self, headers: &H) -> Result<(), DispatchError> {
        let Some(expected) = self.config.expected_value() else {
            return Ok(());
        };
        match headers.header(self.header_name()) {
            None => Err(DispatchError::missing_credential(self.header_name())),
            Some(presented) if presented == expected => Ok(()),
            Some(_) => Err(DispatchError::invalid_credential(self.header_name())),
        }
    }
}

//! Invite gate configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Invite gate configuration.
///
/// The gate is a single shared secret, not an auth system. When `code` is
/// unset the gate is open and every request is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InviteConfig {
    /// Shared invite code; compared case-sensitively, exact match.
    pub code: Option<Secret<String>>,

    /// Key used to sign the invite cookie. Defaults to the invite code
    /// itself so a single variable is enough to enable the gate.
    pub cookie_signing_key: Option<Secret<String>>,
}

impl InviteConfig {
    /// Returns true when a code is configured (gate enforced).
    pub fn is_enabled(&self) -> bool {
        self.code
            .as_ref()
            .is_some_and(|c| !c.expose_secret().is_empty())
    }

    /// Returns the signing key, falling back to the invite code.
    pub fn signing_key(&self) -> Option<&Secret<String>> {
        self.cookie_signing_key.as_ref().or(self.code.as_ref())
    }

    /// Validate invite configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(code) = &self.code {
            if code.expose_secret().is_empty() {
                return Err(ValidationError::MissingRequired("invite code"));
            }
        }
        Ok(())
    }
}

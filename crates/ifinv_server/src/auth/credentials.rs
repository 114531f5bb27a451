//! The fixed credential pair and its validator.

use crate::error::{ServerError, ServerResult};
use serde::Deserialize;
use std::fmt;

/// A username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username.
    pub username: String,
    /// Password, compared verbatim.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("user", "password")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /token/login` and `POST /session/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Checks a presented pair against the one accepted pair.
///
/// Shared by the Basic gate and both login endpoints.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    expected: Credentials,
}

impl CredentialValidator {
    /// Creates a validator accepting exactly `expected`.
    pub fn new(expected: Credentials) -> Self {
        Self { expected }
    }

    /// Returns `Ok(())` only for an exact username and password match.
    pub fn validate(&self, username: &str, password: &str) -> ServerResult<()> {
        if username != self.expected.username {
            return Err(ServerError::unauthorized("unknown username"));
        }
        if password != self.expected.password {
            return Err(ServerError::unauthorized("wrong password"));
        }
        Ok(())
    }

    /// Validates a login body.
    pub fn validate_login(&self, login: &LoginRequest) -> ServerResult<()> {
        self.validate(&login.username, &login.password)
    }
}

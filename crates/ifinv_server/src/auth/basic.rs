//! HTTP Basic gate.

use super::credentials::CredentialValidator;
use super::Gate;
use crate::error::{ServerError, ServerResult};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Accepts requests carrying the configured pair in `Authorization: Basic`.
#[derive(Debug, Clone)]
pub struct BasicGate {
    validator: CredentialValidator,
    realm: String,
}

impl BasicGate {
    /// Creates a Basic gate.
    pub fn new(validator: CredentialValidator, realm: impl Into<String>) -> Self {
        Self {
            validator,
            realm: realm.into(),
        }
    }
}

impl Gate for BasicGate {
    fn scheme(&self) -> &'static str {
        "basic"
    }

    fn check(&self, headers: &HeaderMap) -> ServerResult<()> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ServerError::unauthorized("missing authorization header"))?
            .to_str()
            .map_err(|_| ServerError::unauthorized("authorization header is not ASCII"))?;

        let (username, password) = decode_basic(value)?;
        self.validator.validate(&username, &password)
    }

    fn challenge(&self) -> Option<String> {
        Some(format!("Basic realm=\"{}\"", self.realm))
    }
}

/// Decodes `Basic <base64(user:pass)>`. The scheme name is case-insensitive.
fn decode_basic(value: &str) -> ServerResult<(String, String)> {
    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| ServerError::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(ServerError::unauthorized("not a basic authorization header"));
    }

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| ServerError::unauthorized("invalid base64 in basic credentials"))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|_| ServerError::unauthorized("basic credentials are not UTF-8"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| ServerError::unauthorized("basic credentials lack a colon"))?;
    Ok((username.to_string(), password.to_string()))
}

//! Bearer token issuance and the Bearer gate.
//!
//! ## Token Format
//!
//! Tokens are compact HS256 JWTs: `header.payload.signature`, each part
//! base64url without padding.
//! - header: `{"alg":"HS256","typ":"JWT"}`
//! - payload: [`Claims`] (`username`, `iat`, `exp`, Unix seconds)
//! - signature: HMAC-SHA256 over `header.payload` with the signing secret

use super::Gate;
use crate::error::{ServerError, ServerResult};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Identity claim bound into every issued token.
const TOKEN_SUBJECT: &str = "user";

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Fixed identity claim.
    pub username: String,
    /// Issued-at, Unix seconds.
    pub iat: u64,
    /// Expiry, Unix seconds. Tokens without `exp` never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Mints and verifies bearer tokens with the process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    expiry: Duration,
}

impl TokenIssuer {
    /// Creates an issuer.
    pub fn new(secret: Vec<u8>, expiry: Duration) -> Self {
        Self { secret, expiry }
    }

    /// Creates a signed token for the fixed identity.
    pub fn issue(&self) -> ServerResult<String> {
        let iat = now_secs();
        let claims = Claims {
            username: TOKEN_SUBJECT.to_string(),
            iat,
            exp: Some(iat.saturating_add(self.expiry.as_secs())),
        };
        self.encode(&claims)
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> ServerResult<String> {
        let header = TokenHeader {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        };
        let header = URL_SAFE_NO_PAD.encode(to_json(&header)?);
        let payload = URL_SAFE_NO_PAD.encode(to_json(claims)?);

        let signing_input = format!("{header}.{payload}");
        let signature = URL_SAFE_NO_PAD.encode(self.sign(signing_input.as_bytes())?);
        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verifies a token and returns its claims.
    pub fn validate(&self, token: &str) -> ServerResult<Claims> {
        let parts: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = parts.as_slice() else {
            return Err(ServerError::unauthorized("token must have 3 parts"));
        };

        let header: TokenHeader = decode_part(header)?;
        if header.alg != ALGORITHM {
            return Err(ServerError::unauthorized(format!(
                "unsupported token algorithm: {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| ServerError::unauthorized("invalid base64 in token signature"))?;
        let signing_input = &token[..token.len() - parts[2].len() - 1];
        self.mac()?
            .chain_update(signing_input.as_bytes())
            .verify_slice(&signature)
            .map_err(|_| ServerError::unauthorized("invalid signature"))?;

        let claims: Claims = decode_part(payload)?;
        if let Some(exp) = claims.exp {
            if now_secs() >= exp {
                return Err(ServerError::unauthorized("token expired"));
            }
        }
        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> ServerResult<[u8; 32]> {
        Ok(self.mac()?.chain_update(data).finalize().into_bytes().into())
    }

    fn mac(&self) -> ServerResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| ServerError::Internal("invalid token signing key".into()))
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn to_json<T: Serialize>(value: &T) -> ServerResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ServerError::Internal(format!("token encoding: {e}")))
}

fn decode_part<T: for<'de> Deserialize<'de>>(part: &str) -> ServerResult<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| ServerError::unauthorized("invalid base64 in token"))?;
    serde_json::from_slice(&bytes).map_err(|_| ServerError::unauthorized("invalid token JSON"))
}

/// Accepts requests carrying a valid token in `Authorization: Bearer`.
#[derive(Clone)]
pub struct BearerGate {
    issuer: Arc<TokenIssuer>,
}

impl BearerGate {
    /// Creates a Bearer gate verifying with `issuer`.
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }
}

impl Gate for BearerGate {
    fn scheme(&self) -> &'static str {
        "bearer"
    }

    fn check(&self, headers: &HeaderMap) -> ServerResult<()> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ServerError::unauthorized("missing authorization header"))?
            .to_str()
            .map_err(|_| ServerError::unauthorized("authorization header is not ASCII"))?;

        let token = value
            .trim()
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServerError::unauthorized("not a bearer authorization header"))?;

        self.issuer.validate(token).map(|_| ())
    }
}

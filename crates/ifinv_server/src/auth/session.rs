//! Session registry and the session-cookie gate.

use super::Gate;
use crate::error::{ServerError, ServerResult};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Process-wide set of valid session ids.
///
/// Ids are added on login and never removed: there is no expiry and no
/// logout. Only a process restart clears the registry.
pub struct SessionRegistry {
    sessions: RwLock<HashSet<String>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashSet::new()),
        }
    }

    /// Mints a fresh session id and records it.
    ///
    /// Ids are two random UUIDv4s in simple form (64 hex characters).
    pub fn issue(&self) -> String {
        let id = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        self.sessions.write().insert(id.clone());
        id
    }

    /// Returns true if `id` was issued by this registry.
    pub fn is_valid(&self, id: &str) -> bool {
        self.sessions.read().contains(id)
    }

    /// Number of issued sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if no session has been issued.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts requests whose session cookie names a registered session.
#[derive(Clone)]
pub struct SessionGate {
    registry: Arc<SessionRegistry>,
    cookie_name: String,
}

impl SessionGate {
    /// Creates a session gate reading `cookie_name`.
    pub fn new(registry: Arc<SessionRegistry>, cookie_name: impl Into<String>) -> Self {
        Self {
            registry,
            cookie_name: cookie_name.into(),
        }
    }
}

impl Gate for SessionGate {
    fn scheme(&self) -> &'static str {
        "session"
    }

    fn check(&self, headers: &HeaderMap) -> ServerResult<()> {
        let id = find_cookie(headers, &self.cookie_name)
            .ok_or_else(|| ServerError::unauthorized("missing session cookie"))?;
        if id.is_empty() {
            return Err(ServerError::unauthorized("empty session cookie"));
        }
        if !self.registry.is_valid(id) {
            return Err(ServerError::unauthorized("unknown session"));
        }
        Ok(())
    }
}

/// Finds a cookie value across all `Cookie` headers.
pub(crate) fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// Builds the `Set-Cookie` value handed out on session login.
pub(crate) fn session_cookie(name: &str, id: &str) -> String {
    format!("{name}={id}; Path=/; HttpOnly")
}

//! Server configuration.

use crate::auth::Credentials;
use ifinv_core::SortMode;
use rand::RngCore;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the inventory server.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// The one accepted username/password pair.
    pub credentials: Credentials,
    /// HMAC key for signing and verifying bearer tokens.
    pub jwt_secret: Vec<u8>,
    /// Lifetime of issued bearer tokens.
    pub token_expiry: Duration,
    /// How list queries compare sort keys.
    pub sort_mode: SortMode,
    /// Name of the session cookie.
    pub session_cookie: String,
    /// Realm announced in Basic challenges.
    pub basic_realm: String,
}

impl ServerConfig {
    /// Creates a configuration with a random signing secret.
    pub fn new(bind_addr: SocketAddr) -> Self {
        let mut secret = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);

        Self {
            bind_addr,
            credentials: Credentials::default(),
            jwt_secret: secret,
            token_expiry: Duration::from_secs(24 * 60 * 60), // 24 hours
            sort_mode: SortMode::Text,
            session_cookie: "sessionId".to_string(),
            basic_realm: "ifinv".to_string(),
        }
    }

    /// Sets the accepted credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets a fixed token signing secret.
    pub fn with_jwt_secret(mut self, secret: Vec<u8>) -> Self {
        self.jwt_secret = secret;
        self
    }

    /// Sets the token lifetime.
    pub fn with_token_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }

    /// Sets the sort key comparison mode.
    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    /// Sets the session cookie name.
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    /// Sets the Basic realm.
    pub fn with_basic_realm(mut self, realm: impl Into<String>) -> Self {
        self.basic_realm = realm.into();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 3000)))
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("credentials", &self.credentials)
            .field("jwt_secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .field("sort_mode", &self.sort_mode)
            .field("session_cookie", &self.session_cookie)
            .field("basic_realm", &self.basic_realm)
            .finish()
    }
}

//! # ifinv server
//!
//! HTTP service exposing CRUD over the interface inventory.
//!
//! This crate provides:
//! - HTTP endpoints for list, read, create, update and delete
//! - Three interchangeable authentication gates: HTTP Basic, Bearer (HS256 JWT)
//!   and session cookie
//! - Token and session login endpoints
//! - The in-memory session registry
//!
//! # Routes
//!
//! | Method | Path | Gate |
//! |---|---|---|
//! | GET, POST | `/interface` | none |
//! | GET, PUT, DELETE | `/interface/{id}` | none |
//! | POST | `/token/login` | none |
//! | POST | `/session/login` | none |
//! | GET | `/basic/interface` | Basic |
//! | GET | `/token/interface` | Bearer |
//! | GET | `/session/interface` | session cookie |
//! | GET | `/docs/openapi.yaml` | none |
//!
//! Every gate consults only its own credential carrier: a valid session
//! cookie does not open the Basic route, and a valid token does not open the
//! session route.
//!
//! # Example
//!
//! ```rust,ignore
//! use ifinv_core::RecordStore;
//! use ifinv_server::{InventoryServer, ServerConfig};
//!
//! let config = ServerConfig::default().with_jwt_secret(b"change-me".to_vec());
//! let server = InventoryServer::new(config, RecordStore::new());
//! server.serve().await?;
//! ```
//!
//! # Limitations
//!
//! Sessions never expire and cannot be revoked; only a process restart
//! clears them. Tokens stay valid until their `exp` claim passes.

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod auth;
mod config;
mod error;
mod handler;
mod server;

pub use auth::{
    BasicGate, BearerGate, Claims, CredentialValidator, Credentials, Gate, LoginRequest,
    SessionGate, SessionRegistry, TokenIssuer,
};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{HandlerContext, ListParams, TokenResponse};
pub use server::{router, InventoryServer, OPENAPI_YAML};

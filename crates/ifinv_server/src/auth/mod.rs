//! Authentication gates.
//!
//! Three independent gates share one decision shape: [`Gate::check`] returns
//! `Ok(())` to let the request through or [`ServerError::Unauthorized`] with
//! a log-only reason. A gate looks only at its own credential carrier.
//!
//! | Gate | Carrier | Accepts when |
//! |---|---|---|
//! | [`BasicGate`] | `Authorization: Basic ...` | decoded pair matches the configured credentials |
//! | [`BearerGate`] | `Authorization: Bearer ...` | token signature verifies and `exp` has not passed |
//! | [`SessionGate`] | session cookie | id is in the [`SessionRegistry`] |

mod basic;
mod bearer;
mod credentials;
mod session;

pub use basic::BasicGate;
pub use bearer::{BearerGate, Claims, TokenIssuer};
pub use credentials::{CredentialValidator, Credentials, LoginRequest};
pub use session::{SessionGate, SessionRegistry};
pub(crate) use session::session_cookie;

use crate::error::{ServerError, ServerResult};
use axum::extract::{Request, State};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::debug;

/// An authentication check run before a handler.
pub trait Gate: Send + Sync {
    /// Short scheme name for logs.
    fn scheme(&self) -> &'static str;

    /// Decides whether the request may proceed.
    fn check(&self, headers: &HeaderMap) -> ServerResult<()>;

    /// Value for `WWW-Authenticate` on rejection, if the scheme defines one.
    fn challenge(&self) -> Option<String> {
        None
    }
}

/// Middleware that runs a gate and either forwards or rejects the request.
pub(crate) async fn require<G: Gate + 'static>(
    State(gate): State<Arc<G>>,
    request: Request,
    next: Next,
) -> Response {
    match gate.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            if let ServerError::Unauthorized(reason) = &err {
                debug!(scheme = gate.scheme(), %reason, path = %request.uri().path(), "request denied");
            }
            let mut response = err.into_response();
            if let Some(challenge) = gate.challenge() {
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response.headers_mut().insert(WWW_AUTHENTICATE, value);
                }
            }
            response
        }
    }
}

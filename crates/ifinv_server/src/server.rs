//! Router assembly and the inventory server.

use crate::auth::{require, BasicGate, BearerGate, SessionGate};
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::{
    create_interface, delete_interface, get_interface, list_interfaces, session_login,
    token_login, update_interface, HandlerContext,
};
use axum::http::{header, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use ifinv_core::RecordStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// OpenAPI 3.1 description of the HTTP surface.
pub const OPENAPI_YAML: &str = include_str!("../openapi/openapi.yaml");

/// Builds the full router over a handler context.
pub fn router(context: Arc<HandlerContext>) -> Router {
    let basic = Arc::new(BasicGate::new(
        context.credentials.clone(),
        context.config.basic_realm.clone(),
    ));
    let bearer = Arc::new(BearerGate::new(Arc::clone(&context.tokens)));
    let session = Arc::new(SessionGate::new(
        Arc::clone(&context.sessions),
        context.config.session_cookie.clone(),
    ));

    Router::new()
        .route("/interface", get(list_interfaces).post(create_interface))
        .route(
            "/interface/{id}",
            get(get_interface)
                .put(update_interface)
                .delete(delete_interface),
        )
        .route("/token/login", post(token_login))
        .route("/session/login", post(session_login))
        .route("/docs/openapi.yaml", get(openapi))
        .route(
            "/basic/interface",
            get(list_interfaces).route_layer(from_fn_with_state(basic, require::<BasicGate>)),
        )
        .route(
            "/token/interface",
            get(list_interfaces).route_layer(from_fn_with_state(bearer, require::<BearerGate>)),
        )
        .route(
            "/session/interface",
            get(list_interfaces)
                .route_layer(from_fn_with_state(session, require::<SessionGate>)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

async fn openapi() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/yaml; charset=utf-8")],
        OPENAPI_YAML,
    )
}

/// The inventory HTTP server.
///
/// # Example
///
/// ```
/// use ifinv_core::RecordStore;
/// use ifinv_server::{InventoryServer, ServerConfig};
///
/// let server = InventoryServer::new(ServerConfig::default(), RecordStore::new());
/// assert_eq!(server.record_count(), 0);
/// assert_eq!(server.session_count(), 0);
/// ```
pub struct InventoryServer {
    context: Arc<HandlerContext>,
}

impl InventoryServer {
    /// Creates a server over the given store.
    pub fn new(config: ServerConfig, store: RecordStore) -> Self {
        Self::with_store(config, Arc::new(store))
    }

    /// Creates a server sharing an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<RecordStore>) -> Self {
        let context = Arc::new(HandlerContext::new(config, store));
        Self { context }
    }

    /// Returns the shared handler context.
    pub fn context(&self) -> &Arc<HandlerContext> {
        &self.context
    }

    /// Builds the router for this server.
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.context))
    }

    /// Returns the number of records in the store.
    pub fn record_count(&self) -> usize {
        self.context.store.len()
    }

    /// Returns the number of sessions issued so far.
    pub fn session_count(&self) -> usize {
        self.context.sessions.len()
    }

    /// Binds the configured address and serves until Ctrl+C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.context.config.bind_addr).await?;
        info!(
            addr = %listener.local_addr()?,
            records = self.record_count(),
            "inventory server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("inventory server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}

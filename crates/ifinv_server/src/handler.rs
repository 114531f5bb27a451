//! Request handlers for the inventory endpoints.

use crate::auth::{
    session_cookie, CredentialValidator, LoginRequest, SessionRegistry, TokenIssuer,
};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use ifinv_core::{
    query, InterfaceFields, InterfaceRecord, QueryOptions, QueryPage, RecordId, RecordStore,
    SortDirection, SortField, SortMode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state for request handling.
pub struct HandlerContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// Record store (shared across all handlers).
    pub store: Arc<RecordStore>,
    /// Valid session ids.
    pub sessions: Arc<SessionRegistry>,
    /// Bearer token signer/verifier.
    pub tokens: Arc<TokenIssuer>,
    /// The accepted credential pair.
    pub credentials: CredentialValidator,
}

impl HandlerContext {
    /// Creates a handler context.
    pub fn new(config: ServerConfig, store: Arc<RecordStore>) -> Self {
        let tokens = Arc::new(TokenIssuer::new(
            config.jwt_secret.clone(),
            config.token_expiry,
        ));
        let credentials = CredentialValidator::new(config.credentials.clone());
        Self {
            config,
            store,
            sessions: Arc::new(SessionRegistry::new()),
            tokens,
            credentials,
        }
    }
}

type Ctx = State<Arc<HandlerContext>>;

/// Raw list query parameters, validated by [`ListParams::into_options`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Sort field name.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub dir: Option<String>,
    /// Number of records to skip.
    pub skip: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<String>,
}

impl ListParams {
    /// Validates the parameters into query options.
    ///
    /// Any unknown sort field, direction, or non-numeric skip/limit is an
    /// [`ServerError::InvalidQuery`].
    pub fn into_options(self, mode: SortMode) -> ServerResult<QueryOptions> {
        let mut options = QueryOptions::new().with_mode(mode);

        let direction: SortDirection = match self.dir {
            Some(dir) => dir.parse()?,
            None => Default::default(),
        };
        if let Some(sort) = self.sort {
            options = options.sort_by(sort.parse::<SortField>()?, direction);
        }
        if let Some(skip) = self.skip {
            options = options.with_skip(parse_count(&skip)?);
        }
        if let Some(limit) = self.limit {
            options = options.with_limit(parse_count(&limit)?);
        }
        Ok(options)
    }
}

fn parse_count(value: &str) -> ServerResult<usize> {
    value.trim().parse().map_err(|_| ServerError::InvalidQuery)
}

/// `GET /interface`, also mounted behind each gate.
pub async fn list_interfaces(
    State(ctx): Ctx,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ServerResult<Json<QueryPage>> {
    let Query(params) = params.map_err(|_| ServerError::InvalidQuery)?;
    let options = params.into_options(ctx.config.sort_mode)?;
    let page = query(ctx.store.list_all(), &options);
    debug!(total = page.total, returned = page.data.len(), "listed interfaces");
    Ok(Json(page))
}

/// `GET /interface/{id}`
pub async fn get_interface(
    State(ctx): Ctx,
    Path(id): Path<String>,
) -> ServerResult<Json<InterfaceRecord>> {
    let record = ctx.store.get(&RecordId::from_string(id))?;
    Ok(Json(record))
}

/// `POST /interface`
pub async fn create_interface(
    State(ctx): Ctx,
    body: Result<Json<InterfaceFields>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<InterfaceRecord>)> {
    let Json(fields) = body.map_err(|_| ServerError::InvalidBody)?;
    let record = ctx.store.insert(fields);
    info!(id = %record.id, "created interface");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /interface/{id}`
///
/// The body is validated before the id is looked up.
pub async fn update_interface(
    State(ctx): Ctx,
    Path(id): Path<String>,
    body: Result<Json<InterfaceFields>, JsonRejection>,
) -> ServerResult<Json<InterfaceRecord>> {
    let Json(fields) = body.map_err(|_| ServerError::InvalidBody)?;
    let record = ctx.store.replace(&RecordId::from_string(id), fields)?;
    info!(id = %record.id, "updated interface");
    Ok(Json(record))
}

/// `DELETE /interface/{id}`
pub async fn delete_interface(
    State(ctx): Ctx,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let removed = ctx.store.delete(&RecordId::from_string(id))?;
    info!(id = %removed.id, "deleted interface");
    Ok(StatusCode::OK)
}

/// Response of `POST /token/login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token.
    pub token: String,
}

/// `POST /token/login`
pub async fn token_login(
    State(ctx): Ctx,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ServerResult<Json<TokenResponse>> {
    let login = read_login(&ctx, body)?;
    let token = ctx.tokens.issue()?;
    info!(username = %login.username, "issued bearer token");
    Ok(Json(TokenResponse { token }))
}

/// `POST /session/login`
pub async fn session_login(
    State(ctx): Ctx,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ServerResult<Response> {
    let login = read_login(&ctx, body)?;
    let id = ctx.sessions.issue();
    info!(username = %login.username, sessions = ctx.sessions.len(), "opened session");

    let cookie = session_cookie(&ctx.config.session_cookie, &id);
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]).into_response())
}

/// A malformed login body is rejected like wrong credentials.
fn read_login(
    ctx: &HandlerContext,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ServerResult<LoginRequest> {
    let login = body
        .map(|Json(login)| login)
        .map_err(|e| ServerError::unauthorized(format!("bad login body: {e}")))
        .and_then(|login| ctx.credentials.validate_login(&login).map(|()| login));

    if let Err(ServerError::Unauthorized(reason)) = &login {
        debug!(%reason, "login denied");
    }
    login
}

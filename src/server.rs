//! HTTP front end for the access decision layer
//!
//! Identity comes from headers set by the upstream auth provider:
//! `x-user-id` and `x-user-role`. A request without `x-user-id` has no
//! session.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, Path, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::access::AccessRequest;
use crate::caps::{project, CapabilitySet};
use crate::config::ServerConfig;
use crate::error::AuthError;
use crate::guard::{authorize, authorize_operation, Identity, SessionClaims};
use crate::policy::{Operation, Policy};
use crate::role::Role;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionsResponse {
    pub role: Role,
    pub capabilities: CapabilitySet,
    pub names: Vec<String>,
}

impl PermissionsResponse {
    fn for_role(role: Role) -> Self {
        let capabilities = project(role);
        let names = capabilities.names().into_iter().map(String::from).collect();
        Self { role, capabilities, names }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecideResponse {
    pub allowed: bool,
}

#[derive(Debug, Deserialize)]
struct OwnerQuery {
    owner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeResponse {
    pub allowed: bool,
    pub operation: String,
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    UnknownOperation(String),
    BadRequest(JsonRejection),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::Auth(e) => {
                let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::FORBIDDEN);
                (status, e.public_message().to_string(), e.to_string())
            }
            ApiError::UnknownOperation(op) => {
                (StatusCode::NOT_FOUND, "Not found".to_string(), format!("unknown operation {op:?}"))
            }
            ApiError::BadRequest(rejection) => {
                (rejection.status(), "Bad request".to_string(), rejection.body_text())
            }
        };
        (status, Json(ErrorResponse { message, error })).into_response()
    }
}

// ============================================================================
// Caller extraction
// ============================================================================

/// Identity resolved from upstream headers, `None` when there is no session.
pub struct Caller(pub Option<Identity>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts.headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
        };
        let claims = SessionClaims { user_id: header(USER_ID_HEADER), role: header(USER_ROLE_HEADER) };
        Ok(Caller(Identity::from_claims(&claims)))
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

async fn my_permissions(Caller(caller): Caller) -> Result<Json<PermissionsResponse>, ApiError> {
    let identity = authorize(caller.as_ref(), &Policy::any_authenticated(), None)?;
    Ok(Json(PermissionsResponse::for_role(identity.role)))
}

async fn role_permissions(Path(role): Path<String>) -> Json<PermissionsResponse> {
    Json(PermissionsResponse::for_role(Role::parse(&role)))
}

async fn post_decide(
    payload: Result<Json<AccessRequest>, JsonRejection>,
) -> Result<Json<DecideResponse>, ApiError> {
    let Json(req) = payload.map_err(ApiError::BadRequest)?;
    Ok(Json(DecideResponse { allowed: req.decide() }))
}

async fn post_authorize(
    Caller(caller): Caller,
    Path(operation): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<AuthorizeResponse>, ApiError> {
    let op = Operation::from_name(&operation).ok_or(ApiError::UnknownOperation(operation))?;
    let identity = authorize_operation(caller.as_ref(), op, query.owner.as_deref())?;
    Ok(Json(AuthorizeResponse {
        allowed: true,
        operation: op.name().to_string(),
        user_id: identity.user_id.clone(),
        role: identity.role,
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/me/permissions", get(my_permissions))
        .route("/permissions/:role", get(role_permissions))
        .route("/decide", post(post_decide))
        .route("/authorize/:operation", post(post_authorize))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), "rolegate-server listening");
    axum::serve(listener, router(&config)).await
}

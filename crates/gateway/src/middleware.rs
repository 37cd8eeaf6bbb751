//! Middleware and extractors for authentication and request logging

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
    Json,
};
use neighborhood_auth::AuthSession;
use neighborhood_database::User;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// Pulls the bearer token out of the `Authorization` header.
pub fn require_bearer(headers: &HeaderMap) -> GatewayResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| GatewayError::Unauthorized("missing authorization header".into()))?
        .to_str()
        .map_err(|_| GatewayError::Unauthorized("invalid authorization header".into()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| GatewayError::Unauthorized("invalid authorization scheme".into()))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(GatewayError::Unauthorized("invalid authorization scheme".into()));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(GatewayError::Unauthorized("missing bearer token".into()));
    }
    Ok(token)
}

/// The signed-in user behind the request's bearer session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session: AuthSession,
}

#[async_trait]
impl FromRequestParts<Arc<GatewayState>> for CurrentUser {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GatewayState>,
    ) -> Result<Self, Self::Rejection> {
        let token = require_bearer(&parts.headers)?;
        let (user, session) = state.authenticator.authenticate_token(token).await?;
        Ok(Self { user, session })
    }
}

/// `Json` whose rejections render as the `{ok: false}` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

/// `Path` whose rejections render as the `{ok: false}` envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose rejections render as the `{ok: false}` envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(GatewayError))]
pub struct ApiQuery<T>(pub T);

/// Create tracing middleware
pub fn create_trace_middleware() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{AppError, unauthorized},
    services::AuthService,
    state::AppState,
};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| unauthorized("login required"))
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Resolve the bearer token of a request into a user
pub(crate) fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthenticatedUser, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            debug!("Auth failed: no bearer token");
            unauthorized("login required")
        })?;

    let claims = AuthService::verify_token(token, secret).map_err(|e| {
        debug!(error = ?e, "Auth failed: token verification failed");
        unauthorized("login required")
    })?;

    let id = Uuid::parse_str(&claims.sub).map_err(|e| {
        debug!(sub = %claims.sub, error = ?e, "Auth failed: invalid user ID in token");
        unauthorized("login required")
    })?;

    Ok(AuthenticatedUser {
        id,
        name: claims.name,
    })
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &state.config().jwt.secret)?;
    debug!(path = %request.uri().path(), user_id = %user.id, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Optional authentication middleware (doesn't fail if no token)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Ok(user) = authenticate(request.headers(), &state.config().jwt.secret) {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

//! Hackathon guards
//!
//! Resolve the hackathon named by the `hackathon_name` header and check the
//! caller's administrative rights on it.

use std::future::Future;

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{AppError, access_denied, bad_request},
    middleware::auth::{AuthenticatedUser, authenticate},
    models::Hackathon,
    services::HackathonService,
    state::AppState,
};

/// The hackathon a request operates on
#[derive(Debug, Clone)]
pub struct CurrentHackathon(pub Hackathon);

impl<S> FromRequestParts<S> for CurrentHackathon
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentHackathon>()
            .cloned()
            .ok_or_else(|| bad_request("hackathon name invalid"))
    }
}

async fn resolve_hackathon(state: &AppState, headers: &HeaderMap) -> Result<Hackathon, AppError> {
    HackathonService::validate_hackathon_name(state.db(), headers)
        .await?
        .ok_or_else(|| bad_request("hackathon name invalid"))
}

/// Require a `hackathon_name` header naming an existing hackathon
pub async fn hackathon_name_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let hackathon = resolve_hackathon(&state, request.headers()).await?;

    request.extensions_mut().insert(CurrentHackathon(hackathon));
    Ok(next.run(request).await)
}

/// Require login, a valid hackathon, and admin rights on it, checked in that order
pub async fn admin_privilege_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let db = state.db();
    let (user, hackathon) = admin_guard(
        request.headers(),
        &state.config().jwt.secret,
        |headers| resolve_hackathon(&state, headers),
        move |user_id, hackathon_id| async move {
            HackathonService::validate_admin_privilege(db, &user_id, &hackathon_id).await
        },
    )
    .await?;

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(CurrentHackathon(hackathon));
    Ok(next.run(request).await)
}

/// Login (401), then hackathon (400), then privilege (403)
async fn admin_guard<'a, R, RF, P, PF>(
    headers: &'a HeaderMap,
    secret: &str,
    resolve: R,
    has_privilege: P,
) -> Result<(AuthenticatedUser, Hackathon), AppError>
where
    R: FnOnce(&'a HeaderMap) -> RF,
    RF: Future<Output = Result<Hackathon, AppError>>,
    P: FnOnce(Uuid, Uuid) -> PF,
    PF: Future<Output = Result<bool, AppError>>,
{
    let user = authenticate(headers, secret)?;
    let hackathon = resolve(headers).await?;

    if !has_privilege(user.id, hackathon.id).await? {
        debug!(user_id = %user.id, hackathon_id = %hackathon.id, "no admin privilege");
        return Err(access_denied("access denied"));
    }

    Ok((user, hackathon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::AUTHORIZATION};
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::{constants::HACKATHON_NAME_HEADER, models::HackathonStatus, services::auth_service::Claims};

    const SECRET: &str = "test-secret";

    fn hackathon() -> Hackathon {
        let now = Utc::now();
        Hackathon {
            id: Uuid::new_v4(),
            name: "spring-hack".to_string(),
            display_name: "Spring Hack".to_string(),
            description: None,
            status: HackathonStatus::Online.as_i32(),
            basic_info: json!({}),
            extra_info: json!({}),
            event_start_time: None,
            event_end_time: None,
            creator_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn headers(user_id: Option<Uuid>, hackathon_name: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(id) = user_id {
            let now = Utc::now().timestamp();
            let claims = Claims {
                sub: id.to_string(),
                name: "alice".to_string(),
                exp: now + 3600,
                iat: now,
            };
            let token =
                encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token)).unwrap());
        }
        if let Some(name) = hackathon_name {
            headers.insert(HACKATHON_NAME_HEADER, HeaderValue::from_str(name).unwrap());
        }
        headers
    }

    /// Resolves only the `spring-hack` header, like the hackathon lookup
    async fn resolve(headers: &HeaderMap) -> Result<Hackathon, AppError> {
        match headers.get(HACKATHON_NAME_HEADER).and_then(|v| v.to_str().ok()) {
            Some("spring-hack") => Ok(hackathon()),
            _ => Err(bad_request("hackathon name invalid")),
        }
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized_before_header_check() {
        let resolved = AtomicBool::new(false);
        let err = admin_guard(
            &headers(None, None),
            SECRET,
            |h| {
                resolved.store(true, Ordering::SeqCst);
                resolve(h)
            },
            |_, _| async { Ok::<_, AppError>(true) },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(ref m) if m == "login required"));
        assert!(!resolved.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unknown_hackathon_is_bad_request_before_privilege_check() {
        let checked = AtomicBool::new(false);
        let err = admin_guard(
            &headers(Some(Uuid::new_v4()), Some("ghost")),
            SECRET,
            resolve,
            |_, _| {
                checked.store(true, Ordering::SeqCst);
                async { Ok::<_, AppError>(true) }
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref m) if m == "hackathon name invalid"));
        assert!(!checked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let err = admin_guard(
            &headers(Some(Uuid::new_v4()), Some("spring-hack")),
            SECRET,
            resolve,
            |_, _| async { Ok::<_, AppError>(false) },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_passes_with_user_and_hackathon() {
        let user_id = Uuid::new_v4();
        let (user, hackathon) = admin_guard(
            &headers(Some(user_id), Some("spring-hack")),
            SECRET,
            resolve,
            move |uid, _| async move { Ok::<_, AppError>(uid == user_id) },
        )
        .await
        .unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(hackathon.name, "spring-hack");
    }

    #[tokio::test]
    async fn test_current_hackathon_requires_guard_extension() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let err = CurrentHackathon::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "hackathon name invalid"));

        parts.extensions.insert(CurrentHackathon(hackathon()));
        let current = CurrentHackathon::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(current.0.name, "spring-hack");
    }
}

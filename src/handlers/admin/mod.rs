//! Hackathon administration handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{
    constants::MAX_UPLOAD_FILES,
    middleware::{admin_privilege_middleware, auth_middleware},
    state::AppState,
};

/// Admin routes
pub fn routes(state: AppState) -> Router<AppState> {
    let upload_limit = (state.config().storage.size_limit_byte as usize).saturating_mul(MAX_UPLOAD_FILES);

    // Any logged-in user may create a hackathon and list the ones they manage;
    // updating needs admin rights on it
    let login = Router::new()
        .route("/hackathons", get(handler::list_permitted_hackathons))
        .route(
            "/hackathon",
            post(handler::create_hackathon).put(handler::update_hackathon.layer(
                middleware::from_fn_with_state(state.clone(), admin_privilege_middleware),
            )),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let privileged = privileged_routes(upload_limit)
        .route_layer(middleware::from_fn_with_state(state, admin_privilege_middleware));

    Router::new().merge(login).merge(privileged)
}

/// Routes that act on the hackathon named by the request header
fn privileged_routes(upload_limit: usize) -> Router<AppState> {
    let upload = limit_upload_body(Router::new().route("/file", post(handler::upload_files)), upload_limit);

    Router::new()
        // Registrations
        .route("/hackathon/registrations", get(handler::list_registrations))
        .route(
            "/hackathon/registrations/{id}",
            put(handler::audit_registration).delete(handler::delete_registration),
        )
        // Administrators
        .route(
            "/hackathon/administrators",
            get(handler::list_admins).post(handler::add_admin),
        )
        .route("/hackathon/administrators/{id}", delete(handler::remove_admin))
        .merge(upload)
}

/// Multipart bodies are bounded by the request limit instead of the default
fn limit_upload_body<S>(router: Router<S>, limit: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, Bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    const LIMIT: usize = 4 * 1024 * 1024;

    fn body_len_router() -> Router {
        limit_upload_body(
            Router::new().route("/file", post(|body: Bytes| async move { body.len().to_string() })),
            LIMIT,
        )
    }

    async fn post_bytes(len: usize) -> StatusCode {
        let request = Request::post("/file").body(Body::from(vec![0u8; len])).unwrap();
        body_len_router().oneshot(request).await.unwrap().status()
    }

    #[test]
    fn test_privileged_route_table_builds() {
        // Registering overlapping method routes panics
        let _ = privileged_routes(LIMIT);
    }

    #[tokio::test]
    async fn test_upload_may_exceed_default_body_limit() {
        // axum rejects bodies over 2 MiB by default
        assert_eq!(post_bytes(3 * 1024 * 1024).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        assert_eq!(post_bytes(LIMIT + 1).await, StatusCode::PAYLOAD_TOO_LARGE);
    }
}

//! Hosted service management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{middleware::admin_privilege_middleware, state::AppState};

/// Cloud service routes (admin privilege required)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_cloud_service))
        .route(
            "/{name}",
            get(handler::get_cloud_service)
                .put(handler::update_cloud_service)
                .delete(handler::delete_cloud_service),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_privilege_middleware))
}

//! User handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{Router, middleware, routing::get};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// User routes (all require login)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handler::get_current_user))
        .route("/me/hackathons", get(handler::get_user_hackathons))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

//! Public hackathon handlers

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

use crate::{
    middleware::{auth_middleware, hackathon_name_middleware, optional_auth_middleware},
    state::AppState,
};

/// Hackathon routes
pub fn routes(state: AppState) -> Router<AppState> {
    let listing = Router::new()
        .route("/hackathons", get(handler::list_hackathons))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_auth_middleware));

    let current = Router::new()
        .route("/hackathon", get(handler::get_hackathon))
        .route("/hackathon/stat", get(handler::get_hackathon_stat))
        .route_layer(middleware::from_fn_with_state(state.clone(), hackathon_name_middleware));

    // Login is checked before the hackathon header
    let registration = Router::new()
        .route("/hackathon/registration", post(handler::register_for_hackathon))
        .route_layer(middleware::from_fn_with_state(state.clone(), hackathon_name_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(listing).merge(current).merge(registration)
}

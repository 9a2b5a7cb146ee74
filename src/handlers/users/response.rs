//! User response DTOs

use serde::Serialize;

use crate::{handlers::auth::response::UserResponse, models::Hackathon};

/// Current user response (for /me endpoint)
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
}

/// Hackathons the current user registered for
#[derive(Debug, Serialize)]
pub struct UserHackathonsResponse {
    pub hackathons: Vec<Hackathon>,
}

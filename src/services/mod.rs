//! Business logic services

pub mod auth_service;
pub mod hackathon_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use hackathon_service::{HackathonService, UploadFile};
pub use user_service::UserService;

//! HTTP middleware

pub mod auth;
pub mod hackathon;
pub mod logging;
pub mod rate_limit;

pub use auth::{AuthenticatedUser, OptionalAuth, auth_middleware, optional_auth_middleware};
pub use hackathon::{CurrentHackathon, admin_privilege_middleware, hackathon_name_middleware};
pub use logging::logging_middleware;
pub use rate_limit::rate_limit_middleware;

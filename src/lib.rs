//! Hackathon server - backend for a hackathon management web application
//!
//! # Features
//!
//! - Hackathon creation, update, listing and participant statistics
//! - Registrations with optional auto-approval and admin audit
//! - Per-hackathon administrators guarded by request middleware
//! - Image upload to blob storage
//! - Hosted service management on the classic cloud management API
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Middleware**: login, hackathon and admin privilege guards
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Azure**: REST clients for blob storage and service management
//! - **Models**: Domain models

pub mod azure;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod admin;
pub mod hackathon;
pub mod registration;
pub mod user;

pub use admin::*;
pub use hackathon::*;
pub use registration::*;
pub use user::*;

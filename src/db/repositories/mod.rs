//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod admin_repo;
pub mod hackathon_repo;
pub mod registration_repo;
pub mod user_repo;

pub use admin_repo::AdminRepository;
pub use hackathon_repo::{HackathonChanges, HackathonRepository, NewHackathon};
pub use registration_repo::{RegistrationDetails, RegistrationRepository};
pub use user_repo::UserRepository;

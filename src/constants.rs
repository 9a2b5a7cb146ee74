//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// HTTP HEADERS
// =============================================================================

/// Header selecting the hackathon a request operates on
pub const HACKATHON_NAME_HEADER: &str = "hackathon_name";

// =============================================================================
// HACKATHON SETTINGS
// =============================================================================

/// Maximum length of a hackathon name
pub const MAX_HACKATHON_NAME_LENGTH: u64 = 64;

/// Maximum length of a hackathon display name
pub const MAX_HACKATHON_DISPLAY_NAME_LENGTH: u64 = 128;

/// Maximum length of a hackathon description
pub const MAX_HACKATHON_DESCRIPTION_LENGTH: u64 = 10000;

/// Keys interpreted inside a hackathon's `basic_info` document
pub mod basic_info {
    pub const AUTO_APPROVE: &str = "auto_approve";
    pub const RECYCLE_ENABLED: &str = "recycle_enabled";
}

/// Remarks recorded on the admin relation created with a hackathon
pub const CREATOR_REMARKS: &str = "creator";

// =============================================================================
// STORAGE DEFAULTS
// =============================================================================

/// Default container for uploaded images
pub const DEFAULT_IMAGE_CONTAINER: &str = "images";

/// Default per-file upload size limit (10 MiB)
pub const DEFAULT_SIZE_LIMIT_BYTE: u64 = 10 * 1024 * 1024;

/// Most files accepted in one upload request
pub const MAX_UPLOAD_FILES: usize = 10;

/// Blob service REST API version
pub const BLOB_API_VERSION: &str = "2021-08-06";

// =============================================================================
// CLOUD SERVICE MANAGEMENT
// =============================================================================

/// Default classic management endpoint
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.core.windows.net";

/// Service management REST API version
pub const MANAGEMENT_API_VERSION: &str = "2014-06-01";

/// Default timeout when waiting for an asynchronous operation
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Default interval between operation status polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// =============================================================================
// RATE LIMITING
// =============================================================================

pub mod rate_limits {
    /// Auth endpoints: max requests per window
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Admin endpoints (uploads, cloud calls)
    pub const ADMIN_MAX_REQUESTS: i64 = 60;
    pub const ADMIN_WINDOW_SECS: i64 = 60;

    /// General endpoints
    pub const GENERAL_MAX_REQUESTS: i64 = 120;
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

//! Rate limiting middleware

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;
use tracing::warn;

use crate::{constants::rate_limits, error::AppError, state::AppState};

/// Fixed-window rate limit per client IP and path bucket
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bucket = path_bucket(request.uri().path());
    let (limit, window) = rate_limit(bucket);

    let key = format!("rate_limit:{}:{}", addr.ip(), bucket);
    let mut redis = state.redis();

    // Fail open when Redis is unavailable
    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "rate limit counter unavailable");
            return Ok(next.run(request).await);
        }
    };

    if count == 1 {
        let _: Result<(), _> = redis.expire(&key, window).await;
    }

    if count > limit {
        warn!(ip = %addr.ip(), bucket, count, "rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Limit and window (seconds) of a bucket
fn rate_limit(bucket: &str) -> (i64, i64) {
    match bucket {
        "auth" => (rate_limits::AUTH_MAX_REQUESTS, rate_limits::AUTH_WINDOW_SECS),
        "admin" => (rate_limits::ADMIN_MAX_REQUESTS, rate_limits::ADMIN_WINDOW_SECS),
        _ => (rate_limits::GENERAL_MAX_REQUESTS, rate_limits::GENERAL_WINDOW_SECS),
    }
}

/// Get bucket for path (for grouping similar endpoints)
fn path_bucket(path: &str) -> &'static str {
    if path.starts_with("/api/v1/auth") {
        "auth"
    } else if path.starts_with("/api/v1/admin") {
        "admin"
    } else {
        "general"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_buckets() {
        assert_eq!(path_bucket("/api/v1/auth/login"), "auth");
        assert_eq!(path_bucket("/api/v1/admin/file"), "admin");
        assert_eq!(path_bucket("/api/v1/hackathons"), "general");
        assert_eq!(path_bucket("/api/v1/health"), "general");
    }

    #[test]
    fn test_auth_bucket_is_strictest() {
        assert!(rate_limit("auth").0 < rate_limit("admin").0);
        assert!(rate_limit("admin").0 <= rate_limit("general").0);
    }
}

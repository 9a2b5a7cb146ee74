//! Logging middleware

use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header::CONTENT_LENGTH},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use crate::constants::HACKATHON_NAME_HEADER;

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let hackathon = request
        .headers()
        .get(HACKATHON_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let content_length = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match classify(status) {
        Outcome::ServerError => warn!(
            method = %method,
            path = %path,
            hackathon = %hackathon,
            status = status.as_u16(),
            content_length,
            duration_ms = %duration_ms,
            "Request completed with server error"
        ),
        Outcome::ClientError => warn!(
            method = %method,
            path = %path,
            hackathon = %hackathon,
            status = status.as_u16(),
            content_length,
            duration_ms = %duration_ms,
            "Request completed with client error"
        ),
        Outcome::Ok => info!(
            method = %method,
            path = %path,
            hackathon = %hackathon,
            status = status.as_u16(),
            content_length,
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Ok,
    ClientError,
    ServerError,
}

/// 404s are routine and logged like successes
fn classify(status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::ServerError
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        Outcome::ClientError
    } else {
        Outcome::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_statuses() {
        assert_eq!(classify(StatusCode::OK), Outcome::Ok);
        assert_eq!(classify(StatusCode::NOT_FOUND), Outcome::Ok);
        assert_eq!(classify(StatusCode::FORBIDDEN), Outcome::ClientError);
        assert_eq!(classify(StatusCode::BAD_GATEWAY), Outcome::ServerError);
    }
}

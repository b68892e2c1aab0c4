//! Admin passphrase gate.
//!
//! A single shared passphrase guards the admin routes. Comparison is constant-time.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Header name for the admin passphrase.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Admin auth layer function that takes the expected passphrase as a parameter.
pub async fn admin_auth_layer(
    expected_passphrase: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no passphrase is configured, allow all requests (dev mode)
    let Some(expected) = expected_passphrase else {
        return next.run(request).await;
    };

    match provided_passphrase(request.headers()) {
        Some(provided) if passphrase_matches(&provided, &expected) => next.run(request).await,
        Some(_) => unauthorized_response("Invalid admin passphrase"),
        None => unauthorized_response("Missing admin passphrase"),
    }
}

/// Passphrase from `x-admin-key`, falling back to a bearer token.
fn provided_passphrase(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(|s| s.to_string())
}

/// Check a login attempt. With no passphrase configured every attempt succeeds.
pub fn verify_passphrase(expected: Option<&str>, attempt: &str) -> bool {
    match expected {
        Some(expected) => passphrase_matches(attempt, expected),
        None => true,
    }
}

/// Perform constant-time string comparison.
fn passphrase_matches(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
        revision_id: 0,
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

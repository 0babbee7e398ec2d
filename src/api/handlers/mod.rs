//! HTTP request handlers.

pub mod execution;
pub mod health;
pub mod logs;
pub mod schedule;

use axum::http::HeaderMap;

/// Submitter identity header set by clients.
pub const EMAIL_ID_HEADER: &str = "email-id";

/// Reads the submitter identity from the `Email-Id` header. The header is
/// informational; an absent or unreadable value becomes an empty string.
pub(crate) fn submitter(headers: &HeaderMap) -> String {
    headers
        .get(EMAIL_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

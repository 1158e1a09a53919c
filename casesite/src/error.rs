//! Error taxonomy shared by the form, the API client, and the gateway.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures are resolved locally and never reach the network.
//! Backend failures carry the most specific message the response body offers
//! so the UI can show it verbatim in a dismissable banner.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Errors produced by case publishing operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Missing required field or malformed subdomain / domain.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Network { status: u16, message: String },

    /// The session could not be refreshed; the user must sign in again.
    #[error("session expired; sign in again")]
    Auth,

    /// An operation needs a case id, but the case has not been saved.
    #[error("case must be saved before this action")]
    NotSaved,

    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A success response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl SiteError {
    /// Build a [`SiteError::Network`] from a failed response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Network { status, message: backend_error_message(status, body) }
    }

    /// True for errors the user can fix by editing the form.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when a retry may succeed without user changes.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Network { status: 429 | 500..=599, .. })
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Extract a human-readable message from a backend error body.
///
/// Prefers `detail`, `error`, `message`, and `non_field_errors`, then the
/// first field-level error (`"subdomain: This subdomain is taken."`). Falls
/// back to a status description when the body is not JSON.
#[must_use]
pub fn backend_error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    if let Some(Value::Object(map)) = &parsed {
        for key in ["detail", "error", "message", "non_field_errors"] {
            if let Some(text) = map.get(key).and_then(first_text) {
                return text;
            }
        }
        for (field, value) in map {
            if let Some(text) = first_text(value) {
                return format!("{field}: {text}");
            }
        }
    }
    if let Some(text) = parsed.as_ref().and_then(first_text) {
        return text;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return trimmed.to_owned();
    }
    status_fallback(status).to_owned()
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

fn status_fallback(status: u16) -> &'static str {
    match status {
        400 => "The request was rejected.",
        401 | 403 => "You are not allowed to do that.",
        404 => "Not found.",
        409 => "That conflicts with an existing record.",
        413 => "The upload is too large.",
        429 => "Too many requests; try again shortly.",
        500..=599 => "The server had a problem; try again.",
        _ => "Request failed.",
    }
}

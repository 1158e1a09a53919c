//! Same-origin pass-through from `/api/*` to the case backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client sends every REST call to `/api/...` on this server, so
//! cookies, CORS, and the preview iframe all stay same-origin. Requests are
//! forwarded with their method, query, body, and a small header allow-list;
//! the backend's status, content type, and body are returned unchanged.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures toward the backend become `502` with a JSON `detail`,
//! which the client's error parser shows verbatim.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Largest request body accepted for forwarding (photo uploads).
pub const MAX_FORWARD_BYTES: usize = 20 * 1024 * 1024;

const FORWARDED_HEADERS: [HeaderName; 3] = [AUTHORIZATION, CONTENT_TYPE, ACCEPT];

/// Backend URL for an `/api/{path}` request.
pub(crate) fn upstream_url(backend_url: &str, path: &str, query: Option<&str>) -> String {
    let base = backend_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{base}/api/{path}?{query}"),
        None => format!("{base}/api/{path}"),
    }
}

/// Request headers passed on to the backend.
pub(crate) fn forwarded_headers(headers: &HeaderMap) -> Vec<(HeaderName, HeaderValue)> {
    FORWARDED_HEADERS
        .iter()
        .filter_map(|name| headers.get(name).map(|value| (name.clone(), value.clone())))
        .collect()
}

fn bad_gateway(message: &str) -> Response {
    let body = serde_json::json!({ "detail": message });
    (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response()
}

pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = upstream_url(&state.config.backend_url, &path, query.as_deref());
    let mut request = state.http.request(method.clone(), &url).body(body);
    for (name, value) in forwarded_headers(&headers) {
        request = request.header(name, value);
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::warn!(%method, %url, error = %e, "backend unreachable");
            return bad_gateway("The case service is unavailable; try again.");
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %url, error = %e, "backend response interrupted");
            return bad_gateway("The case service response was interrupted.");
        }
    };
    tracing::debug!(%method, %url, status = status.as_u16(), "proxied");

    let mut response = (status, bytes).into_response();
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    response
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

//! Process-wide API client and browser file helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `api()` for a shared `ApiClient` wired to `fetch` and
//! `localStorage`. When a token refresh fails the client clears storage and
//! this module sends the browser to `/login`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, OnceLock};

use casesite::{ApiClient, CaseGateway, FileUpload};

use super::tokens::BrowserTokens;
use super::transport::GlooTransport;

pub type Api = ApiClient<GlooTransport, BrowserTokens>;
pub type Gateway = CaseGateway<GlooTransport, BrowserTokens>;

pub const LOGIN_ROUTE: &str = "/login";

/// Shared API client.
pub fn api() -> Arc<Api> {
    static CLIENT: OnceLock<Arc<Api>> = OnceLock::new();
    Arc::clone(CLIENT.get_or_init(|| {
        Arc::new(ApiClient::new(GlooTransport, BrowserTokens).on_session_expired(Arc::new(redirect_to_login)))
    }))
}

/// Gateway for a new case, or for `case_id` when editing.
pub fn gateway(case_id: Option<String>) -> Gateway {
    match case_id {
        Some(id) => CaseGateway::for_case(api(), id),
        None => CaseGateway::new(api()),
    }
}

fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        leptos::logging::warn!("session expired; redirecting to {LOGIN_ROUTE}");
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_ROUTE);
        }
    }
}

/// User-facing text for an API failure.
#[must_use]
pub fn error_text(err: &casesite::SiteError) -> String {
    match err {
        casesite::SiteError::Network { message, .. } => message.clone(),
        casesite::SiteError::Transport(_) => "Could not reach the server. Check your connection and retry.".to_owned(),
        other => other.to_string(),
    }
}

/// Read the first file selected in an `<input type="file">`.
#[cfg(feature = "hydrate")]
pub async fn read_selected_file(input: &web_sys::HtmlInputElement) -> Option<FileUpload> {
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Some(FileUpload { filename: file.name(), content_type: file_type_or_default(&file.type_()), bytes })
}

fn file_type_or_default(raw: &str) -> String {
    if raw.is_empty() { "application/octet-stream".to_owned() } else { raw.to_owned() }
}

/// Only images are accepted by the photo and image endpoints.
#[must_use]
pub fn is_image_upload(file: &FileUpload) -> bool {
    file.content_type.starts_with("image/")
}

//! Browser `fetch` transport for the `casesite` API client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! same-origin `/api/` proxy. Server-side (SSR): every call fails with a
//! transport error, since the API is only reached from the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use casesite::{ApiRequest, ApiResponse, SiteError, Transport};

/// Base path the server proxies to the backend.
pub const API_BASE: &str = "/api/";

/// Absolute URL for an API-relative path.
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{API_BASE}{}", path.trim_start_matches('/'))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SiteError> {
        #[cfg(feature = "hydrate")]
        {
            send_browser(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(SiteError::Transport(format!("{} {} not available on server", request.method.as_str(), request.path)))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn send_browser(request: ApiRequest) -> Result<ApiResponse, SiteError> {
    use casesite::{Method, RequestBody};
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};

    let method = match request.method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(&api_url(&request.path)).method(method);
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }
    let transport_err = |e: gloo_net::Error| SiteError::Transport(e.to_string());
    let built = match request.body {
        RequestBody::Empty => builder.build().map_err(transport_err)?,
        RequestBody::Json(value) => builder.json(&value).map_err(transport_err)?,
        RequestBody::Multipart(parts) => builder.body(form_data(parts)?).map_err(transport_err)?,
    };
    let response = built.send().await.map_err(transport_err)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(ApiResponse::new(status, body))
}

#[cfg(feature = "hydrate")]
fn form_data(parts: Vec<casesite::MultipartPart>) -> Result<web_sys::FormData, SiteError> {
    use casesite::MultipartPart;

    let js_err = |e: wasm_bindgen::JsValue| SiteError::Transport(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => form.append_with_str(&name, &value).map_err(js_err)?,
            MultipartPart::File { name, file } => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let chunks = js_sys::Array::of1(&bytes);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options).map_err(js_err)?;
                form.append_with_blob_and_filename(&name, &blob, &file.filename).map_err(js_err)?;
            }
        }
    }
    Ok(form)
}

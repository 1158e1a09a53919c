//! `reqwest` implementation of the `casesite` transport seam.

use casesite::{ApiRequest, ApiResponse, Method, MultipartPart, RequestBody, SiteError, Transport};

pub struct ReqwestTransport {
    client: reqwest::Client,
    /// API root ending in `/`, e.g. `http://127.0.0.1:3000/api/`.
    base_url: String,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { client: reqwest::Client::new(), base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn form(parts: Vec<MultipartPart>) -> Result<reqwest::multipart::Form, SiteError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            MultipartPart::Text { name, value } => form.text(name, value),
            MultipartPart::File { name, file } => {
                let body = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(&file.content_type)
                    .map_err(|e| SiteError::Transport(format!("invalid content type: {e}")))?;
                form.part(name, body)
            }
        };
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SiteError> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(method(request.method), &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(parts) => builder.multipart(form(parts)?),
        };

        let response = builder.send().await.map_err(|e| SiteError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| SiteError::Transport(e.to_string()))?;
        tracing::debug!(method = request.method.as_str(), %url, status, "api call");
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

//! HTTP seam between the API client and the platform's fetch implementation.
//!
//! The browser build uses `gloo-net`, the CLI uses `reqwest`, and tests use
//! in-memory fakes. Futures are not required to be `Send` because browser
//! fetch futures are not.

use serde_json::Value;

use crate::error::SiteError;
use crate::models::FileUpload;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One field of a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultipartPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

impl MultipartPart {
    #[must_use]
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self::Text { name: name.to_owned(), value: value.into() }
    }

    #[must_use]
    pub fn file(name: &str, file: FileUpload) -> Self {
        Self::File { name: name.to_owned(), file }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<MultipartPart>),
}

/// A request relative to the API base (`cases/12/`, not `/api/cases/12/`).
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), bearer: None, body: RequestBody::Empty }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn json(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self { body: RequestBody::Json(body), ..Self::new(method, path) }
    }

    #[must_use]
    pub fn multipart(method: Method, path: impl Into<String>, parts: Vec<MultipartPart>) -> Self {
        Self { body: RequestBody::Multipart(parts), ..Self::new(method, path) }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON; an empty body (204) reads as `null`.
    ///
    /// # Errors
    ///
    /// [`SiteError::Decode`] when the body is not JSON.
    pub fn json(&self) -> Result<Value, SiteError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations return `Err` only when no response was received; HTTP
/// error statuses come back as `Ok` responses.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SiteError>;
}

//! Scripted in-memory transport for unit tests.

use std::cell::RefCell;

use serde_json::Value;

use crate::error::SiteError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, SiteError>>;

pub(crate) struct FakeTransport {
    handler: Handler,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new(handler: impl Fn(&ApiRequest) -> ApiResponse + 'static) -> Self {
        Self { handler: Box::new(move |req| Ok(handler(req))), requests: RefCell::new(Vec::new()) }
    }

    pub(crate) fn failing(message: &str) -> Self {
        let message = message.to_owned();
        Self {
            handler: Box::new(move |_| Err(SiteError::Transport(message.clone()))),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.method == method && r.path == path).count()
    }

    pub(crate) fn last(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

pub(crate) fn ok(body: &Value) -> ApiResponse {
    ApiResponse::new(200, body.to_string())
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SiteError> {
        self.requests.borrow_mut().push(request.clone());
        // Give concurrent callers a chance to interleave.
        tokio::task::yield_now().await;
        (self.handler)(&request)
    }
}

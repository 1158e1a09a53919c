//! Request dispatch with bearer auth and refresh-on-401.
//!
//! ERROR HANDLING
//! ==============
//! A 401 triggers at most one refresh at a time. Requests that fail while a
//! refresh is running wait for it and then retry with the new token instead
//! of refreshing again. A failed refresh clears the token store, fires the
//! session-expired hook, and surfaces [`SiteError::Auth`].

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use futures::lock::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::auth::{SessionExpired, TokenPair, TokenStore};
use crate::error::SiteError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

pub(crate) const REFRESH_PATH: &str = "auth/token/refresh/";
pub(crate) const LOGIN_PATH: &str = "auth/token/";

pub struct ApiClient<T, S> {
    transport: T,
    tokens: S,
    refresh_lock: Mutex<()>,
    on_expired: Option<SessionExpired>,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    #[must_use]
    pub fn new(transport: T, tokens: S) -> Self {
        Self { transport, tokens, refresh_lock: Mutex::new(()), on_expired: None }
    }

    /// Install the hook fired when the session cannot be refreshed.
    #[must_use]
    pub fn on_session_expired(mut self, hook: SessionExpired) -> Self {
        self.on_expired = Some(hook);
        self
    }

    #[must_use]
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exchange credentials for a token pair and store it.
    ///
    /// # Errors
    ///
    /// [`SiteError::Network`] with the backend's message on bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SiteError> {
        let request = ApiRequest::json(Method::Post, LOGIN_PATH, json!({"username": username, "password": password}));
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(SiteError::from_response(response.status, &response.body));
        }
        let pair: TokenPair = serde_json::from_value(response.json()?)?;
        self.tokens.store_tokens(&pair.access, pair.refresh.as_deref());
        tracing::info!(username, "signed in");
        Ok(())
    }

    pub fn logout(&self) {
        self.tokens.clear();
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    /// Send `request` with the current bearer token, refreshing once on 401.
    ///
    /// # Errors
    ///
    /// Transport failures and [`SiteError::Auth`] when the refresh fails.
    /// HTTP error statuses are returned as responses.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SiteError> {
        let bearer = self.tokens.access_token();
        let response = self.transport.send(request.clone().with_bearer(bearer.clone())).await?;
        if response.status != 401 {
            return Ok(response);
        }

        tracing::debug!(path = %request.path, "access token rejected");
        self.refresh(bearer.as_deref()).await?;
        self.transport.send(request.with_bearer(self.tokens.access_token())).await
    }

    /// Refresh the access token unless another caller already replaced the
    /// one that was rejected.
    async fn refresh(&self, rejected: Option<&str>) -> Result<(), SiteError> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.tokens.access_token();
        if current.is_some() && current.as_deref() != rejected {
            return Ok(());
        }
        // Cleared while we waited: the session already expired.
        if current.is_none() && rejected.is_some() {
            return Err(SiteError::Auth);
        }
        let Some(refresh) = self.tokens.refresh_token() else {
            return Err(self.expire());
        };

        let request = ApiRequest::json(Method::Post, REFRESH_PATH, json!({ "refresh": refresh }));
        let pair = match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                response.json().ok().and_then(|body| serde_json::from_value::<TokenPair>(body).ok())
            }
            Ok(response) => {
                tracing::warn!(status = response.status, "token refresh rejected");
                None
            }
            Err(err) => return Err(err),
        };
        match pair {
            Some(pair) => {
                self.tokens.store_tokens(&pair.access, pair.refresh.as_deref());
                tracing::debug!("access token refreshed");
                Ok(())
            }
            None => Err(self.expire()),
        }
    }

    fn expire(&self) -> SiteError {
        self.tokens.clear();
        if let Some(hook) = &self.on_expired {
            hook();
        }
        SiteError::Auth
    }

    /// Send and decode a JSON success body.
    ///
    /// # Errors
    ///
    /// [`SiteError::Network`] for non-2xx statuses, [`SiteError::Decode`] for
    /// unparsable bodies.
    pub async fn send_json(&self, request: ApiRequest) -> Result<Value, SiteError> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(SiteError::from_response(response.status, &response.body));
        }
        response.json()
    }

    /// [`ApiClient::send_json`] decoded into `R`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send_json`].
    pub async fn send_as<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, SiteError> {
        Ok(serde_json::from_value(self.send_json(request).await?)?)
    }

    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, SiteError> {
        self.send_json(ApiRequest::get(path)).await
    }
}

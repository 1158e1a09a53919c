//! Bearer credentials and the session-expired hook.
//!
//! The API client never reads browser storage directly: it is handed a
//! [`TokenStore`] at construction. The browser build backs it with
//! `localStorage`, the CLI and tests with [`MemoryTokens`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Where access and refresh tokens live between requests.
pub trait TokenStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// Replace the access token; `refresh` is kept when `None`.
    fn store_tokens(&self, access: &str, refresh: Option<&str>);
    fn clear(&self);
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn access_token(&self) -> Option<String> {
        (**self).access_token()
    }

    fn refresh_token(&self) -> Option<String> {
        (**self).refresh_token()
    }

    fn store_tokens(&self, access: &str, refresh: Option<&str>) {
        (**self).store_tokens(access, refresh);
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// Token pair returned by `auth/token/` and `auth/token/refresh/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Called once when refreshing fails and the user must sign in again.
pub type SessionExpired = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokens {
    inner: Mutex<Tokens>,
}

impl MemoryTokens {
    #[must_use]
    pub fn new(access: Option<String>, refresh: Option<String>) -> Self {
        Self { inner: Mutex::new(Tokens { access, refresh }) }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Tokens) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl TokenStore for MemoryTokens {
    fn access_token(&self) -> Option<String> {
        self.with(|t| t.access.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.with(|t| t.refresh.clone())
    }

    fn store_tokens(&self, access: &str, refresh: Option<&str>) {
        self.with(|t| {
            t.access = Some(access.to_owned());
            if let Some(refresh) = refresh {
                t.refresh = Some(refresh.to_owned());
            }
        });
    }

    fn clear(&self) {
        self.with(|t| *t = Tokens::default());
    }
}

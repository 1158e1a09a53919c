//! `localStorage`-backed bearer tokens.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use casesite::TokenStore;

pub const ACCESS_KEY: &str = "access_token";
pub const REFRESH_KEY: &str = "refresh_token";

/// Token store reading and writing `window.localStorage`.
///
/// Every method is a no-op (or `None`) outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokens;

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(feature = "hydrate")]
fn read(key: &str) -> Option<String> {
    storage()?.get_item(key).ok()?.filter(|v| !v.is_empty())
}

impl TokenStore for BrowserTokens {
    fn access_token(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            read(ACCESS_KEY)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn refresh_token(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            read(REFRESH_KEY)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn store_tokens(&self, access: &str, refresh: Option<&str>) {
        #[cfg(feature = "hydrate")]
        if let Some(storage) = storage() {
            let _ = storage.set_item(ACCESS_KEY, access);
            if let Some(refresh) = refresh {
                let _ = storage.set_item(REFRESH_KEY, refresh);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (access, refresh);
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        if let Some(storage) = storage() {
            let _ = storage.remove_item(ACCESS_KEY);
            let _ = storage.remove_item(REFRESH_KEY);
        }
    }
}

//! `profile/` endpoints.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde_json::{Map, Value};

use super::client::ApiClient;
use crate::auth::TokenStore;
use crate::error::SiteError;
use crate::models::{FileUpload, UserProfile};
use crate::transport::{ApiRequest, Method, MultipartPart, Transport};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn profile(&self) -> Result<UserProfile, SiteError> {
        self.send_as(ApiRequest::get("profile/")).await
    }

    /// Update profile fields; with an avatar the request becomes multipart.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn update_profile(
        &self,
        fields: Map<String, Value>,
        avatar: Option<FileUpload>,
    ) -> Result<UserProfile, SiteError> {
        let request = match avatar {
            None => ApiRequest::json(Method::Put, "profile/", Value::Object(fields)),
            Some(file) => {
                let mut parts: Vec<MultipartPart> = fields
                    .into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| match v {
                        Value::String(s) => MultipartPart::text(&k, s),
                        other => MultipartPart::text(&k, other.to_string()),
                    })
                    .collect();
                parts.push(MultipartPart::file("avatar", file));
                ApiRequest::multipart(Method::Put, "profile/", parts)
            }
        };
        self.send_as(request).await
    }
}

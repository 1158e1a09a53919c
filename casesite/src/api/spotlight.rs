//! `spotlight-posts/` endpoints.

#[cfg(test)]
#[path = "spotlight_test.rs"]
mod spotlight_test;

use serde_json::json;

use super::client::ApiClient;
use crate::auth::TokenStore;
use crate::error::SiteError;
use crate::models::{SpotlightDraft, SpotlightPost, list_from_value};
use crate::transport::{ApiRequest, Method, Transport};

fn post_path(id: &str) -> String {
    format!("spotlight-posts/{id}/")
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Posts for one case, or all of the user's posts.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn spotlight_posts(&self, case_id: Option<&str>) -> Result<Vec<SpotlightPost>, SiteError> {
        let path = match case_id {
            Some(id) => format!("spotlight-posts/?case={id}"),
            None => "spotlight-posts/".to_owned(),
        };
        Ok(list_from_value(self.get_json(&path).await?)?)
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn create_spotlight_post(&self, draft: &SpotlightDraft) -> Result<SpotlightPost, SiteError> {
        let body = serde_json::to_value(draft)?;
        self.send_as(ApiRequest::json(Method::Post, "spotlight-posts/", body)).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn update_spotlight_post(&self, id: &str, draft: &SpotlightDraft) -> Result<SpotlightPost, SiteError> {
        let body = serde_json::to_value(draft)?;
        self.send_as(ApiRequest::json(Method::Patch, post_path(id), body)).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn publish_spotlight_post(&self, id: &str) -> Result<SpotlightPost, SiteError> {
        self.send_as(ApiRequest::new(Method::Post, format!("spotlight-posts/{id}/publish/"))).await
    }

    /// Schedule publication; `when` is an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn schedule_spotlight_post(&self, id: &str, when: &str) -> Result<SpotlightPost, SiteError> {
        let body = json!({ "scheduled_for": when });
        self.send_as(ApiRequest::json(Method::Post, format!("spotlight-posts/{id}/schedule/"), body)).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn delete_spotlight_post(&self, id: &str) -> Result<(), SiteError> {
        self.send_json(ApiRequest::new(Method::Delete, post_path(id))).await.map(drop)
    }
}

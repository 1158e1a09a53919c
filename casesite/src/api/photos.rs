//! `case-photos/` endpoints.

#[cfg(test)]
#[path = "photos_test.rs"]
mod photos_test;

use serde_json::json;

use super::client::ApiClient;
use crate::auth::TokenStore;
use crate::error::SiteError;
use crate::models::{CasePhoto, FileUpload, list_from_value};
use crate::transport::{ApiRequest, Method, MultipartPart, Transport};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Photos for one case, ordered by their `order` field.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn photos(&self, case_id: &str) -> Result<Vec<CasePhoto>, SiteError> {
        let mut photos: Vec<CasePhoto> = list_from_value(self.get_json(&format!("case-photos/?case={case_id}")).await?)?;
        photos.sort_by_key(|p| p.order);
        Ok(photos)
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn upload_photo(
        &self,
        case_id: &str,
        file: FileUpload,
        caption: Option<&str>,
    ) -> Result<CasePhoto, SiteError> {
        let mut parts = vec![MultipartPart::text("case", case_id), MultipartPart::file("image", file)];
        if let Some(caption) = caption.filter(|c| !c.trim().is_empty()) {
            parts.push(MultipartPart::text("caption", caption));
        }
        self.send_as(ApiRequest::multipart(Method::Post, "case-photos/", parts)).await
    }

    /// Persist a new display order; `photo_ids` is the full ordered list.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn reorder_photos(&self, case_id: &str, photo_ids: &[String]) -> Result<(), SiteError> {
        let body = json!({ "case": case_id, "photo_ids": photo_ids });
        self.send_json(ApiRequest::json(Method::Post, "case-photos/reorder/", body)).await.map(drop)
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn delete_photo(&self, photo_id: &str) -> Result<(), SiteError> {
        self.send_json(ApiRequest::new(Method::Delete, format!("case-photos/{photo_id}/"))).await.map(drop)
    }
}

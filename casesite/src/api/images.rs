//! Generic image hosting.

use super::client::ApiClient;
use crate::auth::TokenStore;
use crate::error::SiteError;
use crate::models::{FileUpload, ImageUpload};
use crate::transport::{ApiRequest, Method, MultipartPart, Transport};

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Upload an image and return its hosted URL.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn upload_image(&self, file: FileUpload) -> Result<ImageUpload, SiteError> {
        let parts = vec![MultipartPart::file("image", file)];
        self.send_as(ApiRequest::multipart(Method::Post, "images/upload/", parts)).await
    }
}

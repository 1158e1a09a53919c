//! Persistence gateway for one case being edited.
//!
//! DESIGN
//! ======
//! The server-assigned case id is the only record of whether the case
//! exists. It lives behind one async mutex that [`CaseGateway::save`] holds
//! for the whole request, so saves run one at a time: a save issued while
//! the first create is in flight waits for it and then sends a PATCH.
//! Actions that need the case (deploy, photos, section updates) take the
//! same lock to read the id, which orders them after any pending save.
//!
//! TRADE-OFFS
//! ==========
//! The payload is a snapshot of the form when `save` is called. Edits made
//! while a save is in flight go out with the next save.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use futures::lock::Mutex;
use serde_json::{Map, Value, json};

use crate::api::ApiClient;
use crate::auth::TokenStore;
use crate::case::CaseForm;
use crate::deploy::{DeployTarget, Deployment};
use crate::error::SiteError;
use crate::models::{CasePhoto, CaseRecord, FileUpload, ImageUpload};
use crate::template::Template;
use crate::transport::Transport;

/// Backend payload for a case save.
///
/// Contains every non-empty form field, the template reference when one is
/// chosen, and the customization tree under `template_data.customizations`.
#[must_use]
pub fn case_payload(form: &CaseForm, template: Option<&Template>, customizations: &Value) -> Value {
    let mut payload: Map<String, Value> = form.payload_fields();
    if let Some(template) = template {
        payload.insert("template_id".to_owned(), Value::String(template.id.clone()));
        if !template.version.is_empty() {
            payload.insert("template_version".to_owned(), Value::String(template.version.clone()));
        }
    }
    payload.insert("template_data".to_owned(), json!({ "customizations": customizations }));
    Value::Object(payload)
}

fn validation_summary(form: &CaseForm) -> Option<String> {
    let mut check = form.clone();
    let errors = check.validate();
    if errors.is_empty() {
        return None;
    }
    Some(errors.iter().map(|(field, msg)| format!("{field}: {msg}")).collect::<Vec<_>>().join(", "))
}

pub struct CaseGateway<T, S> {
    api: Arc<ApiClient<T, S>>,
    case_id: Mutex<Option<String>>,
}

impl<T: Transport, S: TokenStore> CaseGateway<T, S> {
    /// Gateway for a case that has not been created yet.
    #[must_use]
    pub fn new(api: Arc<ApiClient<T, S>>) -> Self {
        Self { api, case_id: Mutex::new(None) }
    }

    /// Gateway for an existing case.
    #[must_use]
    pub fn for_case(api: Arc<ApiClient<T, S>>, case_id: impl Into<String>) -> Self {
        Self { api, case_id: Mutex::new(Some(case_id.into())) }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    /// Server id, once the case has been saved. Waits for an in-flight save.
    pub async fn case_id(&self) -> Option<String> {
        self.case_id.lock().await.clone()
    }

    async fn require_id(&self) -> Result<String, SiteError> {
        self.case_id().await.ok_or(SiteError::NotSaved)
    }

    /// Create the case on first call, patch it afterwards.
    ///
    /// # Errors
    ///
    /// [`SiteError::Validation`] without touching the network when required
    /// fields are missing; otherwise backend or transport failures.
    pub async fn save(
        &self,
        form: &CaseForm,
        template: Option<&Template>,
        customizations: &Value,
    ) -> Result<CaseRecord, SiteError> {
        if let Some(summary) = validation_summary(form) {
            return Err(SiteError::Validation(summary));
        }
        let payload = case_payload(form, template, customizations);

        let mut case_id = self.case_id.lock().await;
        let record = match case_id.as_deref() {
            Some(id) => {
                tracing::debug!(case_id = id, "updating case");
                self.api.update_case(id, payload).await?
            }
            None => {
                let record = self.api.create_case(payload).await?;
                tracing::info!(case_id = %record.id, "case created");
                *case_id = Some(record.id.clone());
                record
            }
        };
        Ok(record)
    }

    /// # Errors
    ///
    /// [`SiteError::NotSaved`] before the first save.
    pub async fn save_customizations(&self, customizations: &Value) -> Result<Value, SiteError> {
        let id = self.require_id().await?;
        self.api.save_customizations(&id, customizations).await
    }

    /// # Errors
    ///
    /// [`SiteError::NotSaved`] before the first save.
    pub async fn update_template_section(&self, section: &str, data: &Value) -> Result<Value, SiteError> {
        let id = self.require_id().await?;
        self.api.update_template_section(&id, section, data).await
    }

    /// Publish the saved case to a subdomain or custom domain.
    ///
    /// # Errors
    ///
    /// [`SiteError::Validation`] for a malformed target, [`SiteError::NotSaved`]
    /// before the first save, then backend failures (e.g. subdomain taken).
    pub async fn deploy(&self, target: &DeployTarget) -> Result<Deployment, SiteError> {
        let target = target.normalized();
        target.validate()?;
        let id = self.require_id().await?;
        let deployment = self.api.deploy_case(&id, &target).await?;
        tracing::info!(case_id = %id, status = ?deployment.status, "deploy requested");
        Ok(deployment)
    }

    /// # Errors
    ///
    /// [`SiteError::NotSaved`] before the first save.
    pub async fn deployment_status(&self) -> Result<Deployment, SiteError> {
        let id = self.require_id().await?;
        self.api.deployment_status(&id).await
    }

    /// # Errors
    ///
    /// [`SiteError::NotSaved`] before the first save.
    pub async fn upload_photo(&self, file: FileUpload, caption: Option<&str>) -> Result<CasePhoto, SiteError> {
        let id = self.require_id().await?;
        self.api.upload_photo(&id, file, caption).await
    }

    /// # Errors
    ///
    /// [`SiteError::NotSaved`] before the first save.
    pub async fn photos(&self) -> Result<Vec<CasePhoto>, SiteError> {
        let id = self.require_id().await?;
        self.api.photos(&id).await
    }

    /// Host an image for a customization zone. Does not need a saved case.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn upload_image(&self, file: FileUpload) -> Result<ImageUpload, SiteError> {
        self.api.upload_image(file).await
    }

    /// Delete the case and forget its id.
    ///
    /// # Errors
    ///
    /// [`SiteError::NotSaved`] before the first save.
    pub async fn delete(&self) -> Result<(), SiteError> {
        let mut case_id = self.case_id.lock().await;
        let id = case_id.clone().ok_or(SiteError::NotSaved)?;
        self.api.delete_case(&id).await?;
        tracing::info!(case_id = %id, "case deleted");
        *case_id = None;
        Ok(())
    }
}

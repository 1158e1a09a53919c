//! `cases/` endpoints.

#[cfg(test)]
#[path = "cases_test.rs"]
mod cases_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::client::ApiClient;
use crate::auth::TokenStore;
use crate::deploy::{DeployTarget, Deployment};
use crate::error::SiteError;
use crate::models::{CaseRecord, list_from_value};
use crate::transport::{ApiRequest, Method, Transport};

/// Dashboard counters from `cases/stats/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseStats {
    #[serde(default, alias = "total")]
    pub total_cases: u64,
    #[serde(default, alias = "deployed", alias = "deployed_cases")]
    pub published_cases: u64,
    #[serde(default, alias = "drafts", alias = "draft_cases")]
    pub draft_cases: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn case_path(id: &str) -> String {
    format!("cases/{id}/")
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn create_case(&self, payload: Value) -> Result<CaseRecord, SiteError> {
        self.send_as(ApiRequest::json(Method::Post, "cases/", payload)).await
    }

    /// Partial update; last write wins.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn update_case(&self, id: &str, payload: Value) -> Result<CaseRecord, SiteError> {
        self.send_as(ApiRequest::json(Method::Patch, case_path(id), payload)).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn get_case(&self, id: &str) -> Result<CaseRecord, SiteError> {
        self.send_as(ApiRequest::get(case_path(id))).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn my_cases(&self) -> Result<Vec<CaseRecord>, SiteError> {
        Ok(list_from_value(self.get_json("cases/my_cases/").await?)?)
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn case_stats(&self) -> Result<CaseStats, SiteError> {
        self.send_as(ApiRequest::get("cases/stats/")).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn delete_case(&self, id: &str) -> Result<(), SiteError> {
        self.send_json(ApiRequest::new(Method::Delete, case_path(id))).await.map(drop)
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn save_customizations(&self, id: &str, customizations: &Value) -> Result<Value, SiteError> {
        let path = format!("cases/{id}/save_customizations/");
        self.send_json(ApiRequest::json(Method::Post, path, json!({ "customizations": customizations }))).await
    }

    /// Replace one top-level section of the saved customization tree.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn update_template_section(&self, id: &str, section: &str, data: &Value) -> Result<Value, SiteError> {
        let path = format!("cases/{id}/update_template_section/");
        self.send_json(ApiRequest::json(Method::Post, path, json!({ "section": section, "data": data }))).await
    }

    /// # Errors
    ///
    /// Backend or transport failure; the target is not validated here.
    pub async fn deploy_case(&self, id: &str, target: &DeployTarget) -> Result<Deployment, SiteError> {
        let body = json!({ "subdomain": target.subdomain, "custom_domain": target.custom_domain });
        self.send_as(ApiRequest::json(Method::Post, format!("cases/{id}/deploy/"), body)).await
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn deployment_status(&self, id: &str) -> Result<Deployment, SiteError> {
        self.send_as(ApiRequest::get(format!("cases/{id}/deployment_status/"))).await
    }
}

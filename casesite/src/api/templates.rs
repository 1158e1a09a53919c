//! `templates/` endpoints.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::ApiClient;
use crate::auth::TokenStore;
use crate::error::SiteError;
use crate::models::list_from_value;
use crate::template::Template;
use crate::transport::{ApiRequest, Transport};

/// Response of `templates/compare/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateComparison {
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn templates(&self) -> Result<Vec<Template>, SiteError> {
        Ok(list_from_value(self.get_json("templates/").await?)?)
    }

    /// Schema document for one template. Accepts both a bare schema and a
    /// `{"schema": ...}` wrapper.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn template_schema(&self, id: &str) -> Result<Value, SiteError> {
        let body = self.get_json(&format!("templates/{id}/schema/")).await?;
        Ok(match body {
            Value::Object(mut map) if map.contains_key("schema") => map.remove("schema").unwrap_or(Value::Null),
            other => other,
        })
    }

    /// Fill in `template.schema` when the listing omitted it.
    ///
    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn ensure_schema(&self, mut template: Template) -> Result<Template, SiteError> {
        if template.schema.is_none() {
            let schema = self.template_schema(&template.id).await?;
            template.schema = (!schema.is_null()).then_some(schema);
        }
        Ok(template)
    }

    /// # Errors
    ///
    /// Backend or transport failure.
    pub async fn compare_templates(&self, ids: &[&str]) -> Result<TemplateComparison, SiteError> {
        let path = if ids.is_empty() {
            "templates/compare/".to_owned()
        } else {
            format!("templates/compare/?ids={}", ids.join(","))
        };
        self.send_as(ApiRequest::get(path)).await
    }
}

//! Deploy targets and deployment records.

#[cfg(test)]
#[path = "deploy_test.rs"]
mod deploy_test;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SiteError;
use crate::models::deserialize_opt_id;

const MIN_SUBDOMAIN_LEN: usize = 3;

fn subdomain_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("subdomain pattern compiles"))
}

fn domain_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}$")
            .expect("domain pattern compiles")
    })
}

/// Whether `value` is a usable subdomain label.
#[must_use]
pub fn is_valid_subdomain(value: &str) -> bool {
    value.len() >= MIN_SUBDOMAIN_LEN && subdomain_re().is_match(value)
}

/// Whether `value` looks like `label(.label)+.tld`.
#[must_use]
pub fn is_valid_domain(value: &str) -> bool {
    domain_re().is_match(&value.to_ascii_lowercase())
}

/// Where a case site should be published. Exactly one field must be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
}

impl DeployTarget {
    #[must_use]
    pub fn subdomain(name: impl Into<String>) -> Self {
        Self { subdomain: Some(name.into()), custom_domain: None }
    }

    #[must_use]
    pub fn custom_domain(domain: impl Into<String>) -> Self {
        Self { subdomain: None, custom_domain: Some(domain.into()) }
    }

    /// Trim both fields and treat blanks as unset.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let clean = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
        Self { subdomain: clean(&self.subdomain), custom_domain: clean(&self.custom_domain) }
    }

    /// # Errors
    ///
    /// [`SiteError::Validation`] unless exactly one of the two fields is set
    /// and well-formed.
    pub fn validate(&self) -> Result<(), SiteError> {
        match (&self.subdomain, &self.custom_domain) {
            (Some(sub), None) if is_valid_subdomain(sub) => Ok(()),
            (Some(_), None) => Err(SiteError::Validation(
                "Subdomain must be at least 3 characters of lowercase letters, digits, or hyphens".into(),
            )),
            (None, Some(domain)) if is_valid_domain(domain) => Ok(()),
            (None, Some(_)) => Err(SiteError::Validation("Enter a valid domain such as example.org".into())),
            (Some(_), Some(_)) => Err(SiteError::Validation("Choose either a subdomain or a custom domain".into())),
            (None, None) => Err(SiteError::Validation("A subdomain or custom domain is required".into())),
        }
    }
}

/// Backend deployment lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Pending,
    #[serde(alias = "in_progress", alias = "building")]
    Deploying,
    #[serde(alias = "deployed", alias = "live", alias = "success")]
    Active,
    #[serde(alias = "error")]
    Failed,
    #[serde(other)]
    Unknown,
}

/// A deployment as returned by `deploy/` and `deployment_status/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default, alias = "case", deserialize_with = "deserialize_opt_id")]
    pub case_id: Option<String>,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub custom_domain: Option<String>,
    #[serde(alias = "deployment_status")]
    pub status: DeploymentStatus,
    #[serde(default, alias = "site_url")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deployment {
    /// No further status changes are expected; polling can stop.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, DeploymentStatus::Active | DeploymentStatus::Failed)
    }

    /// Public address of the site, derived from the target when the backend
    /// does not return one.
    #[must_use]
    pub fn public_url(&self, base_domain: &str) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        if let Some(domain) = &self.custom_domain {
            return Some(format!("https://{domain}"));
        }
        self.subdomain.as_ref().map(|sub| format!("https://{sub}.{base_domain}"))
    }
}

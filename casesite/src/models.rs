//! Backend record shapes.
//!
//! DESIGN
//! ======
//! The backend owns these records; the client only needs a handful of fields
//! from each. Known fields are typed, everything else is kept in a flattened
//! map so records survive a read-modify-write without losing data.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accept ids sent either as JSON numbers or strings.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

/// A case as returned by `cases/` endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CaseRecord {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The saved customization tree, if the case has one.
    #[must_use]
    pub fn customizations(&self) -> Option<&Value> {
        self.fields.get("template_data")?.get("customizations")
    }

    /// Template id the case was last saved with.
    #[must_use]
    pub fn template_id(&self) -> Option<String> {
        match self.fields.get("template_id").or_else(|| self.fields.get("template"))? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// `"First Last"` for list rows.
    #[must_use]
    pub fn display_name(&self) -> String {
        let part = |key: &str| self.fields.get(key).and_then(Value::as_str).unwrap_or_default().trim().to_owned();
        let name = format!("{} {}", part("first_name"), part("last_name"));
        let name = name.trim();
        if name.is_empty() { format!("Case {}", self.id) } else { name.to_owned() }
    }
}

/// A gallery photo attached to a case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CasePhoto {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub case: Option<String>,
    #[serde(alias = "image", alias = "url")]
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, alias = "position")]
    pub order: i64,
    #[serde(default)]
    pub is_primary: bool,
}

/// An advocacy post published on a case site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotlightPost {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub case: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub scheduled_for: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Fields sent when creating or editing a spotlight post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotlightDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The signed-in user's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, alias = "avatar")]
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the generic image upload endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    #[serde(alias = "image_url", alias = "secure_url")]
    pub url: String,
}

/// A file to upload in a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Paginated or bare list responses both decode into a `Vec`.
pub(crate) fn list_from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Object(mut map) if map.contains_key("results") => {
            serde_json::from_value(map.remove("results").unwrap_or(Value::Array(Vec::new())))
        }
        other => serde_json::from_value(other),
    }
}

//! Parsing of command-line inputs into `casesite` types.

use std::path::Path;

use casesite::{CaseForm, DeployTarget, FileUpload};
use serde_json::Value;

use crate::CliError;

/// Keys of a case file that are not case fields.
const NON_FIELD_KEYS: [&str; 4] = ["id", "customizations", "template_id", "template_data"];

/// A case file split into its parts.
#[derive(Debug)]
pub struct CaseInput {
    pub form: CaseForm,
    pub customizations: Option<Value>,
    pub template_id: Option<String>,
}

/// API root ending in `/api/`-style slash; accepts a bare host root too.
///
/// # Errors
///
/// [`CliError::InvalidBaseUrl`] unless the URL is http(s).
pub fn normalize_base_url(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(CliError::InvalidBaseUrl(raw.to_owned()));
    }
    let base = trimmed.trim_end_matches('/');
    if base.ends_with("/api") { Ok(format!("{base}/")) } else { Ok(format!("{base}/api/")) }
}

/// `healthz` sits beside the API root, not under it.
#[must_use]
pub fn health_url(api_root: &str) -> String {
    let root = api_root.trim_end_matches('/');
    format!("{}/healthz", root.strip_suffix("/api").unwrap_or(root))
}

/// `key=value` pairs from repeated `--field` flags; values that parse as
/// JSON keep their type, everything else is a string.
///
/// # Errors
///
/// [`CliError::InvalidInput`] for a pair without `=`.
pub fn field_pairs(pairs: &[String]) -> Result<serde_json::Map<String, Value>, CliError> {
    let mut out = serde_json::Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(CliError::InvalidInput(format!("expected key=value, got `{pair}`")));
        };
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
        out.insert(key.trim().to_owned(), value);
    }
    Ok(out)
}

/// Split a JSON case file into form fields, customizations, and template id.
///
/// Customizations may sit at the top level or under
/// `template_data.customizations`, as the backend returns them.
///
/// # Errors
///
/// [`CliError::InvalidInput`] when the file is not a JSON object.
pub fn case_input(value: &Value) -> Result<CaseInput, CliError> {
    let Some(map) = value.as_object() else {
        return Err(CliError::InvalidInput("case file must be a JSON object".into()));
    };

    let mut form = CaseForm::new();
    for (key, field) in map {
        if !NON_FIELD_KEYS.contains(&key.as_str()) {
            form.set_field(key, field.clone());
        }
    }
    let customizations = map
        .get("customizations")
        .or_else(|| map.get("template_data").and_then(|d| d.get("customizations")))
        .cloned();
    let template_id = match map.get("template_id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    Ok(CaseInput { form, customizations, template_id })
}

/// Exactly one of the two flags, as a deploy target.
#[must_use]
pub fn deploy_target(subdomain: Option<String>, custom_domain: Option<String>) -> DeployTarget {
    DeployTarget { subdomain, custom_domain }.normalized()
}

/// Content type from a file extension.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Read a file from disk for upload.
///
/// # Errors
///
/// I/O failures reading the file.
pub fn read_upload(path: &Path) -> Result<FileUpload, CliError> {
    let bytes = std::fs::read(path)?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("upload").to_owned();
    Ok(FileUpload { filename, content_type: content_type_for(path).to_owned(), bytes })
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;

//! Customization store seeded from a template's editable zones.
//!
//! DESIGN
//! ======
//! The store is a nested JSON tree addressed by dotted paths, paired with the
//! zone table of the template it belongs to. Edits go through [`CustomizationStore::set`],
//! which only accepts declared paths holding values of the declared kind.
//! Trees loaded from a saved case are kept verbatim: the backend is the
//! source of truth for what was persisted, even under an older schema.

#[cfg(test)]
#[path = "customize_test.rs"]
mod customize_test;

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::path::{PathError, get_path, set_path_in_place};
use crate::template::{EditableZone, Template, editable_zones};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("`{0}` is not an editable zone of this template")]
    UndeclaredPath(String),
    #[error("`{path}` expects a {expected} value")]
    TypeMismatch { path: String, expected: String },
    #[error("`{0}` is not one of the allowed options")]
    NotAnOption(String),
}

/// Build the initial customization tree for `template`.
///
/// Every zone's path receives its declared default (or `""`). Templates
/// without a schema yield `{}`.
#[must_use]
pub fn initialize_customizations(template: &Template) -> Value {
    seed(&editable_zones(template))
}

fn seed(zones: &[EditableZone]) -> Value {
    let mut tree = Value::Object(Map::new());
    for zone in zones {
        // The walk skips empty keys, so every zone path is well-formed.
        let _ = set_path_in_place(&mut tree, &zone.path, zone.default.clone());
    }
    tree
}

/// Customization tree for one template, with write validation.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomizationStore {
    template_id: Option<String>,
    zones: Vec<EditableZone>,
    by_path: HashMap<String, usize>,
    values: Value,
}

impl Default for CustomizationStore {
    fn default() -> Self {
        Self::from_zones(None, Vec::new(), Value::Object(Map::new()))
    }
}

impl CustomizationStore {
    /// Fresh store holding the template's defaults.
    #[must_use]
    pub fn for_template(template: &Template) -> Self {
        let zones = editable_zones(template);
        let values = seed(&zones);
        Self::from_zones(Some(template.id.clone()), zones, values)
    }

    /// Store for an existing case: the saved tree is used verbatim.
    ///
    /// A missing or non-object blob falls back to the template defaults.
    #[must_use]
    pub fn from_saved(template: &Template, saved: Option<&Value>) -> Self {
        match saved {
            Some(tree @ Value::Object(_)) => {
                Self::from_zones(Some(template.id.clone()), editable_zones(template), tree.clone())
            }
            _ => Self::for_template(template),
        }
    }

    fn from_zones(template_id: Option<String>, zones: Vec<EditableZone>, values: Value) -> Self {
        let by_path = zones.iter().enumerate().map(|(i, z)| (z.path.clone(), i)).collect();
        Self { template_id, zones, by_path, values }
    }

    #[must_use]
    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    #[must_use]
    pub fn zones(&self) -> &[EditableZone] {
        &self.zones
    }

    #[must_use]
    pub fn zone(&self, path: &str) -> Option<&EditableZone> {
        self.by_path.get(path).map(|i| &self.zones[*i])
    }

    /// The whole tree, as persisted and as sent to the preview.
    #[must_use]
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// Stored value at `path`, else the zone default, else `None`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.values, path).or_else(|| self.zone(path).map(|z| &z.default))
    }

    /// String view used by form controls.
    #[must_use]
    pub fn get_str(&self, path: &str) -> String {
        match self.get(path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Write `value` at a declared zone path.
    ///
    /// # Errors
    ///
    /// Rejects malformed paths, paths no zone declares, values of the wrong
    /// JSON kind, and values outside a select zone's options.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        crate::path::segments(path)?;
        let zone = self.zone(path).ok_or_else(|| StoreError::UndeclaredPath(path.to_owned()))?;
        if !zone.kind.accepts(&value) {
            return Err(StoreError::TypeMismatch { path: path.to_owned(), expected: zone.kind.name().to_owned() });
        }
        if !zone.accepts(&value) {
            return Err(StoreError::NotAnOption(path.to_owned()));
        }
        set_path_in_place(&mut self.values, path, value)?;
        Ok(())
    }

    /// Restore one zone to its declared default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UndeclaredPath`] for unknown paths.
    pub fn reset_zone(&mut self, path: &str) -> Result<(), StoreError> {
        let default = self.zone(path).ok_or_else(|| StoreError::UndeclaredPath(path.to_owned()))?.default.clone();
        set_path_in_place(&mut self.values, path, default)?;
        Ok(())
    }

    /// Drop every edit and re-seed from `template`.
    pub fn reset(&mut self, template: &Template) {
        *self = Self::for_template(template);
    }

    /// Values under one top-level key, for section-level saves.
    #[must_use]
    pub fn section(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or_else(|| Value::Object(Map::new()))
    }
}

//! Template descriptors and the editable zones declared by their schemas.
//!
//! A schema groups field declarations under `global`, `pages.<page>`, and
//! `sections.<section>`. Any object carrying a string `type` is a field
//! declaration; nested objects without one are walked further. Each field
//! becomes one [`EditableZone`] addressed by a dotted customization path.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::deserialize_id;

/// A site template as listed by `templates/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "thumbnail_url", alias = "preview_image")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub schema: Option<Value>,
}

fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl Template {
    /// Stable key used in preview URLs and template component lookup.
    #[must_use]
    pub fn slug(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        for ch in self.name.trim().chars() {
            if ch.is_ascii_alphanumeric() {
                out.push(ch.to_ascii_lowercase());
            } else if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
        }
        out.trim_end_matches('-').to_owned()
    }
}

/// Where in the schema a zone was declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneGroup {
    Global,
    Page(String),
    Section(String),
}

impl ZoneGroup {
    /// Key of the first path segment the group writes under.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Global => "global",
            Self::Page(name) | Self::Section(name) => name,
        }
    }
}

/// Value shape a zone accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Text,
    LongText,
    Color,
    Image,
    Url,
    Email,
    Date,
    Select,
    Number,
    Boolean,
    List,
    /// Unrecognized type name; accepts any value.
    Other(String),
}

impl ZoneKind {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "input" => Self::Text,
            "textarea" | "richtext" | "rich_text" | "markdown" => Self::LongText,
            "color" | "colour" => Self::Color,
            "image" | "photo" | "file" => Self::Image,
            "url" | "link" => Self::Url,
            "email" => Self::Email,
            "date" => Self::Date,
            "select" | "choice" | "dropdown" => Self::Select,
            "number" | "integer" | "range" => Self::Number,
            "boolean" | "bool" | "toggle" | "checkbox" => Self::Boolean,
            "list" | "gallery" | "array" => Self::List,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether `value` has the JSON shape this kind stores.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Other(_) => true,
            _ => value.is_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::LongText => "textarea",
            Self::Color => "color",
            Self::Image => "image",
            Self::Url => "url",
            Self::Email => "email",
            Self::Date => "date",
            Self::Select => "select",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Other(name) => name,
        }
    }
}

/// One customizable field declared by a template schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditableZone {
    /// Schema location, e.g. `sections.hero.heroImage`.
    pub id: String,
    /// Customization store path, e.g. `hero.heroImage`.
    pub path: String,
    pub label: String,
    pub kind: ZoneKind,
    pub group: ZoneGroup,
    /// Declared default, or `""` when the schema gives none.
    pub default: Value,
    /// Allowed values for select zones; empty means unrestricted.
    pub options: Vec<Value>,
    pub help: Option<String>,
}

impl EditableZone {
    /// Whether `value` may be written to this zone.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        if !self.kind.accepts(value) {
            return false;
        }
        self.options.is_empty() || self.options.iter().any(|opt| option_value(opt) == value)
    }
}

/// Options may be bare values or `{value, label}` objects.
fn option_value(option: &Value) -> &Value {
    option.get("value").unwrap_or(option)
}

/// Walk a template's schema and list its editable zones in schema order.
///
/// Templates without a schema have no zones. Empty keys are skipped and each
/// customization path is declared at most once.
#[must_use]
pub fn editable_zones(template: &Template) -> Vec<EditableZone> {
    template.schema.as_ref().map(zones_from_schema).unwrap_or_default()
}

/// Walk a raw schema value; see [`editable_zones`].
#[must_use]
pub fn zones_from_schema(schema: &Value) -> Vec<EditableZone> {
    let mut zones = Vec::new();
    let Some(root) = schema.as_object() else {
        return zones;
    };

    if let Some(global) = root.get("global").and_then(Value::as_object) {
        collect(global, &ZoneGroup::Global, "global", "global", &mut zones);
    }
    for (container, is_page) in [("pages", true), ("sections", false)] {
        let Some(groups) = root.get(container).and_then(Value::as_object) else {
            continue;
        };
        for (name, fields) in groups {
            let Some(fields) = fields.as_object().filter(|_| !name.is_empty()) else {
                continue;
            };
            let group = if is_page { ZoneGroup::Page(name.clone()) } else { ZoneGroup::Section(name.clone()) };
            collect(fields, &group, &format!("{container}.{name}"), name, &mut zones);
        }
    }
    dedupe_paths(zones)
}

/// A page and a section sharing a name write to the same path; the first
/// declaration wins.
fn dedupe_paths(zones: Vec<EditableZone>) -> Vec<EditableZone> {
    let mut seen = HashSet::new();
    zones
        .into_iter()
        .filter(|zone| {
            let fresh = seen.insert(zone.path.clone());
            if !fresh {
                tracing::warn!(zone = %zone.id, path = %zone.path, "duplicate customization path ignored");
            }
            fresh
        })
        .collect()
}

fn collect(fields: &Map<String, Value>, group: &ZoneGroup, id_prefix: &str, path_prefix: &str, out: &mut Vec<EditableZone>) {
    for (key, decl) in fields {
        let Some(decl_map) = decl.as_object().filter(|_| !key.is_empty()) else {
            continue;
        };
        let id = format!("{id_prefix}.{key}");
        let path = format!("{path_prefix}.{key}");
        match decl_map.get("type").and_then(Value::as_str) {
            Some(kind) => out.push(zone_from_decl(decl_map, kind, group.clone(), id, path, key)),
            None => collect(decl_map, group, &id, &path, out),
        }
    }
}

fn zone_from_decl(
    decl: &Map<String, Value>,
    kind: &str,
    group: ZoneGroup,
    id: String,
    path: String,
    key: &str,
) -> EditableZone {
    let label = decl
        .get("label")
        .and_then(Value::as_str)
        .filter(|l| !l.trim().is_empty())
        .map_or_else(|| humanize(key), str::to_owned);
    let default = match decl.get("default") {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(v) => v.clone(),
    };
    let options = decl.get("options").and_then(Value::as_array).cloned().unwrap_or_default();
    let help = decl
        .get("help")
        .or_else(|| decl.get("description"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    EditableZone { id, path, label, kind: ZoneKind::parse(kind), group, default, options, help }
}

/// `heroImage` / `hero_image` -> `Hero image`.
#[must_use]
pub fn humanize(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch == '_' || ch == '-' {
            words.push(' ');
        } else if ch.is_uppercase() && i > 0 {
            words.push(' ');
            words.extend(ch.to_lowercase());
        } else if i == 0 {
            words.extend(ch.to_uppercase());
        } else {
            words.push(ch);
        }
    }
    words
}

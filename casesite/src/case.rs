//! Case form fields, required-field validation, and age derivation.
//!
//! The form is a flat map of backend field names to JSON values plus a
//! parallel map of field errors. Editing a field clears its error; editing
//! `date_of_birth` also recomputes `age`.

#[cfg(test)]
#[path = "case_test.rs"]
mod case_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use time::Date;
use time::macros::format_description;

use crate::models::CaseRecord;

/// Field name -> human-readable message. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

pub const REQUIRED: &str = "Required";
pub const REQUIRED_MISSING: &str = "Required for missing persons";
pub const REQUIRED_HOMICIDE: &str = "Required for homicide cases";

/// Case classification; drives which date fields are required.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CrimeType {
    Missing,
    Homicide,
    Assault,
    Unidentified,
    Other(String),
}

impl CrimeType {
    pub const CHOICES: [Self; 4] = [Self::Missing, Self::Homicide, Self::Assault, Self::Unidentified];

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "missing" => Self::Missing,
            "homicide" => Self::Homicide,
            "assault" => Self::Assault,
            "unidentified" => Self::Unidentified,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Missing => "missing",
            Self::Homicide => "homicide",
            Self::Assault => "assault",
            Self::Unidentified => "unidentified",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Missing => "Missing person",
            Self::Homicide => "Homicide",
            Self::Assault => "Assault",
            Self::Unidentified => "Unidentified remains",
            Self::Other(_) => "Other",
        }
    }
}

impl fmt::Display for CrimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CrimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CrimeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Completed years between `date_of_birth` (`YYYY-MM-DD`) and `today`.
///
/// Returns `None` for an empty or unparsable date and for dates after `today`.
#[must_use]
pub fn derive_age(date_of_birth: &str, today: Date) -> Option<u32> {
    let raw = date_of_birth.trim();
    let raw = raw.get(..10).unwrap_or(raw);
    let born = Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()?;
    if born > today {
        return None;
    }
    let mut years = today.year() - born.year();
    if (today.month() as u8, today.day()) < (born.month() as u8, born.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn today() -> Date {
    time::OffsetDateTime::now_utc().date()
}

/// Editable case record with validation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaseForm {
    fields: Map<String, Value>,
    errors: FieldErrors,
}

impl CaseForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a saved case. The id and template blob stay with the record.
    #[must_use]
    pub fn from_record(record: &CaseRecord) -> Self {
        let fields = record
            .fields
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "template_data" | "template_id" | "template" | "template_version"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { fields, errors: FieldErrors::new() }
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn dismiss_errors(&mut self) {
        self.errors.clear();
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String view of a field; numbers are rendered, null and absent are `""`.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    #[must_use]
    pub fn crime_type(&self) -> Option<CrimeType> {
        let raw = self.fields.get("crime_type")?.as_str()?;
        (!raw.trim().is_empty()).then(|| CrimeType::parse(raw))
    }

    /// Update a field and clear its error, dating any age change to today.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) {
        self.set_field_on(name, value, today());
    }

    /// [`CaseForm::set_field`] with an explicit current date.
    pub fn set_field_on(&mut self, name: &str, value: impl Into<Value>, today: Date) {
        let value = value.into();
        self.errors.remove(name);
        if name == "date_of_birth" {
            let age = value.as_str().and_then(|dob| derive_age(dob, today));
            self.fields.insert("age".to_owned(), age.map_or_else(|| Value::String(String::new()), Value::from));
        }
        self.fields.insert(name.to_owned(), value);
    }

    /// Run the required-field checks and remember the result.
    pub fn validate(&mut self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for name in ["first_name", "last_name", "crime_type"] {
            if self.is_blank(name) {
                errors.insert(name.to_owned(), REQUIRED.to_owned());
            }
        }
        match self.crime_type() {
            Some(CrimeType::Missing) if self.is_blank("last_seen_date") => {
                errors.insert("last_seen_date".to_owned(), REQUIRED_MISSING.to_owned());
            }
            Some(CrimeType::Homicide) if self.is_blank("date_of_death") => {
                errors.insert("date_of_death".to_owned(), REQUIRED_HOMICIDE.to_owned());
            }
            _ => {}
        }
        self.errors.clone_from(&errors);
        errors
    }

    fn is_blank(&self, name: &str) -> bool {
        match self.fields.get(name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Fields to send to the backend: `null` and `""` values are dropped.
    #[must_use]
    pub fn payload_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Null) && v.as_str() != Some(""))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Case data as handed to templates and the preview frame.
    #[must_use]
    pub fn case_data(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

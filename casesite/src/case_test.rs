use super::*;
use serde_json::json;
use time::macros::date;

#[test]
fn age_counts_completed_years() {
    assert_eq!(derive_age("2000-03-15", date!(2024 - 03 - 14)), Some(23));
    assert_eq!(derive_age("2000-03-15", date!(2024 - 03 - 15)), Some(24));
    assert_eq!(derive_age("2000-03-15", date!(2024 - 12 - 01)), Some(24));
}

#[test]
fn age_handles_missing_and_bad_dates() {
    let today = date!(2024 - 06 - 01);
    assert_eq!(derive_age("", today), None);
    assert_eq!(derive_age("15/03/2000", today), None);
    assert_eq!(derive_age("2030-01-01", today), None);
    assert_eq!(derive_age("2000-03-15T00:00:00Z", today), Some(24));
}

#[test]
fn leap_day_birthday_waits_for_march() {
    assert_eq!(derive_age("2004-02-29", date!(2023 - 02 - 28)), Some(18));
    assert_eq!(derive_age("2004-02-29", date!(2023 - 03 - 01)), Some(19));
}

#[test]
fn birth_date_change_overwrites_age() {
    let mut form = CaseForm::new();
    form.set_field_on("age", 99, date!(2024 - 03 - 14));
    form.set_field_on("date_of_birth", "2000-03-15", date!(2024 - 03 - 14));
    assert_eq!(form.get("age"), Some(&json!(23)));

    form.set_field_on("date_of_birth", "", date!(2024 - 03 - 14));
    assert_eq!(form.get("age"), Some(&json!("")));
}

#[test]
fn validate_reports_missing_person_requirements() {
    let mut form = CaseForm::new();
    form.set_field("first_name", "");
    form.set_field("last_name", "Doe");
    form.set_field("crime_type", "missing");

    let errors = form.validate();
    let expected: FieldErrors = [
        ("first_name".to_owned(), "Required".to_owned()),
        ("last_seen_date".to_owned(), "Required for missing persons".to_owned()),
    ]
    .into_iter()
    .collect();
    assert_eq!(errors, expected);
    assert_eq!(form.errors(), &expected);
}

#[test]
fn validate_requires_date_of_death_for_homicide() {
    let mut form = CaseForm::new();
    form.set_field("first_name", "Jane");
    form.set_field("last_name", "Doe");
    form.set_field("crime_type", "homicide");
    assert_eq!(form.validate().get("date_of_death").map(String::as_str), Some(REQUIRED_HOMICIDE));

    form.set_field("date_of_death", "2023-11-02");
    assert!(form.validate().is_empty());
}

#[test]
fn validate_requires_crime_type() {
    let mut form = CaseForm::new();
    form.set_field("first_name", "Jane");
    form.set_field("last_name", "Doe");
    assert_eq!(form.validate().keys().collect::<Vec<_>>(), vec!["crime_type"]);
}

#[test]
fn editing_a_field_clears_its_error() {
    let mut form = CaseForm::new();
    form.validate();
    assert_eq!(form.error("first_name"), Some(REQUIRED));
    form.set_field("first_name", "Jane");
    assert_eq!(form.error("first_name"), None);
    assert_eq!(form.error("last_name"), Some(REQUIRED));
}

#[test]
fn payload_drops_null_and_empty_values() {
    let mut form = CaseForm::new();
    form.set_field("first_name", "Jane");
    form.set_field("nickname", "");
    form.set_field("reward_amount", Value::Null);
    form.set_field("age", 0);
    let payload = form.payload_fields();
    assert_eq!(Value::Object(payload), json!({"first_name": "Jane", "age": 0}));
}

#[test]
fn from_record_skips_template_fields() {
    let record: CaseRecord = serde_json::from_value(json!({
        "id": 12,
        "first_name": "Jane",
        "template_id": "3",
        "template_data": {"customizations": {}}
    }))
    .expect("record");
    let form = CaseForm::from_record(&record);
    assert_eq!(form.case_data(), json!({"first_name": "Jane"}));
}

#[test]
fn crime_type_round_trips_unknown_values() {
    assert_eq!(CrimeType::parse("Missing"), CrimeType::Missing);
    let other: CrimeType = serde_json::from_value(json!("kidnapping")).expect("crime type");
    assert_eq!(other, CrimeType::Other("kidnapping".into()));
    assert_eq!(serde_json::to_value(&other).expect("serialize"), json!("kidnapping"));
}

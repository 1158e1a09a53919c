use super::*;

fn form_with(crime: &str) -> CaseForm {
    let mut form = CaseForm::new();
    form.set_field("crime_type", crime);
    form
}

#[test]
fn names_and_type_are_always_required() {
    let form = CaseForm::new();
    assert!(is_required(&form, "first_name"));
    assert!(is_required(&form, "last_name"));
    assert!(is_required(&form, "crime_type"));
    assert!(!is_required(&form, "nickname"));
}

#[test]
fn date_requirements_follow_crime_type() {
    let missing = form_with("missing");
    assert!(is_required(&missing, "last_seen_date"));
    assert!(!is_required(&missing, "date_of_death"));

    let homicide = form_with("homicide");
    assert!(is_required(&homicide, "date_of_death"));
    assert!(!is_required(&homicide, "last_seen_date"));

    let assault = form_with("assault");
    assert!(!is_required(&assault, "last_seen_date"));
    assert!(!is_required(&assault, "date_of_death"));
}

#[test]
fn every_required_field_has_a_control() {
    let names: Vec<&str> = FIELDSETS.iter().flat_map(|(_, fields)| fields.iter().map(|f| f.name)).collect();
    for required in ["first_name", "last_name", "crime_type", "last_seen_date", "date_of_death"] {
        assert!(names.contains(&required), "{required} missing from form");
    }
}

#[test]
fn age_is_derived_not_edited() {
    let age = FIELDSETS.iter().flat_map(|(_, f)| f.iter()).find(|f| f.name == "age").expect("age field");
    assert_eq!(age.control, FieldControl::ReadOnly);
}

use super::*;
use serde_json::json;

#[test]
fn case_record_accepts_numeric_id_and_keeps_other_fields() {
    let record: CaseRecord = serde_json::from_value(json!({
        "id": 17,
        "first_name": "Jane",
        "template_data": {"customizations": {"hero": {"title": "Find Jane"}}}
    }))
    .expect("decode");
    assert_eq!(record.id, "17");
    assert_eq!(record.field("first_name"), Some(&json!("Jane")));
    assert_eq!(record.customizations(), Some(&json!({"hero": {"title": "Find Jane"}})));
}

#[test]
fn case_record_template_id_reads_either_key() {
    let record: CaseRecord = serde_json::from_value(json!({"id": "a", "template": 3})).expect("decode");
    assert_eq!(record.template_id().as_deref(), Some("3"));
    let record: CaseRecord = serde_json::from_value(json!({"id": "a", "template_id": "classic"})).expect("decode");
    assert_eq!(record.template_id().as_deref(), Some("classic"));
}

#[test]
fn display_name_falls_back_to_id() {
    let named: CaseRecord = serde_json::from_value(json!({"id": 1, "first_name": "Jane", "last_name": "Doe"})).unwrap();
    assert_eq!(named.display_name(), "Jane Doe");
    let unnamed: CaseRecord = serde_json::from_value(json!({"id": 9})).unwrap();
    assert_eq!(unnamed.display_name(), "Case 9");
}

#[test]
fn case_record_rejects_object_id() {
    assert!(serde_json::from_value::<CaseRecord>(json!({"id": {"x": 1}})).is_err());
}

#[test]
fn photo_uses_backend_aliases() {
    let photo: CasePhoto = serde_json::from_value(json!({
        "id": 4, "case": 17, "image": "https://img.test/p.jpg", "position": 2
    }))
    .expect("decode");
    assert_eq!(photo.case.as_deref(), Some("17"));
    assert_eq!(photo.image_url, "https://img.test/p.jpg");
    assert_eq!(photo.order, 2);
    assert!(!photo.is_primary);
}

#[test]
fn list_from_value_unwraps_paginated_results() {
    let items: Vec<ImageUpload> =
        list_from_value(json!({"count": 1, "results": [{"url": "https://img.test/a.png"}]})).expect("decode");
    assert_eq!(items.len(), 1);
    let items: Vec<ImageUpload> = list_from_value(json!([{"image_url": "https://img.test/b.png"}])).expect("decode");
    assert_eq!(items[0].url, "https://img.test/b.png");
}

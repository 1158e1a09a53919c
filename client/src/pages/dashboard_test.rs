use super::*;
use serde_json::json;

fn case(extra: serde_json::Value) -> CaseRecord {
    let mut value = json!({"id": 7});
    if let (Some(map), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
        map.extend(extra.clone());
    }
    serde_json::from_value(value).expect("case")
}

#[test]
fn stat_tiles_follow_counter_order() {
    let stats = CaseStats { total_cases: 5, published_cases: 2, draft_cases: 3, ..CaseStats::default() };
    assert_eq!(stat_tiles(&stats), [("Cases", 5), ("Published", 2), ("Drafts", 3)]);
}

#[test]
fn case_subtitle_joins_kind_and_place() {
    let row = case(json!({"crime_type": "missing", "incident_location": " Tulsa, OK "}));
    assert_eq!(case_subtitle(&row), "Missing person · Tulsa, OK");
}

#[test]
fn case_subtitle_uses_whatever_is_present() {
    assert_eq!(case_subtitle(&case(json!({"crime_type": "homicide"}))), "Homicide");
    assert_eq!(case_subtitle(&case(json!({"incident_location": "Reno"}))), "Reno");
    assert_eq!(case_subtitle(&case(json!({"crime_type": "", "incident_location": "  "}))), "");
}

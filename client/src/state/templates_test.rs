use super::*;
use serde_json::json;

fn template(id: u32, name: &str) -> Template {
    serde_json::from_value(json!({"id": id, "name": name})).expect("template")
}

#[test]
fn default_state_needs_load() {
    assert!(TemplatesState::default().needs_load());
}

#[test]
fn begin_load_is_single_flight() {
    let mut state = TemplatesState::default();
    assert!(state.begin_load());
    assert!(!state.begin_load());
    assert!(!state.needs_load());
}

#[test]
fn failed_load_keeps_error_until_retry() {
    let mut state = TemplatesState::default();
    state.begin_load();
    state.finish_load(Err("offline".into()));
    assert_eq!(state.error.as_deref(), Some("offline"));
    assert!(!state.needs_load());

    assert!(state.begin_load());
    assert!(state.error.is_none());
    state.finish_load(Ok(vec![template(1, "Beacon")]));
    assert!(state.loaded);
    assert_eq!(state.find("1").map(|t| t.name.as_str()), Some("Beacon"));
}

#[test]
fn upsert_replaces_by_id() {
    let mut state = TemplatesState::default();
    state.finish_load(Ok(vec![template(1, "Beacon")]));
    state.upsert(template(1, "Beacon v2"));
    state.upsert(template(2, "Garden"));
    let names: Vec<_> = state.items.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Beacon v2", "Garden"]);
}

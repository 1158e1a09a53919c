use super::*;
use serde_json::json;

const OWN: &str = "https://vigil.test";

fn guest() -> PreviewGuest {
    PreviewGuest::new(
        GuestConfig { ready_delays_ms: vec![100, 500], init_timeout_ms: 1000 },
        AllowedOrigins::for_origin(OWN),
    )
}

fn init() -> Value {
    json!({
        "type": "INIT_CUSTOMIZATIONS",
        "customizations": {"hero": {"title": "Find Jane", "image": "a.jpg"}, "global": {"font": "serif"}},
        "caseData": {"first_name": "Jane", "last_name": "Doe"}
    })
}

#[test]
fn mount_announces_ready_immediately() {
    let mut guest = guest();
    assert_eq!(guest.mount(0), Some(PreviewMessage::PreviewReady));
    assert_eq!(guest.mount(5), None);
    assert_eq!(guest.next_deadline(), Some(100));
}

#[test]
fn ready_is_reposted_at_fixed_delays() {
    let mut guest = guest();
    guest.mount(0);
    assert_eq!(guest.tick(50).ready, None);
    assert_eq!(guest.tick(100).ready, Some(PreviewMessage::PreviewReady));
    assert_eq!(guest.tick(200).ready, None);
    assert_eq!(guest.tick(500).ready, Some(PreviewMessage::PreviewReady));
    assert_eq!(guest.next_deadline(), Some(1000));
}

#[test]
fn init_replaces_state_and_stops_announcements() {
    let mut guest = guest();
    guest.mount(0);
    assert_eq!(guest.receive(OWN, &init()), GuestEvent::Replaced);
    assert_eq!(guest.source(), PreviewSource::Parent);
    assert_eq!(guest.snapshot().case_data["first_name"], "Jane");
    assert_eq!(guest.next_deadline(), None);
    assert_eq!(guest.tick(2000), GuestTick::default());
}

#[test]
fn update_merges_top_level_keys() {
    let mut guest = guest();
    guest.mount(0);
    guest.receive(OWN, &init());
    let event = guest.receive(
        OWN,
        &json!({
            "type": "UPDATE_CUSTOMIZATIONS",
            "customizations": {"hero": {"title": "Bring Jane Home"}},
            "caseData": {"last_name": "Smith"}
        }),
    );
    assert_eq!(event, GuestEvent::Merged);
    let snapshot = guest.snapshot();
    assert_eq!(snapshot.customizations["hero"], json!({"title": "Bring Jane Home"}));
    assert_eq!(snapshot.customizations["global"]["font"], "serif");
    assert_eq!(snapshot.case_data["first_name"], "Jane");
    assert_eq!(snapshot.case_data["last_name"], "Smith");
}

#[test]
fn update_without_prior_init_replaces() {
    let mut guest = guest();
    guest.mount(0);
    let event = guest.receive(
        OWN,
        &json!({"type": "UPDATE_CUSTOMIZATIONS", "customizations": {}, "caseData": {"first_name": "Ana"}}),
    );
    assert_eq!(event, GuestEvent::Replaced);
    assert_eq!(guest.snapshot().case_data, json!({"first_name": "Ana"}));
}

#[test]
fn foreign_origin_does_not_alter_state() {
    let mut guest = guest();
    guest.mount(0);
    guest.receive(OWN, &init());
    let before = guest.snapshot().clone();
    let event = guest.receive(
        "http://evil.example",
        &json!({"type": "INIT_CUSTOMIZATIONS", "customizations": {}, "caseData": {"first_name": "Mallory"}}),
    );
    assert_eq!(event, GuestEvent::Ignored);
    assert_eq!(guest.snapshot(), &before);
}

#[test]
fn init_timeout_falls_back_to_placeholder() {
    let mut guest = guest();
    guest.mount(0);
    let tick = guest.tick(1000);
    assert!(tick.fell_back);
    assert_eq!(guest.source(), PreviewSource::Placeholder);
    assert_eq!(guest.snapshot().case_data["first_name"], "Jane");
    assert!(!guest.tick(1500).fell_back);
}

#[test]
fn real_data_after_placeholder_replaces_it() {
    let mut guest = guest();
    guest.mount(0);
    guest.tick(1000);
    let event = guest.receive(
        OWN,
        &json!({"type": "UPDATE_CUSTOMIZATIONS", "customizations": {}, "caseData": {"first_name": "Ana"}}),
    );
    assert_eq!(event, GuestEvent::Replaced);
    assert_eq!(guest.snapshot().case_data, json!({"first_name": "Ana"}));
}

#[test]
fn teardown_stops_processing() {
    let mut guest = guest();
    guest.mount(0);
    guest.teardown();
    assert_eq!(guest.receive(OWN, &init()), GuestEvent::Ignored);
    assert_eq!(guest.tick(5000), GuestTick::default());
    assert_eq!(guest.next_deadline(), None);
    assert_eq!(guest.source(), PreviewSource::Pending);
}

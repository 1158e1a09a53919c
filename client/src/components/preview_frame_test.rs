use super::*;
use serde_json::json;

fn zone(group: ZoneGroup) -> EditableZone {
    EditableZone {
        id: "x".to_owned(),
        path: "x.y".to_owned(),
        label: "Y".to_owned(),
        kind: casesite::ZoneKind::Text,
        group,
        default: json!(""),
        options: Vec::new(),
        help: None,
    }
}

#[test]
fn preview_pages_start_with_home_and_skip_duplicates() {
    let zones = vec![
        zone(ZoneGroup::Global),
        zone(ZoneGroup::Page("about".into())),
        zone(ZoneGroup::Section("hero".into())),
        zone(ZoneGroup::Page("about".into())),
        zone(ZoneGroup::Page("home".into())),
        zone(ZoneGroup::Page("gallery".into())),
    ];
    assert_eq!(preview_pages(&zones), vec!["home", "about", "gallery"]);
}

#[test]
fn preview_pages_without_zones_is_home_only() {
    assert_eq!(preview_pages(&[]), vec!["home"]);
}

#[test]
fn status_text_prefers_ready_over_timeout() {
    assert_eq!(status_text(PreviewPhase::Ready, true), "Live preview");
    assert_eq!(status_text(PreviewPhase::AwaitingReady, true), "Preview is not responding. Edits will show once it loads.");
    assert_eq!(status_text(PreviewPhase::AwaitingReady, false), "Connecting to preview...");
    assert_eq!(status_text(PreviewPhase::Idle, false), "Loading preview...");
}

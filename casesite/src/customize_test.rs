use super::*;
use serde_json::json;

fn garden() -> Template {
    serde_json::from_value(json!({
        "id": 7,
        "name": "Garden",
        "version": "2",
        "schema": {
            "global": {
                "primaryColor": {"type": "color", "default": "#224466"},
                "font": {"type": "select", "default": "serif", "options": [
                    {"value": "serif", "label": "Serif"},
                    {"value": "sans", "label": "Sans"}
                ]}
            },
            "sections": {
                "hero": {
                    "heroImage": {"type": "image"},
                    "headline": {"type": "text", "default": null},
                    "overlayOpacity": {"type": "number", "default": 0.5}
                }
            }
        }
    }))
    .expect("template")
}

#[test]
fn initialize_seeds_declared_defaults() {
    let tree = initialize_customizations(&garden());
    assert_eq!(
        tree,
        json!({
            "global": {"primaryColor": "#224466", "font": "serif"},
            "hero": {"heroImage": "", "headline": "", "overlayOpacity": 0.5}
        })
    );
}

#[test]
fn initialize_without_schema_is_empty() {
    let template: Template = serde_json::from_value(json!({"id": "x", "name": "Bare"})).expect("template");
    assert_eq!(initialize_customizations(&template), json!({}));
}

#[test]
fn initialize_is_deterministic() {
    assert_eq!(initialize_customizations(&garden()), initialize_customizations(&garden()));
}

#[test]
fn set_accepts_declared_path() {
    let mut store = CustomizationStore::for_template(&garden());
    store.set("hero.heroImage", json!("https://img.example/jane.jpg")).expect("set");
    assert_eq!(store.get_str("hero.heroImage"), "https://img.example/jane.jpg");
    assert_eq!(store.template_id(), Some("7"));
}

#[test]
fn set_rejects_undeclared_path() {
    let mut store = CustomizationStore::for_template(&garden());
    let err = store.set("hero.subtitle", json!("x")).expect_err("undeclared");
    assert_eq!(err, StoreError::UndeclaredPath("hero.subtitle".into()));
    assert_eq!(store.values(), &initialize_customizations(&garden()));
}

#[test]
fn set_rejects_wrong_kind() {
    let mut store = CustomizationStore::for_template(&garden());
    let err = store.set("hero.overlayOpacity", json!("half")).expect_err("mismatch");
    assert!(matches!(err, StoreError::TypeMismatch { ref expected, .. } if expected == "number"));
}

#[test]
fn set_rejects_value_outside_options() {
    let mut store = CustomizationStore::for_template(&garden());
    assert_eq!(store.set("global.font", json!("mono")), Err(StoreError::NotAnOption("global.font".into())));
    store.set("global.font", json!("sans")).expect("allowed option");
    assert_eq!(store.get("global.font"), Some(&json!("sans")));
}

#[test]
fn set_rejects_malformed_path() {
    let mut store = CustomizationStore::for_template(&garden());
    assert_eq!(store.set("", json!("x")), Err(StoreError::Path(PathError::Empty)));
}

#[test]
fn from_saved_keeps_blob_verbatim() {
    let saved = json!({"hero": {"heroImage": "a.jpg", "legacy": true}});
    let store = CustomizationStore::from_saved(&garden(), Some(&saved));
    assert_eq!(store.values(), &saved);
    // Paths missing from the blob fall back to zone defaults.
    assert_eq!(store.get("global.primaryColor"), Some(&json!("#224466")));
}

#[test]
fn from_saved_without_blob_uses_defaults() {
    let store = CustomizationStore::from_saved(&garden(), Some(&json!("corrupt")));
    assert_eq!(store.values(), &initialize_customizations(&garden()));
}

#[test]
fn reset_zone_and_reset_restore_defaults() {
    let template = garden();
    let mut store = CustomizationStore::for_template(&template);
    store.set("global.primaryColor", json!("#000000")).expect("set");
    store.set("hero.headline", json!("Find Jane")).expect("set");

    store.reset_zone("global.primaryColor").expect("reset zone");
    assert_eq!(store.get_str("global.primaryColor"), "#224466");
    assert_eq!(store.get_str("hero.headline"), "Find Jane");

    store.reset(&template);
    assert_eq!(store.values(), &initialize_customizations(&template));
}

#[test]
fn section_returns_subtree_or_empty_object() {
    let store = CustomizationStore::for_template(&garden());
    assert_eq!(store.section("hero")["overlayOpacity"], json!(0.5));
    assert_eq!(store.section("about"), json!({}));
}

#[test]
fn shared_page_and_section_name_seeds_first_declaration() {
    let template: Template = serde_json::from_value(json!({
        "id": 5,
        "name": "Overlap",
        "schema": {
            "pages": {"hero": {"count": {"type": "number", "default": 3}}},
            "sections": {"hero": {"count": {"type": "text", "default": "three"}}}
        }
    }))
    .expect("template");
    let mut store = CustomizationStore::for_template(&template);
    assert_eq!(store.values(), &json!({"hero": {"count": 3}}));
    store.set("hero.count", json!(5)).expect("number zone");
    assert_eq!(store.get("hero.count"), Some(&json!(5)));
}

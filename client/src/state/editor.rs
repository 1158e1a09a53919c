//! Customization editor tabs.
//!
//! Tabs are derived from the template's zones: `global` first, then each
//! page and section in schema order. Only the active tab key is stored.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use casesite::{EditableZone, ZoneGroup};

/// One tab of the editor and the zones it edits.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorTab {
    pub key: String,
    pub label: String,
    pub zones: Vec<EditableZone>,
}

#[derive(Clone, Debug, Default)]
pub struct EditorState {
    pub active_tab: Option<String>,
    /// Last rejected write, shown under the offending control.
    pub field_error: Option<(String, String)>,
}

impl EditorState {
    /// Active tab key, falling back to the first tab.
    #[must_use]
    pub fn current<'a>(&'a self, tabs: &'a [EditorTab]) -> Option<&'a EditorTab> {
        self.active_tab
            .as_deref()
            .and_then(|key| tabs.iter().find(|t| t.key == key))
            .or_else(|| tabs.first())
    }
}

fn tab_key(group: &ZoneGroup) -> String {
    match group {
        ZoneGroup::Global => "global".to_owned(),
        ZoneGroup::Page(name) => format!("pages.{name}"),
        ZoneGroup::Section(name) => format!("sections.{name}"),
    }
}

fn tab_label(group: &ZoneGroup) -> String {
    match group {
        ZoneGroup::Global => "Global".to_owned(),
        ZoneGroup::Page(name) | ZoneGroup::Section(name) => casesite::template::humanize(name),
    }
}

/// Group zones into tabs, keeping first-seen order with `global` in front.
#[must_use]
pub fn editor_tabs(zones: &[EditableZone]) -> Vec<EditorTab> {
    let mut tabs: Vec<EditorTab> = Vec::new();
    for zone in zones {
        let key = tab_key(&zone.group);
        match tabs.iter_mut().find(|t| t.key == key) {
            Some(tab) => tab.zones.push(zone.clone()),
            None => tabs.push(EditorTab { key, label: tab_label(&zone.group), zones: vec![zone.clone()] }),
        }
    }
    tabs.sort_by_key(|t| t.key != "global");
    tabs
}

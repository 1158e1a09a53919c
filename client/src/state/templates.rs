//! Template registry state for the selector.
//!
//! DESIGN
//! ======
//! The list is fetched once per session and retried on demand. Selecting a
//! template only records the choice here; the wizard re-seeds the
//! customization store from it.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use casesite::Template;

#[derive(Clone, Debug, Default)]
pub struct TemplatesState {
    pub items: Vec<Template>,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded: bool,
}

impl TemplatesState {
    /// Mark a fetch as started. Returns `false` when one is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    pub fn finish_load(&mut self, result: Result<Vec<Template>, String>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
            }
            Err(message) => self.error = Some(message),
        }
    }

    /// True when the list should be (re)fetched automatically.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        !self.loaded && !self.loading && self.error.is_none()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Template> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Replace a listed template, e.g. after its schema was fetched.
    pub fn upsert(&mut self, template: Template) {
        match self.items.iter_mut().find(|t| t.id == template.id) {
            Some(slot) => *slot = template,
            None => self.items.push(template),
        }
    }
}

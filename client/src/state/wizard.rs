//! Case wizard state: step, form, template choice, and customizations.
//!
//! DESIGN
//! ======
//! The wizard owns one `CaseForm` and one `CustomizationStore`. Leaving the
//! details step requires a valid form. Choosing a different template
//! re-seeds the store from that template's defaults; re-choosing the same
//! template keeps the user's edits.
//!
//! SYSTEM CONTEXT
//! ==============
//! Network calls live in the wizard page; this struct only records their
//! in-flight flags and outcomes so the controls can be disabled and the
//! banner can show the backend's message.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use bridge::PreviewSnapshot;
use casesite::{CaseForm, CaseRecord, CustomizationStore, DeployTarget, Deployment, FieldErrors, Template};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WizardStep {
    #[default]
    Details,
    Template,
    Customize,
    Preview,
    Publish,
}

impl WizardStep {
    pub const ALL: [Self; 5] = [Self::Details, Self::Template, Self::Customize, Self::Preview, Self::Publish];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Case details",
            Self::Template => "Template",
            Self::Customize => "Customize",
            Self::Preview => "Preview",
            Self::Publish => "Publish",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Why the wizard refused to move to a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepBlocked {
    InvalidDetails(FieldErrors),
    NoTemplate,
}

#[derive(Clone, Debug, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: CaseForm,
    pub case_id: Option<String>,
    pub template: Option<Template>,
    pub customizations: CustomizationStore,
    /// Preview page shown in the frame.
    pub preview_page: String,
    pub target: DeployTarget,
    pub deployment: Option<Deployment>,
    pub loading: bool,
    pub saving: bool,
    pub deploying: bool,
    pub uploading: bool,
    /// Dismissable banner text.
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl WizardState {
    /// Fresh wizard for a new case.
    #[must_use]
    pub fn new_case() -> Self {
        Self { preview_page: "home".to_owned(), ..Self::default() }
    }

    /// Wizard for an existing case, with its saved customizations.
    #[must_use]
    pub fn from_record(record: &CaseRecord, template: Option<Template>) -> Self {
        let customizations = match &template {
            Some(t) => CustomizationStore::from_saved(t, record.customizations()),
            None => CustomizationStore::default(),
        };
        Self {
            form: CaseForm::from_record(record),
            case_id: Some(record.id.clone()),
            template,
            customizations,
            ..Self::new_case()
        }
    }

    /// Check whether `step` may be entered from the current state.
    ///
    /// # Errors
    ///
    /// [`StepBlocked`] with the reason; form errors are also stored on the form.
    pub fn check_entry(&mut self, step: WizardStep) -> Result<(), StepBlocked> {
        if step.index() > WizardStep::Details.index() {
            let errors = self.form.validate();
            if !errors.is_empty() {
                return Err(StepBlocked::InvalidDetails(errors));
            }
        }
        if step.index() > WizardStep::Template.index() && self.template.is_none() {
            return Err(StepBlocked::NoTemplate);
        }
        Ok(())
    }

    /// Move to `step` if allowed; moving back is always allowed.
    ///
    /// # Errors
    ///
    /// See [`WizardState::check_entry`].
    pub fn go_to(&mut self, step: WizardStep) -> Result<(), StepBlocked> {
        if step.index() > self.step.index() {
            self.check_entry(step)?;
        }
        self.step = step;
        self.error = None;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`WizardState::check_entry`].
    pub fn advance(&mut self) -> Result<(), StepBlocked> {
        match self.step.next() {
            Some(next) => self.go_to(next),
            None => Ok(()),
        }
    }

    pub fn back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    /// Record the chosen template. A different template resets customizations.
    pub fn select_template(&mut self, template: Template) {
        let same = self.template.as_ref().is_some_and(|t| t.id == template.id);
        if !same || self.customizations.template_id().is_none() {
            self.customizations = CustomizationStore::for_template(&template);
        }
        self.template = Some(template);
    }

    /// Apply a save response.
    pub fn saved(&mut self, record: &CaseRecord) {
        self.case_id = Some(record.id.clone());
        self.saving = false;
        self.error = None;
        self.notice = Some("Saved".to_owned());
    }

    /// Data pushed to the preview frame.
    #[must_use]
    pub fn preview_snapshot(&self) -> PreviewSnapshot {
        PreviewSnapshot::new(self.form.case_data(), self.customizations.values().clone())
    }

    /// Template name used in preview URLs.
    #[must_use]
    pub fn template_slug(&self) -> String {
        self.template.as_ref().map(Template::slug).unwrap_or_default()
    }

    /// Human-readable text for a blocked step.
    #[must_use]
    pub fn blocked_message(blocked: &StepBlocked) -> String {
        match blocked {
            StepBlocked::InvalidDetails(errors) => {
                format!("Fix {} field(s) before continuing", errors.len())
            }
            StepBlocked::NoTemplate => "Choose a template first".to_owned(),
        }
    }
}

//! Case details form for the first wizard step.
//!
//! Every control writes through `CaseForm::set_field`, which clears that
//! field's error and keeps `age` in step with `date_of_birth`. Required
//! markers follow the selected crime type.

#[cfg(test)]
#[path = "case_details_form_test.rs"]
mod case_details_form_test;

use casesite::{CaseForm, CrimeType};
use leptos::prelude::*;
use serde_json::Value;

use crate::state::wizard::WizardState;

/// Control used for a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldControl {
    Text,
    Date,
    Tel,
    LongText,
    CrimeType,
    /// Derived; shown but not editable.
    ReadOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub control: FieldControl,
}

const fn field(name: &'static str, label: &'static str, control: FieldControl) -> FieldSpec {
    FieldSpec { name, label, control }
}

/// Fields in display order, grouped into fieldsets.
pub const FIELDSETS: [(&str, &[FieldSpec]); 3] = [
    (
        "Person",
        &[
            field("first_name", "First name", FieldControl::Text),
            field("last_name", "Last name", FieldControl::Text),
            field("nickname", "Nickname", FieldControl::Text),
            field("date_of_birth", "Date of birth", FieldControl::Date),
            field("age", "Age", FieldControl::ReadOnly),
            field("height", "Height", FieldControl::Text),
            field("weight", "Weight", FieldControl::Text),
            field("hair_color", "Hair color", FieldControl::Text),
            field("eye_color", "Eye color", FieldControl::Text),
        ],
    ),
    (
        "Incident",
        &[
            field("crime_type", "Case type", FieldControl::CrimeType),
            field("last_seen_date", "Last seen", FieldControl::Date),
            field("date_of_death", "Date of death", FieldControl::Date),
            field("incident_location", "Location", FieldControl::Text),
            field("description", "What happened", FieldControl::LongText),
            field("reward_amount", "Reward", FieldControl::Text),
        ],
    ),
    (
        "Investigation",
        &[
            field("investigating_agency", "Investigating agency", FieldControl::Text),
            field("detective_name", "Detective", FieldControl::Text),
            field("detective_phone", "Tip line", FieldControl::Tel),
        ],
    ),
];

/// Whether `name` must be filled in for the form's current crime type.
#[must_use]
pub fn is_required(form: &CaseForm, name: &str) -> bool {
    match name {
        "first_name" | "last_name" | "crime_type" => true,
        "last_seen_date" => form.crime_type() == Some(CrimeType::Missing),
        "date_of_death" => form.crime_type() == Some(CrimeType::Homicide),
        _ => false,
    }
}

#[component]
pub fn CaseDetailsForm() -> impl IntoView {
    view! {
        <form class="case-form" on:submit=|ev: leptos::ev::SubmitEvent| ev.prevent_default()>
            {FIELDSETS
                .into_iter()
                .map(|(legend, fields)| {
                    view! {
                        <fieldset class="case-form__group">
                            <legend>{legend}</legend>
                            {fields.iter().map(|f| view! { <CaseField field=*f/> }).collect_view()}
                        </fieldset>
                    }
                })
                .collect_view()}
        </form>
    }
}

#[component]
fn CaseField(field: FieldSpec) -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let name = field.name;

    let value = move || wizard.with(|w| w.form.text(name));
    let error = move || wizard.with(|w| w.form.error(name).map(str::to_owned));
    let required = move || wizard.with(|w| is_required(&w.form, name));
    let write = move |raw: String| wizard.update(|w| w.form.set_field(name, Value::String(raw)));

    let control = match field.control {
        FieldControl::LongText => view! {
            <textarea class="case-form__input" rows="5" prop:value=value on:input=move |ev| write(event_target_value(&ev))></textarea>
        }
        .into_any(),
        FieldControl::CrimeType => view! {
            <select class="case-form__input" prop:value=value on:change=move |ev| write(event_target_value(&ev))>
                <option value="">"Choose..."</option>
                {CrimeType::CHOICES
                    .into_iter()
                    .map(|c| view! { <option value=c.as_str().to_owned()>{c.label().to_owned()}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldControl::ReadOnly => view! { <input class="case-form__input" type="text" readonly prop:value=value/> }.into_any(),
        FieldControl::Text | FieldControl::Date | FieldControl::Tel => {
            let kind = match field.control {
                FieldControl::Date => "date",
                FieldControl::Tel => "tel",
                _ => "text",
            };
            view! {
                <input class="case-form__input" type=kind prop:value=value on:input=move |ev| write(event_target_value(&ev))/>
            }
            .into_any()
        }
    };

    view! {
        <label class="case-form__field" class:case-form__field--invalid=move || error().is_some()>
            <span class="case-form__label">
                {field.label}
                <Show when=required>
                    <span class="case-form__required" aria-hidden="true">" *"</span>
                </Show>
            </span>
            {control}
            {move || error().map(|msg| view! { <small class="case-form__error">{msg}</small> })}
        </label>
    }
}

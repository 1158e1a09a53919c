//! Tabbed editor writing template customizations through the typed store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads zones from the wizard's `CustomizationStore`, groups them into tabs,
//! and renders one control per zone. Writes go through the store's `set`,
//! so a rejected value shows an inline message instead of being stored.

#[cfg(test)]
#[path = "customization_editor_test.rs"]
mod customization_editor_test;

use casesite::{EditableZone, ZoneKind};
use leptos::prelude::*;
use serde_json::Value;

use crate::state::editor::{EditorState, editor_tabs};
use crate::state::wizard::WizardState;

/// HTML input type for a zone kind.
#[must_use]
pub fn input_type(kind: &ZoneKind) -> &'static str {
    match kind {
        ZoneKind::Color => "color",
        ZoneKind::Url | ZoneKind::Image => "url",
        ZoneKind::Email => "email",
        ZoneKind::Date => "date",
        ZoneKind::Number => "number",
        ZoneKind::Boolean => "checkbox",
        _ => "text",
    }
}

fn option_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `(value, label)` pairs for a select zone.
#[must_use]
pub fn option_pairs(zone: &EditableZone) -> Vec<(String, String)> {
    zone.options
        .iter()
        .map(|opt| {
            let value = opt.get("value").unwrap_or(opt);
            let label = opt.get("label").and_then(Value::as_str).map_or_else(|| option_text(value), str::to_owned);
            (option_text(value), label)
        })
        .collect()
}

/// Convert raw control text into the JSON value the zone stores.
#[must_use]
pub fn parse_input(zone: &EditableZone, raw: &str) -> Value {
    match &zone.kind {
        ZoneKind::Number => {
            let trimmed = raw.trim();
            trimmed
                .parse::<i64>()
                .map(Value::from)
                .or_else(|_| trimmed.parse::<f64>().map(Value::from))
                .unwrap_or_else(|_| Value::String(raw.to_owned()))
        }
        ZoneKind::Boolean => Value::Bool(raw == "true"),
        ZoneKind::List => Value::Array(
            raw.lines().map(str::trim).filter(|l| !l.is_empty()).map(|l| Value::String(l.to_owned())).collect(),
        ),
        ZoneKind::Select => zone
            .options
            .iter()
            .map(|opt| opt.get("value").unwrap_or(opt))
            .find(|v| option_text(v) == raw)
            .cloned()
            .unwrap_or_else(|| Value::String(raw.to_owned())),
        _ => Value::String(raw.to_owned()),
    }
}

/// Text shown in a control for a stored value.
#[must_use]
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => items.iter().map(option_text).collect::<Vec<_>>().join("\n"),
        Some(other) => option_text(other),
    }
}

#[component]
pub fn CustomizationEditor() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let editor = expect_context::<RwSignal<EditorState>>();

    let tabs = Memo::new(move |_| editor_tabs(wizard.with(|w| w.customizations.zones().to_vec()).as_slice()));
    let active_key = move || editor.with(|e| e.current(&tabs.get()).map(|t| t.key.clone()));
    let active_zones = move || editor.with(|e| e.current(&tabs.get()).map(|t| t.zones.clone()).unwrap_or_default());

    let on_reset = move |_| {
        wizard.update(|w| {
            if let Some(template) = w.template.clone() {
                w.customizations.reset(&template);
            }
        });
        editor.update(|e| e.field_error = None);
    };

    view! {
        <section class="editor">
            <Show
                when=move || !tabs.get().is_empty()
                fallback=|| view! { <p class="editor__empty">"This template has no customizable fields."</p> }
            >
                <nav class="editor__tabs" role="tablist">
                    <For each=move || tabs.get() key=|t| t.key.clone() let:tab>
                        {
                            let key = tab.key.clone();
                            let selected_key = key.clone();
                            view! {
                                <button
                                    class="editor__tab"
                                    role="tab"
                                    class:editor__tab--active=move || active_key().as_deref() == Some(selected_key.as_str())
                                    on:click=move |_| editor.update(|e| e.active_tab = Some(key.clone()))
                                >
                                    {tab.label}
                                </button>
                            }
                        }
                    </For>
                </nav>
                <div class="editor__fields">
                    <For each=active_zones key=|z| z.path.clone() let:zone>
                        <ZoneField zone=zone/>
                    </For>
                </div>
                <button class="btn btn--ghost" on:click=on_reset>"Reset to template defaults"</button>
            </Show>
        </section>
    }
}

#[component]
fn ZoneField(zone: EditableZone) -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let editor = expect_context::<RwSignal<EditorState>>();

    let path = zone.path.clone();
    let current = {
        let path = path.clone();
        Signal::derive(move || wizard.with(|w| display_value(w.customizations.get(&path))))
    };
    let error = {
        let path = path.clone();
        move || editor.with(|e| e.field_error.as_ref().filter(|(p, _)| *p == path).map(|(_, m)| m.clone()))
    };

    let write = {
        let zone = zone.clone();
        Callback::new(move |raw: String| {
            let value = parse_input(&zone, &raw);
            let mut outcome = Ok(());
            wizard.update(|w| outcome = w.customizations.set(&zone.path, value));
            editor.update(|e| {
                e.field_error = outcome.err().map(|err| (zone.path.clone(), err.to_string()));
            });
        })
    };

    let on_reset_zone = {
        let path = path.clone();
        move |_| {
            let mut outcome = Ok(());
            wizard.update(|w| outcome = w.customizations.reset_zone(&path));
            editor.update(|e| e.field_error = outcome.err().map(|err| (path.clone(), err.to_string())));
        }
    };

    let control = match zone.kind {
        ZoneKind::LongText | ZoneKind::List => view! {
            <textarea
                class="editor__input editor__input--long"
                prop:value=move || current.get()
                on:input=move |ev| write.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        ZoneKind::Select => {
            let options = option_pairs(&zone);
            view! {
                <select class="editor__input" prop:value=move || current.get() on:change=move |ev| write.run(event_target_value(&ev))>
                    {options
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        ZoneKind::Boolean => view! {
            <input
                class="editor__input editor__input--toggle"
                type="checkbox"
                prop:checked=move || current.get() == "true"
                on:change=move |ev| write.run(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        ZoneKind::Image => view! {
            <div class="editor__image">
                <input
                    class="editor__input"
                    type="url"
                    placeholder="https://"
                    prop:value=move || current.get()
                    on:change=move |ev| write.run(event_target_value(&ev))
                />
                <ImageUploadButton on_uploaded=write/>
            </div>
        }
        .into_any(),
        ref kind => {
            let kind = input_type(kind);
            view! {
                <input
                    class="editor__input"
                    type=kind
                    prop:value=move || current.get()
                    on:input=move |ev| write.run(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="editor__field">
            <span class="editor__label">
                {zone.label.clone()}
                <button class="editor__reset" type="button" title="Restore default" on:click=on_reset_zone>
                    "Default"
                </button>
            </span>
            {control}
            {zone.help.clone().map(|help| view! { <small class="editor__help">{help}</small> })}
            {move || error().map(|msg| view! { <small class="editor__error" role="alert">{msg}</small> })}
        </label>
    }
}

/// File picker that hosts the chosen image and reports its URL.
#[component]
fn ImageUploadButton(on_uploaded: Callback<String>) -> impl IntoView {
    let busy = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            busy.set(true);
            message.set(None);
            leptos::task::spawn_local(async move {
                let outcome = match crate::net::api::read_selected_file(&input).await {
                    Some(file) if crate::net::api::is_image_upload(&file) => {
                        crate::net::api::api().upload_image(file).await.map_err(|e| crate::net::api::error_text(&e))
                    }
                    Some(_) => Err("Choose an image file".to_owned()),
                    None => Err("No file selected".to_owned()),
                };
                match outcome {
                    Ok(upload) => on_uploaded.run(upload.url),
                    Err(msg) => message.set(Some(msg)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, on_uploaded);
    };

    view! {
        <span class="editor__upload">
            <input type="file" accept="image/*" disabled=move || busy.get() on:change=on_change/>
            <Show when=move || busy.get()>
                <small>"Uploading..."</small>
            </Show>
            {move || message.get().map(|m| view! { <small class="editor__error">{m}</small> })}
        </span>
    }
}

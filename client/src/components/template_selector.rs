//! Template picker with loading, error, and retry states.

use casesite::Template;
use leptos::prelude::*;

use crate::components::site_image::{PlaceholderKind, SiteImage};
use crate::state::templates::TemplatesState;

/// Grid of available templates.
///
/// `on_retry` re-runs the list fetch after a failure; `on_select` receives the
/// clicked template.
#[component]
pub fn TemplateSelector(
    #[prop(into)] selected_id: Signal<Option<String>>,
    on_select: Callback<Template>,
    on_retry: Callback<()>,
) -> impl IntoView {
    let templates = expect_context::<RwSignal<TemplatesState>>();

    view! {
        <section class="template-selector">
            <Show when=move || templates.get().loading>
                <p class="template-selector__loading">"Loading templates..."</p>
            </Show>
            {move || {
                templates.get().error.map(|message| {
                    view! {
                        <div class="banner banner--error" role="alert">
                            <span>{format!("Could not load templates: {message}")}</span>
                            <button class="btn" on:click=move |_| on_retry.run(())>"Retry"</button>
                        </div>
                    }
                })
            }}
            <div class="template-selector__grid">
                <For each=move || templates.get().items key=|t| t.id.clone() let:template>
                    <TemplateCard template=template selected_id=selected_id on_select=on_select/>
                </For>
            </div>
            <Show when=move || { let s = templates.get(); s.loaded && s.items.is_empty() }>
                <p class="template-selector__empty">"No templates are available yet."</p>
            </Show>
        </section>
    }
}

#[component]
fn TemplateCard(template: Template, selected_id: Signal<Option<String>>, on_select: Callback<Template>) -> impl IntoView {
    let id = template.id.clone();
    let is_selected = Signal::derive(move || selected_id.get().as_deref() == Some(id.as_str()));
    let thumbnail = template.thumbnail.clone().unwrap_or_default();
    let name = template.name.clone();
    let description = template.description.clone().unwrap_or_default();
    let version = template.version.clone();
    let picked = template.clone();

    view! {
        <button
            class="template-card"
            class:template-card--selected=is_selected
            aria-pressed=move || is_selected.get().to_string()
            on:click=move |_| on_select.run(picked.clone())
        >
            <SiteImage src=thumbnail alt=name.clone() kind=PlaceholderKind::Gallery class="template-card__thumb"/>
            <span class="template-card__name">{name}</span>
            <Show when={let version = version.clone(); move || !version.is_empty()}>
                <span class="template-card__version">{format!("v{version}")}</span>
            </Show>
            <span class="template-card__description">{description}</span>
        </button>
    }
}

//! Case wizard page: details, template, customize, preview, publish.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves both `/cases/new` and `/cases/:id`. The page owns one
//! `CaseGateway`, so every save for this visit goes through the same
//! serialized case id: the first save creates the case, later saves patch
//! it. Leaving the details step saves a draft in the background, which
//! gives photos and the preview URL a real case id early.
//!
//! Deploying always saves first, then polls the deployment status until it
//! settles or the page is left.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use std::rc::Rc;

use casesite::{DeployTarget, Deployment, DeploymentStatus, SiteError, Template};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::banner::{Banner, BannerTone};
use crate::components::case_details_form::CaseDetailsForm;
use crate::components::customization_editor::CustomizationEditor;
use crate::components::photo_gallery::PhotoGallery;
use crate::components::preview_frame::PreviewFrame;
use crate::components::template_selector::TemplateSelector;
use crate::components::wizard_steps::WizardSteps;
use crate::net::api::Gateway;
use crate::state::editor::EditorState;
use crate::state::templates::TemplatesState;
use crate::state::wizard::{WizardState, WizardStep};

/// Domain that hosts `<subdomain>.` sites.
pub const PUBLIC_SITE_DOMAIN: &str = "vigil.site";
#[cfg(feature = "hydrate")]
const STATUS_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(3);
#[cfg(feature = "hydrate")]
const MAX_STATUS_POLLS: usize = 40;

/// One-line description of a deployment for the publish step.
fn deployment_summary(deployment: &Deployment) -> String {
    match deployment.status {
        DeploymentStatus::Pending => "Queued for deployment".to_owned(),
        DeploymentStatus::Deploying => "Deploying...".to_owned(),
        DeploymentStatus::Active => match deployment.public_url(PUBLIC_SITE_DOMAIN) {
            Some(url) => format!("Live at {url}"),
            None => "Live".to_owned(),
        },
        DeploymentStatus::Failed => {
            let reason = deployment.extra.get("error").and_then(serde_json::Value::as_str).unwrap_or("unknown error");
            format!("Deployment failed: {reason}")
        }
        DeploymentStatus::Unknown => "Deployment status unknown".to_owned(),
    }
}

/// Target built from the publish inputs.
/// Offline blips and 5xx answers keep the status poll going.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn status_error_stops_polling(err: &SiteError) -> bool {
    !err.retryable()
}

fn target_from_input(use_custom_domain: bool, raw: &str) -> DeployTarget {
    let value = raw.trim().to_ascii_lowercase();
    if use_custom_domain { DeployTarget::custom_domain(value) } else { DeployTarget::subdomain(value) }
}

/// Validation hint for the current target, once something was typed.
fn target_hint(target: &DeployTarget) -> Option<String> {
    let target = target.normalized();
    if target.subdomain.is_none() && target.custom_domain.is_none() {
        return None;
    }
    target.validate().err().map(|e| match e {
        casesite::SiteError::Validation(message) => message,
        other => other.to_string(),
    })
}

#[component]
pub fn CaseWizardPage() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let templates = expect_context::<RwSignal<TemplatesState>>();
    let editor = expect_context::<RwSignal<EditorState>>();
    let params = use_params_map();

    let route_case_id = params.with_untracked(|p| p.get("id"));
    let gateway = StoredValue::new_local(Rc::new(crate::net::api::gateway(route_case_id.clone())));

    wizard.set(WizardState { loading: route_case_id.is_some(), ..WizardState::new_case() });
    editor.set(EditorState::default());

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_cleanup = Arc::clone(&alive);
        on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));
        provide_context(PageAlive(alive));

        if crate::net::api::api().is_signed_in() {
            if let Some(id) = route_case_id {
                leptos::task::spawn_local(load_case(id, wizard, templates));
            }
        } else if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(crate::net::api::LOGIN_ROUTE);
        }

        Effect::new(move |_| {
            let on_template_step = wizard.with(|w| w.step == WizardStep::Template);
            if on_template_step && templates.with(TemplatesState::needs_load) {
                leptos::task::spawn_local(load_templates(templates));
            }
        });
    }

    let on_next = move |_| {
        let mut left_details = false;
        wizard.update(|w| {
            let from = w.step;
            match w.advance() {
                Ok(()) => left_details = from == WizardStep::Details && w.step != from,
                Err(blocked) => w.error = Some(WizardState::blocked_message(&blocked)),
            }
        });
        if left_details {
            save_in_background(gateway, wizard);
        }
    };
    let on_back = move |_| wizard.update(WizardState::back);
    let on_save = move |_| save_in_background(gateway, wizard);

    let on_select = Callback::new(move |template: Template| {
        if template.schema.is_some() {
            wizard.update(|w| w.select_template(template));
            editor.set(EditorState::default());
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::api().ensure_schema(template).await {
                Ok(full) => {
                    templates.update(|s| s.upsert(full.clone()));
                    wizard.update(|w| w.select_template(full));
                    editor.set(EditorState::default());
                }
                Err(e) => wizard.update(|w| w.error = Some(crate::net::api::error_text(&e))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        wizard.update(|w| w.select_template(template));
    });
    let on_retry = Callback::new(move |()| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(load_templates(templates));
    });
    let selected_id = Signal::derive(move || wizard.with(|w| w.template.as_ref().map(|t| t.id.clone())));

    let step = move || wizard.with(|w| w.step);
    let busy = move || wizard.with(|w| w.saving || w.deploying || w.loading);

    view! {
        <div class="wizard-page">
            <header class="wizard-page__header toolbar">
                <a class="btn btn--ghost" href="/">"← Cases"</a>
                <span class="toolbar__title">
                    {move || wizard.with(|w| {
                        let name = format!("{} {}", w.form.text("first_name"), w.form.text("last_name"));
                        if name.trim().is_empty() { "New case".to_owned() } else { name.trim().to_owned() }
                    })}
                </span>
                <span class="toolbar__spacer"></span>
                <button class="btn" on:click=on_save disabled=busy>
                    {move || if wizard.with(|w| w.saving) { "Saving..." } else { "Save draft" }}
                </button>
            </header>

            <WizardSteps/>

            <Banner
                message=Signal::derive(move || wizard.with(|w| w.error.clone()))
                on_dismiss=Callback::new(move |()| wizard.update(|w| {
                    w.error = None;
                    w.form.dismiss_errors();
                }))
            />
            <Banner
                message=Signal::derive(move || wizard.with(|w| w.notice.clone()))
                on_dismiss=Callback::new(move |()| wizard.update(|w| w.notice = None))
                tone=BannerTone::Notice
            />

            <Show
                when=move || !wizard.with(|w| w.loading)
                fallback=|| view! { <p class="wizard-page__loading">"Loading case..."</p> }
            >
                <main class="wizard-page__body">
                    {move || match step() {
                        WizardStep::Details => view! { <CaseDetailsForm/> }.into_any(),
                        WizardStep::Template => view! {
                            <TemplateSelector selected_id=selected_id on_select=on_select on_retry=on_retry/>
                        }
                        .into_any(),
                        WizardStep::Customize => view! {
                            <div class="wizard-page__split">
                                <div class="wizard-page__controls">
                                    <CustomizationEditor/>
                                    <PhotoGallery/>
                                </div>
                                <PreviewFrame/>
                            </div>
                        }
                        .into_any(),
                        WizardStep::Preview => view! { <PreviewFrame/> }.into_any(),
                        WizardStep::Publish => view! { <PublishPanel gateway=gateway/> }.into_any(),
                    }}
                </main>
            </Show>

            <footer class="wizard-page__footer">
                <button class="btn" on:click=on_back disabled=move || step().prev().is_none()>"Back"</button>
                <span class="toolbar__spacer"></span>
                <Show when=move || step().next().is_some()>
                    <button class="btn btn--primary" on:click=on_next disabled=busy>"Next"</button>
                </Show>
            </footer>
        </div>
    }
}

#[component]
fn PublishPanel(gateway: StoredValue<Rc<Gateway>, LocalStorage>) -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let use_custom_domain = RwSignal::new(wizard.with_untracked(|w| w.target.custom_domain.is_some()));
    let raw = RwSignal::new(wizard.with_untracked(|w| {
        w.target.custom_domain.clone().or_else(|| w.target.subdomain.clone()).unwrap_or_default()
    }));

    let sync_target = move || {
        let target = target_from_input(use_custom_domain.get_untracked(), &raw.get_untracked());
        wizard.update(|w| w.target = target);
    };

    let hint = move || wizard.with(|w| target_hint(&w.target));
    let deploying = move || wizard.with(|w| w.deploying || w.saving);

    #[cfg(feature = "hydrate")]
    let alive = use_context::<PageAlive>();
    let on_deploy = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(deploy_flow(gateway.get_value(), wizard, alive.clone()));
        #[cfg(not(feature = "hydrate"))]
        let _ = gateway;
    };

    view! {
        <section class="publish">
            <h2>"Publish"</h2>
            <div class="publish__mode" role="radiogroup">
                <label>
                    <input
                        type="radio"
                        name="target"
                        prop:checked=move || !use_custom_domain.get()
                        on:change=move |_| {
                            use_custom_domain.set(false);
                            sync_target();
                        }
                    />
                    {format!(" Free subdomain (.{PUBLIC_SITE_DOMAIN})")}
                </label>
                <label>
                    <input
                        type="radio"
                        name="target"
                        prop:checked=move || use_custom_domain.get()
                        on:change=move |_| {
                            use_custom_domain.set(true);
                            sync_target();
                        }
                    />
                    " Custom domain"
                </label>
            </div>
            <input
                class="publish__input"
                type="text"
                placeholder=move || if use_custom_domain.get() { "example.org" } else { "janedoe" }
                prop:value=move || raw.get()
                on:input=move |ev| {
                    raw.set(event_target_value(&ev));
                    sync_target();
                }
            />
            {move || hint().map(|h| view! { <small class="publish__hint">{h}</small> })}
            <button class="btn btn--primary" on:click=on_deploy disabled=move || deploying() || hint().is_some()>
                {move || if deploying() { "Publishing..." } else { "Save and publish" }}
            </button>
            {move || {
                wizard.with(|w| w.deployment.clone()).map(|d| {
                    let url = (d.status == DeploymentStatus::Active).then(|| d.public_url(PUBLIC_SITE_DOMAIN)).flatten();
                    view! {
                        <div class="publish__status">
                            <p>{deployment_summary(&d)}</p>
                            {url.map(|u| view! { <a href=u.clone() target="_blank" rel="noopener">{u.clone()}</a> })}
                        </div>
                    }
                })
            }}
        </section>
    }
}

/// Cleared when the wizard page is left; background loops check it.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
struct PageAlive(std::sync::Arc<std::sync::atomic::AtomicBool>);

#[cfg(feature = "hydrate")]
impl PageAlive {
    fn get(&self) -> bool {
        self.0.load(std::sync::atomic::Ordering::Relaxed)
    }
}

fn save_in_background(gateway: StoredValue<Rc<Gateway>, LocalStorage>, wizard: RwSignal<WizardState>) {
    #[cfg(feature = "hydrate")]
    {
        let gateway = gateway.get_value();
        leptos::task::spawn_local(async move {
            let _ = save_case(&gateway, wizard).await;
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (gateway, wizard);
}

#[cfg(feature = "hydrate")]
async fn save_case(gateway: &Gateway, wizard: RwSignal<WizardState>) -> Result<(), ()> {
    let (form, template, customizations) =
        wizard.with_untracked(|w| (w.form.clone(), w.template.clone(), w.customizations.values().clone()));
    wizard.update(|w| {
        w.saving = true;
        w.notice = None;
    });
    match gateway.save(&form, template.as_ref(), &customizations).await {
        Ok(record) => {
            wizard.update(|w| w.saved(&record));
            Ok(())
        }
        Err(e) => {
            let message = crate::net::api::error_text(&e);
            wizard.update(|w| {
                w.saving = false;
                if e.is_validation() {
                    w.form.validate();
                }
                w.error = Some(message);
            });
            Err(())
        }
    }
}

#[cfg(feature = "hydrate")]
async fn deploy_flow(gateway: Rc<Gateway>, wizard: RwSignal<WizardState>, alive: Option<PageAlive>) {
    if save_case(&gateway, wizard).await.is_err() {
        return;
    }
    let target = wizard.with_untracked(|w| w.target.normalized());
    wizard.update(|w| {
        w.deploying = true;
        w.error = None;
    });

    let mut current = match gateway.deploy(&target).await {
        Ok(deployment) => deployment,
        Err(e) => {
            wizard.update(|w| {
                w.deploying = false;
                w.error = Some(crate::net::api::error_text(&e));
            });
            return;
        }
    };
    wizard.update(|w| w.deployment = Some(current.clone()));

    let still_here = || alive.as_ref().is_none_or(PageAlive::get);
    for _ in 0..MAX_STATUS_POLLS {
        if current.is_terminal() || !still_here() {
            break;
        }
        gloo_timers::future::sleep(STATUS_POLL_INTERVAL).await;
        if !still_here() {
            return;
        }
        match gateway.deployment_status().await {
            Ok(next) => {
                current = next;
                wizard.update(|w| w.deployment = Some(current.clone()));
            }
            Err(e) if status_error_stops_polling(&e) => {
                leptos::logging::warn!("deployment status check failed: {e}");
                break;
            }
            Err(e) => leptos::logging::warn!("deployment status check failed, retrying: {e}"),
        }
    }
    if still_here() {
        wizard.update(|w| w.deploying = false);
    }
}

#[cfg(feature = "hydrate")]
async fn load_templates(templates: RwSignal<TemplatesState>) {
    if !templates.try_update(TemplatesState::begin_load).unwrap_or(false) {
        return;
    }
    let result = crate::net::api::api().templates().await.map_err(|e| crate::net::api::error_text(&e));
    templates.update(|s| s.finish_load(result));
}

#[cfg(feature = "hydrate")]
async fn load_case(id: String, wizard: RwSignal<WizardState>, templates: RwSignal<TemplatesState>) {
    let client = crate::net::api::api();
    let record = match client.get_case(&id).await {
        Ok(record) => record,
        Err(e) => {
            wizard.update(|w| {
                w.loading = false;
                w.error = Some(crate::net::api::error_text(&e));
            });
            return;
        }
    };

    let mut template = None;
    if let Some(template_id) = record.template_id() {
        if templates.with_untracked(|s| s.find(&template_id).is_none()) {
            load_templates(templates).await;
        }
        if let Some(listed) = templates.with_untracked(|s| s.find(&template_id).cloned()) {
            match client.ensure_schema(listed).await {
                Ok(full) => {
                    templates.update(|s| s.upsert(full.clone()));
                    template = Some(full);
                }
                Err(e) => leptos::logging::warn!("template {template_id} schema unavailable: {e}"),
            }
        }
    }
    wizard.set(WizardState::from_record(&record, template));
}

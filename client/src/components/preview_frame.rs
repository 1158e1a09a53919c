//! Live template preview embedded in the wizard.
//!
//! ARCHITECTURE
//! ============
//! The iframe loads `/preview/{case}/{page}?template=...`. Each `load` event
//! starts a fresh `PreviewHost`, posts its first message, and spawns the
//! single resend timer for that load. A generation counter retires timers
//! from earlier loads. Snapshot changes flow through a memo, so only real
//! edits reach the frame.
//!
//! Messages from the frame are accepted only from allow-listed origins; the
//! host state machine drops everything else silently.

#[cfg(test)]
#[path = "preview_frame_test.rs"]
mod preview_frame_test;

use bridge::{PreviewPhase, preview_url};
use casesite::{EditableZone, ZoneGroup};
use leptos::prelude::*;

use crate::state::wizard::WizardState;

/// Status line shown above the frame.
#[must_use]
pub fn status_text(phase: PreviewPhase, timed_out: bool) -> &'static str {
    match (phase, timed_out) {
        (PreviewPhase::Ready, _) => "Live preview",
        (_, true) => "Preview is not responding. Edits will show once it loads.",
        (PreviewPhase::AwaitingReady, false) => "Connecting to preview...",
        (PreviewPhase::Idle, false) => "Loading preview...",
    }
}

/// Pages the preview can show: `home` plus every page the schema declares.
#[must_use]
pub fn preview_pages(zones: &[EditableZone]) -> Vec<String> {
    let mut pages = vec!["home".to_owned()];
    for zone in zones {
        if let ZoneGroup::Page(name) = &zone.group {
            if !pages.contains(name) {
                pages.push(name.clone());
            }
        }
    }
    pages
}

#[component]
pub fn PreviewFrame() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let phase = RwSignal::new(PreviewPhase::Idle);
    let timed_out = RwSignal::new(false);
    let frame_ref = NodeRef::<leptos::html::Iframe>::new();

    let src = Memo::new(move |_| wizard.with(|w| preview_url(w.case_id.as_deref(), &w.preview_page, &w.template_slug())));
    let pages = Memo::new(move |_| wizard.with(|w| preview_pages(w.customizations.zones())));

    #[cfg(feature = "hydrate")]
    let on_load = driver::attach(wizard, frame_ref, phase, timed_out);
    #[cfg(not(feature = "hydrate"))]
    let on_load = move |_: leptos::ev::Event| {};

    view! {
        <section class="preview-frame">
            <header class="preview-frame__bar">
                <span class="preview-frame__status" class:preview-frame__status--live=move || phase.get() == PreviewPhase::Ready>
                    {move || status_text(phase.get(), timed_out.get())}
                </span>
                <select
                    class="preview-frame__pages"
                    prop:value=move || wizard.with(|w| w.preview_page.clone())
                    on:change=move |ev| {
                        let page = event_target_value(&ev);
                        wizard.update(|w| w.preview_page = page);
                    }
                >
                    <For each=move || pages.get() key=|p| p.clone() let:page>
                        <option value=page.clone()>{casesite::template::humanize(&page)}</option>
                    </For>
                </select>
            </header>
            <iframe
                node_ref=frame_ref
                class="preview-frame__iframe"
                title="Site preview"
                src=move || src.get()
                on:load=on_load
            ></iframe>
        </section>
    }
}

#[cfg(feature = "hydrate")]
mod driver {
    use std::time::Duration;

    use bridge::{AllowedOrigins, HostConfig, HostEvent, PreviewHost, PreviewMessage, PreviewPhase};
    use leptos::prelude::*;

    use crate::net::messaging::{event_payload, now_ms, own_origin, post};
    use crate::state::wizard::WizardState;

    /// Same-origin target for `postMessage`.
    const FRAME_TARGET: &str = "/";

    #[derive(Default)]
    struct Driver {
        host: Option<PreviewHost>,
        generation: u64,
    }

    pub(super) fn attach(
        wizard: RwSignal<WizardState>,
        frame_ref: NodeRef<leptos::html::Iframe>,
        phase: RwSignal<PreviewPhase>,
        timed_out: RwSignal<bool>,
    ) -> impl Fn(leptos::ev::Event) + Clone + 'static {
        let driver = StoredValue::new_local(Driver::default());
        let allowed = AllowedOrigins::for_origin(&own_origin().unwrap_or_default());

        let listener = window_event_listener(leptos::ev::message, move |ev| {
            let Some(data) = event_payload(&ev) else {
                return;
            };
            let origin = ev.origin();
            let event = driver.try_update_value(|d| d.host.as_mut().map(|h| h.receive(&origin, &data))).flatten();
            if let Some(HostEvent::Ready(message)) = event {
                phase.set(PreviewPhase::Ready);
                timed_out.set(false);
                post_to_frame(frame_ref, &message);
            }
        });

        let snapshot = Memo::new(move |_| wizard.with(WizardState::preview_snapshot));
        Effect::new(move |_| {
            let snapshot = snapshot.get();
            let message = driver.try_update_value(|d| d.host.as_mut().and_then(|h| h.update(snapshot))).flatten();
            if let Some(message) = message {
                post_to_frame(frame_ref, &message);
            }
        });

        on_cleanup(move || {
            driver.try_update_value(|d| {
                if let Some(host) = d.host.as_mut() {
                    host.teardown();
                }
                d.generation += 1;
            });
            listener.remove();
        });

        move |_| {
            let snapshot = wizard.with_untracked(WizardState::preview_snapshot);
            let mut host = PreviewHost::new(HostConfig::default(), allowed.clone(), snapshot);
            let first = host.mount(now_ms());
            let Some(generation) = driver.try_update_value(|d| {
                if let Some(old) = d.host.as_mut() {
                    old.teardown();
                }
                d.host = Some(host);
                d.generation += 1;
                d.generation
            }) else {
                return;
            };
            phase.set(PreviewPhase::AwaitingReady);
            timed_out.set(false);
            if let Some(message) = first {
                post_to_frame(frame_ref, &message);
            }
            run_timer(driver, generation, frame_ref, timed_out);
        }
    }

    fn run_timer(
        driver: StoredValue<Driver, LocalStorage>,
        generation: u64,
        frame_ref: NodeRef<leptos::html::Iframe>,
        timed_out: RwSignal<bool>,
    ) {
        leptos::task::spawn_local(async move {
            loop {
                let deadline = driver
                    .try_with_value(|d| {
                        if d.generation == generation { d.host.as_ref().and_then(PreviewHost::next_deadline) } else { None }
                    })
                    .flatten();
                let Some(deadline) = deadline else {
                    break;
                };
                gloo_timers::future::sleep(Duration::from_millis(deadline.saturating_sub(now_ms()))).await;

                let outcome = driver
                    .try_update_value(|d| {
                        if d.generation == generation { d.host.as_mut().map(|h| h.tick(now_ms())) } else { None }
                    })
                    .flatten();
                match outcome {
                    Some(Ok(Some(message))) => post_to_frame(frame_ref, &message),
                    Some(Err(err)) => {
                        leptos::logging::warn!("{err}");
                        timed_out.set(true);
                    }
                    _ => {}
                }
            }
        });
    }

    fn post_to_frame(frame_ref: NodeRef<leptos::html::Iframe>, message: &PreviewMessage) {
        let Some(target) = frame_ref.get_untracked().and_then(|frame| frame.content_window()) else {
            return;
        };
        post(&target, message, FRAME_TARGET);
    }
}

//! Preview page rendered inside the wizard's iframe.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route: `/preview/:case_id/:page?template=<slug>`. The page runs the guest
//! half of the bridge: it announces readiness to the parent window, applies
//! the case data and customizations it is sent, and falls back to a
//! placeholder case when the editor never answers. Only messages from
//! allow-listed origins are processed.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use bridge::{PreviewSnapshot, PreviewSource};
use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::components::site_image::PlaceholderKind;
use crate::components::template_view::TemplateView;

/// Page name from the route, defaulting to `home`.
fn page_or_home(raw: Option<String>) -> String {
    raw.map(|p| p.trim().to_owned()).filter(|p| !p.is_empty()).unwrap_or_else(|| "home".to_owned())
}

/// Small notice shown while data is pending or placeholder data is shown.
fn source_notice(source: PreviewSource) -> Option<&'static str> {
    match source {
        PreviewSource::Pending => Some("Waiting for the editor..."),
        PreviewSource::Placeholder => Some("Showing sample data"),
        PreviewSource::Parent => None,
    }
}

#[component]
pub fn PreviewPage() -> impl IntoView {
    let params = use_params_map();
    let query = use_query_map();
    let page = Signal::derive(move || page_or_home(params.with(|p| p.get("page"))));
    let template = Signal::derive(move || query.with(|q| q.get("template")).unwrap_or_default());

    let snapshot = RwSignal::new(PreviewSnapshot::default());
    let source = RwSignal::new(PreviewSource::Pending);

    #[cfg(feature = "hydrate")]
    guest::attach(snapshot, source);

    let on_image_error = Callback::new(move |kind: PlaceholderKind| {
        leptos::logging::warn!("preview image failed; showing {} placeholder", kind.caption());
    });

    view! {
        <div class="preview-page" data-template=move || template.get()>
            {move || source_notice(source.get()).map(|n| view! { <p class="preview-page__notice">{n}</p> })}
            <TemplateView snapshot=snapshot page=page template=template on_image_error=Some(on_image_error)/>
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod guest {
    use std::time::Duration;

    use bridge::{AllowedOrigins, GuestConfig, GuestEvent, PreviewGuest, PreviewMessage, PreviewSnapshot, PreviewSource};
    use leptos::prelude::*;

    use crate::net::messaging::{event_payload, now_ms, own_origin, post};

    /// `PREVIEW_READY` carries no data; the parent checks our origin on receipt.
    const PARENT_TARGET: &str = "*";

    pub(super) fn attach(snapshot: RwSignal<PreviewSnapshot>, source: RwSignal<PreviewSource>) {
        let own = own_origin().unwrap_or_default();
        let guest = StoredValue::new_local(PreviewGuest::new(GuestConfig::default(), AllowedOrigins::for_origin(&own)));

        let listener = window_event_listener(leptos::ev::message, move |ev| {
            let Some(data) = event_payload(&ev) else {
                return;
            };
            let origin = ev.origin();
            let applied = guest
                .try_update_value(|g| match g.receive(&origin, &data) {
                    GuestEvent::Ignored => None,
                    GuestEvent::Replaced | GuestEvent::Merged => Some((g.snapshot().clone(), g.source())),
                })
                .flatten();
            if let Some((next, from)) = applied {
                snapshot.set(next);
                source.set(from);
            }
        });

        on_cleanup(move || {
            guest.try_update_value(PreviewGuest::teardown);
            listener.remove();
        });

        if let Some(ready) = guest.try_update_value(|g| g.mount(now_ms())).flatten() {
            post_to_parent(&ready);
        }

        leptos::task::spawn_local(async move {
            loop {
                let Some(deadline) = guest.try_with_value(PreviewGuest::next_deadline).flatten() else {
                    break;
                };
                gloo_timers::future::sleep(Duration::from_millis(deadline.saturating_sub(now_ms()))).await;
                let Some(tick) = guest.try_update_value(|g| g.tick(now_ms())) else {
                    break;
                };
                if let Some(ready) = tick.ready {
                    post_to_parent(&ready);
                }
                if tick.fell_back {
                    if let Some(fallback) = guest.try_with_value(|g| g.snapshot().clone()) {
                        snapshot.set(fallback);
                        source.set(PreviewSource::Placeholder);
                    }
                }
            }
        });
    }

    fn post_to_parent(message: &PreviewMessage) {
        let Some(parent) = web_sys::window().and_then(|w| w.parent().ok().flatten()) else {
            return;
        };
        post(&parent, message, PARENT_TARGET);
    }
}

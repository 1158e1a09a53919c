//! Dashboard page listing the user's cases with stats and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Without stored credentials it
//! redirects to `/login`; otherwise it loads the profile, the case list, and
//! the counters, and links each case into the wizard.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use casesite::api::CaseStats;
use casesite::{CaseRecord, CrimeType};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::banner::Banner;
use crate::state::auth::AuthState;
use crate::state::dashboard::{DashboardState, case_status};

/// `(label, count)` tiles shown above the list.
fn stat_tiles(stats: &CaseStats) -> [(&'static str, u64); 3] {
    [("Cases", stats.total_cases), ("Published", stats.published_cases), ("Drafts", stats.draft_cases)]
}

/// Second line of a case row: classification and last known location.
fn case_subtitle(case: &CaseRecord) -> String {
    let kind = case
        .field("crime_type")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|raw| CrimeType::parse(raw).label().to_owned());
    let place = case
        .field("incident_location")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);
    match (kind, place) {
        (Some(kind), Some(place)) => format!("{kind} · {place}"),
        (Some(one), None) | (None, Some(one)) => one,
        (None, None) => String::new(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    {
        let navigate_login = navigate.clone();
        Effect::new(move || {
            if !crate::net::api::api().is_signed_in() {
                navigate_login(crate::net::api::LOGIN_ROUTE, NavigateOptions::default());
                return;
            }
            load_dashboard(auth, dashboard);
        });
    }

    let on_new = {
        let navigate = navigate.clone();
        move |_| navigate("/cases/new", NavigateOptions::default())
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            crate::net::api::api().logout();
            auth.update(|a| a.profile = None);
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href(crate::net::api::LOGIN_ROUTE);
            }
        }
    };

    let on_delete_request = Callback::new(move |id: String| dashboard.update(|d| d.pending_delete = Some(id)));
    let on_delete_cancel = Callback::new(move |()| dashboard.update(|d| d.pending_delete = None));
    let on_delete_confirm = Callback::new(move |()| {
        let Some(id) = dashboard.get_untracked().pending_delete else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::api().delete_case(&id).await {
                Ok(()) => dashboard.update(|d| d.remove_case(&id)),
                Err(e) => dashboard.update(|d| {
                    d.pending_delete = None;
                    d.error = Some(crate::net::api::error_text(&e));
                }),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__title">"My cases"</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{move || auth.with(AuthState::display_name)}</span>
                <button class="btn btn--primary" on:click=on_new>"+ New case"</button>
                <button class="btn toolbar__logout" on:click=on_logout>"Logout"</button>
            </header>

            <Banner
                message=Signal::derive(move || dashboard.with(|d| d.error.clone()))
                on_dismiss=Callback::new(move |()| dashboard.update(|d| d.error = None))
            />

            {move || {
                dashboard.with(|d| d.stats.as_ref().map(stat_tiles)).map(|tiles| {
                    view! {
                        <div class="dashboard-page__stats">
                            {tiles
                                .into_iter()
                                .map(|(label, count)| {
                                    view! {
                                        <div class="stat-tile">
                                            <span class="stat-tile__count">{count}</span>
                                            <span class="stat-tile__label">{label}</span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
            }}

            <Show
                when=move || !dashboard.with(|d| d.loading)
                fallback=|| view! { <p class="dashboard-page__loading">"Loading cases..."</p> }
            >
                <Show
                    when=move || !dashboard.with(|d| d.cases.is_empty())
                    fallback=|| view! { <p class="dashboard-page__empty">"No cases yet. Start one to build its site."</p> }
                >
                    <ul class="case-list">
                        <For each=move || dashboard.get().cases key=|c| c.id.clone() let:case>
                            <CaseRow case=case on_delete=on_delete_request/>
                        </For>
                    </ul>
                </Show>
            </Show>

            <Show when=move || dashboard.with(|d| d.pending_delete.is_some())>
                <DeleteCaseDialog on_cancel=on_delete_cancel on_confirm=on_delete_confirm/>
            </Show>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn load_dashboard(auth: RwSignal<AuthState>, dashboard: RwSignal<DashboardState>) {
    use crate::net::api::{api, error_text};

    dashboard.update(|d| {
        d.loading = true;
        d.error = None;
    });
    auth.update(|a| a.loading = true);

    leptos::task::spawn_local(async move {
        let client = api();
        match client.profile().await {
            Ok(profile) => auth.update(|a| {
                a.profile = Some(profile);
                a.loading = false;
            }),
            Err(e) => auth.update(|a| {
                a.error = Some(error_text(&e));
                a.loading = false;
            }),
        }
        let cases = client.my_cases().await;
        let stats = client.case_stats().await;
        dashboard.update(|d| {
            d.loading = false;
            match cases {
                Ok(cases) => d.cases = cases,
                Err(e) => d.error = Some(error_text(&e)),
            }
            match stats {
                Ok(stats) => d.stats = Some(stats),
                Err(e) => leptos::logging::warn!("case stats unavailable: {e}"),
            }
        });
    });
}

#[component]
fn CaseRow(case: CaseRecord, on_delete: Callback<String>) -> impl IntoView {
    let href = format!("/cases/{}", case.id);
    let id = case.id.clone();
    let status = case_status(&case);
    let subtitle = case_subtitle(&case);

    view! {
        <li class="case-row">
            <a class="case-row__link" href=href>
                <span class="case-row__name">{case.display_name()}</span>
                <span class="case-row__subtitle">{subtitle}</span>
            </a>
            <span class="badge" class:badge--live={status == "Published"}>{status}</span>
            <button class="btn btn--ghost" on:click=move |_| on_delete.run(id.clone())>"Delete"</button>
        </li>
    }
}

#[component]
fn DeleteCaseDialog(on_cancel: Callback<()>, on_confirm: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete case"</h2>
                <p class="dialog__danger">"This permanently deletes the case, its photos, and its site."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>"Delete"</button>
                </div>
            </div>
        </div>
    }
}

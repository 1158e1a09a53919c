//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{dashboard::DashboardPage, login::LoginPage, preview::PreviewPage, wizard::CaseWizardPage};
use crate::state::{
    auth::AuthState, dashboard::DashboardState, editor::EditorState, templates::TemplatesState, wizard::WizardState,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(RwSignal::new(AuthState::default()));
    provide_context(RwSignal::new(DashboardState::default()));
    provide_context(RwSignal::new(TemplatesState::default()));
    provide_context(RwSignal::new(WizardState::default()));
    provide_context(RwSignal::new(EditorState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/vigil.css"/>
        <Title text="Vigil"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=(StaticSegment("cases"), StaticSegment("new")) view=CaseWizardPage/>
                <Route path=(StaticSegment("cases"), ParamSegment("id")) view=CaseWizardPage/>
                <Route path=(StaticSegment("preview"), ParamSegment("case_id"), ParamSegment("page")) view=PreviewPage/>
            </Routes>
        </Router>
    }
}

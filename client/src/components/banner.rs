//! Dismissable message banner.

use leptos::prelude::*;

/// Visual tone of a [`Banner`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BannerTone {
    #[default]
    Error,
    Notice,
}

impl BannerTone {
    fn class(self) -> &'static str {
        match self {
            Self::Error => "banner banner--error",
            Self::Notice => "banner banner--notice",
        }
    }
}

/// Renders `message` when set; the close button calls `on_dismiss`.
#[component]
pub fn Banner(
    #[prop(into)] message: Signal<Option<String>>,
    on_dismiss: Callback<()>,
    #[prop(optional)] tone: BannerTone,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class=tone.class() role="alert">
                    <span class="banner__text">{text}</span>
                    <button class="banner__close" aria-label="Dismiss" on:click=move |_| on_dismiss.run(())>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

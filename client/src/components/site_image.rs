//! Template image with an inline placeholder on load failure.
//!
//! DESIGN
//! ======
//! Each image owns its fallback: a failed load flips a local signal, renders
//! the placeholder for its kind, and reports through the optional
//! `on_error` callback. Nothing listens at the document level.

#[cfg(test)]
#[path = "site_image_test.rs"]
mod site_image_test;

use leptos::prelude::*;

/// Which placeholder graphic replaces a broken image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderKind {
    #[default]
    Portrait,
    Hero,
    Gallery,
}

impl PlaceholderKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Portrait => "site-image__placeholder--portrait",
            Self::Hero => "site-image__placeholder--hero",
            Self::Gallery => "site-image__placeholder--gallery",
        }
    }

    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Self::Portrait => "Photo unavailable",
            Self::Hero => "Cover image unavailable",
            Self::Gallery => "Image unavailable",
        }
    }

    /// `viewBox` aspect used by the placeholder SVG.
    #[must_use]
    pub fn view_box(self) -> &'static str {
        match self {
            Self::Portrait => "0 0 120 150",
            Self::Hero => "0 0 320 120",
            Self::Gallery => "0 0 160 120",
        }
    }
}

/// True when there is nothing worth requesting.
#[must_use]
pub fn is_blank_src(src: &str) -> bool {
    let src = src.trim();
    src.is_empty() || src == "null" || src == "undefined"
}

#[component]
pub fn SiteImage(
    #[prop(into)] src: Signal<String>,
    #[prop(into, optional)] alt: String,
    #[prop(optional)] kind: PlaceholderKind,
    #[prop(into, optional)] class: String,
    #[prop(default = None)] on_error: Option<Callback<PlaceholderKind>>,
) -> impl IntoView {
    let failed = RwSignal::new(false);
    // A new source gets a fresh attempt.
    Effect::new(move || {
        src.track();
        failed.set(false);
    });

    let show_placeholder = move || failed.get() || is_blank_src(&src.get());
    let alt_text = alt.clone();
    let image_class = format!("site-image {class}");

    view! {
        <Show
            when=move || !show_placeholder()
            fallback=move || view! { <ImagePlaceholder kind/> }
        >
            <img
                class=image_class.clone()
                src=move || src.get()
                alt=alt_text.clone()
                on:error=move |_| {
                    failed.set(true);
                    if let Some(cb) = on_error {
                        cb.run(kind);
                    }
                }
            />
        </Show>
    }
}

#[component]
pub fn ImagePlaceholder(kind: PlaceholderKind) -> impl IntoView {
    view! {
        <figure class=format!("site-image__placeholder {}", kind.class()) role="img" aria-label=kind.caption()>
            <svg viewBox=kind.view_box() xmlns="http://www.w3.org/2000/svg" aria-hidden="true">
                <rect width="100%" height="100%" fill="#e7e5e4"/>
                <circle cx="50%" cy="40%" r="14%" fill="#d6d3d1"/>
            </svg>
            <figcaption>{kind.caption()}</figcaption>
        </figure>
    }
}

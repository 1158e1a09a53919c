//! Gallery photos attached to a saved case.
//!
//! Photos need a case id, so the panel only activates after the first save.
//! Reordering is optimistic: the list is rearranged locally and the full
//! order is sent; a failed request reloads the list from the backend.

#[cfg(test)]
#[path = "photo_gallery_test.rs"]
mod photo_gallery_test;

use casesite::CasePhoto;
use leptos::prelude::*;

use crate::components::site_image::{PlaceholderKind, SiteImage};
use crate::state::wizard::WizardState;

/// Move the photo at `index` by `delta` places. Out-of-range moves are ignored.
pub fn move_photo(photos: &mut [CasePhoto], index: usize, delta: isize) -> bool {
    let Some(target) = index.checked_add_signed(delta) else {
        return false;
    };
    if index >= photos.len() || target >= photos.len() {
        return false;
    }
    photos.swap(index, target);
    for (order, photo) in photos.iter_mut().enumerate() {
        photo.order = i64::try_from(order).unwrap_or(i64::MAX);
    }
    true
}

#[must_use]
pub fn photo_ids(photos: &[CasePhoto]) -> Vec<String> {
    photos.iter().map(|p| p.id.clone()).collect()
}

#[component]
pub fn PhotoGallery() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let photos = RwSignal::new(Vec::<CasePhoto>::new());
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let case_id = Memo::new(move |_| wizard.with(|w| w.case_id.clone()));

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        if let Some(id) = case_id.get() {
            reload(id, photos, message);
        }
    });

    let on_move = Callback::new(move |(index, delta): (usize, isize)| {
        let mut next = photos.get_untracked();
        if !move_photo(&mut next, index, delta) {
            return;
        }
        let ids = photo_ids(&next);
        photos.set(next);
        #[cfg(feature = "hydrate")]
        if let Some(id) = case_id.get_untracked() {
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::api().reorder_photos(&id, &ids).await {
                    message.set(Some(crate::net::api::error_text(&e)));
                    reload(id, photos, message);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ids;
    });

    let on_delete = Callback::new(move |photo_id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::api().delete_photo(&photo_id).await {
                Ok(()) => photos.update(|list| list.retain(|p| p.id != photo_id)),
                Err(e) => message.set(Some(crate::net::api::error_text(&e))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = photo_id;
    });

    let on_upload = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(id) = case_id.get_untracked() else {
                return;
            };
            busy.set(true);
            message.set(None);
            leptos::task::spawn_local(async move {
                match crate::net::api::read_selected_file(&input).await {
                    Some(file) if crate::net::api::is_image_upload(&file) => {
                        match crate::net::api::api().upload_photo(&id, file, None).await {
                            Ok(photo) => photos.update(|list| list.push(photo)),
                            Err(e) => message.set(Some(crate::net::api::error_text(&e))),
                        }
                    }
                    Some(_) => message.set(Some("Choose an image file".to_owned())),
                    None => {}
                }
                input.set_value("");
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    view! {
        <section class="gallery">
            <h3>"Photos"</h3>
            <Show
                when=move || case_id.get().is_some()
                fallback=|| view! { <p class="gallery__hint">"Save the case to add photos."</p> }
            >
                {move || message.get().map(|m| view! { <p class="gallery__error" role="alert">{m}</p> })}
                <ol class="gallery__list">
                    {move || {
                        let list = photos.get();
                        let last = list.len().saturating_sub(1);
                        list.into_iter()
                            .enumerate()
                            .map(|(index, photo)| {
                                let src = photo.image_url.clone();
                                let id = photo.id.clone();
                                view! {
                                    <li class="gallery__item">
                                        <SiteImage src=src alt=photo.caption.clone().unwrap_or_default() kind=PlaceholderKind::Gallery/>
                                        <div class="gallery__actions">
                                            <button class="btn btn--ghost" disabled={index == 0} on:click=move |_| on_move.run((index, -1))>"↑"</button>
                                            <button class="btn btn--ghost" disabled={index == last} on:click=move |_| on_move.run((index, 1))>"↓"</button>
                                            <button class="btn btn--ghost" on:click=move |_| on_delete.run(id.clone())>"Remove"</button>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ol>
                <label class="btn gallery__upload">
                    {move || if busy.get() { "Uploading..." } else { "Add photo" }}
                    <input type="file" accept="image/*" hidden disabled=move || busy.get() on:change=on_upload/>
                </label>
            </Show>
        </section>
    }
}

#[cfg(feature = "hydrate")]
fn reload(case_id: String, photos: RwSignal<Vec<CasePhoto>>, message: RwSignal<Option<String>>) {
    leptos::task::spawn_local(async move {
        match crate::net::api::api().photos(&case_id).await {
            Ok(list) => photos.set(list),
            Err(e) => message.set(Some(crate::net::api::error_text(&e))),
        }
    });
}

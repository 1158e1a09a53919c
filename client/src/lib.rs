//! # client
//!
//! Leptos + WASM frontend for building and publishing case memorial sites.
//!
//! The wizard walks a case through details, template choice, customization,
//! live preview, and deployment. Domain rules live in `casesite`; the
//! preview handshake lives in `bridge`. This crate wires both into pages,
//! components, and browser-side transports.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}

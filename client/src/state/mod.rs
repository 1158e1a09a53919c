//! Shared reactive state provided via Leptos context.
//!
//! DESIGN
//! ======
//! Each struct is plain data held in an `RwSignal`; pages mutate them with
//! `update` and components read them with `get`. Domain rules stay in
//! `casesite`, so these types mostly track loading flags and banners.

pub mod auth;
pub mod dashboard;
pub mod editor;
pub mod templates;
pub mod wizard;

//! Typed REST client for the case-site backend.
//!
//! DESIGN
//! ======
//! `client` owns request dispatch: bearer injection, the single-flight
//! refresh on 401, and error-body parsing. The remaining modules add one
//! `impl ApiClient` block per backend resource, mirroring the `/api/` URL
//! layout.

pub mod cases;
pub mod client;
pub mod images;
pub mod photos;
pub mod profile;
pub mod spotlight;
pub mod templates;

#[cfg(test)]
pub(crate) mod fake;

pub use cases::CaseStats;
pub use client::ApiClient;
pub use templates::TemplateComparison;

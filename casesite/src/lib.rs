//! Domain core for publishing case memorial sites.
//!
//! This crate is UI-framework agnostic: the Leptos client, the CLI, and the
//! tests all drive the same case form, customization store, and backend
//! gateway. Network access goes through the injected [`transport::Transport`]
//! and credentials through the injected [`auth::TokenStore`].
//!
//! ARCHITECTURE
//! ============
//! - `path`: dotted-path get/set over `serde_json::Value` trees.
//! - `template` / `customize`: editable zones derived from a template schema
//!   and the customization store seeded from them.
//! - `case`: case form fields, validation, and age derivation.
//! - `deploy`: subdomain / custom-domain rules and deployment records.
//! - `transport` / `auth` / `api`: REST calls with bearer auth and refresh.
//! - `gateway`: serialized save/deploy for one case.

pub mod api;
pub mod auth;
pub mod case;
pub mod customize;
pub mod deploy;
pub mod error;
pub mod gateway;
pub mod models;
pub mod path;
pub mod template;
pub mod transport;

pub use api::ApiClient;
pub use auth::{MemoryTokens, TokenStore};
pub use case::{CaseForm, CrimeType, FieldErrors, derive_age};
pub use customize::{CustomizationStore, StoreError, initialize_customizations};
pub use deploy::{DeployTarget, Deployment, DeploymentStatus};
pub use error::SiteError;
pub use gateway::{CaseGateway, case_payload};
pub use models::{CasePhoto, CaseRecord, FileUpload, ImageUpload, SpotlightDraft, SpotlightPost, UserProfile};
pub use path::{PathError, get_path, set_path};
pub use template::{EditableZone, Template, ZoneGroup, ZoneKind, editable_zones};
pub use transport::{ApiRequest, ApiResponse, Method, MultipartPart, RequestBody, Transport};

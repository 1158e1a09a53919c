//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the case wizard's controls and the template preview
//! while reading/writing shared state from Leptos context providers.

pub mod banner;
pub mod case_details_form;
pub mod customization_editor;
pub mod photo_gallery;
pub mod preview_frame;
pub mod site_image;
pub mod template_selector;
pub mod template_view;
pub mod wizard_steps;

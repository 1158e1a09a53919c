//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and the header to coordinate login redirects and
//! identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use casesite::UserProfile;

/// Authentication state tracking the signed-in profile and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Name shown in the header.
    #[must_use]
    pub fn display_name(&self) -> String {
        let Some(profile) = &self.profile else {
            return String::new();
        };
        let full = format!("{} {}", profile.first_name.trim(), profile.last_name.trim());
        let full = full.trim();
        if full.is_empty() { profile.username.clone() } else { full.to_owned() }
    }
}

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, saves, navigation) and
//! delegates rendering details to `components`.

pub mod dashboard;
pub mod login;
pub mod preview;
pub mod wizard;

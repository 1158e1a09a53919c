//! Browser networking for the `casesite` API client and the preview bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` adapts `gloo-net` to the `Transport` seam, `tokens` persists
//! credentials in `localStorage`, `api` exposes the shared client, and
//! `messaging` moves bridge messages across frames.

pub mod api;
pub mod messaging;
pub mod tokens;
pub mod transport;

//! Preview-side half of the handshake, running inside the iframe.
//!
//! The guest announces itself with `PREVIEW_READY` on mount and again at a
//! few fixed delays, because the editor may attach its listener late. The
//! first customization message stops the announcements. When nothing arrives
//! within the init window, a placeholder case is shown instead.

#[cfg(test)]
#[path = "guest_test.rs"]
mod guest_test;

use std::collections::VecDeque;

use casesite::path::merge_shallow;
use serde_json::{Value, json};

use crate::{AllowedOrigins, PreviewMessage, PreviewSnapshot, decode_message};

pub const DEFAULT_READY_DELAYS_MS: [u64; 4] = [100, 500, 1000, 2000];
pub const DEFAULT_INIT_TIMEOUT_MS: u64 = 3000;

/// Timing for the guest handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestConfig {
    /// Offsets from mount at which `PREVIEW_READY` is re-posted.
    pub ready_delays_ms: Vec<u64>,
    /// Offset from mount after which the placeholder case is applied.
    pub init_timeout_ms: u64,
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self { ready_delays_ms: DEFAULT_READY_DELAYS_MS.to_vec(), init_timeout_ms: DEFAULT_INIT_TIMEOUT_MS }
    }
}

/// Where the currently displayed data came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewSource {
    #[default]
    Pending,
    Parent,
    Placeholder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuestEvent {
    Ignored,
    Replaced,
    Merged,
}

/// What a [`PreviewGuest::tick`] produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuestTick {
    /// Readiness announcement to post to the parent window.
    pub ready: Option<PreviewMessage>,
    /// True when this tick applied the placeholder case.
    pub fell_back: bool,
}

#[derive(Clone, Debug)]
pub struct PreviewGuest {
    config: GuestConfig,
    allowed: AllowedOrigins,
    snapshot: PreviewSnapshot,
    source: PreviewSource,
    ready_due_ms: VecDeque<u64>,
    fallback_due_ms: Option<u64>,
    mounted: bool,
    torn_down: bool,
}

impl PreviewGuest {
    #[must_use]
    pub fn new(config: GuestConfig, allowed: AllowedOrigins) -> Self {
        Self {
            config,
            allowed,
            snapshot: PreviewSnapshot::default(),
            source: PreviewSource::Pending,
            ready_due_ms: VecDeque::new(),
            fallback_due_ms: None,
            mounted: false,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &PreviewSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn source(&self) -> PreviewSource {
        self.source
    }

    /// Start the handshake and return the immediate readiness announcement.
    pub fn mount(&mut self, now_ms: u64) -> Option<PreviewMessage> {
        if self.torn_down || self.mounted {
            return None;
        }
        self.mounted = true;
        let mut delays = self.config.ready_delays_ms.clone();
        delays.sort_unstable();
        self.ready_due_ms = delays.into_iter().map(|d| now_ms.saturating_add(d)).collect();
        self.fallback_due_ms = Some(now_ms.saturating_add(self.config.init_timeout_ms));
        Some(PreviewMessage::PreviewReady)
    }

    /// Fire due announcements and the init timeout.
    pub fn tick(&mut self, now_ms: u64) -> GuestTick {
        let mut out = GuestTick::default();
        if self.torn_down || !self.mounted {
            return out;
        }

        let mut due = false;
        while self.ready_due_ms.front().is_some_and(|at| *at <= now_ms) {
            self.ready_due_ms.pop_front();
            due = true;
        }
        if due {
            out.ready = Some(PreviewMessage::PreviewReady);
        }

        if self.fallback_due_ms.is_some_and(|at| at <= now_ms) {
            self.fallback_due_ms = None;
            if self.source == PreviewSource::Pending {
                self.snapshot = PreviewSnapshot::new(placeholder_case(), Value::Object(serde_json::Map::new()));
                self.source = PreviewSource::Placeholder;
                out.fell_back = true;
            }
        }
        out
    }

    /// When the driver should call [`Self::tick`] next, if at all.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        if self.torn_down || !self.mounted {
            return None;
        }
        match (self.ready_due_ms.front().copied(), self.fallback_due_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Feed a message received on the preview window.
    pub fn receive(&mut self, origin: &str, data: &Value) -> GuestEvent {
        if self.torn_down || !self.allowed.allows(origin) {
            return GuestEvent::Ignored;
        }
        let Ok(message) = decode_message(data) else {
            return GuestEvent::Ignored;
        };

        let event = match message {
            PreviewMessage::InitCustomizations { customizations, case_data } => {
                self.snapshot = PreviewSnapshot::new(case_data, customizations);
                GuestEvent::Replaced
            }
            PreviewMessage::UpdateCustomizations { customizations, case_data } => {
                if self.source == PreviewSource::Parent {
                    merge_shallow(&mut self.snapshot.customizations, customizations);
                    merge_shallow(&mut self.snapshot.case_data, case_data);
                    GuestEvent::Merged
                } else {
                    // Nothing real to merge into: the INIT was posted before this page listened.
                    self.snapshot = PreviewSnapshot::new(case_data, customizations);
                    GuestEvent::Replaced
                }
            }
            PreviewMessage::PreviewReady => return GuestEvent::Ignored,
        };

        self.source = PreviewSource::Parent;
        self.ready_due_ms.clear();
        self.fallback_due_ms = None;
        event
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.ready_due_ms.clear();
        self.fallback_due_ms = None;
    }
}

/// Case record shown when the editor never sends real data.
#[must_use]
pub fn placeholder_case() -> Value {
    json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "crime_type": "missing",
        "age": 34,
        "last_seen_date": "2024-01-01",
        "incident_location": "Springfield",
        "description": "Preview data. Case details will appear here once the editor connects.",
        "investigating_agency": "Springfield Police Department",
        "detective_phone": "(555) 010-0000",
    })
}

//! Editor-side half of the preview handshake.
//!
//! DESIGN
//! ======
//! The host is a plain state machine: `Idle -> AwaitingReady -> Ready`. While
//! awaiting readiness it keeps exactly one resend deadline; the driver asks
//! [`PreviewHost::next_deadline`] when to call [`PreviewHost::tick`] again.
//! Acknowledgement cancels the deadline, and the handshake window bounds how
//! long resends continue. Once ready, every snapshot change is posted at once.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use serde_json::Value;

use crate::{AllowedOrigins, BridgeError, PreviewMessage, PreviewSnapshot, decode_message};

pub const DEFAULT_RESEND_INTERVAL_MS: u64 = 500;
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 10_000;

/// Timing for the host handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Delay between pushes while the preview has not acknowledged.
    pub resend_interval_ms: u64,
    /// Window after mount during which resends continue.
    pub ready_timeout_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { resend_interval_ms: DEFAULT_RESEND_INTERVAL_MS, ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS }
    }
}

/// Handshake phase of the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewPhase {
    /// No iframe mounted (or torn down).
    #[default]
    Idle,
    /// Iframe mounted; pushing state until the preview acknowledges.
    AwaitingReady,
    /// Preview acknowledged; state changes are pushed immediately.
    Ready,
}

/// Outcome of feeding a received message to the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Foreign origin, unknown payload, or a message the host does not consume.
    Ignored,
    /// The preview reported ready; post the enclosed message to it.
    Ready(PreviewMessage),
}

#[derive(Clone, Debug)]
pub struct PreviewHost {
    config: HostConfig,
    allowed: AllowedOrigins,
    phase: PreviewPhase,
    snapshot: PreviewSnapshot,
    mounted_at_ms: Option<u64>,
    next_resend_ms: Option<u64>,
    sent_init: bool,
    sent_count: u64,
    timed_out: bool,
    torn_down: bool,
}

impl PreviewHost {
    #[must_use]
    pub fn new(config: HostConfig, allowed: AllowedOrigins, snapshot: PreviewSnapshot) -> Self {
        Self {
            config,
            allowed,
            phase: PreviewPhase::Idle,
            snapshot,
            mounted_at_ms: None,
            next_resend_ms: None,
            sent_init: false,
            sent_count: 0,
            timed_out: false,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> PreviewPhase {
        self.phase
    }

    #[must_use]
    pub fn snapshot(&self) -> &PreviewSnapshot {
        &self.snapshot
    }

    /// True once the handshake window elapsed without acknowledgement.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Number of customization messages produced so far.
    #[must_use]
    pub fn sent_count(&self) -> u64 {
        self.sent_count
    }

    /// The iframe was mounted: start awaiting readiness and return the first push.
    pub fn mount(&mut self, now_ms: u64) -> Option<PreviewMessage> {
        if self.torn_down || self.phase != PreviewPhase::Idle {
            return None;
        }
        self.phase = PreviewPhase::AwaitingReady;
        self.mounted_at_ms = Some(now_ms);
        self.next_resend_ms = Some(now_ms.saturating_add(self.config.resend_interval_ms));
        Some(self.next_message())
    }

    /// Record new case data / customizations.
    ///
    /// Returns a message to post when the preview is already ready; otherwise
    /// the snapshot rides along with the next resend.
    pub fn update(&mut self, snapshot: PreviewSnapshot) -> Option<PreviewMessage> {
        if self.torn_down {
            return None;
        }
        self.snapshot = snapshot;
        if self.phase == PreviewPhase::Ready {
            Some(self.next_message())
        } else {
            None
        }
    }

    /// Advance the resend timer.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::PreviewTimeout`] once, at the tick that crosses
    /// the handshake window. No resends happen after that.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<PreviewMessage>, BridgeError> {
        if self.torn_down || self.phase != PreviewPhase::AwaitingReady || self.timed_out {
            return Ok(None);
        }
        let Some(mounted_at) = self.mounted_at_ms else {
            return Ok(None);
        };

        let waited_ms = now_ms.saturating_sub(mounted_at);
        if waited_ms >= self.config.ready_timeout_ms {
            self.timed_out = true;
            self.next_resend_ms = None;
            return Err(BridgeError::PreviewTimeout { waited_ms });
        }

        match self.next_resend_ms {
            Some(due) if now_ms >= due => {
                self.next_resend_ms = Some(now_ms.saturating_add(self.config.resend_interval_ms));
                Ok(Some(self.next_message()))
            }
            _ => Ok(None),
        }
    }

    /// When the driver should call [`Self::tick`] next, if at all.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        if self.torn_down || self.phase != PreviewPhase::AwaitingReady || self.timed_out {
            return None;
        }
        let deadline = self.mounted_at_ms?.saturating_add(self.config.ready_timeout_ms);
        Some(self.next_resend_ms.map_or(deadline, |due| due.min(deadline)))
    }

    /// Feed a message received on the host window.
    pub fn receive(&mut self, origin: &str, data: &Value) -> HostEvent {
        if self.torn_down || self.phase == PreviewPhase::Idle || !self.allowed.allows(origin) {
            return HostEvent::Ignored;
        }
        match decode_message(data) {
            Ok(PreviewMessage::PreviewReady) => {
                self.phase = PreviewPhase::Ready;
                self.next_resend_ms = None;
                HostEvent::Ready(self.next_message())
            }
            _ => HostEvent::Ignored,
        }
    }

    /// Stop everything; later calls produce nothing.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.phase = PreviewPhase::Idle;
        self.next_resend_ms = None;
    }

    fn next_message(&mut self) -> PreviewMessage {
        let customizations = self.snapshot.customizations.clone();
        let case_data = self.snapshot.case_data.clone();
        self.sent_count += 1;
        if self.sent_init {
            PreviewMessage::UpdateCustomizations { customizations, case_data }
        } else {
            self.sent_init = true;
            PreviewMessage::InitCustomizations { customizations, case_data }
        }
    }
}

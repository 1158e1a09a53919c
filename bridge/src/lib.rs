//! Cross-frame preview protocol shared by the editor page and the preview page.
//!
//! The editor (host) embeds a template preview in an iframe and pushes the
//! current case data and customization tree into it with `postMessage`. The
//! preview (guest) acknowledges with `PREVIEW_READY`. This crate owns the
//! message shapes and both sides' state machines; it never touches the DOM.
//! Browser drivers feed it received messages and a millisecond clock, then
//! post whatever it returns.

pub mod guest;
pub mod host;

pub use guest::{GuestConfig, GuestEvent, GuestTick, PreviewGuest, PreviewSource};
pub use host::{HostConfig, HostEvent, PreviewHost, PreviewPhase};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Local development origins accepted in addition to the page's own origin.
pub const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Error returned by the bridge codec and state machines.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A received payload is not a recognizable preview message.
    #[error("failed to decode preview message: {0}")]
    Decode(#[from] serde_json::Error),
    /// The preview never acknowledged readiness inside the handshake window.
    #[error("preview did not report ready within {waited_ms}ms")]
    PreviewTimeout { waited_ms: u64 },
}

/// A message exchanged between the editor and the preview iframe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreviewMessage {
    /// First push from the editor; the preview replaces its state wholesale.
    InitCustomizations {
        customizations: Value,
        #[serde(rename = "caseData")]
        case_data: Value,
    },
    /// Later pushes; the preview merges top-level keys into its state.
    UpdateCustomizations {
        customizations: Value,
        #[serde(rename = "caseData")]
        case_data: Value,
    },
    /// Sent by the preview once its listener is attached.
    PreviewReady,
}

impl PreviewMessage {
    /// Wire name of the message, as found in its `type` field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitCustomizations { .. } => "INIT_CUSTOMIZATIONS",
            Self::UpdateCustomizations { .. } => "UPDATE_CUSTOMIZATIONS",
            Self::PreviewReady => "PREVIEW_READY",
        }
    }
}

/// Serialize a message into the JSON object posted across frames.
#[must_use]
pub fn encode_message(message: &PreviewMessage) -> Value {
    serde_json::to_value(message).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Parse a received JSON payload into a message.
///
/// # Errors
///
/// Returns [`BridgeError::Decode`] when the payload has no known `type` or
/// its fields have the wrong shape.
pub fn decode_message(data: &Value) -> Result<PreviewMessage, BridgeError> {
    Ok(PreviewMessage::deserialize(data)?)
}

/// Snapshot of everything the preview needs to render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewSnapshot {
    pub case_data: Value,
    pub customizations: Value,
}

impl PreviewSnapshot {
    #[must_use]
    pub fn new(case_data: Value, customizations: Value) -> Self {
        Self { case_data, customizations }
    }
}

/// Explicit list of origins whose messages are processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Allow `own` plus the local development origins.
    #[must_use]
    pub fn for_origin(own: &str) -> Self {
        let mut origins = vec![normalize_origin(own)];
        for dev in DEV_ORIGINS {
            if !origins.iter().any(|o| o == dev) {
                origins.push(dev.to_owned());
            }
        }
        Self { origins }
    }

    /// Allow exactly the given origins.
    #[must_use]
    pub fn exact<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { origins: origins.into_iter().map(|o| normalize_origin(o.as_ref())).collect() }
    }

    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        self.origins.iter().any(|o| *o == origin)
    }

    #[must_use]
    pub fn origins(&self) -> &[String] {
        &self.origins
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}

/// Build the iframe URL for a preview of `page` rendered with `template`.
///
/// Unsaved cases use the literal segment `new`.
#[must_use]
pub fn preview_url(case_id: Option<&str>, page: &str, template: &str) -> String {
    let case_segment = case_id.filter(|id| !id.is_empty()).unwrap_or("new");
    format!(
        "/preview/{}/{}?template={}",
        urlencoding::encode(case_segment),
        urlencoding::encode(page),
        urlencoding::encode(template)
    )
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

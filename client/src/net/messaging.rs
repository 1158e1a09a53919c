//! `postMessage` plumbing for the preview bridge drivers.
//!
//! Payloads cross frames as structured-clone objects. The drivers convert
//! them to `serde_json::Value` here and hand them to the `bridge` state
//! machines, which decide what to do with them.

#[cfg(test)]
#[path = "messaging_test.rs"]
mod messaging_test;

use serde_json::Value;

/// Parse a payload that arrived as a JSON string. Only objects are messages.
#[must_use]
pub fn payload_from_text(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text).ok().filter(Value::is_object)
}

/// Current wall-clock time in milliseconds, as fed to the bridge state machines.
#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

/// Origin of the current page, e.g. `https://vigil.example`.
#[cfg(feature = "hydrate")]
pub fn own_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// JSON view of a received message event's data.
#[cfg(feature = "hydrate")]
pub fn event_payload(event: &web_sys::MessageEvent) -> Option<Value> {
    let data = event.data();
    if let Some(text) = data.as_string() {
        return payload_from_text(&text);
    }
    let text = js_sys::JSON::stringify(&data).ok()?.as_string()?;
    payload_from_text(&text)
}

/// Post a bridge message to `target`, restricted to `target_origin`.
#[cfg(feature = "hydrate")]
pub fn post(target: &web_sys::Window, message: &bridge::PreviewMessage, target_origin: &str) -> bool {
    let encoded = bridge::encode_message(message).to_string();
    let Ok(data) = js_sys::JSON::parse(&encoded) else {
        return false;
    };
    match target.post_message(&data, target_origin) {
        Ok(()) => true,
        Err(err) => {
            leptos::logging::warn!("postMessage {} failed: {err:?}", message.kind());
            false
        }
    }
}

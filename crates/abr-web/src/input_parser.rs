#![forbid(unsafe_code)]

//! JSON parser for host-encoded page events.
//!
//! The binding layer serializes DOM interactions as small JSON objects:
//!
//! ```text
//! {"kind":"next_product"}
//! {"kind":"previous_product"}
//! {"kind":"select_product","id":"x10"}
//! {"kind":"select_language","code":"en"}
//! ```
//!
//! Unknown kinds (scroll, theme toggles, search keystrokes) belong to other
//! collaborators and return `Ok(None)`.

use serde::Deserialize;

use crate::PageEvent;

/// Errors from parsing encoded host events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEventError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
}

impl core::fmt::Display for HostEventError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for HostEventError {}

#[derive(Debug, Deserialize)]
struct RawEvent {
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Parse one JSON-encoded host event.
///
/// Returns `Ok(None)` for kinds the page does not handle and `Err` for
/// malformed JSON or missing fields. Field values are passed through
/// unvalidated; the page rejects unknown ids and languages itself.
pub fn parse_host_event(json: &str) -> Result<Option<PageEvent>, HostEventError> {
    let raw: RawEvent = serde_json::from_str(json).map_err(|e| HostEventError::Json(e.to_string()))?;
    decode(raw)
}

/// Parse a JSON array of host events, skipping unhandled kinds.
pub fn parse_host_events(json: &str) -> Result<Vec<PageEvent>, HostEventError> {
    let raws: Vec<RawEvent> = serde_json::from_str(json).map_err(|e| HostEventError::Json(e.to_string()))?;
    let mut events = Vec::with_capacity(raws.len());
    for raw in raws {
        events.extend(decode(raw)?);
    }
    Ok(events)
}

fn decode(raw: RawEvent) -> Result<Option<PageEvent>, HostEventError> {
    match raw.kind.as_str() {
        "next_product" => Ok(Some(PageEvent::NextProduct)),
        "previous_product" => Ok(Some(PageEvent::PreviousProduct)),
        "select_product" => raw
            .id
            .map(|id| Some(PageEvent::SelectProduct(id)))
            .ok_or(HostEventError::MissingField("id")),
        "select_language" => raw
            .code
            .map(|code| Some(PageEvent::SelectLanguage(code)))
            .ok_or(HostEventError::MissingField("code")),
        // Theme, search, and scroll events belong to other collaborators.
        _ => Ok(None),
    }
}

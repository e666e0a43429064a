#![forbid(unsafe_code)]

//! JSON input parser for host-encoded pointer interactions.
//!
//! [`parse_encoded_pointer`] accepts one JSON object per DOM interaction and
//! returns the corresponding [`HostInput`]. The schema mirrors what a page
//! script (or the `wasm` event bridge) records:
//!
//! ```json
//! {"kind":"mouse","phase":"down"}
//! {"kind":"mouse","phase":"move","x":120.5,"y":40}
//! {"kind":"touch","phase":"move","touches":[{"x":118,"y":42}]}
//! {"kind":"click","x":300,"y":12}
//! {"kind":"resize"}
//! ```
//!
//! Coordinates are viewport (client) pixels. Kinds without a widget mapping
//! (keyboard, wheel, future additions) return `Ok(None)`.

use reveal_core::{PointerSample, TouchPoint};
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown phase value for the input kind.
    UnknownPhase(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// One widget-relevant interaction delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostInput {
    /// Mouse-down or touch-start on the widget.
    Press,
    /// Mouse-move or touch-move over the widget.
    Move(PointerSample),
    /// Mouse-up or touch-end anywhere in the viewport.
    Release,
    /// Click on the widget.
    Click(PointerSample),
    /// Viewport resized.
    Resize,
}

impl HostInput {
    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Move(_) => "move",
            Self::Release => "release",
            Self::Click(_) => "click",
            Self::Resize => "resize",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    touches: Option<Vec<RawTouch>>,
}

#[derive(Debug, Deserialize)]
struct RawTouch {
    x: f64,
    #[serde(default)]
    y: f64,
}

/// Parse a JSON-encoded pointer interaction into a [`HostInput`].
///
/// Returns `Ok(None)` for kinds the widget does not react to, and `Err` for
/// malformed JSON, missing coordinates, or an unknown phase.
pub fn parse_encoded_pointer(json: &str) -> Result<Option<HostInput>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "mouse" => parse_mouse(&raw).map(Some),
        "touch" => parse_touch(raw).map(Some),
        "click" => mouse_sample(&raw).map(|sample| Some(HostInput::Click(sample))),
        "resize" => Ok(Some(HostInput::Resize)),
        _ => Ok(None),
    }
}

fn mouse_sample(raw: &RawInput) -> Result<PointerSample, InputParseError> {
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    Ok(PointerSample::mouse(x, raw.y.unwrap_or(0.0)))
}

fn parse_mouse(raw: &RawInput) -> Result<HostInput, InputParseError> {
    let phase = raw
        .phase
        .as_deref()
        .ok_or(InputParseError::MissingField("phase"))?;
    match phase {
        "down" => Ok(HostInput::Press),
        "move" => mouse_sample(raw).map(HostInput::Move),
        "up" => Ok(HostInput::Release),
        other => Err(InputParseError::UnknownPhase(other.to_owned())),
    }
}

fn parse_touch(raw: RawInput) -> Result<HostInput, InputParseError> {
    let phase = raw
        .phase
        .as_deref()
        .ok_or(InputParseError::MissingField("phase"))?;
    match phase {
        "start" => Ok(HostInput::Press),
        // An empty list is kept; the controller ignores touches without a point.
        "move" => Ok(HostInput::Move(PointerSample::Touch {
            touches: raw
                .touches
                .unwrap_or_default()
                .into_iter()
                .map(|t| TouchPoint::new(t.x, t.y))
                .collect(),
        })),
        "end" | "cancel" => Ok(HostInput::Release),
        other => Err(InputParseError::UnknownPhase(other.to_owned())),
    }
}

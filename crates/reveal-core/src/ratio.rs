#![forbid(unsafe_code)]

//! Open-ratio calculation and formatting.
//!
//! The open ratio is the percentage (0–100) of the "after" image revealed by
//! the divider. Pointer positions are converted into a ratio by centering the
//! divider on the pointer: half the divider width is added to the effective
//! position before dividing by the container width.
//!
//! | Pointer position | Effective position |
//! |------------------|--------------------|
//! | `x < 0` | `divider_width` |
//! | `0 <= x < container_width` | `x` |
//! | `x >= container_width` | `container_width - divider_width` |
//!
//! Edge snapping is the only boundary handling: the result is not clamped, so
//! a pointer just inside the right edge can land slightly above 100. Callers
//! that store an open ratio run it through [`clamp_open_ratio`].

use serde::{Deserialize, Serialize};

/// Ratio used before any interaction or configuration.
pub const DEFAULT_OPEN_RATIO: f64 = 50.0;

/// Lower bound for the open ratio.
pub const MIN_OPEN_RATIO: f64 = 0.0;

/// Upper bound for the open ratio.
pub const MAX_OPEN_RATIO: f64 = 100.0;

/// Inputs to [`calculate_open_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatioInput {
    /// Raw pointer X relative to the container's left edge.
    pub x: f64,
    /// Rendered width of the divider handle.
    pub divider_width: f64,
    /// Rendered width of the container.
    pub container_width: f64,
}

impl RatioInput {
    #[must_use]
    pub const fn new(x: f64, divider_width: f64, container_width: f64) -> Self {
        Self {
            x,
            divider_width,
            container_width,
        }
    }

    /// Whether the container width cannot produce a meaningful ratio.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.container_width.is_finite() && self.container_width > 0.0)
    }

    /// Pointer position after edge snapping, before centering the divider.
    #[must_use]
    pub fn effective_x(&self) -> f64 {
        if self.x < 0.0 {
            self.divider_width
        } else if self.x >= self.container_width {
            self.container_width - self.divider_width
        } else {
            self.x
        }
    }
}

/// Map a raw pointer position into an open ratio.
///
/// The result is not clamped to `[0, 100]`; see [`clamp_open_ratio`].
/// A degenerate container (zero, negative, or non-finite width) yields
/// [`DEFAULT_OPEN_RATIO`]; use [`RatioInput::is_degenerate`] to tell that case
/// apart from a genuine centered result.
#[must_use]
pub fn calculate_open_ratio(input: &RatioInput) -> f64 {
    if input.is_degenerate() {
        return DEFAULT_OPEN_RATIO;
    }
    let centered = input.effective_x() + input.divider_width / 2.0;
    centered / input.container_width * 100.0
}

/// Clamp an arbitrary value into the open-ratio range.
///
/// `NaN` maps to [`DEFAULT_OPEN_RATIO`]; infinities map to the nearest bound.
#[must_use]
pub fn clamp_open_ratio(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_OPEN_RATIO;
    }
    value.clamp(MIN_OPEN_RATIO, MAX_OPEN_RATIO)
}

/// Render a ratio (already a percentage) as a layout string, e.g. `"42.5%"`.
///
/// No clamping happens here. Non-finite values still format without
/// panicking (`"NaN%"`, `"Infinity%"`), mirroring what a browser would be
/// handed.
#[must_use]
pub fn format_percentage(ratio: f64) -> String {
    if ratio.is_nan() {
        return "NaN%".to_owned();
    }
    if ratio.is_infinite() {
        return if ratio.is_sign_positive() {
            "Infinity%".to_owned()
        } else {
            "-Infinity%".to_owned()
        };
    }
    // Negative zero prints as "-0" otherwise.
    let ratio = if ratio == 0.0 { 0.0 } else { ratio };
    format!("{ratio}%")
}

/// Calculate and format in one step.
#[must_use]
pub fn ratio_label(input: &RatioInput) -> String {
    format_percentage(calculate_open_ratio(input))
}

#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are CSS pixels in viewport space (origin at the top-left of the
//! visible document area), which is what browser pointer events and
//! `getBoundingClientRect()` report.

use serde::{Deserialize, Serialize};

/// An element's rendered border box in viewport coordinates.
///
/// Margins are not included.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a box at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Anything whose rendered box can be measured.
///
/// Returns `None` when the element is not attached to a rendered document.
pub trait Measure {
    fn bounding_box(&self) -> Option<BoundingBox>;
}

impl Measure for BoundingBox {
    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(*self)
    }
}

impl Measure for Option<BoundingBox> {
    fn bounding_box(&self) -> Option<BoundingBox> {
        *self
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn bounding_box(&self) -> Option<BoundingBox> {
        (**self).bounding_box()
    }
}

/// Current rendered width of `element` in pixels.
///
/// Detached elements, negative widths and non-finite widths all report `0.0`.
#[must_use]
pub fn element_width(element: &impl Measure) -> f64 {
    element
        .bounding_box()
        .map(|rect| rect.width)
        .filter(|width| width.is_finite() && *width > 0.0)
        .unwrap_or(0.0)
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    #[inline]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Pointer position carried by a press, move, or click interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerSample {
    /// Mouse interaction with its viewport coordinates.
    Mouse { client_x: f64, client_y: f64 },
    /// Touch interaction with the currently active touch points, in the order
    /// the platform reports them.
    Touch { touches: Vec<TouchPoint> },
}

impl PointerSample {
    /// Mouse sample at the given viewport coordinates.
    #[must_use]
    pub const fn mouse(client_x: f64, client_y: f64) -> Self {
        Self::Mouse { client_x, client_y }
    }

    /// Touch sample with a single active touch point.
    #[must_use]
    pub fn touch(client_x: f64, client_y: f64) -> Self {
        Self::Touch {
            touches: vec![TouchPoint::new(client_x, client_y)],
        }
    }

    /// Viewport X of the interaction point; first touch for touch samples.
    #[must_use]
    pub fn client_x(&self) -> Option<f64> {
        match self {
            Self::Mouse { client_x, .. } => Some(*client_x),
            Self::Touch { touches } => touches.first().map(|touch| touch.client_x),
        }
    }
}

/// Horizontal offset of `sample` relative to the left edge of `reference`.
///
/// The result is not clamped: it is negative left of the element and exceeds
/// the element width right of it. Returns `None` for a touch sample without
/// any active touch point.
#[must_use]
pub fn pointer_x_from_event(sample: &PointerSample, reference: &BoundingBox) -> Option<f64> {
    sample.client_x().map(|x| x - reference.left)
}

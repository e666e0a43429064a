#![forbid(unsafe_code)]

//! Core: geometry, ratio math, and timing primitives for the reveal widget.
//!
//! # Role in reveal
//! `reveal-core` holds the pieces of the before/after comparison widget that
//! do not depend on any host: converting pointer positions into an open ratio,
//! formatting that ratio for layout, coalescing resize storms, and deferring
//! visual updates to the next frame.
//!
//! # Primary responsibilities
//! - **Geometry**: bounding boxes, element widths, pointer X extraction.
//! - **Ratio**: the open-ratio calculator, range clamping, and percentage formatting.
//! - **Debounce**: trailing-edge deadline tracking driven by caller-supplied time.
//! - **Frame queue**: ordered, non-coalescing next-frame task scheduling.
//!
//! # How it fits in the system
//! `reveal-widget` builds the controller state machine on top of these types,
//! and `reveal-web` binds the controller to a browser document. Nothing in this
//! crate reads the wall clock implicitly: callers pass `now` in (browser hosts
//! take it from [`SystemClock`]), so every behavior is reproducible in tests.

pub mod clock;
pub mod debounce;
pub mod frame;
pub mod geometry;
pub mod ratio;

pub use clock::SystemClock;
pub use debounce::{Debounced, Debouncer, debounce};
pub use frame::{FrameId, FrameQueue};
pub use geometry::{
    BoundingBox, Measure, PointerSample, TouchPoint, element_width, pointer_x_from_event,
};
pub use ratio::{
    DEFAULT_OPEN_RATIO, MAX_OPEN_RATIO, MIN_OPEN_RATIO, RatioInput, calculate_open_ratio,
    clamp_open_ratio, format_percentage, ratio_label,
};

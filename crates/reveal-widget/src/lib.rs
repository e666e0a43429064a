#![forbid(unsafe_code)]

//! Before/after image comparison widget.
//!
//! A draggable divider splits the widget into two overlapping panes; the
//! "before" pane is masked to the current open ratio and the "after" pane
//! shows through the rest. This crate owns the divider state machine and
//! everything that is not tied to a particular document host:
//!
//! - [`controller::Controller`]: Divider State, interaction handling, deferred
//!   visual updates, and notifications.
//! - [`host`]: the [`Surface`](host::Surface) and [`Viewport`](host::Viewport)
//!   seams a host implements (a browser shadow root, or a recording fake).
//! - [`config`]: defaults, environment overrides, and attribute parsing.
//! - [`markup`]: converting existing two-image containers into widgets.
//!
//! The browser binding lives in `reveal-web`.

pub mod config;
pub mod controller;
pub mod host;
pub mod listener;
pub mod markup;
pub mod notification;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::{
    COMPONENT_NAME, ConfigError, ConfigKey, DEFAULT_COLOR, MARKER_CLASS, OBSERVED_ATTRIBUTES,
    WidgetConfig, parse_start,
};
pub use controller::{
    ConfigOutcome, Controller, DividerState, DragState, FrameTask, IgnoredReason, InputOutcome,
    MountOutcome,
};
pub use host::{Surface, Viewport};
pub use listener::{Listener, ListenerSet, ListenerTarget};
pub use markup::{MarkupError, MarkupTree, create, parse};
pub use notification::{Notification, NotificationDetail, NotificationKind};

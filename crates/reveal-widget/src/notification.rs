#![forbid(unsafe_code)]

//! Notification events emitted by the widget.
//!
//! Every notification bubbles and is composed (crosses shadow boundaries), so
//! page code can observe a widget without knowing its internal structure.
//! The payload shape is fixed:
//!
//! ```json
//! { "elementWidth": 640.0, "openRatio": 50.0, "rendered": true }
//! ```

use serde::{Deserialize, Serialize};

/// Which lifecycle step produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Structure rendered (once per instance).
    Rendered,
    /// Dimensions recalculated.
    Resized,
    /// Styles refreshed from the open ratio.
    Updated,
}

impl NotificationKind {
    /// Event name suffix.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Rendered => "rendered",
            Self::Resized => "resized",
            Self::Updated => "updated",
        }
    }
}

/// Event payload (`CustomEvent.detail`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetail {
    pub element_width: f64,
    pub open_ratio: f64,
    pub rendered: bool,
}

/// One notification event.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub detail: NotificationDetail,
    pub bubbles: bool,
    pub composed: bool,
}

impl Notification {
    /// Bubbling, composed notification.
    #[must_use]
    pub const fn new(kind: NotificationKind, detail: NotificationDetail) -> Self {
        Self {
            kind,
            detail,
            bubbles: true,
            composed: true,
        }
    }

    /// Full DOM event name, e.g. `reveal-component:updated`.
    #[must_use]
    pub fn event_name(&self, component: &str) -> String {
        format!("{component}:{}", self.kind.suffix())
    }
}

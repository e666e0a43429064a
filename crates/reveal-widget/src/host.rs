#![forbid(unsafe_code)]

//! Host seams for the widget controller.
//!
//! The controller never touches a document directly. A [`Surface`] owns the
//! widget's rendered structure and a [`Viewport`] owns listener registration
//! and wake-ups. Browser hosts implement both over the DOM (see `reveal-web`);
//! tests use the recording fakes in [`crate::testing`].

use core::time::Duration;

use reveal_core::BoundingBox;

use crate::listener::Listener;
use crate::notification::Notification;

/// Rendering collaborator for one widget instance.
pub trait Surface {
    /// Build the two-pane structure and divider handle.
    ///
    /// The controller calls this at most once per instance.
    fn render_structure(&mut self);

    /// Border box of the widget element, or `None` while detached.
    fn host_box(&self) -> Option<BoundingBox>;

    /// Border box of the divider handle, or `None` before the structure exists.
    fn divider_box(&self) -> Option<BoundingBox>;

    /// Apply a formatted ratio (e.g. `"42.5%"`) as the masked pane width and
    /// the divider's horizontal offset.
    fn apply_open_ratio(&mut self, width: &str);

    /// Apply the divider accent color.
    fn apply_accent(&mut self, color: &str);

    /// Dispatch a notification event from the widget element.
    fn emit(&mut self, notification: &Notification);
}

/// Listener registration and scheduling collaborator.
///
/// `request_frame` may be coalesced by the host as long as it eventually
/// calls `Controller::run_frame` again while tasks are pending.
pub trait Viewport {
    /// Register `listener` (passive) on its target.
    fn subscribe(&mut self, listener: Listener);

    /// Remove a listener registered by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, listener: Listener);

    /// Ask for `Controller::run_frame` on the next animation frame.
    fn request_frame(&mut self);

    /// Ask for `Controller::poll_timers` once `delay` has elapsed.
    fn request_timer(&mut self, delay: Duration);
}

#![forbid(unsafe_code)]

//! Platform-independent host core.
//!
//! [`HostCore`] owns one [`Controller`] and a host-driven clock, and turns
//! custom-element callbacks, encoded pointer input, animation frames and timer
//! wake-ups into controller calls. The wasm exports wrap it with DOM-backed
//! collaborators; native tests drive it with recording fakes. No JS types here.

use core::time::Duration;

use reveal_widget::{
    ConfigError, ConfigOutcome, Controller, InputOutcome, MountOutcome, Surface, Viewport,
    WidgetConfig,
};

use crate::input_parser::{HostInput, parse_encoded_pointer};

/// Result of dispatching one [`HostInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// Pointer interaction handled by the controller.
    Input(InputOutcome),
    /// Viewport resize; carries the re-measure deadline, or `None` when the
    /// widget is not mounted.
    Resize(Option<Duration>),
}

/// Route one host input to the matching controller handler.
pub fn dispatch_host_input<S: Surface, V: Viewport>(
    controller: &mut Controller<S, V>,
    input: HostInput,
    now: Duration,
) -> Dispatched {
    match input {
        HostInput::Press => Dispatched::Input(controller.on_drag_start()),
        HostInput::Move(sample) => Dispatched::Input(controller.on_drag(&sample)),
        HostInput::Release => Dispatched::Input(controller.on_drag_end()),
        HostInput::Click(sample) => Dispatched::Input(controller.on_click(&sample)),
        HostInput::Resize => {
            if controller.on_viewport_resize(now) {
                Dispatched::Resize(controller.next_timer_deadline())
            } else {
                Dispatched::Resize(None)
            }
        }
    }
}

/// One widget instance plus the host's notion of the current time.
#[derive(Debug)]
pub struct HostCore<S, V> {
    controller: Controller<S, V>,
    now: Duration,
}

impl<S: Surface, V: Viewport> HostCore<S, V> {
    pub fn new(config: WidgetConfig, surface: S, viewport: V) -> Self {
        Self {
            controller: Controller::new(config.validated(), surface, viewport),
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Controller<S, V> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<S, V> {
        &mut self.controller
    }

    /// Current host time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advance host time by `dt_ms` milliseconds. Negative and non-finite
    /// values are ignored.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            let dt = Duration::from_nanos((dt_ms * 1_000_000.0).round() as u64);
            self.now = self.now.saturating_add(dt);
        }
    }

    /// Set host time to an absolute value. Earlier values are ignored so
    /// debounce deadlines never see time run backwards.
    pub fn set_time(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Custom element connected to a document.
    pub fn connect(&mut self) -> MountOutcome {
        self.controller.on_mount()
    }

    /// Custom element removed from its document.
    pub fn disconnect(&mut self) {
        self.controller.on_unmount();
    }

    /// Observed attribute changed.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Result<ConfigOutcome, ConfigError> {
        self.controller.on_config_change(name, old_value, new_value)
    }

    /// Dispatch one input at the current host time.
    pub fn dispatch(&mut self, input: HostInput) -> Dispatched {
        let now = self.now();
        tracing::trace!(
            message = "reveal.host.input",
            kind = input.label(),
            now_ms = now.as_millis() as u64
        );
        dispatch_host_input(&mut self.controller, input, now)
    }

    /// Parse and dispatch one JSON-encoded input.
    ///
    /// Returns `false` for malformed input and for kinds the widget ignores.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match parse_encoded_pointer(json) {
            Ok(Some(input)) => {
                self.dispatch(input);
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(message = "reveal.host.input", %err);
                false
            }
        }
    }

    /// Animation frame fired. Returns how many frame tasks ran.
    pub fn animation_frame(&mut self) -> usize {
        self.controller.run_frame()
    }

    /// Timer fired. Returns whether the widget was re-measured.
    ///
    /// A timer that fires before the re-measure deadline (timer slop, or a
    /// resize that re-armed the quiet period) asks the viewport for another
    /// wake-up at the remaining delay.
    pub fn timer_fired(&mut self) -> bool {
        let now = self.now();
        if self.controller.poll_timers(now) {
            return true;
        }
        if let Some(deadline) = self.controller.next_timer_deadline() {
            let remaining = deadline.saturating_sub(now);
            self.controller.viewport_mut().request_timer(remaining);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reveal_core::{BoundingBox, PointerSample};
    use reveal_widget::testing::{FakeViewport, RecordingSurface};
    use reveal_widget::{DragState, IgnoredReason, NotificationKind};

    fn core(width: f64, divider: f64) -> HostCore<RecordingSurface, FakeViewport> {
        HostCore::new(
            WidgetConfig::default(),
            RecordingSurface::new(BoundingBox::new(0.0, 0.0, width, 100.0), divider),
            FakeViewport::default(),
        )
    }

    #[test]
    fn dispatch_routes_each_input() {
        let mut host = core(200.0, 10.0);
        host.connect();
        assert_eq!(
            host.dispatch(HostInput::Press),
            Dispatched::Input(InputOutcome::StateChanged(DragState::Dragging))
        );
        assert!(matches!(
            host.dispatch(HostInput::Move(PointerSample::mouse(95.0, 0.0))),
            Dispatched::Input(InputOutcome::Scheduled(_))
        ));
        assert_eq!(
            host.dispatch(HostInput::Release),
            Dispatched::Input(InputOutcome::StateChanged(DragState::Idle))
        );
        assert!(matches!(
            host.dispatch(HostInput::Click(PointerSample::mouse(10.0, 0.0))),
            Dispatched::Input(InputOutcome::Scheduled(_))
        ));
    }

    #[test]
    fn resize_before_connect_is_not_armed() {
        let mut host = core(200.0, 10.0);
        assert_eq!(host.dispatch(HostInput::Resize), Dispatched::Resize(None));
        host.connect();
        host.advance_time_ms(100.0);
        assert_eq!(
            host.dispatch(HostInput::Resize),
            Dispatched::Resize(Some(Duration::from_millis(350)))
        );
    }

    #[test]
    fn advance_time_ignores_invalid_inputs() {
        let mut host = core(200.0, 10.0);
        host.advance_time_ms(f64::NAN);
        host.advance_time_ms(f64::INFINITY);
        host.advance_time_ms(-5.0);
        assert_eq!(host.now(), Duration::ZERO);
        host.advance_time_ms(16.0);
        assert_eq!(host.now(), Duration::from_millis(16));
    }

    #[test]
    fn host_time_only_moves_forward() {
        let mut host = core(200.0, 10.0);
        host.set_time(Duration::from_millis(40));
        host.set_time(Duration::from_millis(10));
        assert_eq!(host.now(), Duration::from_millis(40));

        host.set_time(Duration::MAX);
        host.advance_time_ms(1_000.0);
        assert_eq!(host.now(), Duration::MAX);
    }

    #[test]
    fn early_timer_rearms_for_remaining_delay() {
        let mut host = core(200.0, 10.0);
        host.connect();
        host.dispatch(HostInput::Resize);
        host.advance_time_ms(240.0);
        assert!(!host.timer_fired());
        assert_eq!(
            host.controller().viewport().timer_requests.last(),
            Some(&Duration::from_millis(10))
        );
        host.advance_time_ms(10.0);
        assert!(host.timer_fired());
    }

    #[test]
    fn encoded_input_rejections() {
        let mut host = core(200.0, 10.0);
        host.connect();
        assert!(!host.push_encoded_input("not json"));
        assert!(!host.push_encoded_input(r#"{"kind":"wheel","dy":3}"#));
        assert!(host.push_encoded_input(r#"{"kind":"click","x":100}"#));
    }

    #[test]
    fn touch_without_points_reaches_controller_as_ignored() {
        let mut host = core(200.0, 10.0);
        host.connect();
        host.dispatch(HostInput::Press);
        assert_eq!(
            host.dispatch(HostInput::Move(PointerSample::Touch {
                touches: Vec::new()
            })),
            Dispatched::Input(InputOutcome::Ignored(IgnoredReason::NoPointerPosition))
        );
    }

    #[test]
    fn attribute_changes_are_forwarded() {
        let mut host = core(200.0, 10.0);
        assert!(matches!(
            host.attribute_changed("start", None, Some("20")),
            Ok(ConfigOutcome::Applied(_))
        ));
        host.connect();
        while host.controller().pending_frames() > 0 {
            host.animation_frame();
        }
        let updated = host
            .controller()
            .surface()
            .last(NotificationKind::Updated)
            .expect("updated");
        assert_eq!(updated.detail.open_ratio, 20.0);
    }
}

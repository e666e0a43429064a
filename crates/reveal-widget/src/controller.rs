#![forbid(unsafe_code)]

//! Divider State and the interaction state machine.
//!
//! # State Machine
//!
//! ```text
//!                 press (mousedown / touchstart on widget)
//!   ┌──────────┐ ───────────────────────────────────────▶ ┌────────────┐
//!   │   Idle   │                                          │  Dragging  │──┐ move: x = pointer
//!   └──────────┘ ◀─────────────────────────────────────── └────────────┘◀─┘
//!     │    ▲       release (mouseup / touchend anywhere)
//!     └────┘
//!   click: x = pointer (jump)
//! ```
//!
//! # Deferred updates
//!
//! Writes never touch layout synchronously. [`Controller::set_pointer_x`]
//! queues a ratio recomputation, [`Controller::set_open_ratio`] queues a style
//! refresh, and [`Controller::set_color`] queues an accent write. The host
//! drains the queue once per animation frame with [`Controller::run_frame`].
//! Tasks are not coalesced: a burst of N moves produces N recomputations and
//! N style refreshes, each on its own frame boundary.

use core::time::Duration;

use reveal_core::{
    BoundingBox, Debouncer, FrameId, FrameQueue, PointerSample, RatioInput, calculate_open_ratio,
    clamp_open_ratio, element_width, format_percentage, pointer_x_from_event, ratio_label,
};

use crate::config::{ConfigError, ConfigKey, WidgetConfig, parse_start};
use crate::host::{Surface, Viewport};
use crate::listener::{Listener, ListenerSet};
use crate::notification::{Notification, NotificationDetail, NotificationKind};

/// Work deferred to the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Recompute `open_ratio` from the stored pointer X and current widths.
    RecomputeRatio,
    /// Write the open ratio into layout and emit `updated`.
    RefreshStyles,
    /// Write the accent color.
    ApplyColor,
}

/// Drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Per-instance state. Never shared between widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerState {
    /// Rendered width of the widget element.
    pub container_width: f64,
    /// Rendered width of the divider handle.
    pub divider_width: f64,
    /// Last raw pointer X relative to the widget.
    pub pointer_x: f64,
    /// Revealed percentage, always within `[0, 100]`.
    pub open_ratio: f64,
    pub drag: DragState,
    pub accent_color: String,
    /// Structure rendered (happens once per instance).
    pub initialized: bool,
}

impl DividerState {
    fn from_config(config: &WidgetConfig) -> Self {
        Self {
            container_width: 0.0,
            divider_width: 0.0,
            pointer_x: 0.0,
            open_ratio: clamp_open_ratio(config.default_open_ratio),
            drag: DragState::Idle,
            accent_color: config.color.clone(),
            initialized: false,
        }
    }
}

/// Result of [`Controller::on_mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// First attachment: structure rendered, `rendered` emitted.
    Rendered,
    /// Attached again after an unmount: listeners restored only.
    Reattached,
    /// Already mounted; nothing happened.
    AlreadyMounted,
}

/// Result of [`Controller::on_config_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// Value applied; its visual update is queued.
    Applied(FrameId),
    /// Old and new values are identical.
    Unchanged,
    /// Attribute removed with nothing to restore.
    Ignored,
}

/// Why an interaction did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    NotMounted,
    NotDragging,
    AlreadyDragging,
    /// Touch interaction without an active touch point.
    NoPointerPosition,
    /// Widget element has no rendered box.
    Detached,
}

/// Result of one interaction handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Pointer stored; ratio recomputation queued.
    Scheduled(FrameId),
    /// Drag state toggled.
    StateChanged(DragState),
    Ignored(IgnoredReason),
}

/// Widget controller for one instance.
#[derive(Debug)]
pub struct Controller<S, V> {
    config: WidgetConfig,
    surface: S,
    viewport: V,
    state: DividerState,
    frames: FrameQueue<FrameTask>,
    resize: Debouncer,
    attached: ListenerSet,
    mounted: bool,
}

impl<S: Surface, V: Viewport> Controller<S, V> {
    /// Create an unmounted controller with default state from `config`.
    pub fn new(config: WidgetConfig, surface: S, viewport: V) -> Self {
        let state = DividerState::from_config(&config);
        let resize = Debouncer::new(config.resize_debounce);
        Self {
            config,
            surface,
            viewport,
            state,
            frames: FrameQueue::new(),
            resize,
            attached: ListenerSet::empty(),
            mounted: false,
        }
    }

    // --- accessors ---------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &DividerState {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Last raw pointer X.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.state.pointer_x
    }

    #[must_use]
    pub fn element_width(&self) -> f64 {
        self.state.container_width
    }

    pub fn set_element_width(&mut self, width: f64) {
        self.state.container_width = width;
    }

    #[must_use]
    pub fn drag_element_width(&self) -> f64 {
        self.state.divider_width
    }

    pub fn set_drag_element_width(&mut self, width: f64) {
        self.state.divider_width = width;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.drag == DragState::Dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.state.drag = if dragging {
            DragState::Dragging
        } else {
            DragState::Idle
        };
    }

    #[must_use]
    pub fn open_ratio(&self) -> f64 {
        self.state.open_ratio
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.state.accent_color
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.state.initialized
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Listeners currently attached through the viewport.
    #[must_use]
    pub fn attached_listeners(&self) -> ListenerSet {
        self.attached
    }

    /// Number of frame tasks waiting for [`run_frame`](Self::run_frame).
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Deadline of the pending resize re-measure, if any.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.resize.deadline()
    }

    /// Current notification payload.
    #[must_use]
    pub fn detail(&self) -> NotificationDetail {
        NotificationDetail {
            element_width: self.state.container_width,
            open_ratio: self.state.open_ratio,
            rendered: self.state.initialized,
        }
    }

    /// Formatted ratio the divider would take for pointer position `x`, with
    /// the current widths. Does not change any state.
    #[must_use]
    pub fn ratio_label_for(&self, x: f64) -> String {
        ratio_label(&self.ratio_input(x))
    }

    // --- commands ----------------------------------------------------------

    /// Store a raw pointer X and queue a ratio recomputation.
    pub fn set_pointer_x(&mut self, x: f64) -> FrameId {
        self.state.pointer_x = x;
        self.schedule(FrameTask::RecomputeRatio)
    }

    /// Store an open ratio directly (bypassing the pointer) and queue a style
    /// refresh. The value is clamped to `[0, 100]`.
    pub fn set_open_ratio(&mut self, ratio: f64) -> FrameId {
        self.state.open_ratio = clamp_open_ratio(ratio);
        self.schedule(FrameTask::RefreshStyles)
    }

    /// Store the accent color and queue its application.
    pub fn set_color(&mut self, color: impl Into<String>) -> FrameId {
        self.state.accent_color = color.into();
        self.schedule(FrameTask::ApplyColor)
    }

    fn schedule(&mut self, task: FrameTask) -> FrameId {
        let id = self.frames.schedule(task);
        tracing::trace!(message = "reveal.frame", action = "schedule", ?task, frame = id.get());
        self.viewport.request_frame();
        id
    }

    /// Run every task queued before this frame began. Returns how many ran.
    ///
    /// Tasks queued while running (a recomputation queues a style refresh)
    /// wait for the next call; the viewport is asked for another frame.
    pub fn run_frame(&mut self) -> usize {
        let tasks = self.frames.begin_frame();
        let count = tasks.len();
        for (id, task) in tasks {
            tracing::trace!(message = "reveal.frame", action = "run", ?task, frame = id.get());
            match task {
                FrameTask::RecomputeRatio => self.recompute_ratio(),
                FrameTask::RefreshStyles => {
                    self.refresh_styles();
                }
                FrameTask::ApplyColor => self.surface.apply_accent(&self.state.accent_color),
            }
        }
        count
    }

    fn ratio_input(&self, x: f64) -> RatioInput {
        RatioInput::new(x, self.state.divider_width, self.state.container_width)
    }

    fn recompute_ratio(&mut self) {
        let input = self.ratio_input(self.state.pointer_x);
        if input.is_degenerate() {
            tracing::warn!(
                message = "reveal.ratio.degenerate",
                container_width = input.container_width,
                open_ratio = self.state.open_ratio,
            );
            return;
        }
        self.set_open_ratio(calculate_open_ratio(&input));
    }

    // --- lifecycle ---------------------------------------------------------

    /// Attach to a live document.
    ///
    /// The first mount renders the structure, emits `rendered`, measures, and
    /// attaches listeners. Mounting while mounted is a no-op. Mounting again
    /// after [`on_unmount`](Self::on_unmount) re-measures and restores the
    /// listeners without rebuilding anything.
    pub fn on_mount(&mut self) -> MountOutcome {
        if self.mounted {
            return MountOutcome::AlreadyMounted;
        }
        let _span = tracing::debug_span!(
            "reveal.mount",
            first = !self.state.initialized,
            open_ratio = self.state.open_ratio
        )
        .entered();

        let first = !self.state.initialized;
        if first {
            self.surface.render_structure();
            self.state.initialized = true;
            self.emit(NotificationKind::Rendered);
        }

        self.refresh_dimensions();

        for listener in Listener::ALL {
            self.attach(listener);
        }
        self.mounted = true;

        // Lands any ratio configured before the structure existed.
        self.schedule(FrameTask::RefreshStyles);

        if first {
            MountOutcome::Rendered
        } else {
            MountOutcome::Reattached
        }
    }

    /// Detach from the document, removing exactly the listeners mount added.
    ///
    /// An in-progress drag ends and a pending resize re-measure is dropped.
    pub fn on_unmount(&mut self) {
        for listener in self.attached.listeners() {
            self.viewport.unsubscribe(listener);
        }
        self.attached = ListenerSet::empty();
        self.mounted = false;
        self.state.drag = DragState::Idle;
        self.resize = Debouncer::new(self.config.resize_debounce);
        tracing::debug!(message = "reveal.unmount");
    }

    fn attach(&mut self, listener: Listener) {
        if self.attached.contains(listener.flag()) {
            return;
        }
        self.viewport.subscribe(listener);
        self.attached.insert(listener.flag());
    }

    /// React to an observed attribute change.
    ///
    /// Identical old and new values are a no-op. `start` writes the open ratio
    /// directly; `color` sets the accent. Removing `color` restores the
    /// configured default; removing `start` keeps the current ratio.
    pub fn on_config_change(
        &mut self,
        key: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Result<ConfigOutcome, ConfigError> {
        let Some(config_key) = ConfigKey::from_attribute(key) else {
            return Err(ConfigError::UnknownKey(key.to_owned()));
        };
        if old_value == new_value {
            return Ok(ConfigOutcome::Unchanged);
        }
        let outcome = match (config_key, new_value) {
            (ConfigKey::Start, Some(value)) => {
                let ratio = parse_start(value).inspect_err(|err| {
                    tracing::warn!(message = "reveal.config", key, %err);
                })?;
                ConfigOutcome::Applied(self.set_open_ratio(ratio))
            }
            (ConfigKey::Start, None) => ConfigOutcome::Ignored,
            (ConfigKey::Color, Some(value)) => ConfigOutcome::Applied(self.set_color(value)),
            (ConfigKey::Color, None) => {
                let color = self.config.color.clone();
                ConfigOutcome::Applied(self.set_color(color))
            }
        };
        tracing::debug!(message = "reveal.config", key, ?outcome);
        Ok(outcome)
    }

    /// Re-measure the widget and divider widths and emit `resized`.
    pub fn refresh_dimensions(&mut self) {
        let _span = tracing::debug_span!("reveal.refresh_dimensions").entered();
        self.state.container_width = element_width(&self.surface.host_box());
        if let Some(divider) = self.surface.divider_box() {
            self.state.divider_width = element_width(&divider);
        }
        self.emit(NotificationKind::Resized);
    }

    /// Write the open ratio into layout and emit `updated`.
    ///
    /// Returns `false` (and does nothing) before the structure is rendered.
    pub fn refresh_styles(&mut self) -> bool {
        if !self.state.initialized {
            tracing::trace!(message = "reveal.refresh_styles.skipped");
            return false;
        }
        let _span = tracing::debug_span!("reveal.refresh_styles", open_ratio = self.state.open_ratio)
            .entered();
        let width = format_percentage(self.state.open_ratio);
        self.surface.apply_open_ratio(&width);
        self.emit(NotificationKind::Updated);
        true
    }

    fn emit(&mut self, kind: NotificationKind) {
        let notification = Notification::new(kind, self.detail());
        tracing::debug!(
            message = "reveal.notify",
            kind = kind.suffix(),
            element_width = notification.detail.element_width,
            open_ratio = notification.detail.open_ratio,
        );
        self.surface.emit(&notification);
    }

    // --- interaction -------------------------------------------------------

    /// Press on the widget (mouse-down or touch-start).
    pub fn on_drag_start(&mut self) -> InputOutcome {
        if !self.mounted {
            return InputOutcome::Ignored(IgnoredReason::NotMounted);
        }
        if self.is_dragging() {
            return InputOutcome::Ignored(IgnoredReason::AlreadyDragging);
        }
        self.state.drag = DragState::Dragging;
        tracing::debug!(message = "reveal.drag", phase = "start");
        InputOutcome::StateChanged(DragState::Dragging)
    }

    /// Pointer move over the widget. Only tracked while dragging.
    pub fn on_drag(&mut self, sample: &PointerSample) -> InputOutcome {
        if !self.mounted {
            return InputOutcome::Ignored(IgnoredReason::NotMounted);
        }
        if !self.is_dragging() {
            return InputOutcome::Ignored(IgnoredReason::NotDragging);
        }
        self.track_pointer(sample)
    }

    /// Release anywhere in the viewport (mouse-up or touch-end).
    pub fn on_drag_end(&mut self) -> InputOutcome {
        if !self.is_dragging() {
            return InputOutcome::Ignored(IgnoredReason::NotDragging);
        }
        self.state.drag = DragState::Idle;
        tracing::debug!(message = "reveal.drag", phase = "end", open_ratio = self.state.open_ratio);
        InputOutcome::StateChanged(DragState::Idle)
    }

    /// Plain click: jump the divider to the click position.
    pub fn on_click(&mut self, sample: &PointerSample) -> InputOutcome {
        if !self.mounted {
            return InputOutcome::Ignored(IgnoredReason::NotMounted);
        }
        self.track_pointer(sample)
    }

    fn track_pointer(&mut self, sample: &PointerSample) -> InputOutcome {
        let Some(host) = self.surface.host_box() else {
            return InputOutcome::Ignored(IgnoredReason::Detached);
        };
        let Some(x) = pointer_x_from_event(sample, &host) else {
            return InputOutcome::Ignored(IgnoredReason::NoPointerPosition);
        };
        tracing::trace!(message = "reveal.drag", phase = "move", x);
        InputOutcome::Scheduled(self.set_pointer_x(x))
    }

    /// Viewport resized at `now`; re-measuring waits for the quiet period.
    ///
    /// Returns `false` when unmounted (nothing is armed).
    pub fn on_viewport_resize(&mut self, now: Duration) -> bool {
        if !self.mounted {
            return false;
        }
        self.resize.call(now);
        self.viewport.request_timer(self.resize.delay());
        true
    }

    /// Fire due timers. Returns whether the widget was re-measured.
    pub fn poll_timers(&mut self, now: Duration) -> bool {
        if !self.resize.poll(now) {
            return false;
        }
        self.refresh_dimensions();
        true
    }

    /// Host box of the widget, as the surface reports it.
    #[must_use]
    pub fn host_box(&self) -> Option<BoundingBox> {
        self.surface.host_box()
    }
}

#![forbid(unsafe_code)]

//! Interaction listeners a mounted widget keeps attached.
//!
//! Press, move and click listeners live on the widget element itself. Resize
//! and release listeners live on the global viewport, so a drag released
//! outside the widget still ends. All listeners are registered passive.

use bitflags::bitflags;

bitflags! {
    /// Set of attached listeners.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListenerSet: u8 {
        const MOUSE_DOWN  = 1 << 0;
        const TOUCH_START = 1 << 1;
        const MOUSE_MOVE  = 1 << 2;
        const TOUCH_MOVE  = 1 << 3;
        const CLICK       = 1 << 4;
        const RESIZE      = 1 << 5;
        const MOUSE_UP    = 1 << 6;
        const TOUCH_END   = 1 << 7;

        const HOST = Self::MOUSE_DOWN.bits()
            | Self::TOUCH_START.bits()
            | Self::MOUSE_MOVE.bits()
            | Self::TOUCH_MOVE.bits()
            | Self::CLICK.bits();
        const VIEWPORT = Self::RESIZE.bits() | Self::MOUSE_UP.bits() | Self::TOUCH_END.bits();
    }
}

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The widget element.
    Host,
    /// The global window.
    Viewport,
}

/// One interaction listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    MouseDown,
    TouchStart,
    MouseMove,
    TouchMove,
    Click,
    Resize,
    MouseUp,
    TouchEnd,
}

impl Listener {
    /// Every listener, host-element ones first, in attachment order.
    pub const ALL: [Self; 8] = [
        Self::MouseDown,
        Self::TouchStart,
        Self::MouseMove,
        Self::TouchMove,
        Self::Click,
        Self::Resize,
        Self::MouseUp,
        Self::TouchEnd,
    ];

    /// DOM event type.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::TouchStart => "touchstart",
            Self::MouseMove => "mousemove",
            Self::TouchMove => "touchmove",
            Self::Click => "click",
            Self::Resize => "resize",
            Self::MouseUp => "mouseup",
            Self::TouchEnd => "touchend",
        }
    }

    #[must_use]
    pub const fn flag(self) -> ListenerSet {
        match self {
            Self::MouseDown => ListenerSet::MOUSE_DOWN,
            Self::TouchStart => ListenerSet::TOUCH_START,
            Self::MouseMove => ListenerSet::MOUSE_MOVE,
            Self::TouchMove => ListenerSet::TOUCH_MOVE,
            Self::Click => ListenerSet::CLICK,
            Self::Resize => ListenerSet::RESIZE,
            Self::MouseUp => ListenerSet::MOUSE_UP,
            Self::TouchEnd => ListenerSet::TOUCH_END,
        }
    }

    #[must_use]
    pub const fn target(self) -> ListenerTarget {
        match self {
            Self::Resize | Self::MouseUp | Self::TouchEnd => ListenerTarget::Viewport,
            _ => ListenerTarget::Host,
        }
    }
}

impl ListenerSet {
    /// Listeners contained in this set, in [`Listener::ALL`] order.
    pub fn listeners(self) -> impl Iterator<Item = Listener> {
        Listener::ALL
            .into_iter()
            .filter(move |l| self.contains(l.flag()))
    }
}

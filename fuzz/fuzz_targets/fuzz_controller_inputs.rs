#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reveal_core::{BoundingBox, PointerSample, TouchPoint};
use reveal_web::{HostCore, HostInput};
use reveal_widget::testing::{FakeViewport, RecordingSurface};
use reveal_widget::{ListenerSet, WidgetConfig};

#[derive(Debug, Arbitrary)]
enum Op {
    Connect,
    Disconnect,
    Press,
    MouseMove(i16),
    TouchMove(Vec<i16>),
    Release,
    Click(i16),
    Resize,
    Frame,
    Timer,
    Advance(u8),
    Start(String),
    Color(String),
    HostWidth(u16),
}

#[derive(Debug, Arbitrary)]
struct Session {
    left: i16,
    width: u16,
    divider: u8,
    ops: Vec<Op>,
}

fuzz_target!(|session: Session| {
    let surface = RecordingSurface::new(
        BoundingBox::new(
            f64::from(session.left),
            0.0,
            f64::from(session.width),
            100.0,
        ),
        f64::from(session.divider),
    );
    let mut host = HostCore::new(WidgetConfig::default(), surface, FakeViewport::default());

    for op in session.ops.into_iter().take(256) {
        match op {
            Op::Connect => {
                host.connect();
            }
            Op::Disconnect => host.disconnect(),
            Op::Press => {
                host.dispatch(HostInput::Press);
            }
            Op::MouseMove(x) => {
                host.dispatch(HostInput::Move(PointerSample::mouse(f64::from(x), 0.0)));
            }
            Op::TouchMove(xs) => {
                let touches = xs
                    .into_iter()
                    .take(4)
                    .map(|x| TouchPoint::new(f64::from(x), 0.0))
                    .collect();
                host.dispatch(HostInput::Move(PointerSample::Touch { touches }));
            }
            Op::Release => {
                host.dispatch(HostInput::Release);
            }
            Op::Click(x) => {
                host.dispatch(HostInput::Click(PointerSample::mouse(f64::from(x), 0.0)));
            }
            Op::Resize => {
                host.dispatch(HostInput::Resize);
            }
            Op::Frame => {
                host.animation_frame();
            }
            Op::Timer => {
                host.timer_fired();
            }
            Op::Advance(ms) => host.advance_time_ms(f64::from(ms)),
            Op::Start(value) => {
                let _ = host.attribute_changed("start", None, Some(&value));
            }
            Op::Color(value) => {
                let _ = host.attribute_changed("color", None, Some(&value));
            }
            Op::HostWidth(width) => {
                host.controller_mut().surface_mut().host =
                    Some(BoundingBox::new(0.0, 0.0, f64::from(width), 100.0));
            }
        }

        let controller = host.controller();
        let ratio = controller.open_ratio();
        assert!((0.0..=100.0).contains(&ratio), "ratio out of range: {ratio}");
        if !controller.is_mounted() {
            assert!(!controller.is_dragging(), "dragging while unmounted");
            assert_eq!(controller.viewport().subscribed, ListenerSet::empty());
        }
    }

    let viewport = host.controller().viewport();
    assert_eq!(viewport.duplicate_subscriptions, 0);
    assert_eq!(viewport.unknown_unsubscriptions, 0);
});

#![forbid(unsafe_code)]

//! End-to-end host flow: encoded input through the host core into the
//! controller, with recording fakes standing in for the DOM.

use core::time::Duration;

use pretty_assertions::assert_eq;
use reveal_core::BoundingBox;
use reveal_web::HostCore;
use reveal_widget::testing::{FakeViewport, RecordingSurface};
use reveal_widget::{ListenerSet, MountOutcome, NotificationKind, WidgetConfig};

type Host = HostCore<RecordingSurface, FakeViewport>;

fn host(left: f64, width: f64, divider: f64) -> Host {
    HostCore::new(
        WidgetConfig::default(),
        RecordingSurface::new(BoundingBox::new(left, 0.0, width, 240.0), divider),
        FakeViewport::default(),
    )
}

fn settle(host: &mut Host) {
    while host.controller().pending_frames() > 0 {
        host.animation_frame();
    }
}

#[test]
fn mouse_drag_session_updates_ratio_and_notifies() {
    let mut host = host(20.0, 400.0, 4.0);
    assert_eq!(host.connect(), MountOutcome::Rendered);
    settle(&mut host);

    let script = [
        r#"{"kind":"mouse","phase":"down"}"#,
        r#"{"kind":"mouse","phase":"move","x":120,"y":10}"#,
        r#"{"kind":"mouse","phase":"move","x":218,"y":10}"#,
        r#"{"kind":"mouse","phase":"up"}"#,
        r#"{"kind":"mouse","phase":"move","x":400,"y":10}"#,
    ];
    for json in script {
        assert!(host.push_encoded_input(json), "{json}");
        host.advance_time_ms(16.0);
        settle(&mut host);
    }

    // (218 - 20) + 2 over 400.
    assert_eq!(host.controller().open_ratio(), 50.0);
    assert!(!host.controller().is_dragging());
    let surface = host.controller().surface();
    assert_eq!(
        surface.applied_ratios,
        vec!["50%", "25.5%", "50%"],
        "initial refresh plus one per tracked move"
    );
    assert_eq!(surface.count(NotificationKind::Updated), 3);
}

#[test]
fn touch_drag_uses_first_touch_point() {
    let mut host = host(0.0, 200.0, 10.0);
    host.connect();
    settle(&mut host);

    assert!(host.push_encoded_input(r#"{"kind":"touch","phase":"start"}"#));
    assert!(host.push_encoded_input(
        r#"{"kind":"touch","phase":"move","touches":[{"x":-30,"y":0},{"x":150,"y":0}]}"#
    ));
    settle(&mut host);
    assert_eq!(host.controller().open_ratio(), 7.5);

    assert!(host.push_encoded_input(r#"{"kind":"touch","phase":"end"}"#));
    assert!(!host.controller().is_dragging());
}

#[test]
fn click_jumps_without_press() {
    let mut host = host(0.0, 300.0, 4.0);
    host.connect();
    assert!(host.push_encoded_input(r#"{"kind":"click","x":500,"y":3}"#));
    settle(&mut host);
    // Past the right edge: (300 - 4) + 2 over 300.
    assert!((host.controller().open_ratio() - 99.333_333_333_333_33).abs() < 1e-9);
}

#[test]
fn resize_storm_remeasures_once_after_quiet_period() {
    let mut host = host(0.0, 300.0, 4.0);
    host.connect();
    host.controller_mut().surface_mut().clear_log();
    host.controller_mut().surface_mut().host = Some(BoundingBox::from_size(800.0, 240.0));

    for _ in 0..5 {
        assert!(host.push_encoded_input(r#"{"kind":"resize"}"#));
        host.advance_time_ms(100.0);
        assert!(!host.timer_fired());
    }
    assert_eq!(host.now(), Duration::from_millis(500));
    host.advance_time_ms(150.0);
    assert!(host.timer_fired());
    assert!(!host.timer_fired());

    let surface = host.controller().surface();
    assert_eq!(surface.count(NotificationKind::Resized), 1);
    assert_eq!(host.controller().element_width(), 800.0);
}

#[test]
fn disconnect_and_reconnect_keep_listeners_balanced() {
    let mut host = host(0.0, 300.0, 4.0);
    host.connect();
    host.disconnect();
    assert_eq!(host.controller().viewport().subscribed, ListenerSet::empty());
    assert!(!host.push_encoded_input(r#"{"kind":"mouse","phase":"scroll"}"#));

    assert_eq!(host.connect(), MountOutcome::Reattached);
    assert_eq!(host.controller().viewport().subscribed, ListenerSet::all());
    assert_eq!(host.controller().surface().render_count, 1);
    assert_eq!(
        host.controller().surface().count(NotificationKind::Rendered),
        1
    );
}

#[test]
fn attributes_before_connect_land_on_first_frame() {
    let mut host = host(0.0, 300.0, 4.0);
    host.attribute_changed("start", None, Some("30"))
        .expect("numeric start");
    host.attribute_changed("color", None, Some("#0af"))
        .expect("color");
    host.connect();
    settle(&mut host);

    let surface = host.controller().surface();
    assert_eq!(surface.accents, vec!["#0af"]);
    assert_eq!(surface.applied_ratios.last().map(String::as_str), Some("30%"));
    let updated = surface.last(NotificationKind::Updated).expect("updated");
    assert_eq!(updated.detail.open_ratio, 30.0);
    assert_eq!(updated.detail.element_width, 300.0);
    assert!(updated.detail.rendered);
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_zoom` crate.
//!
//! These drive a [`ZoomController`] the way a host toolkit would: sizes and
//! layout first, then interleaved gesture callbacks and frame ticks.

use kurbo::{Point, Vec2};
use understory_zoom::{
    Activity, Axis, PixelSize, ScrollDirection, ScrollPosition, ZoomConfig, ZoomController,
    ZoomEvent, ZoomGestureListener,
};

const FRAME_MS: u64 = 16;

fn laid_out(config: ZoomConfig, viewport: PixelSize, content: PixelSize) -> ZoomController {
    let mut zoom = ZoomController::new(config);
    zoom.set_viewport_size(viewport);
    zoom.set_content_size(content);
    zoom.on_layout();
    zoom
}

fn square(viewport: i32, content: i32) -> ZoomController {
    laid_out(
        ZoomConfig::default(),
        PixelSize::new(viewport, viewport),
        PixelSize::new(content, content),
    )
}

/// Ticks until nothing is animating; returns the time of the last frame.
fn run_frames(zoom: &mut ZoomController, mut now: u64) -> u64 {
    while zoom.tick(now) {
        now += FRAME_MS;
        assert!(now < 60_000, "animation never settled");
    }
    now
}

fn assert_invariants(zoom: &ZoomController) {
    let (min, max) = zoom.zoom_limits();
    assert!(zoom.zoom() >= min && zoom.zoom() <= max, "zoom {} out of range", zoom.zoom());
    let range = zoom.scroll_range();
    let scroll = zoom.scroll();
    for (pos, range) in [(scroll.x, range.x), (scroll.y, range.y)] {
        if range <= 0 {
            assert_eq!(pos, 0, "scroll must be pinned when range is {range}");
        } else {
            assert!((0..=range).contains(&pos), "scroll {pos} outside 0..={range}");
        }
    }
}

#[test]
fn scroll_example_from_300_viewport_over_600_content() {
    let mut zoom = square(300, 600);
    assert_eq!(zoom.scroll_range(), ScrollPosition::new(300, 300));

    zoom.process_scroll(50, 50);
    assert_eq!(zoom.scroll(), ScrollPosition::new(50, 50));

    zoom.process_scroll(400, 0);
    assert_eq!(zoom.scroll(), ScrollPosition::new(300, 50));
}

#[test]
fn double_tap_targets_follow_current_zoom() {
    let config = ZoomConfig::default()
        .with_zoom_limits(1.0, 4.0)
        .with_double_tap_zoom(2.0);
    let mut zoom = laid_out(config, PixelSize::new(300, 300), PixelSize::new(600, 600));

    assert_eq!(zoom.on_double_tap(Point::new(100.0, 100.0), 0), 2.0);
    zoom.set_scale(3.0, Point::ZERO);
    assert_eq!(zoom.on_double_tap(Point::new(100.0, 100.0), 0), 1.0);
}

#[test]
fn double_tap_round_trip_returns_to_unit_zoom() {
    let mut zoom = square(300, 600);
    let tap = Point::new(120.0, 90.0);

    zoom.on_double_tap(tap, 0);
    let now = run_frames(&mut zoom, 0);
    assert_eq!(zoom.zoom(), 2.0);
    assert_invariants(&zoom);

    zoom.on_double_tap(tap, now);
    run_frames(&mut zoom, now);
    assert_eq!(zoom.zoom(), 1.0);
    assert_invariants(&zoom);
}

#[test]
fn pinch_factor_is_clamped_to_max_zoom() {
    let mut zoom = square(300, 600);
    zoom.on_scale_begin();
    zoom.on_scale_gesture(10.0, Point::new(150.0, 150.0));
    assert_eq!(zoom.zoom(), 4.0);
    assert_eq!(zoom.pending_events(), &[ZoomEvent::ScaleGestureBegin]);
    assert_invariants(&zoom);
}

#[test]
fn invariants_hold_across_mixed_gestures() {
    let mut zoom = square(320, 480);
    let mut now = 0;
    let factors = [1.3, 0.6, 2.5, 1.1, 0.2, 8.0, 0.9];
    let drags = [
        Vec2::new(40.0, -15.0),
        Vec2::new(-500.0, 900.0),
        Vec2::new(3.7, 3.2),
        Vec2::new(10_000.0, -10_000.0),
    ];
    for (i, factor) in factors.iter().enumerate() {
        zoom.on_down();
        zoom.on_scale_gesture(*factor, Point::new(37.0 * i as f64, 20.0 * i as f64));
        assert_invariants(&zoom);
        zoom.on_scroll(drags[i % drags.len()]);
        assert_invariants(&zoom);
        zoom.on_up();
        zoom.on_fling(Vec2::new(-2500.0, 1800.0), now);
        for _ in 0..5 {
            now += FRAME_MS;
            zoom.tick(now);
            assert_invariants(&zoom);
        }
    }
    run_frames(&mut zoom, now);
    assert_invariants(&zoom);
}

#[test]
fn shrinking_below_viewport_pins_scroll_and_centers_content() {
    let config = ZoomConfig::default().with_zoom_limits(0.25, 4.0);
    let mut zoom = laid_out(config, PixelSize::new(400, 400), PixelSize::new(600, 600));
    zoom.process_scroll(200, 200);

    zoom.set_scale(0.5, Point::new(200.0, 200.0));
    assert_eq!(zoom.scroll_range(), ScrollPosition::new(-100, -100));
    assert_eq!(zoom.scroll(), ScrollPosition::ZERO);
    let center = zoom.view_transform() * Point::new(300.0, 300.0);
    assert!((center.x - 200.0).abs() < 1e-9);
    assert!((center.y - 200.0).abs() < 1e-9);

    zoom.on_scroll(Vec2::new(25.0, 25.0));
    assert_eq!(zoom.scroll(), ScrollPosition::ZERO);
    assert!(!zoom.can_scroll(Axis::Horizontal, ScrollDirection::Forward));
    assert!(!zoom.can_scroll(Axis::Vertical, ScrollDirection::Backward));
}

#[test]
fn fling_suppressed_on_both_edges() {
    let mut zoom = square(300, 600);
    assert!(!zoom.on_fling(Vec2::new(-4000.0, -4000.0), 0));

    zoom.process_scroll(300, 300);
    assert!(!zoom.on_fling(Vec2::new(4000.0, 4000.0), 0));
    assert!(!zoom.activity().contains(Activity::FLINGING));
}

#[test]
fn fling_on_one_interior_axis_is_accepted() {
    let mut zoom = square(300, 600);
    zoom.process_scroll(100, 0);
    assert!(zoom.on_fling(Vec2::new(-1000.0, -1000.0), 0));
    run_frames(&mut zoom, 0);
    // 1000 px/s at 2000 px/s² coasts 250 px before the edge at 300.
    assert_eq!(zoom.scroll(), ScrollPosition::new(300, 250));
}

#[test]
fn slow_and_fast_fling_components() {
    let config = ZoomConfig::default().with_fling_velocity(100.0, 1000.0);
    let mut zoom = laid_out(config, PixelSize::new(300, 300), PixelSize::new(3000, 3000));
    zoom.process_scroll(1000, 1000);

    assert!(zoom.on_fling(Vec2::new(99.0, -50_000.0), 0));
    let fling = zoom.fling().expect("fling should start");
    assert_eq!(fling.velocity(), Vec2::new(0.0, 1000.0));
}

#[test]
fn new_touch_stops_fling_where_it_is() {
    let mut zoom = square(300, 2000);
    zoom.process_scroll(500, 500);
    zoom.on_fling(Vec2::new(-3000.0, 0.0), 0);
    zoom.tick(0);
    zoom.tick(100);
    let stopped_at = zoom.scroll();
    assert!(stopped_at.x > 500);

    zoom.on_down();
    assert!(!zoom.tick(200));
    assert_eq!(zoom.scroll(), stopped_at);
}

#[test]
fn redraw_requests_follow_animation() {
    let mut zoom = square(300, 600);
    zoom.take_redraw_request();
    assert!(!zoom.needs_redraw());

    zoom.on_double_tap(Point::new(150.0, 150.0), 0);
    assert!(zoom.take_redraw_request());

    let mut now = 0;
    while zoom.tick(now) {
        assert!(zoom.take_redraw_request());
        now += FRAME_MS;
    }
    // The final sample still changed the transform.
    assert!(zoom.take_redraw_request());
    assert!(!zoom.tick(now + FRAME_MS));
    assert!(!zoom.take_redraw_request());
}

#[test]
fn listener_receives_one_notification_per_onset() {
    #[derive(Default)]
    struct Log {
        seen: Vec<&'static str>,
    }
    impl ZoomGestureListener for Log {
        fn on_scroll_begin(&mut self) {
            self.seen.push("scroll");
        }
        fn on_scale_gesture_begin(&mut self) {
            self.seen.push("scale");
        }
        fn on_double_tap(&mut self) {
            self.seen.push("tap");
        }
    }

    let mut zoom = square(300, 600);
    zoom.on_down();
    zoom.on_scroll(Vec2::new(5.0, 0.0));
    zoom.on_scroll(Vec2::new(5.0, 0.0));
    zoom.on_scale_begin();
    zoom.on_scale_gesture(1.2, Point::ZERO);
    zoom.on_up();
    zoom.on_double_tap(Point::ZERO, 0);

    let mut log = Log::default();
    zoom.dispatch_events(&mut log);
    assert_eq!(log.seen, ["scroll", "scale", "tap"]);
    assert!(zoom.pending_events().is_empty());
}

#[test]
fn viewport_growth_reclamps_after_layout() {
    let mut zoom = square(300, 600);
    zoom.set_scale(2.0, Point::ZERO);
    zoom.process_scroll(900, 900);
    assert_eq!(zoom.scroll(), ScrollPosition::new(900, 900));

    zoom.set_viewport_size(PixelSize::new(1000, 1000));
    assert!(zoom.on_layout());
    assert_eq!(zoom.scroll_range(), ScrollPosition::new(200, 200));
    assert_eq!(zoom.scroll(), ScrollPosition::new(200, 200));
    assert_invariants(&zoom);
}

#[test]
fn view_to_child_tracks_scroll_and_zoom() {
    let mut zoom = square(300, 600);
    zoom.set_scale(2.0, Point::ZERO);
    zoom.process_scroll(100, 40);
    let child = zoom.view_to_child_point(Point::new(50.0, 60.0));
    assert!((child.x - 75.0).abs() < 1e-9);
    assert!((child.y - 50.0).abs() < 1e-9);
}

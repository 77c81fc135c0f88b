// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk-through of a host driving `ZoomController`.
//!
//! A fake 60 Hz frame loop replays a short gesture script (drag, fling, pinch,
//! double tap) and prints the state the host would apply to its child view.
//!
//! Run:
//! - `cargo run -p understory_zoom --example headless_zoom`

use kurbo::{Point, Vec2};
use understory_zoom::{PixelSize, ZoomConfig, ZoomController, ZoomEvent, ZoomGestureListener};

const FRAME_MS: u64 = 16;

struct PrintListener;

impl ZoomGestureListener for PrintListener {
    fn on_scroll_begin(&mut self) {
        println!("  [listener] scroll began");
    }
    fn on_scale_gesture_begin(&mut self) {
        println!("  [listener] pinch began");
    }
    fn on_double_tap(&mut self) {
        println!("  [listener] double tap");
    }
}

fn report(label: &str, zoom: &ZoomController) {
    let scroll = zoom.scroll();
    let xf = zoom.content_transform();
    println!(
        "{label:<18} zoom={:.3} scroll=({}, {}) pivot=({}, {}) translate=({}, {}) activity={:?}",
        zoom.zoom(),
        scroll.x,
        scroll.y,
        xf.pivot.x,
        xf.pivot.y,
        xf.translation.x,
        xf.translation.y,
        zoom.activity(),
    );
}

/// Pumps frames while the controller keeps asking for redraws.
fn pump(zoom: &mut ZoomController, now: &mut u64, label: &str) {
    let mut frames = 0;
    while zoom.take_redraw_request() {
        zoom.tick(*now);
        *now += FRAME_MS;
        frames += 1;
    }
    report(&format!("{label} ({frames}f)"), zoom);
}

fn main() {
    let config = ZoomConfig::default()
        .with_zoom_limits(0.5, 4.0)
        .with_double_tap_zoom(2.5);
    let mut zoom = ZoomController::new(config);
    let mut listener = PrintListener;
    let mut now = 0_u64;

    zoom.set_viewport_size(PixelSize::new(360, 640));
    zoom.set_content_size(PixelSize::new(720, 1280));
    zoom.on_layout();
    report("laid out", &zoom);

    // Drag: the finger moves up-left, so content scrolls down-right.
    zoom.on_down();
    for _ in 0..5 {
        zoom.on_scroll(Vec2::new(12.0, 30.0));
        now += FRAME_MS;
    }
    zoom.on_up();
    zoom.dispatch_events(&mut listener);
    report("after drag", &zoom);

    zoom.on_fling(Vec2::new(-900.0, -2400.0), now);
    pump(&mut zoom, &mut now, "after fling");

    zoom.on_down();
    zoom.on_scale_begin();
    for _ in 0..4 {
        zoom.on_scale_gesture(1.25, Point::new(180.0, 320.0));
    }
    zoom.on_up();
    zoom.dispatch_events(&mut listener);
    report("after pinch", &zoom);

    for tap in 0..2 {
        zoom.on_down();
        let target = zoom.on_double_tap(Point::new(100.0, 200.0), now);
        zoom.on_up();
        println!("double tap {tap} -> target {target}");
        pump(&mut zoom, &mut now, "after double tap");
    }

    // The window shrinks; the controller re-clamps on the next layout pass.
    zoom.set_viewport_size(PixelSize::new(300, 500));
    zoom.on_layout();
    report("after resize", &zoom);

    let leftover: Vec<ZoomEvent> = zoom.drain_events().collect();
    println!("undelivered events: {leftover:?}");
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: headless pinch-zoom, double-tap zoom, pan and fling.
//!
//! This crate models a "zoom layout": a single child element inside a
//! viewport that users can pinch, double tap, drag and fling. It provides:
//! - [`ZoomController`]: zoom and scroll state, anchor-preserving zoom,
//!   scroll clamping, gesture handlers and a per-frame [`ZoomController::tick`].
//! - [`ScaleHelper`]: an eased zoom animation sampled by a host clock.
//! - [`Fling`]: a bounded, decelerating scroll trajectory.
//! - [`ContentTransform`]: the scale/pivot/translation to apply to the child.
//!
//! It does **not** render, lay out, or recognize gestures. Callers are
//! expected to:
//! - Run their own gesture detection and forward pinch, drag, fling, tap and
//!   pointer down/up notifications.
//! - Report viewport and content sizes, then call
//!   [`ZoomController::on_layout`] after layout.
//! - Call [`ZoomController::tick`] with the current time on every frame for
//!   which a redraw was requested, and apply the resulting scroll position
//!   and [`ContentTransform`] to the child.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_zoom::{PixelSize, ScrollPosition, ZoomConfig, ZoomController, ZoomEvent};
//!
//! let mut zoom = ZoomController::new(ZoomConfig::default());
//! zoom.set_viewport_size(PixelSize::new(300, 300));
//! zoom.set_content_size(PixelSize::new(600, 600));
//! zoom.on_layout();
//!
//! // A drag: scroll deltas point opposite to the finger movement.
//! zoom.on_down();
//! zoom.on_scroll(Vec2::new(50.0, 50.0));
//! zoom.on_up();
//! assert_eq!(zoom.scroll(), ScrollPosition::new(50, 50));
//!
//! // A double tap animates to the double-tap zoom.
//! zoom.on_double_tap(Point::new(150.0, 150.0), 0);
//! let mut now = 0;
//! while zoom.tick(now) {
//!     now += 16;
//! }
//! assert_eq!(zoom.zoom(), 2.0);
//!
//! let events: Vec<_> = zoom.drain_events().collect();
//! assert_eq!(events, [ZoomEvent::ScrollBegin, ZoomEvent::DoubleTap]);
//! ```
//!
//! ## Design notes
//!
//! - Time is always passed in as milliseconds; nothing reads a clock.
//! - Scroll positions and sizes are whole pixels; zoom is `f64`.
//! - Content smaller than the viewport on an axis is centered and cannot be
//!   scrolled on that axis.
//! - Gesture onsets are recorded as [`ZoomEvent`]s and can be drained or
//!   delivered to a [`ZoomGestureListener`].
//! - Diagnostics go through the `log` facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod events;
mod fling;
mod scale_helper;
mod scroll;
mod transform;

pub use config::{
    ConfigError, DEFAULT_DOUBLE_TAP_ZOOM, DEFAULT_MAX_FLING_VELOCITY, DEFAULT_MAX_ZOOM,
    DEFAULT_MIN_FLING_VELOCITY, DEFAULT_MIN_ZOOM, ZoomConfig,
};
pub use controller::{Activity, ZoomController, ZoomDebugInfo};
pub use events::{ZoomEvent, ZoomGestureListener};
pub use fling::{DEFAULT_FLING_DECELERATION, Fling};
pub use scale_helper::{DEFAULT_SCALE_DURATION_MS, Easing, ScaleHelper};
pub use scroll::{
    Axis, PixelSize, ScrollDirection, ScrollPosition, clamp_scroll, scaled_extent, scroll_range,
};
pub use transform::ContentTransform;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded, decelerating scroll trajectory.
//!
//! A [`Fling`] starts at a scroll position with an initial velocity in pixels
//! per second and slows down at a constant rate until it stops or runs into
//! its bounds. Each axis moves independently. Positions are sampled with a
//! host-supplied clock, the same way [`crate::ScaleHelper`] is.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_zoom::{Fling, ScrollPosition};
//!
//! let mut fling = Fling::new(
//!     ScrollPosition::new(100, 100),
//!     Vec2::new(1000.0, 0.0),
//!     ScrollPosition::ZERO,
//!     ScrollPosition::new(1_000, 1_000),
//!     2000.0,
//!     0,
//! );
//!
//! // 1000 px/s at 2000 px/s² stops after 500 ms, 250 px further along.
//! assert!(fling.compute_offset(500));
//! assert_eq!(fling.current(), ScrollPosition::new(350, 100));
//! assert!(fling.is_finished());
//! ```

use kurbo::Vec2;

use crate::scroll::{ScrollPosition, round_px};

/// Default deceleration for flings, in pixels per second squared.
pub const DEFAULT_FLING_DECELERATION: f64 = 2000.0;

/// A decelerating trajectory clamped to a rectangle of scroll positions.
#[derive(Clone, Debug)]
pub struct Fling {
    start: ScrollPosition,
    velocity: Vec2,
    min: ScrollPosition,
    max: ScrollPosition,
    deceleration: f64,
    start_ms: u64,
    current: ScrollPosition,
    finished: bool,
}

impl Fling {
    /// Starts a trajectory at `start` moving with `velocity` (pixels per second).
    ///
    /// Positions are kept within `min..=max` on each axis. A non-positive
    /// `deceleration` is treated as an immediate stop.
    #[must_use]
    pub fn new(
        start: ScrollPosition,
        velocity: Vec2,
        min: ScrollPosition,
        max: ScrollPosition,
        deceleration: f64,
        start_ms: u64,
    ) -> Self {
        Self {
            start,
            velocity,
            min,
            max,
            deceleration,
            start_ms,
            current: start,
            finished: false,
        }
    }

    /// Advances the trajectory to `now_ms`.
    ///
    /// Returns `true` when a new position is available in
    /// [`Fling::current`], including the one where the trajectory settles.
    /// Returns `false` once finished or aborted.
    pub fn compute_offset(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        let t = now_ms.saturating_sub(self.start_ms) as f64 / 1000.0;
        let (x, x_done) = sample_axis(
            self.start.x,
            self.velocity.x,
            self.deceleration,
            t,
            self.min.x,
            self.max.x,
        );
        let (y, y_done) = sample_axis(
            self.start.y,
            self.velocity.y,
            self.deceleration,
            t,
            self.min.y,
            self.max.y,
        );
        self.current = ScrollPosition::new(x, y);
        if x_done && y_done {
            self.finished = true;
        }
        true
    }

    /// Returns the most recently sampled position.
    #[must_use]
    pub fn current(&self) -> ScrollPosition {
        self.current
    }

    /// Returns the position the trajectory settles at if left alone.
    #[must_use]
    pub fn final_position(&self) -> ScrollPosition {
        let (x, _) = sample_axis(
            self.start.x,
            self.velocity.x,
            self.deceleration,
            f64::INFINITY,
            self.min.x,
            self.max.x,
        );
        let (y, _) = sample_axis(
            self.start.y,
            self.velocity.y,
            self.deceleration,
            f64::INFINITY,
            self.min.y,
            self.max.y,
        );
        ScrollPosition::new(x, y)
    }

    /// Returns the initial velocity in pixels per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` once the trajectory has settled or was aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops the trajectory at its last sampled position.
    pub fn abort(&mut self) {
        self.finished = true;
    }
}

/// Position on one axis after `t` seconds, plus whether that axis has stopped.
fn sample_axis(
    start: i32,
    velocity: f64,
    deceleration: f64,
    t: f64,
    min: i32,
    max: i32,
) -> (i32, bool) {
    if velocity == 0.0 || deceleration <= 0.0 {
        return (start.clamp(min, max.max(min)), true);
    }
    let speed = velocity.abs();
    let dir = if velocity > 0.0 { 1.0 } else { -1.0 };
    let stop_after = speed / deceleration;
    let t = t.min(stop_after);
    let travelled = speed * t - 0.5 * deceleration * t * t;
    let pos = f64::from(start) + dir * travelled;

    let lo = f64::from(min);
    let hi = f64::from(max.max(min));
    if pos <= lo {
        (min, true)
    } else if pos >= hi {
        (max.max(min), true)
    } else {
        (round_px(pos), t >= stop_after)
    }
}

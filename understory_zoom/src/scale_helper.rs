// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased zoom animation sampled by a host clock.
//!
//! ## Usage
//!
//! 1) Call [`ScaleHelper::start_scale`] with the current and target zoom, the
//!    anchor point and an [`Easing`].
//! 2) On every frame call [`ScaleHelper::compute_scale_offset`] with the
//!    current time. While it returns `true`, apply [`ScaleHelper::cur_scale`]
//!    around [`ScaleHelper::anchor`].
//!
//! ```
//! use kurbo::Point;
//! use understory_zoom::{Easing, ScaleHelper};
//!
//! let mut helper = ScaleHelper::new(200);
//! helper.start_scale(1.0, 2.0, Point::new(50.0, 50.0), Easing::Decelerate, 0);
//!
//! assert!(helper.compute_scale_offset(100));
//! assert!(helper.cur_scale() > 1.5);
//!
//! // The last sample lands exactly on the target and is still reported.
//! assert!(helper.compute_scale_offset(200));
//! assert_eq!(helper.cur_scale(), 2.0);
//! assert!(!helper.compute_scale_offset(216));
//! ```

use kurbo::Point;

/// Default animation length for [`ScaleHelper`], in milliseconds.
pub const DEFAULT_SCALE_DURATION_MS: u64 = 250;

/// Time-to-progress curve for a zoom animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Ease-in: starts slowly and speeds up (`t²`). Used when zooming out.
    Accelerate,
    /// Ease-out: starts quickly and slows down (`1 - (1 - t)²`). Used when
    /// zooming in.
    #[default]
    Decelerate,
}

impl Easing {
    /// Maps a linear progress fraction to eased progress.
    ///
    /// `t` is clamped to `[0, 1]`; both curves are monotonic and fix the end
    /// points.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Accelerate => t * t,
            Self::Decelerate => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }

    /// Picks the curve for a transition from `from` to `to`.
    #[must_use]
    pub fn for_transition(from: f64, to: f64) -> Self {
        if from > to {
            Self::Accelerate
        } else {
            Self::Decelerate
        }
    }
}

/// Computes an eased zoom factor over a fixed duration.
///
/// Only one animation exists at a time; starting a new one discards the
/// previous one.
#[derive(Clone, Debug)]
pub struct ScaleHelper {
    start_scale: f64,
    end_scale: f64,
    cur_scale: f64,
    anchor: Point,
    easing: Easing,
    start_ms: u64,
    duration_ms: u64,
    finished: bool,
}

impl Default for ScaleHelper {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_DURATION_MS)
    }
}

impl ScaleHelper {
    /// Creates an idle helper whose animations last `duration_ms`.
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self {
            start_scale: 1.0,
            end_scale: 1.0,
            cur_scale: 1.0,
            anchor: Point::ZERO,
            easing: Easing::default(),
            start_ms: 0,
            duration_ms,
            finished: true,
        }
    }

    /// Returns the animation length in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Sets the length used by animations started after this call.
    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Starts animating from `from` to `to` around `anchor`, beginning at `now_ms`.
    pub fn start_scale(&mut self, from: f64, to: f64, anchor: Point, easing: Easing, now_ms: u64) {
        self.start_scale = from;
        self.end_scale = to;
        self.cur_scale = from;
        self.anchor = anchor;
        self.easing = easing;
        self.start_ms = now_ms;
        self.finished = false;
    }

    /// Advances the animation to `now_ms`.
    ///
    /// Returns `true` when a new sample is available in
    /// [`ScaleHelper::cur_scale`]. The sample that reaches the end of the
    /// animation is reported as well; every call after that returns `false`
    /// until the next [`ScaleHelper::start_scale`].
    pub fn compute_scale_offset(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.duration_ms {
            self.cur_scale = self.end_scale;
            self.finished = true;
        } else {
            let t = elapsed as f64 / self.duration_ms as f64;
            let eased = self.easing.apply(t);
            self.cur_scale = self.start_scale + (self.end_scale - self.start_scale) * eased;
        }
        true
    }

    /// Returns the most recent zoom sample.
    #[must_use]
    pub fn cur_scale(&self) -> f64 {
        self.cur_scale
    }

    /// Returns the anchor point of the current animation, in view coordinates.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the zoom factor the current animation ends at.
    #[must_use]
    pub fn end_scale(&self) -> f64 {
        self.end_scale
    }

    /// Returns the curve of the current animation.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Returns `true` when no animation is running.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops the current animation where it is.
    pub fn abort(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Easing, ScaleHelper};

    #[test]
    fn easing_fixes_endpoints() {
        for easing in [Easing::Accelerate, Easing::Decelerate] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-1.0), 0.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn accelerate_lags_and_decelerate_leads() {
        assert!(Easing::Accelerate.apply(0.5) < 0.5);
        assert!(Easing::Decelerate.apply(0.5) > 0.5);
        assert_eq!(Easing::Accelerate.apply(0.5), 0.25);
        assert_eq!(Easing::Decelerate.apply(0.5), 0.75);
    }

    #[test]
    fn easing_is_monotonic() {
        for easing in [Easing::Accelerate, Easing::Decelerate] {
            let mut last = 0.0;
            for i in 0..=20 {
                let v = easing.apply(f64::from(i) / 20.0);
                assert!(v >= last, "{easing:?} decreased at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn transition_picks_curve_by_direction() {
        assert_eq!(Easing::for_transition(2.0, 1.0), Easing::Accelerate);
        assert_eq!(Easing::for_transition(1.0, 2.0), Easing::Decelerate);
        assert_eq!(Easing::for_transition(1.0, 1.0), Easing::Decelerate);
    }

    #[test]
    fn idle_helper_reports_nothing() {
        let mut helper = ScaleHelper::default();
        assert!(helper.is_finished());
        assert!(!helper.compute_scale_offset(1_000));
    }

    #[test]
    fn samples_follow_curve_until_done() {
        let mut helper = ScaleHelper::new(100);
        helper.start_scale(1.0, 3.0, Point::new(10.0, 20.0), Easing::Accelerate, 1_000);

        assert!(helper.compute_scale_offset(1_000));
        assert_eq!(helper.cur_scale(), 1.0);

        assert!(helper.compute_scale_offset(1_050));
        assert!((helper.cur_scale() - 1.5).abs() < 1e-12);
        assert_eq!(helper.anchor(), Point::new(10.0, 20.0));

        assert!(helper.compute_scale_offset(1_150));
        assert_eq!(helper.cur_scale(), 3.0);
        assert!(helper.is_finished());
        assert!(!helper.compute_scale_offset(1_200));
    }

    #[test]
    fn clock_before_start_samples_the_start_value() {
        let mut helper = ScaleHelper::new(100);
        helper.start_scale(2.0, 1.0, Point::ZERO, Easing::Accelerate, 500);
        assert!(helper.compute_scale_offset(400));
        assert_eq!(helper.cur_scale(), 2.0);
    }

    #[test]
    fn equal_endpoints_still_run_full_duration() {
        let mut helper = ScaleHelper::new(100);
        helper.start_scale(2.0, 2.0, Point::ZERO, Easing::Decelerate, 0);
        assert!(helper.compute_scale_offset(50));
        assert_eq!(helper.cur_scale(), 2.0);
        assert!(!helper.is_finished());
        assert!(helper.compute_scale_offset(100));
        assert!(helper.is_finished());
    }

    #[test]
    fn zero_duration_finishes_on_first_sample() {
        let mut helper = ScaleHelper::new(0);
        helper.start_scale(1.0, 4.0, Point::ZERO, Easing::Decelerate, 7);
        assert!(helper.compute_scale_offset(7));
        assert_eq!(helper.cur_scale(), 4.0);
        assert!(!helper.compute_scale_offset(8));
    }

    #[test]
    fn restart_discards_previous_animation() {
        let mut helper = ScaleHelper::new(100);
        helper.start_scale(1.0, 4.0, Point::new(1.0, 1.0), Easing::Decelerate, 0);
        helper.compute_scale_offset(50);

        helper.start_scale(helper.cur_scale(), 1.0, Point::new(9.0, 9.0), Easing::Accelerate, 50);
        assert_eq!(helper.end_scale(), 1.0);
        assert_eq!(helper.easing(), Easing::Accelerate);
        assert_eq!(helper.anchor(), Point::new(9.0, 9.0));
        assert!(helper.compute_scale_offset(150));
        assert_eq!(helper.cur_scale(), 1.0);
    }

    #[test]
    fn abort_stops_sampling() {
        let mut helper = ScaleHelper::new(100);
        helper.start_scale(1.0, 2.0, Point::ZERO, Easing::Decelerate, 0);
        helper.compute_scale_offset(10);
        let mid = helper.cur_scale();
        helper.abort();
        assert!(!helper.compute_scale_offset(50));
        assert_eq!(helper.cur_scale(), mid);
    }
}

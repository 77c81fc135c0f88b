// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer pixel geometry shared by the controller: sizes, scroll positions,
//! scroll ranges and the clamp applied to every committed scroll.

/// Size of the viewport or of the unscaled child content, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelSize {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the extent along `axis`.
    #[must_use]
    pub const fn extent(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Scroll offset of the viewport over the scaled content, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollPosition {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl ScrollPosition {
    /// The origin; every axis scrolled to its start.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new scroll position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the offset along `axis`.
    #[must_use]
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// One of the two scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    Vertical,
}

/// Direction of a scroll query along an axis.
///
/// `Forward` reveals content further right/down (increasing scroll),
/// `Backward` reveals content further left/up (decreasing scroll).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Towards scroll offset zero.
    Backward,
    /// Towards the end of the scroll range.
    Forward,
}

/// Returns the extent of `extent` pixels of content after scaling by `zoom`.
///
/// Partial pixels are dropped, so `scaled_extent(333, 1.5)` is `499`.
#[must_use]
pub fn scaled_extent(extent: i32, zoom: f64) -> i32 {
    trunc_px(f64::from(extent) * zoom)
}

/// Returns the maximum scroll offset for one axis.
///
/// This is `scaled content - viewport` and is negative when the scaled
/// content is smaller than the viewport.
#[must_use]
pub fn scroll_range(content: i32, zoom: f64, viewport: i32) -> i32 {
    scaled_extent(content, zoom).saturating_sub(viewport)
}

/// Applies `delta` to `current` and clamps the result into `[0, range]`.
///
/// The lower bound is applied last, so a negative `range` pins the result at
/// zero regardless of `delta`.
#[must_use]
pub fn clamp_scroll(current: i32, delta: i32, range: i32) -> i32 {
    let mut next = current.saturating_add(delta);
    if next > range {
        next = range;
    } else if next < 0 {
        next = 0;
    }
    next.max(0)
}

/// Truncates a pixel value toward zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "pixel values saturate at the i32 bounds, matching integer layout"
)]
pub(crate) fn trunc_px(value: f64) -> i32 {
    value as i32
}

/// Rounds a pixel value half away from zero.
pub(crate) fn round_px(value: f64) -> i32 {
    if value >= 0.0 {
        trunc_px(value + 0.5)
    } else {
        trunc_px(value - 0.5)
    }
}

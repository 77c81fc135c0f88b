// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Placement of the single zoomed child inside the viewport's scrolled
/// content space.
///
/// This mirrors the scale/pivot/translation properties most retained-mode
/// toolkits expose on a view. A child-local point `p` ends up at
///
/// ```text
/// origin + translation + pivot + scale * (p - pivot)
/// ```
///
/// in content space; subtracting the scroll position gives view space (see
/// [`crate::ZoomController::view_transform`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Point in child-local coordinates that scaling is performed about.
    pub pivot: Point,
    /// Offset applied after layout placement.
    pub translation: Vec2,
    /// Where layout placed the child's top-left corner.
    pub origin: Point,
}

impl Default for ContentTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ContentTransform {
    /// No scaling and no offset.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        pivot: Point::ZERO,
        translation: Vec2::ZERO,
        origin: Point::ZERO,
    };

    /// Returns the child-local to content-space transform.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        let pivot = self.pivot.to_vec2();
        Affine::translate(self.origin.to_vec2() + self.translation + pivot)
            * Affine::scale(self.scale)
            * Affine::translate(-pivot)
    }

    /// Maps a child-local point into content space.
    #[must_use]
    pub fn map_point(&self, pt: Point) -> Point {
        self.to_affine() * pt
    }
}

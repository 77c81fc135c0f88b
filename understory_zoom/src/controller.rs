// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::{Drain, Vec};

use kurbo::{Affine, Point, Vec2};

use crate::config::{ConfigError, ZoomConfig};
use crate::events::{ZoomEvent, ZoomGestureListener};
use crate::fling::Fling;
use crate::scale_helper::{Easing, ScaleHelper};
use crate::scroll::{
    Axis, PixelSize, ScrollDirection, ScrollPosition, clamp_scroll, scaled_extent, scroll_range,
    trunc_px,
};
use crate::transform::ContentTransform;

bitflags::bitflags! {
    /// What the controller is currently doing. Empty means idle.
    ///
    /// The flags are independent: a drag can be tracked while a zoom
    /// animation or a fling is still running.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Activity: u8 {
        /// A drag gesture has applied at least one delta since the last touch-down.
        const DRAGGING        = 0b0000_0001;
        /// An animated zoom transition is running.
        const SCALE_ANIMATING = 0b0000_0010;
        /// A fling trajectory is running.
        const FLINGING        = 0b0000_0100;
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pan, zoom and fling state for one zoomable child inside a viewport.
///
/// The controller is driven entirely by method calls from a host: gesture
/// callbacks go to the `on_*` methods, size changes to
/// [`ZoomController::set_viewport_size`] / [`ZoomController::set_content_size`],
/// and every frame the host has been asked to draw calls
/// [`ZoomController::tick`]. After mutating calls the host reads back
/// [`ZoomController::scroll`] and [`ZoomController::content_transform`] and
/// checks [`ZoomController::take_redraw_request`].
///
/// Scroll positions and sizes are whole pixels. The committed zoom always
/// stays within the configured limits, and the committed scroll always stays
/// within `[0, scroll range]` per axis (exactly 0 when the scaled content is
/// smaller than the viewport on that axis).
#[derive(Clone, Debug)]
pub struct ZoomController {
    min_zoom: f64,
    max_zoom: f64,
    double_tap_zoom: f64,
    min_fling_velocity: f64,
    max_fling_velocity: f64,
    fling_deceleration: f64,
    zoom: f64,
    scroll: ScrollPosition,
    viewport: PixelSize,
    content: PixelSize,
    transform: ContentTransform,
    scaler: ScaleHelper,
    fling: Option<Fling>,
    enabled: bool,
    dragging: bool,
    last_anchor: Point,
    needs_rescale: bool,
    redraw_requested: bool,
    events: Vec<ZoomEvent>,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::from_valid(ZoomConfig::default())
    }
}

impl ZoomController {
    /// Creates a controller from `config`.
    ///
    /// An invalid configuration is logged and replaced by
    /// [`ZoomConfig::default`]; use [`ZoomController::try_new`] to get the
    /// error instead. Viewport and content sizes start out empty.
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        match Self::try_new(config) {
            Ok(controller) => controller,
            Err(err) => {
                log::warn!("invalid zoom configuration, falling back to defaults: {err}");
                Self::default()
            }
        }
    }

    /// Creates a controller from `config`, rejecting invalid settings.
    pub fn try_new(config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config.normalized()))
    }

    fn from_valid(config: ZoomConfig) -> Self {
        let mut controller = Self {
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            double_tap_zoom: config.double_tap_zoom,
            min_fling_velocity: config.min_fling_velocity,
            max_fling_velocity: config.max_fling_velocity,
            fling_deceleration: config.fling_deceleration,
            zoom: 1.0_f64.clamp(config.min_zoom, config.max_zoom),
            scroll: ScrollPosition::ZERO,
            viewport: PixelSize::ZERO,
            content: PixelSize::ZERO,
            transform: ContentTransform::IDENTITY,
            scaler: ScaleHelper::new(config.scale_duration_ms),
            fling: None,
            enabled: true,
            dragging: false,
            last_anchor: Point::ZERO,
            needs_rescale: false,
            redraw_requested: false,
            events: Vec::new(),
        };
        controller.update_transform();
        controller
    }

    /// Returns the committed zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the zoom limits as `(min, max)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Changes the zoom limits.
    ///
    /// The pair is reordered if `min_zoom > max_zoom`. The double-tap zoom is
    /// lowered to the new maximum, and a committed zoom outside the new range
    /// is clamped around the last anchor. Non-positive or non-finite limits
    /// are ignored.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        if !(min_zoom > 0.0 && max_zoom.is_finite()) {
            log::warn!("ignoring zoom limits {min_zoom}..={max_zoom}");
            return;
        }
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.double_tap_zoom = self.double_tap_zoom.min(max_zoom);
        let clamped = self.zoom.clamp(min_zoom, max_zoom);
        if clamped != self.zoom {
            self.apply_scale(clamped, self.last_anchor);
        }
    }

    /// Returns the zoom factor a double tap toggles to.
    #[must_use]
    pub fn double_tap_zoom(&self) -> f64 {
        self.double_tap_zoom
    }

    /// Sets the zoom factor a double tap toggles to, lowered to the maximum
    /// zoom if needed. Non-positive or non-finite values are ignored.
    pub fn set_double_tap_zoom(&mut self, zoom: f64) {
        if !(zoom > 0.0 && zoom.is_finite()) {
            log::warn!("ignoring double tap zoom {zoom}");
            return;
        }
        self.double_tap_zoom = zoom.min(self.max_zoom);
    }

    /// Returns whether gestures are currently accepted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables pinch, drag and fling handling.
    ///
    /// Double taps and programmatic zoom calls are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the committed scroll position.
    #[must_use]
    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> PixelSize {
        self.viewport
    }

    /// Returns the unscaled content size.
    #[must_use]
    pub fn content_size(&self) -> PixelSize {
        self.content
    }

    /// Updates the viewport size (padding already removed).
    ///
    /// A real change schedules a re-scale on the next
    /// [`ZoomController::on_layout`] and requests a redraw.
    pub fn set_viewport_size(&mut self, size: PixelSize) {
        if self.viewport != size {
            self.viewport = size;
            self.mark_resized();
        }
    }

    /// Updates the unscaled size of the child content.
    ///
    /// A real change schedules a re-scale on the next
    /// [`ZoomController::on_layout`] and requests a redraw.
    pub fn set_content_size(&mut self, size: PixelSize) {
        if self.content != size {
            self.content = size;
            self.mark_resized();
        }
    }

    fn mark_resized(&mut self) {
        self.needs_rescale = true;
        self.request_redraw();
    }

    /// Applies a pending re-scale after a size change.
    ///
    /// The committed zoom is re-applied around the last anchor so the content
    /// transform and scroll clamp match the new sizes. Returns `true` if a
    /// re-scale happened.
    pub fn on_layout(&mut self) -> bool {
        if !self.needs_rescale {
            return false;
        }
        self.needs_rescale = false;
        self.apply_scale(self.zoom, self.last_anchor);
        true
    }

    /// Returns the size of the content after scaling by the committed zoom.
    #[must_use]
    pub fn content_extent(&self) -> PixelSize {
        PixelSize::new(
            scaled_extent(self.content.width, self.zoom),
            scaled_extent(self.content.height, self.zoom),
        )
    }

    /// Returns the largest scroll position on each axis.
    ///
    /// A component is negative when the scaled content is smaller than the
    /// viewport on that axis.
    #[must_use]
    pub fn scroll_range(&self) -> ScrollPosition {
        ScrollPosition::new(
            self.scroll_range_on(Axis::Horizontal),
            self.scroll_range_on(Axis::Vertical),
        )
    }

    /// Returns the largest scroll position along `axis`.
    #[must_use]
    pub fn scroll_range_on(&self, axis: Axis) -> i32 {
        scroll_range(self.content.extent(axis), self.zoom, self.viewport.extent(axis))
    }

    /// Returns where layout places the unscaled child inside the viewport.
    ///
    /// Content narrower or shorter than the viewport is centered on both axes;
    /// otherwise it starts at the viewport origin.
    #[must_use]
    pub fn child_origin(&self) -> Point {
        let undersized = self.content.width < self.viewport.width
            || self.content.height < self.viewport.height;
        if undersized {
            Point::new(
                f64::from(self.viewport.width.saturating_sub(self.content.width) / 2),
                f64::from(self.viewport.height.saturating_sub(self.content.height) / 2),
            )
        } else {
            Point::ZERO
        }
    }

    /// Returns the scale/pivot/translation to apply to the child.
    #[must_use]
    pub fn content_transform(&self) -> ContentTransform {
        self.transform
    }

    /// Returns the child-local to view-space transform, scroll included.
    #[must_use]
    pub fn view_transform(&self) -> Affine {
        let scroll = Vec2::new(f64::from(self.scroll.x), f64::from(self.scroll.y));
        Affine::translate(-scroll) * self.transform.to_affine()
    }

    /// Maps a view-space point (for example a tap position) into child-local
    /// coordinates.
    #[must_use]
    pub fn view_to_child_point(&self, pt: Point) -> Point {
        self.view_transform().inverse() * pt
    }

    /// Sets the zoom immediately, keeping `anchor` (view coordinates) fixed.
    ///
    /// `zoom` is clamped to the zoom limits. Any running zoom animation is
    /// cancelled.
    pub fn set_scale(&mut self, zoom: f64, anchor: Point) {
        self.scaler.abort();
        self.apply_scale(zoom, anchor);
    }

    /// Starts an animated zoom towards `zoom` around `anchor`.
    ///
    /// Zooming out eases in, zooming in eases out. The animation replaces any
    /// running one and advances on [`ZoomController::tick`].
    pub fn smooth_scale(&mut self, zoom: f64, anchor: Point, now_ms: u64) {
        if zoom.is_nan() {
            log::warn!("ignoring NaN zoom target");
            return;
        }
        let target = zoom.clamp(self.min_zoom, self.max_zoom);
        let easing = Easing::for_transition(self.zoom, target);
        log::debug!("animating zoom {} -> {target} ({easing:?})", self.zoom);
        self.scaler.start_scale(self.zoom, target, anchor, easing, now_ms);
        self.request_redraw();
    }

    fn apply_scale(&mut self, zoom: f64, anchor: Point) {
        if zoom.is_nan() {
            log::warn!("ignoring NaN zoom");
            return;
        }
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.last_anchor = anchor;
        let growth = zoom / self.zoom - 1.0;
        self.zoom = zoom;
        let dx = trunc_px((f64::from(self.scroll.x) + anchor.x) * growth);
        let dy = trunc_px((f64::from(self.scroll.y) + anchor.y) * growth);
        self.update_transform();
        self.process_scroll(dx, dy);
        self.request_redraw();
    }

    fn update_transform(&mut self) {
        let origin = self.child_origin();
        let range = self.scroll_range();
        // Undersized content scales about its center, which is kept at the
        // viewport center; scrollable content scales about its top-left
        // corner, pinned to the viewport origin.
        let (pivot_x, translate_x) = if range.x < 0 {
            let pivot = self.content.width / 2;
            (
                f64::from(pivot),
                f64::from(self.viewport.width / 2 - pivot) - origin.x,
            )
        } else {
            (0.0, -origin.x)
        };
        let (pivot_y, translate_y) = if range.y < 0 {
            let pivot = self.content.height / 2;
            (
                f64::from(pivot),
                f64::from(self.viewport.height / 2 - pivot) - origin.y,
            )
        } else {
            (0.0, -origin.y)
        };
        self.transform = ContentTransform {
            scale: self.zoom,
            pivot: Point::new(pivot_x, pivot_y),
            translation: Vec2::new(translate_x, translate_y),
            origin,
        };
    }

    /// Scrolls by `(dx, dy)` pixels, clamping each axis into its range.
    pub fn process_scroll(&mut self, dx: i32, dy: i32) {
        let range = self.scroll_range();
        let next = ScrollPosition::new(
            clamp_scroll(self.scroll.x, dx, range.x),
            clamp_scroll(self.scroll.y, dy, range.y),
        );
        if next != self.scroll {
            log::trace!("scroll committed at ({}, {})", next.x, next.y);
            self.scroll = next;
            self.request_redraw();
        }
    }

    /// Reports whether content can scroll further along `axis` in `direction`.
    ///
    /// Hosts use this to let ancestor scroll containers (pagers, lists) take
    /// over a drag once this one has reached its edge.
    #[must_use]
    pub fn can_scroll(&self, axis: Axis, direction: ScrollDirection) -> bool {
        let scroll = self.scroll.get(axis);
        let range = self.scroll_range_on(axis);
        match direction {
            ScrollDirection::Forward => scroll < range,
            ScrollDirection::Backward => scroll > 0 && range > 0,
        }
    }

    /// A pointer went down: stops any running fling.
    ///
    /// Zoom animations keep running.
    pub fn on_down(&mut self) {
        if let Some(mut fling) = self.fling.take() {
            fling.abort();
            log::debug!("fling aborted at ({}, {})", self.scroll.x, self.scroll.y);
        }
    }

    /// The last pointer was lifted: the next drag starts a new scroll gesture.
    pub fn on_up(&mut self) {
        self.dragging = false;
    }

    /// A drag moved by `distance`, expressed as a scroll delta.
    ///
    /// Positive components scroll towards the end of the content, i.e. they
    /// point opposite to the finger movement. Fractional pixels are dropped.
    /// The first delta after a touch-down records [`ZoomEvent::ScrollBegin`].
    /// Returns `false` while disabled.
    pub fn on_scroll(&mut self, distance: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.dragging {
            self.dragging = true;
            self.events.push(ZoomEvent::ScrollBegin);
        }
        self.process_scroll(trunc_px(distance.x), trunc_px(distance.y));
        true
    }

    /// A pinch gesture started; records [`ZoomEvent::ScaleGestureBegin`].
    pub fn on_scale_begin(&mut self) {
        self.events.push(ZoomEvent::ScaleGestureBegin);
    }

    /// A pinch gesture scaled by `factor` around `focus` (view coordinates).
    ///
    /// The resulting zoom is clamped to the zoom limits. Returns `false`
    /// while disabled.
    pub fn on_scale_gesture(&mut self, factor: f64, focus: Point) -> bool {
        if !self.enabled {
            return false;
        }
        let zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        self.set_scale(zoom, focus);
        true
    }

    /// A double tap at `at` (view coordinates).
    ///
    /// Toggles between `1.0` and the double-tap zoom with an animation and
    /// records [`ZoomEvent::DoubleTap`]. Returns the target zoom.
    pub fn on_double_tap(&mut self, at: Point, now_ms: u64) -> f64 {
        let target = if self.zoom < 1.0 {
            1.0
        } else if self.zoom < self.double_tap_zoom {
            self.double_tap_zoom
        } else {
            1.0
        };
        self.smooth_scale(target, at, now_ms);
        self.events.push(ZoomEvent::DoubleTap);
        target
    }

    /// A drag was released with `velocity` in pixels per second.
    ///
    /// `velocity` is the pointer velocity as reported by gesture detectors
    /// (positive when moving right/down); content scrolls the opposite way.
    /// Components slower than the minimum fling velocity are dropped, faster
    /// ones are capped. The fling only starts when at least one axis is
    /// strictly inside its scroll range. Returns whether a fling started.
    pub fn on_fling(&mut self, velocity: Vec2, now_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }
        let mut velocity = -velocity;
        if velocity.x.abs() < self.min_fling_velocity {
            velocity.x = 0.0;
        }
        if velocity.y.abs() < self.min_fling_velocity {
            velocity.y = 0.0;
        }
        let range = self.scroll_range();
        let can_fling_x = self.scroll.x > 0 && self.scroll.x < range.x;
        let can_fling_y = self.scroll.y > 0 && self.scroll.y < range.y;
        if !(can_fling_x || can_fling_y) {
            log::debug!("fling suppressed at scroll edge");
            return false;
        }
        let max = self.max_fling_velocity;
        velocity.x = velocity.x.clamp(-max, max);
        velocity.y = velocity.y.clamp(-max, max);
        log::debug!("fling from ({}, {}) at {velocity:?}", self.scroll.x, self.scroll.y);
        self.fling = Some(Fling::new(
            self.scroll,
            velocity,
            ScrollPosition::ZERO,
            ScrollPosition::new(range.x.max(0), range.y.max(0)),
            self.fling_deceleration,
            now_ms,
        ));
        self.request_redraw();
        true
    }

    /// Returns the running fling, if any.
    #[must_use]
    pub fn fling(&self) -> Option<&Fling> {
        self.fling.as_ref()
    }

    /// Advances the zoom animation and the fling to `now_ms`.
    ///
    /// Call once per frame after a redraw was requested. Returns `true` while
    /// either is still running, in which case another redraw is requested.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.scaler.compute_scale_offset(now_ms) {
            let zoom = self.scaler.cur_scale();
            let anchor = self.scaler.anchor();
            self.apply_scale(zoom, anchor);
        }

        let mut fling_target = None;
        let mut fling_done = false;
        if let Some(fling) = &mut self.fling {
            if fling.compute_offset(now_ms) {
                fling_target = Some(fling.current());
            }
            fling_done = fling.is_finished();
        }
        if let Some(target) = fling_target {
            let dx = target.x.saturating_sub(self.scroll.x);
            let dy = target.y.saturating_sub(self.scroll.y);
            if dx != 0 || dy != 0 {
                self.process_scroll(dx, dy);
            }
        }
        if fling_done {
            self.fling = None;
        }

        let animating = self.is_animating();
        if animating {
            self.request_redraw();
        }
        animating
    }

    /// Returns `true` while a zoom animation or a fling is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scaler.is_finished() || self.fling.is_some()
    }

    /// Returns the current activity flags.
    #[must_use]
    pub fn activity(&self) -> Activity {
        let mut activity = Activity::empty();
        activity.set(Activity::DRAGGING, self.dragging);
        activity.set(Activity::SCALE_ANIMATING, !self.scaler.is_finished());
        activity.set(Activity::FLINGING, self.fling.is_some());
        activity
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns whether a redraw has been requested and not yet taken.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }

    /// Returns the recorded gesture events without consuming them.
    #[must_use]
    pub fn pending_events(&self) -> &[ZoomEvent] {
        &self.events
    }

    /// Removes and yields the recorded gesture events in order.
    pub fn drain_events(&mut self) -> Drain<'_, ZoomEvent> {
        self.events.drain(..)
    }

    /// Delivers the recorded gesture events to `listener`, in order.
    pub fn dispatch_events<L: ZoomGestureListener + ?Sized>(&mut self, listener: &mut L) {
        for event in self.events.drain(..) {
            event.dispatch(listener);
        }
    }

    /// Snapshot of the controller state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomDebugInfo {
        ZoomDebugInfo {
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            double_tap_zoom: self.double_tap_zoom,
            scroll: self.scroll,
            scroll_range: self.scroll_range(),
            viewport: self.viewport,
            content: self.content,
            transform: self.transform,
            activity: self.activity(),
            enabled: self.enabled,
        }
    }
}

/// Debug snapshot of a [`ZoomController`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomDebugInfo {
    /// Committed zoom factor.
    pub zoom: f64,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Zoom factor a double tap toggles to.
    pub double_tap_zoom: f64,
    /// Committed scroll position.
    pub scroll: ScrollPosition,
    /// Largest scroll position per axis; negative when content is smaller.
    pub scroll_range: ScrollPosition,
    /// Viewport size.
    pub viewport: PixelSize,
    /// Unscaled content size.
    pub content: PixelSize,
    /// Transform applied to the child.
    pub transform: ContentTransform,
    /// What the controller is doing.
    pub activity: Activity,
    /// Whether gestures are accepted.
    pub enabled: bool,
}

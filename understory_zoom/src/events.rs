// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture onset notifications.
//!
//! [`crate::ZoomController`] records one [`ZoomEvent`] per gesture onset.
//! Hosts either drain them with [`crate::ZoomController::drain_events`] or
//! hand a [`ZoomGestureListener`] to
//! [`crate::ZoomController::dispatch_events`].

/// A gesture began.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomEvent {
    /// The first drag delta after a touch-down was applied.
    ScrollBegin,
    /// A pinch gesture started.
    ScaleGestureBegin,
    /// A double tap started a zoom toggle.
    DoubleTap,
}

impl ZoomEvent {
    /// Invokes the hook on `listener` that matches this event.
    pub fn dispatch<L: ZoomGestureListener + ?Sized>(self, listener: &mut L) {
        match self {
            Self::ScrollBegin => listener.on_scroll_begin(),
            Self::ScaleGestureBegin => listener.on_scale_gesture_begin(),
            Self::DoubleTap => listener.on_double_tap(),
        }
    }
}

/// Receives gesture onsets. Every hook defaults to doing nothing.
pub trait ZoomGestureListener {
    /// See [`ZoomEvent::ScrollBegin`].
    fn on_scroll_begin(&mut self) {}
    /// See [`ZoomEvent::ScaleGestureBegin`].
    fn on_scale_gesture_begin(&mut self) {}
    /// See [`ZoomEvent::DoubleTap`].
    fn on_double_tap(&mut self) {}
}

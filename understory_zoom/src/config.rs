// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time settings for [`crate::ZoomController`].

use thiserror::Error;

use crate::fling::DEFAULT_FLING_DECELERATION;
use crate::scale_helper::DEFAULT_SCALE_DURATION_MS;

/// Default lower zoom limit.
pub const DEFAULT_MIN_ZOOM: f64 = 1.0;
/// Default upper zoom limit.
pub const DEFAULT_MAX_ZOOM: f64 = 4.0;
/// Default zoom reached by a double tap.
pub const DEFAULT_DOUBLE_TAP_ZOOM: f64 = 2.0;
/// Default fling velocity below which an axis is ignored, in pixels per second.
pub const DEFAULT_MIN_FLING_VELOCITY: f64 = 50.0;
/// Default fling velocity cap, in pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: f64 = 8000.0;

/// Zoom limits, fling thresholds and animation timing for a controller.
///
/// Values are read once by [`crate::ZoomController::new`]. Hosts typically
/// build one from their own attribute or settings source:
///
/// ```
/// use understory_zoom::ZoomConfig;
///
/// let config = ZoomConfig::default()
///     .with_zoom_limits(0.5, 8.0)
///     .with_double_tap_zoom(3.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Smallest zoom factor gestures can reach.
    pub min_zoom: f64,
    /// Largest zoom factor gestures can reach.
    pub max_zoom: f64,
    /// Zoom factor a double tap toggles to. Values above `max_zoom` are
    /// lowered to `max_zoom`.
    pub double_tap_zoom: f64,
    /// Fling velocity components smaller than this are dropped.
    pub min_fling_velocity: f64,
    /// Fling velocity components are capped at this magnitude.
    pub max_fling_velocity: f64,
    /// Length of animated zoom transitions, in milliseconds.
    pub scale_duration_ms: u64,
    /// How quickly flings slow down, in pixels per second squared.
    pub fling_deceleration: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            double_tap_zoom: DEFAULT_DOUBLE_TAP_ZOOM,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            scale_duration_ms: DEFAULT_SCALE_DURATION_MS,
            fling_deceleration: DEFAULT_FLING_DECELERATION,
        }
    }
}

/// Reasons a [`ZoomConfig`] is rejected by [`ZoomConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A floating point setting is NaN or infinite.
    #[error("`{field}` must be finite")]
    NonFinite {
        /// Name of the offending setting.
        field: &'static str,
    },
    /// A zoom setting is zero or negative.
    #[error("`{field}` must be positive, got {value}")]
    NonPositiveZoom {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `min_zoom` is larger than `max_zoom`.
    #[error("min_zoom ({min}) is larger than max_zoom ({max})")]
    InvertedZoomRange {
        /// Configured lower limit.
        min: f64,
        /// Configured upper limit.
        max: f64,
    },
    /// Fling thresholds are negative or out of order.
    #[error("fling velocity range {min}..={max} is invalid")]
    InvertedVelocityRange {
        /// Configured minimum velocity.
        min: f64,
        /// Configured maximum velocity.
        max: f64,
    },
    /// `fling_deceleration` is zero or negative.
    #[error("fling deceleration must be positive, got {0}")]
    NonPositiveDeceleration(f64),
}

impl ZoomConfig {
    /// Sets the zoom limits.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the zoom factor reached by a double tap.
    #[must_use]
    pub fn with_double_tap_zoom(mut self, zoom: f64) -> Self {
        self.double_tap_zoom = zoom;
        self
    }

    /// Sets the fling velocity thresholds, in pixels per second.
    #[must_use]
    pub fn with_fling_velocity(mut self, min: f64, max: f64) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    /// Sets the length of animated zoom transitions.
    #[must_use]
    pub fn with_scale_duration_ms(mut self, duration_ms: u64) -> Self {
        self.scale_duration_ms = duration_ms;
        self
    }

    /// Sets the fling deceleration, in pixels per second squared.
    #[must_use]
    pub fn with_fling_deceleration(mut self, deceleration: f64) -> Self {
        self.fling_deceleration = deceleration;
        self
    }

    /// Checks that every setting is usable.
    ///
    /// A `double_tap_zoom` above `max_zoom` is accepted; it is lowered by
    /// [`ZoomConfig::normalized`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("double_tap_zoom", self.double_tap_zoom),
            ("min_fling_velocity", self.min_fling_velocity),
            ("max_fling_velocity", self.max_fling_velocity),
            ("fling_deceleration", self.fling_deceleration),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        for (field, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("double_tap_zoom", self.double_tap_zoom),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveZoom { field, value });
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.min_fling_velocity < 0.0 || self.min_fling_velocity > self.max_fling_velocity {
            return Err(ConfigError::InvertedVelocityRange {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        if self.fling_deceleration <= 0.0 {
            return Err(ConfigError::NonPositiveDeceleration(self.fling_deceleration));
        }
        Ok(())
    }

    /// Returns a copy with `double_tap_zoom` lowered to `max_zoom` if needed.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.double_tap_zoom > self.max_zoom {
            self.double_tap_zoom = self.max_zoom;
        }
        self
    }
}

// Strong typing over bare numbers. Newtypes for timestamps and typed
// structs for configuration and measured geometry.

use serde::{Deserialize, Serialize};

/// Ceiling the zero-speed sentinel maps to, in px/s.
pub const MAX_SPEED_PX_PER_SEC: f64 = 500.0;

/// Increment used by keyboard/slider speed stepping, in px/s.
pub const SPEED_STEP_PX_PER_SEC: f64 = 10.0;

/// Lower bound of the speed-stepping range, in px/s. The zero sentinel is
/// reachable only by direct configuration, never by stepping.
pub const MIN_STEP_SPEED_PX_PER_SEC: f64 = 10.0;

/// Timestamp in milliseconds on the host's monotonic clock
/// (`performance.now()` in the browser). Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn from_millis(ms: f64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> f64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// Scroll axis. Vertical text travels bottom-to-top, horizontal text
/// right-to-left; the offset math is identical along either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Stopped,
    Playing,
    Paused,
}

/// Scroll configuration passed from JS and mutated through `configure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_axis")]
    pub axis: Axis,
    /// Scroll speed in px/s. `0` is a sentinel meaning "maximum speed"
    /// (500 px/s). Negative or non-finite input normalizes to `0` at the
    /// boundary and therefore also means maximum.
    #[serde(default = "default_speed")]
    pub speed_px_per_sec: f64,
    /// Loop forever instead of halting once the text has fully exited.
    #[serde(default)]
    pub loop_enabled: bool,
    /// Horizontal flip applied by the renderer. Affects only the transform
    /// sign convention, never the offset math.
    #[serde(default)]
    pub mirrored: bool,
}

fn default_axis() -> Axis {
    Axis::Vertical
}

fn default_speed() -> f64 {
    50.0
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            axis: default_axis(),
            speed_px_per_sec: default_speed(),
            loop_enabled: false,
            mirrored: false,
        }
    }
}

impl ScrollConfig {
    /// Speed actually applied to motion, with the zero sentinel resolved.
    pub fn effective_speed(&self) -> f64 {
        if self.speed_px_per_sec == 0.0 {
            MAX_SPEED_PX_PER_SEC
        } else {
            self.speed_px_per_sec
        }
    }

    /// Clamp invalid speed input at the boundary: negative or non-finite
    /// becomes the zero sentinel.
    pub(crate) fn normalize(&mut self) {
        if !self.speed_px_per_sec.is_finite() || self.speed_px_per_sec < 0.0 {
            self.speed_px_per_sec = 0.0;
        }
    }
}

/// Partial configuration update from JS. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrollConfigUpdate {
    #[serde(default)]
    pub axis: Option<Axis>,
    #[serde(default)]
    pub speed_px_per_sec: Option<f64>,
    #[serde(default)]
    pub loop_enabled: Option<bool>,
    #[serde(default)]
    pub mirrored: Option<bool>,
}

/// Measured geometry along the scroll axis. Replaced wholesale whenever
/// content, font, axis, or viewport size change; never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScrollExtent {
    /// Container size along the scroll axis, in px.
    pub viewport_size: f64,
    /// Text size along the scroll axis, in px, including layout padding.
    pub text_size: f64,
}

impl ScrollExtent {
    /// Build an extent, normalizing non-finite or negative measurements to
    /// zero.
    pub fn new(viewport_size: f64, text_size: f64) -> Self {
        ScrollExtent {
            viewport_size: sanitize_px(viewport_size),
            text_size: sanitize_px(text_size),
        }
    }

    /// Total travel from fully-off-screen-start to fully-off-screen-end.
    pub fn cycle_distance(&self) -> f64 {
        self.viewport_size + self.text_size
    }

    /// True before layout has produced usable measurements.
    pub fn is_degenerate(&self) -> bool {
        self.cycle_distance() <= 0.0
    }
}

fn sanitize_px(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Per-frame engine output for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Scroll offset along the axis, relative to the viewport's leading
    /// edge. `viewport_size` is the home position.
    pub offset: f64,
    /// Set on the tick that exhausts a single-pass scroll; the host must
    /// stop scheduling further ticks.
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversions() {
        let ts = Timestamp::from_millis(1500.0);
        assert_eq!(ts.as_millis(), 1500.0);
        assert!((ts.as_secs() - 1.5).abs() < 0.0001);
    }

    #[test]
    fn zero_speed_resolves_to_maximum() {
        let config = ScrollConfig {
            speed_px_per_sec: 0.0,
            ..Default::default()
        };
        assert_eq!(config.effective_speed(), MAX_SPEED_PX_PER_SEC);
    }

    #[test]
    fn normalize_clamps_bad_speed() {
        let mut config = ScrollConfig {
            speed_px_per_sec: -25.0,
            ..Default::default()
        };
        config.normalize();
        assert_eq!(config.speed_px_per_sec, 0.0);

        config.speed_px_per_sec = f64::NAN;
        config.normalize();
        assert_eq!(config.speed_px_per_sec, 0.0);
    }

    #[test]
    fn extent_sanitizes_measurements() {
        let extent = ScrollExtent::new(f64::INFINITY, -40.0);
        assert_eq!(extent.viewport_size, 0.0);
        assert_eq!(extent.text_size, 0.0);
        assert!(extent.is_degenerate());

        let extent = ScrollExtent::new(600.0, 200.0);
        assert_eq!(extent.cycle_distance(), 800.0);
        assert!(!extent.is_degenerate());
    }

    #[test]
    fn axis_uses_lowercase_wire_names() {
        let axis: Axis = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(axis, Axis::Horizontal);
        assert_eq!(serde_json::to_string(&Axis::Vertical).unwrap(), "\"vertical\"");
    }

    #[test]
    fn config_update_defaults_to_empty() {
        let update: ScrollConfigUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.axis.is_none());
        assert!(update.speed_px_per_sec.is_none());
        assert!(update.loop_enabled.is_none());
        assert!(update.mirrored.is_none());
    }
}

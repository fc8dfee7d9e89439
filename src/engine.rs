// Scroll timing engine: wall-clock time in, one-dimensional offset out.
// Position stays continuous across pause/resume, live speed changes, and
// drag repositioning; loop mode wraps through the cycle distance.

use crate::types::{
    FrameResult, Phase, ScrollConfig, ScrollConfigUpdate, ScrollExtent, Timestamp,
    MAX_SPEED_PX_PER_SEC, MIN_STEP_SPEED_PX_PER_SEC, SPEED_STEP_PX_PER_SEC,
};

/// The single authority for "where is the text right now".
///
/// The host drives it: while playing, call [`ScrollEngine::tick`] once per
/// animation frame with the current `performance.now()` value and hand the
/// returned offset to the renderer. All other operations are synchronous
/// state transitions. One instance per prompter view.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    config: ScrollConfig,
    extent: ScrollExtent,
    phase: Phase,
    /// Logical start of continuous motion on the host clock.
    reference_ts: Option<Timestamp>,
    /// Virtual time subtracted from elapsed wall time to account for pauses.
    /// Grows monotonically until a reset or re-anchor clears it.
    accumulated_pause_ms: f64,
    /// Set while paused; consumed by the next `play`.
    last_pause_ts: Option<Timestamp>,
    /// Last computed offset, valid in every phase. Seeds resume and drag.
    current_offset: f64,
    /// A seek invalidated the stored timeline; the next `play` must anchor
    /// from `current_offset` instead of extending it.
    repositioned: bool,
}

impl ScrollEngine {
    pub fn new(config: ScrollConfig) -> Self {
        let mut config = config;
        config.normalize();
        ScrollEngine {
            config,
            extent: ScrollExtent::default(),
            phase: Phase::Stopped,
            reference_ts: None,
            accumulated_pause_ms: 0.0,
            last_pause_ts: None,
            current_offset: 0.0,
            repositioned: false,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn extent(&self) -> ScrollExtent {
        self.extent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Last computed offset, in px. Home is `viewport_size`.
    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    /// Merge a partial configuration update. Negative or non-finite speed
    /// clamps to the zero sentinel. Changing speed here does not re-anchor
    /// timing — use [`ScrollEngine::change_speed_live`] while playing. An
    /// axis or layout-affecting change requires a fresh `update_extent`
    /// (and usually `reset`) from the caller before the next tick.
    pub fn configure(&mut self, update: ScrollConfigUpdate) {
        if let Some(axis) = update.axis {
            self.config.axis = axis;
        }
        if let Some(speed) = update.speed_px_per_sec {
            self.config.speed_px_per_sec = speed;
        }
        if let Some(loop_enabled) = update.loop_enabled {
            self.config.loop_enabled = loop_enabled;
        }
        if let Some(mirrored) = update.mirrored {
            self.config.mirrored = mirrored;
        }
        self.config.normalize();
    }

    /// Replace the measured geometry wholesale. Must be called after any
    /// content, font, axis, or viewport change, before the next tick —
    /// offset math silently uses whatever extent is current. While stopped
    /// the home offset follows the new viewport size.
    pub fn update_extent(&mut self, extent: ScrollExtent) {
        self.extent = ScrollExtent::new(extent.viewport_size, extent.text_size);
        if self.phase == Phase::Stopped {
            self.current_offset = self.extent.viewport_size;
        }
    }

    /// Start or resume motion. Resuming after a pause keeps the offset
    /// exactly where the pause left it; resuming after a seek (or starting
    /// fresh) anchors the timeline so motion continues from
    /// `current_offset`. Idempotent while already playing.
    pub fn play(&mut self, now: Timestamp) {
        match self.phase {
            Phase::Playing => {}
            Phase::Paused => {
                if self.repositioned || self.reference_ts.is_none() {
                    self.anchor_at_offset(now);
                } else if let Some(pause_ts) = self.last_pause_ts.take() {
                    self.accumulated_pause_ms += now.as_millis() - pause_ts.as_millis();
                }
                self.last_pause_ts = None;
                self.phase = Phase::Playing;
            }
            Phase::Stopped => {
                self.anchor_at_offset(now);
                self.phase = Phase::Playing;
            }
        }
    }

    /// Freeze motion at the current offset. No-op unless playing.
    pub fn pause(&mut self, now: Timestamp) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::Paused;
        self.last_pause_ts = Some(now);
    }

    /// Return to the home position and clear all timing. Safe in any phase.
    pub fn reset(&mut self) {
        self.phase = Phase::Stopped;
        self.reference_ts = None;
        self.accumulated_pause_ms = 0.0;
        self.last_pause_ts = None;
        self.current_offset = self.extent.viewport_size;
        self.repositioned = false;
    }

    /// Reposition directly, e.g. from a drag gesture. While playing this is
    /// an implicit pause-then-seek: the engine lands in `Paused` and the
    /// next `play` resumes from the new offset. Non-finite offsets are
    /// ignored.
    pub fn seek(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
        }
        self.current_offset = offset;
        self.reference_ts = None;
        self.accumulated_pause_ms = 0.0;
        self.last_pause_ts = None;
        self.repositioned = true;
    }

    /// Change speed without a visual jump: the distance already travelled
    /// under the old speed carries over unchanged, only the future rate
    /// changes. Outside of playback this is a plain speed update.
    pub fn change_speed_live(&mut self, now: Timestamp, new_speed: f64) {
        let old_effective = self.config.effective_speed();
        self.config.speed_px_per_sec = new_speed;
        self.config.normalize();

        if self.phase != Phase::Playing {
            return;
        }
        let reference = match self.reference_ts {
            Some(ts) => ts,
            None => return,
        };

        let elapsed_ms =
            (now.as_millis() - reference.as_millis() - self.accumulated_pause_ms).max(0.0);
        let travelled = elapsed_ms / 1000.0 * old_effective;
        let new_elapsed_ms = travelled / self.config.effective_speed() * 1000.0;
        self.reference_ts = Some(Timestamp::from_millis(
            now.as_millis() - new_elapsed_ms - self.accumulated_pause_ms,
        ));
    }

    /// Step the configured speed by the slider increment, clamped to the
    /// slider range, applying it live when playing. Returns the new value.
    pub fn step_speed(&mut self, now: Timestamp, steps: i32) -> f64 {
        let target = (self.config.speed_px_per_sec + f64::from(steps) * SPEED_STEP_PX_PER_SEC)
            .clamp(MIN_STEP_SPEED_PX_PER_SEC, MAX_SPEED_PX_PER_SEC);
        self.change_speed_live(now, target);
        self.config.speed_px_per_sec
    }

    /// Play if stopped or paused, pause if playing. Returns whether the
    /// engine is playing afterwards.
    pub fn toggle(&mut self, now: Timestamp) -> bool {
        if self.phase == Phase::Playing {
            self.pause(now);
        } else {
            self.play(now);
        }
        self.phase == Phase::Playing
    }

    /// Advance to wall-clock `now`. The host calls this once per animation
    /// frame while playing; a call in any other phase mutates nothing, so a
    /// frame callback arriving late after a pause or reset is harmless.
    pub fn tick(&mut self, now: Timestamp) -> FrameResult {
        if self.phase != Phase::Playing {
            return FrameResult {
                offset: self.current_offset,
                finished: self.phase == Phase::Stopped,
            };
        }

        let cycle = self.extent.cycle_distance();
        if cycle <= 0.0 {
            // Degenerate geometry, e.g. a zero-size viewport before layout:
            // hold position rather than divide by zero.
            return FrameResult {
                offset: self.current_offset,
                finished: false,
            };
        }

        let reference = match self.reference_ts {
            Some(ts) => ts,
            None => {
                self.anchor_at_offset(now);
                return FrameResult {
                    offset: self.current_offset,
                    finished: false,
                };
            }
        };

        let elapsed_ms =
            (now.as_millis() - reference.as_millis() - self.accumulated_pause_ms).max(0.0);
        let distance = elapsed_ms / 1000.0 * self.config.effective_speed();

        if self.config.loop_enabled {
            let wrapped = distance.rem_euclid(cycle);
            self.current_offset = self.extent.viewport_size - wrapped;
            FrameResult {
                offset: self.current_offset,
                finished: false,
            }
        } else {
            let offset = self.extent.viewport_size - distance;
            if offset < -self.extent.text_size {
                // Text fully exited: freeze at the boundary and halt.
                self.phase = Phase::Stopped;
                self.current_offset = -self.extent.text_size;
                self.reference_ts = None;
                self.accumulated_pause_ms = 0.0;
                self.last_pause_ts = None;
                FrameResult {
                    offset,
                    finished: true,
                }
            } else {
                self.current_offset = offset;
                FrameResult {
                    offset,
                    finished: false,
                }
            }
        }
    }

    /// Anchor the timeline so that elapsed time at `now` reproduces
    /// `current_offset` exactly.
    fn anchor_at_offset(&mut self, now: Timestamp) {
        let travelled = self.distance_for_offset(self.current_offset);
        let elapsed_ms = travelled / self.config.effective_speed() * 1000.0;
        self.reference_ts = Some(Timestamp::from_millis(now.as_millis() - elapsed_ms));
        self.accumulated_pause_ms = 0.0;
        self.last_pause_ts = None;
        self.repositioned = false;
    }

    /// Distance travelled from home to reach `offset`, wrapped into one
    /// cycle in loop mode.
    fn distance_for_offset(&self, offset: f64) -> f64 {
        let raw = self.extent.viewport_size - offset;
        if self.config.loop_enabled {
            let cycle = self.extent.cycle_distance();
            if cycle > 0.0 {
                raw.rem_euclid(cycle)
            } else {
                0.0
            }
        } else {
            raw.max(0.0)
        }
    }
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

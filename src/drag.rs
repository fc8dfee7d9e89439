// Manual drag repositioning on top of the engine's seek/pause/play.
// Touch-down interrupts motion without counting as a user pause; touch-up
// resumes from wherever the text was dragged.

use crate::engine::ScrollEngine;
use crate::types::{Phase, Timestamp};

/// One drag gesture. Create on touch-down, feed cumulative deltas while the
/// finger moves, release on touch-up.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Offset at touch-down; deltas are applied relative to it.
    anchor_offset: f64,
    resume_on_release: bool,
}

impl DragSession {
    /// Capture the current offset and interrupt motion if playing.
    pub fn begin(engine: &mut ScrollEngine, now: Timestamp) -> Self {
        let resume_on_release = engine.phase() == Phase::Playing;
        if resume_on_release {
            engine.pause(now);
        }
        DragSession {
            anchor_offset: engine.current_offset(),
            resume_on_release,
        }
    }

    /// Apply the gesture's total delta as an absolute seek. Loop mode wraps
    /// through the cycle distance so dragging feels continuous; single-pass
    /// mode clamps at the travel boundaries.
    pub fn move_by(&self, engine: &mut ScrollEngine, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let extent = engine.extent();
        let target = self.anchor_offset + delta;
        let offset = if engine.config().loop_enabled {
            wrap_offset(target, extent.viewport_size, extent.text_size)
        } else {
            target.clamp(-extent.text_size, extent.viewport_size)
        };
        engine.seek(offset);
    }

    /// Finish the gesture; resume playback if the drag interrupted it.
    pub fn release(self, engine: &mut ScrollEngine, now: Timestamp) {
        if self.resume_on_release {
            engine.play(now);
        }
    }
}

/// Wrap an offset into the travel domain `(-text_size, viewport_size]`
/// through the cycle distance.
fn wrap_offset(offset: f64, viewport_size: f64, text_size: f64) -> f64 {
    let cycle = viewport_size + text_size;
    if cycle <= 0.0 {
        return offset;
    }
    viewport_size - (viewport_size - offset).rem_euclid(cycle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScrollConfig, ScrollExtent};

    fn engine(loop_enabled: bool) -> ScrollEngine {
        let mut engine = ScrollEngine::new(ScrollConfig {
            speed_px_per_sec: 100.0,
            loop_enabled,
            ..Default::default()
        });
        engine.update_extent(ScrollExtent::new(600.0, 200.0));
        engine
    }

    fn ts(ms: f64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn drag_while_playing_pauses_then_resumes() {
        let mut engine = engine(true);
        engine.play(ts(0.0));
        engine.tick(ts(1000.0));

        let drag = DragSession::begin(&mut engine, ts(1000.0));
        assert_eq!(engine.phase(), Phase::Paused);

        drag.move_by(&mut engine, -120.0);
        assert_eq!(engine.current_offset(), 380.0);

        drag.release(&mut engine, ts(2500.0));
        assert_eq!(engine.phase(), Phase::Playing);

        // Motion continues from the dragged offset, not the old trajectory.
        let frame = engine.tick(ts(2500.0));
        assert!((frame.offset - 380.0).abs() < 1e-6);
    }

    #[test]
    fn drag_while_paused_stays_paused_on_release() {
        let mut engine = engine(true);
        engine.play(ts(0.0));
        engine.tick(ts(1000.0));
        engine.pause(ts(1000.0));

        let drag = DragSession::begin(&mut engine, ts(1200.0));
        drag.move_by(&mut engine, 50.0);
        drag.release(&mut engine, ts(1400.0));
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.current_offset(), 550.0);
    }

    #[test]
    fn drag_wraps_in_loop_mode() {
        let mut engine = engine(true);
        // Home offset 600; dragging 300 px past home wraps through the
        // 800 px cycle to 100.
        let drag = DragSession::begin(&mut engine, ts(0.0));
        drag.move_by(&mut engine, 300.0);
        assert!((engine.current_offset() - 100.0).abs() < 1e-9);

        drag.move_by(&mut engine, -900.0);
        assert!((engine.current_offset() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn drag_clamps_in_single_pass_mode() {
        let mut engine = engine(false);
        let drag = DragSession::begin(&mut engine, ts(0.0));
        drag.move_by(&mut engine, 300.0);
        assert_eq!(engine.current_offset(), 600.0);

        drag.move_by(&mut engine, -2000.0);
        assert_eq!(engine.current_offset(), -200.0);
    }

    #[test]
    fn deltas_are_relative_to_the_anchor() {
        let mut engine = engine(true);
        engine.seek(400.0);
        let drag = DragSession::begin(&mut engine, ts(0.0));
        drag.move_by(&mut engine, -100.0);
        drag.move_by(&mut engine, -150.0);
        // Each delta is cumulative from touch-down, not from the last move.
        assert_eq!(engine.current_offset(), 250.0);
    }
}

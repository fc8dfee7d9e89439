// prompter_core: Beeprompter Rust/WASM scroll engine
// All timing "magic" lives here; JS is plumbing that measures the DOM,
// schedules animation frames, and assigns the strings handed back.

mod drag;
mod engine;
mod error;
mod render;
mod types;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub use drag::DragSession;
pub use engine::ScrollEngine;
pub use error::EngineError;
pub use render::Placement;
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, EngineError> {
    serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, EngineError> {
    Ok(serde_json::to_string(value)?)
}

/// Per-frame update handed to JS: the offset plus the ready-to-assign
/// transform and anchor, so the plumbing side is a property assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameUpdate {
    pub offset: f64,
    pub finished: bool,
    pub transform: String,
    pub anchor_px: f64,
}

/// Main prompter interface exposed to JavaScript.
///
/// One instance per prompter view. All timestamps are `performance.now()`
/// values in milliseconds; the host schedules (and cancels) the repeated
/// `tick` calls itself.
#[wasm_bindgen]
pub struct Prompter {
    engine: ScrollEngine,
    drag: Option<DragSession>,
}

#[wasm_bindgen]
impl Prompter {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Prompter, JsValue> {
        let config: ScrollConfig = from_json(config_json)?;
        Ok(Prompter {
            engine: ScrollEngine::new(config),
            drag: None,
        })
    }

    /// Merge a partial configuration update (JSON with any of `axis`,
    /// `speed_px_per_sec`, `loop_enabled`, `mirrored`). Layout-affecting
    /// changes must be followed by `set_extent` before the next frame.
    pub fn configure(&mut self, update_json: &str) -> Result<(), JsValue> {
        let update: ScrollConfigUpdate = from_json(update_json)?;
        self.engine.configure(update);
        Ok(())
    }

    /// Push freshly measured geometry. Call after any content, font, axis,
    /// or viewport change (including fullscreen and orientation), before
    /// the next animation frame.
    pub fn set_extent(&mut self, viewport_size: f64, text_size: f64) {
        self.engine
            .update_extent(ScrollExtent::new(viewport_size, text_size));
    }

    pub fn play(&mut self, now_ms: f64) {
        self.engine.play(Timestamp::from_millis(now_ms));
    }

    pub fn pause(&mut self, now_ms: f64) {
        self.engine.pause(Timestamp::from_millis(now_ms));
    }

    /// Play/pause toggle. Returns whether the engine is playing afterwards.
    pub fn toggle(&mut self, now_ms: f64) -> bool {
        self.engine.toggle(Timestamp::from_millis(now_ms))
    }

    /// Return to the home position, abandoning any drag in progress.
    pub fn reset(&mut self) {
        self.drag = None;
        self.engine.reset();
    }

    pub fn seek(&mut self, offset: f64) {
        self.engine.seek(offset);
    }

    /// Change speed seamlessly, mid-flight or not.
    pub fn set_speed(&mut self, now_ms: f64, speed_px_per_sec: f64) {
        self.engine
            .change_speed_live(Timestamp::from_millis(now_ms), speed_px_per_sec);
    }

    /// Step speed by the slider increment (signed step count), clamped to
    /// the slider range. Returns the new speed.
    pub fn step_speed(&mut self, now_ms: f64, steps: i32) -> f64 {
        self.engine.step_speed(Timestamp::from_millis(now_ms), steps)
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn current_offset(&self) -> f64 {
        self.engine.current_offset()
    }

    pub fn speed_px_per_sec(&self) -> f64 {
        self.engine.config().speed_px_per_sec
    }

    /// Touch-down: capture the drag anchor, interrupting motion if playing.
    pub fn begin_drag(&mut self, now_ms: f64) {
        self.drag = Some(DragSession::begin(
            &mut self.engine,
            Timestamp::from_millis(now_ms),
        ));
    }

    /// Finger moved: apply the cumulative delta since touch-down.
    pub fn drag_by(&mut self, delta: f64) {
        if let Some(drag) = &self.drag {
            drag.move_by(&mut self.engine, delta);
        }
    }

    /// Touch-up: finish the drag, resuming playback if it was interrupted.
    pub fn end_drag(&mut self, now_ms: f64) {
        if let Some(drag) = self.drag.take() {
            drag.release(&mut self.engine, Timestamp::from_millis(now_ms));
        }
    }

    /// Advance to `now` and return the frame update as JSON. The host stops
    /// scheduling once `finished` comes back true.
    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let frame = self.engine.tick(Timestamp::from_millis(now_ms));
        Ok(to_json(&self.frame_update(frame))?)
    }

    /// Frame update for the current offset without advancing time. Used to
    /// repaint while paused, stopped, or mid-drag.
    pub fn placement(&self) -> Result<String, JsValue> {
        let frame = FrameResult {
            offset: self.engine.current_offset(),
            finished: false,
        };
        Ok(to_json(&self.frame_update(frame))?)
    }
}

impl Prompter {
    fn frame_update(&self, frame: FrameResult) -> FrameUpdate {
        let placement =
            Placement::compute(self.engine.config(), self.engine.extent(), frame.offset);
        FrameUpdate {
            offset: frame.offset,
            finished: frame.finished,
            transform: placement.transform,
            anchor_px: placement.anchor_px,
        }
    }
}

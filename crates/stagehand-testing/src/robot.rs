//! Synthetic input robot: scripts mouse paths and touch sequences against a
//! stage, one frame at a time.

use stagehand_graphics::Point;
use stagehand_input::{RawMouse, RawTouch, TouchId, TouchPhase};
use stagehand_scene::Stage;

/// Wraps a [`Stage`] and feeds it synthetic frames.
///
/// Mouse state persists across frames the way a real pointer does: `move_to`
/// and `press`/`release` adjust it, [`step`](Self::step) samples it. Touches
/// queue for exactly one frame and are cleared after the step, so a held
/// contact needs a fresh `touch_move` (or `touch_stationary`) per frame —
/// the same contract a polling host gives the driver.
pub struct StageRobot {
    stage: Stage,
    cursor: Point,
    pressed: bool,
    touches: Vec<RawTouch>,
}

impl StageRobot {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            cursor: Point::ZERO,
            pressed: false,
            touches: Vec::new(),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cursor = Point::new(x, y);
        self
    }

    pub fn press(&mut self) -> &mut Self {
        self.pressed = true;
        self
    }

    pub fn release(&mut self) -> &mut Self {
        self.pressed = false;
        self
    }

    /// Move, press for one frame, release the next: three steps total.
    pub fn click(&mut self, x: f32, y: f32) -> &mut Self {
        self.move_to(x, y).step();
        self.press().step();
        self.release().step()
    }

    pub fn touch_begin(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        self.queue_touch(id, TouchPhase::Began, x, y)
    }

    pub fn touch_move(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        self.queue_touch(id, TouchPhase::Moved, x, y)
    }

    pub fn touch_stationary(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        self.queue_touch(id, TouchPhase::Stationary, x, y)
    }

    pub fn touch_end(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        self.queue_touch(id, TouchPhase::Ended, x, y)
    }

    pub fn touch_cancel(&mut self, id: TouchId, x: f32, y: f32) -> &mut Self {
        self.queue_touch(id, TouchPhase::Cancelled, x, y)
    }

    /// Advance one frame with the current mouse state and the queued
    /// touches, then clear the touch queue.
    pub fn step(&mut self) -> &mut Self {
        let mouse = RawMouse {
            position: self.cursor,
            pressed: self.pressed,
        };
        let touches = std::mem::take(&mut self.touches);
        self.stage.advance_frame(mouse, &touches);
        self
    }

    /// Step `n` frames with nothing changing.
    pub fn idle_frames(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.step();
        }
        self
    }

    fn queue_touch(&mut self, id: TouchId, phase: TouchPhase, x: f32, y: f32) -> &mut Self {
        self.touches.push(RawTouch {
            id,
            phase,
            position: Point::new(x, y),
        });
        self
    }
}

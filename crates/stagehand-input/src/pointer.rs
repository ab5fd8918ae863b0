//! Per-pointer state machines: one for the mouse, one per live touch.

use crate::driver::{RawTouch, TouchId, TouchPhase};
use crate::events::{PointerEvent, PointerEventKind};
use crate::node::InteractiveNode;
use indexmap::IndexMap;
use smallvec::SmallVec;
use stagehand_graphics::Point;

/// Events derived from one pointer in one frame, in dispatch order.
pub type EventBatch<N> = SmallVec<[PointerEvent<N>; 4]>;

/// What one pointer remembered from last frame.
///
/// `press_target` is `Some` only while `pressed` is true or during the frame
/// the release is being processed; `last_position` is `None` only before the
/// first sample.
pub struct PointerState<N: InteractiveNode> {
    hover_target: Option<N>,
    pressed: bool,
    press_target: Option<N>,
    last_position: Option<Point>,
}

impl<N: InteractiveNode> PointerState<N> {
    pub fn new() -> Self {
        Self {
            hover_target: None,
            pressed: false,
            press_target: None,
            last_position: None,
        }
    }

    pub fn hover_target(&self) -> Option<&N> {
        self.hover_target.as_ref()
    }

    pub fn press_target(&self) -> Option<&N> {
        self.press_target.as_ref()
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Forget the press without emitting anything. Used when the driver is
    /// disabled mid-press; the eventual release must not fire at a target
    /// captured before the disable.
    pub fn clear_press(&mut self) {
        self.press_target = None;
    }

    /// Re-seed from a raw sample without emitting events, so the first frame
    /// after an enable produces no spurious edges.
    pub fn reseed(&mut self, position: Point, pressed: bool, candidate: N) {
        self.hover_target = Some(candidate);
        self.pressed = pressed;
        self.press_target = None;
        self.last_position = Some(position);
    }

    /// Advance the mouse variant by one frame.
    ///
    /// `hit` is only invoked when the position or the button changed since
    /// last frame (plus once on the very first frame to seed the hover
    /// target); a stationary pointer with an unchanged button costs nothing.
    /// `None` from `hit` resolves to `root`, the implicit catch-all target.
    pub fn advance_mouse(
        &mut self,
        position: Point,
        pressed: bool,
        root: &N,
        mut hit: impl FnMut(Point) -> Option<N>,
    ) -> EventBatch<N> {
        let mut events = EventBatch::new();

        let hover = match self.hover_target.clone() {
            Some(node) => node,
            None => {
                let seeded = hit(position).unwrap_or_else(|| root.clone());
                self.hover_target = Some(seeded.clone());
                seeded
            }
        };

        let moved = self.last_position.map_or(false, |last| last != position);
        let button_changed = pressed != self.pressed;

        let candidate = if moved || button_changed {
            hit(position).unwrap_or_else(|| root.clone())
        } else {
            hover.clone()
        };

        if candidate.node_id() != hover.node_id() {
            // Entered/left are mutually exclusive with a move this frame.
            log::trace!(
                "mouse: target change {} -> {}",
                hover.node_id(),
                candidate.node_id()
            );
            events.push(PointerEvent::at(
                PointerEventKind::MouseOut,
                hover,
                position,
            ));
            events.push(PointerEvent::at(
                PointerEventKind::MouseOver,
                candidate.clone(),
                position,
            ));
        } else if moved {
            events.push(PointerEvent::at(
                PointerEventKind::MouseMove,
                candidate.clone(),
                position,
            ));
        }

        if pressed && !self.pressed {
            // Press edge addresses the current candidate, not the
            // pre-transition hover target.
            events.push(PointerEvent::at(
                PointerEventKind::MouseDown,
                candidate.clone(),
                position,
            ));
            self.press_target = Some(candidate.clone());
        } else if !pressed && self.pressed {
            events.push(PointerEvent::at(
                PointerEventKind::MouseUp,
                candidate.clone(),
                position,
            ));
            if let Some(press) = self.press_target.take() {
                if press.node_id() != candidate.node_id() {
                    log::trace!(
                        "mouse: release outside press target {}",
                        press.node_id()
                    );
                    events.push(PointerEvent::at(
                        PointerEventKind::ReleaseOutside,
                        press,
                        position,
                    ));
                }
            }
        }

        self.pressed = pressed;
        self.last_position = Some(position);
        self.hover_target = Some(candidate);
        events
    }
}

impl<N: InteractiveNode> Default for PointerState<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// One live touch: its state plus the mark bit for the end-of-frame sweep of
/// identifiers that vanished from the raw list without an end phase.
pub(crate) struct TouchRecord<N: InteractiveNode> {
    pub(crate) state: PointerState<N>,
    pub(crate) updated: bool,
}

/// Advance one touch sample against the live-touch table.
///
/// Touches have no hover model: phases map directly to events, every sample
/// hit-tests fresh, and a touch over empty space dispatches nothing (no root
/// fallback, unlike the mouse). Stationary touches re-dispatch `TouchMove`
/// every frame.
pub(crate) fn advance_touch<N: InteractiveNode>(
    table: &mut IndexMap<TouchId, TouchRecord<N>>,
    touch: &RawTouch,
    mut hit: impl FnMut(Point) -> Option<N>,
) -> Option<PointerEvent<N>> {
    let target = hit(touch.position);

    match touch.phase {
        TouchPhase::Began => {
            // A contact starting over empty space is not tracked at all; the
            // first sample that lands on a node is the one that matters.
            let node = target?;
            let mut state = PointerState::new();
            state.reseed(touch.position, true, node.clone());
            state.press_target = Some(node.clone());
            table.insert(touch.id, TouchRecord {
                state,
                updated: true,
            });
            Some(PointerEvent::at(
                PointerEventKind::TouchDown,
                node,
                touch.position,
            ))
        }
        TouchPhase::Moved | TouchPhase::Stationary => {
            if let Some(record) = table.get_mut(&touch.id) {
                record.state.last_position = Some(touch.position);
                record.state.hover_target = target.clone();
                record.updated = true;
            }
            target.map(|node| {
                PointerEvent::at(PointerEventKind::TouchMove, node, touch.position)
            })
        }
        TouchPhase::Ended | TouchPhase::Cancelled => {
            table.shift_remove(&touch.id);
            target.map(|node| {
                PointerEvent::at(PointerEventKind::TouchUp, node, touch.position)
            })
        }
    }
}

//! Records every pointer event delivered to chosen sprites.

use stagehand_graphics::Point;
use stagehand_input::{PointerEvent, PointerEventKind};
use stagehand_scene::Sprite;
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded delivery, identified by sprite names for readable asserts.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedEvent {
    pub kind: PointerEventKind,
    pub target: String,
    pub current_target: String,
    pub local: Point,
    pub stage: Point,
}

/// Attaches listeners for every event kind to chosen sprites and collects
/// deliveries into one shared, ordered log.
#[derive(Clone, Default)]
pub struct EventRecorder {
    rows: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every kind delivered to `sprite`.
    pub fn attach(&self, sprite: &Sprite) {
        for kind in PointerEventKind::ALL {
            let rows = Rc::clone(&self.rows);
            sprite.on(kind, move |event: &PointerEvent<Sprite>| {
                rows.borrow_mut().push(RecordedEvent {
                    kind: event.kind,
                    target: event.target.name(),
                    current_target: event.current_target.name(),
                    local: event.local_position,
                    stage: event.stage_position,
                });
            });
        }
    }

    pub fn rows(&self) -> Vec<RecordedEvent> {
        self.rows.borrow().clone()
    }

    /// Kind plus receiving sprite, in delivery order — the usual assert.
    pub fn kinds(&self) -> Vec<(PointerEventKind, String)> {
        self.rows
            .borrow()
            .iter()
            .map(|row| (row.kind, row.current_target.clone()))
            .collect()
    }

    /// Drain the log, returning what was recorded so far.
    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.rows.borrow_mut())
    }

    pub fn clear(&self) {
        self.rows.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

//! Typed pointer events and their fixed bubble flags.

use crate::node::InteractiveNode;
use stagehand_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Candidate target changed; fired at the new target.
    MouseOver,
    /// Candidate target changed; fired at the old target.
    MouseOut,
    /// Position changed, target unchanged.
    MouseMove,
    /// Press edge (released -> pressed).
    MouseDown,
    /// Release edge (pressed -> released).
    MouseUp,
    /// Release edge where the release target differs from the press target;
    /// fired at the press target (drag-cancel semantics).
    ReleaseOutside,
    /// Touch phase began.
    TouchDown,
    /// Touch phase ended or was cancelled.
    TouchUp,
    /// Touch phase moved or stationary.
    TouchMove,
}

impl PointerEventKind {
    /// Whether events of this kind walk the ancestor chain after the target.
    /// Fixed per kind, not configurable per event.
    pub fn bubbles(self) -> bool {
        match self {
            PointerEventKind::MouseOver
            | PointerEventKind::MouseOut
            | PointerEventKind::MouseMove => false,
            PointerEventKind::MouseDown
            | PointerEventKind::MouseUp
            | PointerEventKind::ReleaseOutside
            | PointerEventKind::TouchDown
            | PointerEventKind::TouchUp
            | PointerEventKind::TouchMove => true,
        }
    }

    pub const ALL: [PointerEventKind; 9] = [
        PointerEventKind::MouseOver,
        PointerEventKind::MouseOut,
        PointerEventKind::MouseMove,
        PointerEventKind::MouseDown,
        PointerEventKind::MouseUp,
        PointerEventKind::ReleaseOutside,
        PointerEventKind::TouchDown,
        PointerEventKind::TouchUp,
        PointerEventKind::TouchMove,
    ];
}

/// One dispatch record.
///
/// `target` is the node the event is addressed at and never changes;
/// `current_target` is rewritten per bubble hop so listeners on ancestors
/// can tell which node they were attached to.
#[derive(Clone, Debug)]
pub struct PointerEvent<N: InteractiveNode> {
    pub kind: PointerEventKind,
    pub target: N,
    pub current_target: N,
    pub local_position: Point,
    pub stage_position: Point,
}

impl<N: InteractiveNode> PointerEvent<N> {
    /// Build an event addressed at `target`, computing the local position
    /// against it.
    pub fn at(kind: PointerEventKind, target: N, stage_position: Point) -> Self {
        let local_position = target.global_to_local(stage_position);
        Self {
            kind,
            current_target: target.clone(),
            target,
            local_position,
            stage_position,
        }
    }

    pub fn bubbles(&self) -> bool {
        self.kind.bubbles()
    }
}

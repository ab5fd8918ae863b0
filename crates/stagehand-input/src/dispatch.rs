//! Event delivery with snapshot bubbling.

use crate::events::PointerEvent;
use crate::node::InteractiveNode;
use smallvec::SmallVec;

/// Deliver `event` at its target, then — for bubbling kinds — at each
/// ancestor root-ward.
///
/// The ancestor chain is snapshotted before any listener runs, so a listener
/// that restructures the graph mid-walk cannot corrupt the walk or cause a
/// node to be visited twice. Each hop checks `attached()`: delivery to a node
/// removed since capture is a silent no-op.
pub fn dispatch<N: InteractiveNode>(event: &PointerEvent<N>) {
    let mut chain: SmallVec<[N; 8]> = SmallVec::new();
    if event.bubbles() {
        let mut cursor = event.target.parent();
        while let Some(ancestor) = cursor {
            cursor = ancestor.parent();
            chain.push(ancestor);
        }
    }

    log::trace!(
        "dispatch {:?} at node {} ({} bubble hops)",
        event.kind,
        event.target.node_id(),
        chain.len()
    );

    if event.target.attached() {
        event.target.deliver(event);
    }

    for ancestor in chain {
        if !ancestor.attached() {
            continue;
        }
        let hop = PointerEvent {
            kind: event.kind,
            target: event.target.clone(),
            current_target: ancestor.clone(),
            local_position: ancestor.global_to_local(event.stage_position),
            stage_position: event.stage_position,
        };
        ancestor.deliver(&hop);
    }
}

//! The capability interface the input core depends on.

use crate::events::PointerEvent;
use stagehand_graphics::Point;

/// Stable identity for an interactive node. Used for set membership and
/// target-change comparisons, never for geometry.
pub type NodeId = u64;

/// A scene-graph node that can receive pointer input.
///
/// Implementors are expected to be cheap-clone handles (`Rc`-backed or
/// similar); the core clones them freely into pointer state, event records
/// and bubble-chain snapshots.
pub trait InteractiveNode: Clone {
    fn node_id(&self) -> NodeId;

    /// Ascending sort key for hit testing; lower depth is hit-tested first,
    /// i.e. lower depth means "in front".
    fn depth(&self) -> f32;

    /// Gate for hit testing. A non-clickable node is skipped entirely but
    /// stays registered.
    fn clickable(&self) -> bool;

    /// Coarse bounding check in stage space. Cheap; runs before
    /// [`hit_area`](Self::hit_area) so expensive shape tests only see
    /// plausible candidates.
    fn hit_bounds(&self, stage_point: Point) -> bool;

    /// Precise mouse-area check in stage space (rect, circle or polygon on
    /// the scene side).
    fn hit_area(&self, stage_point: Point) -> bool;

    /// Stage-space to local-space conversion.
    fn global_to_local(&self, stage_point: Point) -> Point;

    /// Parent reference, used for the bubble walk. `None` at the root.
    fn parent(&self) -> Option<Self>;

    /// False once the node has been removed from the graph; delivery to a
    /// detached node is a no-op.
    fn attached(&self) -> bool;

    /// Run this node's listeners for the event's kind. No listeners is a
    /// no-op.
    fn deliver(&self, event: &PointerEvent<Self>);
}

//! Topmost-node hit testing.

use crate::node::InteractiveNode;
use crate::registry::InteractiveRegistry;
use stagehand_graphics::Point;

/// Scan the depth-ordered list front-to-back and return the first node whose
/// mouse-sensitive area contains `stage_point`.
///
/// Two-stage check per candidate: the coarse `hit_bounds` AABB test gates the
/// precise `hit_area` shape test, so polygon/mesh tests only run on plausible
/// candidates. This runs once per pointer per frame and is the hot path.
///
/// `None` means nothing qualified; the mouse call site resolves that to the
/// root node, the touch call site drops the sample.
pub fn hit_test<N: InteractiveNode>(
    registry: &InteractiveRegistry<N>,
    stage_point: Point,
) -> Option<N> {
    for node in registry.iter() {
        if !node.clickable() {
            continue;
        }
        if !node.hit_bounds(stage_point) {
            continue;
        }
        if !node.hit_area(stage_point) {
            continue;
        }
        return Some(node.clone());
    }
    None
}

use stepgrid_core::Point;

use crate::engine::Status;
use crate::graph::GridGraph;

/// Walk predecessor links back from the goal and return `[start, ..., goal]`.
///
/// Returns an empty path unless `status` is [`Status::Found`].
pub(crate) fn reconstruct(graph: &GridGraph, status: Status) -> Vec<Point> {
    if status != Status::Found {
        return Vec::new();
    }
    let mut path = Vec::new();
    let mut next = Some(graph.goal_idx());
    while let Some(ci) = next {
        let node = &graph.nodes[ci];
        path.push(node.pos);
        next = node.predecessor;
    }
    path.reverse();
    path
}

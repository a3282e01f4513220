use crate::distance::manhattan;
use crate::graph::GridGraph;

/// Store the Manhattan distance to the graph's goal in every node.
///
/// On a 4-connected unit-cost grid this never overestimates the remaining
/// cost and is consistent, so A* pops the goal with its true distance.
pub(crate) fn compute_all(graph: &mut GridGraph) {
    let goal = graph.goal();
    for node in &mut graph.nodes {
        node.heuristic = manhattan(node.pos, goal);
    }
}

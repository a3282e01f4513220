//! The step engine: one frontier expansion per tick.

use std::fmt;

use stepgrid_core::Point;

use crate::frontier::{Discipline, Frontier};
use crate::graph::GridGraph;

/// Search algorithm used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Breadth-first search with a FIFO frontier.
    Bfs,
    /// Dijkstra: frontier ordered by distance from the start.
    Dijkstra,
    /// A*: frontier ordered by distance plus Manhattan estimate.
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

    fn discipline(self) -> Discipline {
        match self {
            Self::Bfs => Discipline::Fifo,
            Self::Dijkstra | Self::AStar => Discipline::MinKey,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bfs => f.write_str("BFS"),
            Self::Dijkstra => f.write_str("Dijkstra"),
            Self::AStar => f.write_str("A*"),
        }
    }
}

/// Engine state as seen by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No run has been started since the last reset.
    Idle,
    /// A run is in progress; keep ticking.
    Running,
    /// The goal was expanded; a path can be reconstructed.
    Found,
    /// The frontier ran dry without reaching the goal.
    NoPath,
}

impl Status {
    /// Whether the run has finished, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::NoPath)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("standby"),
            Self::Running => f.write_str("in progress"),
            Self::Found => f.write_str("path found"),
            Self::NoPath => f.write_str("no solution"),
        }
    }
}

/// Everything that belongs to a single run, apart from the per-node fields
/// stored in the graph.
pub(crate) struct EngineContext {
    algorithm: Algorithm,
    frontier: Frontier,
    status: Status,
    current: Option<usize>,
    ticks: usize,
}

/// Drives one search over a [`GridGraph`], one expansion per [`tick`].
///
/// The mutating entry points are crate-private: runs are started, advanced
/// and abandoned through [`RunController`](crate::RunController), which
/// owns the graph and guarantees a single active run.
///
/// [`tick`]: crate::RunController::tick
#[derive(Default)]
pub struct StepEngine {
    ctx: Option<EngineContext>,
}

impl StepEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the graph's search fields and seed the frontier with the start.
    ///
    /// The heuristic must already be current when `algorithm` is A*.
    pub(crate) fn begin(&mut self, graph: &mut GridGraph, algorithm: Algorithm) {
        graph.reset_search();
        let start = graph.start_idx();
        let mut frontier = Frontier::new(algorithm.discipline(), graph.len());

        let node = &mut graph.nodes[start];
        node.visited = true;
        node.distance = 0;
        if algorithm == Algorithm::AStar {
            node.frontier_score = node.heuristic;
        }
        frontier.push(start, key(algorithm, node.distance, node.frontier_score));

        self.ctx = Some(EngineContext {
            algorithm,
            frontier,
            status: Status::Running,
            current: None,
            ticks: 0,
        });
        log::debug!("{algorithm} run started from {}", graph.start());
    }

    /// Forget the current run. The caller resets the graph fields.
    pub(crate) fn clear(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            if ctx.status == Status::Running {
                log::debug!(
                    "{} run abandoned after {} ticks with {} pending",
                    ctx.algorithm,
                    ctx.ticks,
                    ctx.frontier.len()
                );
            }
        }
    }

    /// Perform one bounded unit of work and report the resulting status.
    ///
    /// Idle and terminal engines are left untouched and report their status.
    pub(crate) fn tick(&mut self, graph: &mut GridGraph) -> Status {
        let Some(ctx) = self.ctx.as_mut() else {
            return Status::Idle;
        };
        if ctx.status != Status::Running {
            return ctx.status;
        }

        let Some(ci) = ctx.frontier.pop() else {
            ctx.status = Status::NoPath;
            log::debug!(
                "{}: no path to {} after {} ticks",
                ctx.algorithm,
                graph.goal(),
                ctx.ticks
            );
            return ctx.status;
        };
        ctx.current = Some(ci);
        ctx.ticks += 1;

        let algorithm = ctx.algorithm;
        let current_dist = graph.nodes[ci].distance;
        graph.nodes[ci].expanded = true;
        log::trace!(
            "{algorithm} tick {}: expanding {} at distance {current_dist}",
            ctx.ticks,
            graph.nodes[ci].pos
        );

        let neighbors = std::mem::take(&mut graph.nodes[ci].neighbors);
        let tentative = current_dist + 1;
        for &ni in &neighbors {
            let n = &mut graph.nodes[ni];
            if n.wall {
                continue;
            }
            if !n.visited {
                n.visited = true;
                n.distance = tentative;
                n.predecessor = Some(ci);
                if algorithm == Algorithm::AStar {
                    n.frontier_score = tentative + n.heuristic;
                }
                ctx.frontier.push(ni, key(algorithm, n.distance, n.frontier_score));
            } else if algorithm != Algorithm::Bfs && tentative < n.distance {
                n.distance = tentative;
                n.predecessor = Some(ci);
                if algorithm == Algorithm::AStar {
                    n.frontier_score = tentative + n.heuristic;
                }
                ctx.frontier.decrease(ni, key(algorithm, n.distance, n.frontier_score));
            }
        }
        graph.nodes[ci].neighbors = neighbors;

        if ci == graph.goal_idx() {
            ctx.frontier.clear();
            ctx.status = Status::Found;
            log::debug!(
                "{algorithm}: reached {} at distance {current_dist} after {} ticks",
                graph.goal(),
                ctx.ticks
            );
        }
        ctx.status
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> Status {
        self.ctx.as_ref().map_or(Status::Idle, |c| c.status)
    }

    /// Algorithm of the current or last run, `None` when idle.
    #[inline]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.ctx.as_ref().map(|c| c.algorithm)
    }

    /// Flat index of the node expanded by the latest tick.
    #[inline]
    pub fn current_idx(&self) -> Option<usize> {
        self.ctx.as_ref().and_then(|c| c.current)
    }

    /// Number of nodes waiting in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.ctx.as_ref().map_or(0, |c| c.frontier.len())
    }

    /// Number of nodes expanded so far in this run.
    #[inline]
    pub fn ticks(&self) -> usize {
        self.ctx.as_ref().map_or(0, |c| c.ticks)
    }

    /// Whether flat index `idx` is waiting in the frontier.
    #[inline]
    pub fn in_frontier(&self, idx: usize) -> bool {
        self.ctx.as_ref().is_some_and(|c| c.frontier.contains(idx))
    }

    /// Position of the node expanded by the latest tick.
    pub fn current(&self, graph: &GridGraph) -> Option<Point> {
        self.current_idx()
            .and_then(|i| graph.node_at(i))
            .map(|n| n.pos())
    }
}

/// Frontier priority for a node under `algorithm`.
#[inline]
fn key(algorithm: Algorithm, distance: i32, frontier_score: i32) -> i32 {
    match algorithm {
        Algorithm::Bfs | Algorithm::Dijkstra => distance,
        Algorithm::AStar => frontier_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn open_grid(rows: i32, cols: i32, goal: Point) -> GridGraph {
        let mut rng = StdRng::seed_from_u64(11);
        GridGraph::build(rows, cols, 0.0, Point::ZERO, goal, &mut rng).unwrap()
    }

    fn run(engine: &mut StepEngine, graph: &mut GridGraph, algorithm: Algorithm) -> Status {
        if algorithm == Algorithm::AStar {
            heuristic::compute_all(graph);
        }
        engine.begin(graph, algorithm);
        loop {
            let status = engine.tick(graph);
            if status != Status::Running {
                return status;
            }
        }
    }

    #[test]
    fn idle_tick_is_noop() {
        let mut g = open_grid(3, 3, Point::new(2, 2));
        let mut e = StepEngine::new();
        assert_eq!(e.tick(&mut g), Status::Idle);
        assert_eq!(e.status(), Status::Idle);
        assert_eq!(e.algorithm(), None);
        assert!(g.nodes().iter().all(|n| !n.is_visited()));
    }

    #[test]
    fn begin_seeds_start() {
        let mut g = open_grid(3, 3, Point::new(2, 2));
        let mut e = StepEngine::new();
        e.begin(&mut g, Algorithm::Dijkstra);
        assert_eq!(e.status(), Status::Running);
        assert_eq!(e.frontier_len(), 1);
        assert_eq!(e.ticks(), 0);
        assert_eq!(e.current(&g), None);
        let start = g.node(Point::ZERO).unwrap();
        assert!(start.is_visited());
        assert_eq!(start.distance(), 0);
        assert!(e.in_frontier(0));
    }

    #[test]
    fn first_tick_expands_start() {
        let mut g = open_grid(3, 3, Point::new(2, 2));
        let mut e = StepEngine::new();
        e.begin(&mut g, Algorithm::Bfs);
        assert_eq!(e.tick(&mut g), Status::Running);
        assert_eq!(e.current(&g), Some(Point::ZERO));
        assert_eq!(e.frontier_len(), 2);
        for p in [Point::new(1, 0), Point::new(0, 1)] {
            let n = g.node(p).unwrap();
            assert!(n.is_visited());
            assert_eq!(n.distance(), 1);
            assert_eq!(n.predecessor(), Some(0));
        }
    }

    #[test]
    fn open_grid_distance_for_every_algorithm() {
        for algorithm in Algorithm::ALL {
            let mut g = open_grid(5, 5, Point::new(4, 4));
            let mut e = StepEngine::new();
            assert_eq!(run(&mut e, &mut g, algorithm), Status::Found, "{algorithm}");
            assert_eq!(g.node(Point::new(4, 4)).unwrap().distance(), 8, "{algorithm}");
            assert_eq!(e.frontier_len(), 0);
            assert_eq!(e.current(&g), Some(Point::new(4, 4)));
        }
    }

    #[test]
    fn astar_expands_fewer_nodes_than_bfs() {
        let goal = Point::new(10, 0);
        let mut g = open_grid(20, 20, goal);
        let mut e = StepEngine::new();
        run(&mut e, &mut g, Algorithm::Bfs);
        let bfs_ticks = e.ticks();
        run(&mut e, &mut g, Algorithm::AStar);
        let astar_ticks = e.ticks();
        assert!(astar_ticks < bfs_ticks, "A* {astar_ticks} vs BFS {bfs_ticks}");
        assert_eq!(astar_ticks, 11);
        assert_eq!(g.node(goal).unwrap().frontier_score(), 10);
    }

    #[test]
    fn terminal_tick_is_idempotent() {
        let mut g = open_grid(4, 4, Point::new(3, 3));
        let mut e = StepEngine::new();
        assert_eq!(run(&mut e, &mut g, Algorithm::Dijkstra), Status::Found);
        let ticks = e.ticks();
        let snapshot: Vec<_> = g
            .nodes()
            .iter()
            .map(|n| (n.is_visited(), n.distance(), n.predecessor()))
            .collect();
        for _ in 0..5 {
            assert_eq!(e.tick(&mut g), Status::Found);
        }
        assert_eq!(e.ticks(), ticks);
        let after: Vec<_> = g
            .nodes()
            .iter()
            .map(|n| (n.is_visited(), n.distance(), n.predecessor()))
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn walled_in_goal_reports_no_path() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = GridGraph::from_layout(
            "
            S....
            ...#.
            ..#G#
            ...#.
            ",
            &mut rng,
        )
        .unwrap();
        for algorithm in Algorithm::ALL {
            let mut e = StepEngine::new();
            assert_eq!(run(&mut e, &mut g, algorithm), Status::NoPath, "{algorithm}");
            assert!(!g.node(g.goal()).unwrap().is_visited());
            assert_eq!(e.tick(&mut g), Status::NoPath);
        }
    }

    #[test]
    fn start_equal_to_goal_is_found_immediately() {
        let mut g = open_grid(3, 3, Point::ZERO);
        let mut e = StepEngine::new();
        e.begin(&mut g, Algorithm::AStar);
        assert_eq!(e.tick(&mut g), Status::Found);
        assert_eq!(e.ticks(), 1);
        assert_eq!(g.node(Point::ZERO).unwrap().distance(), 0);
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut g = open_grid(3, 3, Point::new(2, 2));
        let mut e = StepEngine::new();
        e.begin(&mut g, Algorithm::Bfs);
        e.tick(&mut g);
        e.clear();
        assert_eq!(e.status(), Status::Idle);
        assert_eq!(e.frontier_len(), 0);
        assert_eq!(e.tick(&mut g), Status::Idle);
    }
}

use rand::Rng;
use stepgrid_core::Point;

use crate::engine::{Algorithm, Status, StepEngine};
use crate::error::GridError;
use crate::graph::GridGraph;
use crate::{heuristic, path};

/// Owns a [`GridGraph`] and the [`StepEngine`] searching it.
///
/// This is the only way to mutate a graph once searching starts: it refuses
/// to begin a run while another is in progress and locks the walls for the
/// duration of a run. A presentation layer calls [`start`](Self::start), then
/// [`tick`](Self::tick) once per frame, reading the graph between ticks.
pub struct RunController {
    graph: GridGraph,
    engine: StepEngine,
}

impl RunController {
    pub fn new(graph: GridGraph) -> Self {
        Self {
            graph,
            engine: StepEngine::new(),
        }
    }

    /// Begin a fresh run with `algorithm`.
    ///
    /// Returns `false` and changes nothing while a run is in progress.
    /// Otherwise any finished run is discarded, the per-node search state is
    /// reset, the A* heuristic is recomputed when needed, and the frontier is
    /// seeded with the start.
    pub fn start(&mut self, algorithm: Algorithm) -> bool {
        if self.engine.status() == Status::Running {
            log::warn!(
                "ignoring {algorithm} start: {} run in progress",
                self.engine.algorithm().map_or_else(String::new, |a| a.to_string())
            );
            return false;
        }
        self.engine.clear();
        if algorithm == Algorithm::AStar {
            heuristic::compute_all(&mut self.graph);
        }
        self.engine.begin(&mut self.graph, algorithm);
        true
    }

    /// Advance the current run by one expansion.
    ///
    /// Returns [`Status::Idle`] when no run was started. Once a run is
    /// terminal further ticks change nothing and repeat the final status.
    pub fn tick(&mut self) -> Status {
        self.engine.tick(&mut self.graph)
    }

    /// Tick until the run is terminal.
    ///
    /// A run expands each node at most once, so this takes at most one tick
    /// per node plus the final one that finds the frontier empty.
    pub fn run_to_end(&mut self) -> Status {
        for _ in 0..=self.graph.len() {
            let status = self.tick();
            if status != Status::Running {
                return status;
            }
        }
        self.engine.status()
    }

    /// Abandon any run and return to [`Status::Idle`] with baseline state.
    pub fn reset(&mut self) {
        self.engine.clear();
        self.graph.reset_search();
    }

    /// Toggle a wall between runs.
    ///
    /// Fails with [`GridError::Busy`] while a run is in progress. A change
    /// invalidates any finished run, so the controller returns to idle.
    pub fn set_wall(&mut self, p: Point, wall: bool, rng: &mut impl Rng) -> Result<bool, GridError> {
        self.ensure_not_running()?;
        let changed = self.graph.set_wall(p, wall, rng)?;
        if changed {
            self.reset();
        }
        Ok(changed)
    }

    /// Pick a fresh random neighbour order for every node, between runs.
    pub fn shuffle_adjacency(&mut self, rng: &mut impl Rng) -> Result<(), GridError> {
        self.ensure_not_running()?;
        self.reset();
        self.graph.build_adjacency(rng);
        Ok(())
    }

    fn ensure_not_running(&self) -> Result<(), GridError> {
        if self.engine.status() == Status::Running {
            log::warn!("grid modification rejected: search in progress");
            return Err(GridError::Busy);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    #[inline]
    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    #[inline]
    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.engine.status()
    }

    #[inline]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.engine.algorithm()
    }

    /// Cell expanded by the latest tick.
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.engine.current(&self.graph)
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.engine.frontier_len()
    }

    #[inline]
    pub fn ticks(&self) -> usize {
        self.engine.ticks()
    }

    /// Whether `p` is waiting in the frontier.
    pub fn in_frontier(&self, p: Point) -> bool {
        self.graph
            .index_of(p)
            .is_some_and(|i| self.engine.in_frontier(i))
    }

    /// The solution path `[start, ..., goal]`, empty unless the run is
    /// [`Status::Found`].
    pub fn path(&self) -> Vec<Point> {
        path::reconstruct(&self.graph, self.engine.status())
    }

    /// Length in edges of the shortest path, available once found.
    pub fn goal_distance(&self) -> Option<i32> {
        if self.engine.status() != Status::Found {
            return None;
        }
        self.graph.node(self.graph.goal()).map(|n| n.distance())
    }

    /// Give the graph back, dropping any run state.
    pub fn into_graph(mut self) -> GridGraph {
        self.reset();
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::UNREACHABLE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(21)
    }

    fn open(rows: i32, cols: i32, goal: Point) -> RunController {
        let g = GridGraph::build(rows, cols, 0.0, Point::ZERO, goal, &mut rng()).unwrap();
        RunController::new(g)
    }

    #[test]
    fn five_by_five_open_grid() {
        let mut rc = open(5, 5, Point::new(4, 4));
        for algorithm in Algorithm::ALL {
            assert!(rc.start(algorithm));
            assert_eq!(rc.run_to_end(), Status::Found);
            assert_eq!(rc.goal_distance(), Some(8), "{algorithm}");
            let path = rc.path();
            assert_eq!(path.len(), 9);
            assert_eq!(path.first(), Some(&Point::ZERO));
            assert_eq!(path.last(), Some(&Point::new(4, 4)));
        }
    }

    #[test]
    fn start_is_refused_while_running() {
        let mut rc = open(5, 5, Point::new(4, 4));
        assert!(rc.start(Algorithm::Bfs));
        rc.tick();
        let ticks = rc.ticks();
        let pending = rc.frontier_len();
        assert!(!rc.start(Algorithm::AStar));
        assert_eq!(rc.algorithm(), Some(Algorithm::Bfs));
        assert_eq!(rc.ticks(), ticks);
        assert_eq!(rc.frontier_len(), pending);
        assert_eq!(rc.status(), Status::Running);
    }

    #[test]
    fn restart_after_terminal_state() {
        let mut rc = open(4, 4, Point::new(3, 3));
        assert!(rc.start(Algorithm::Dijkstra));
        rc.run_to_end();
        assert!(rc.start(Algorithm::Bfs));
        assert_eq!(rc.status(), Status::Running);
        assert_eq!(rc.ticks(), 0);
        assert_eq!(rc.frontier_len(), 1);
        assert!(rc.in_frontier(Point::ZERO));
        let visited = rc.graph().nodes().iter().filter(|n| n.is_visited()).count();
        assert_eq!(visited, 1);
    }

    #[test]
    fn idle_operations_are_noops() {
        let mut rc = open(3, 3, Point::new(2, 2));
        assert_eq!(rc.status(), Status::Idle);
        assert_eq!(rc.tick(), Status::Idle);
        assert_eq!(rc.run_to_end(), Status::Idle);
        assert!(rc.path().is_empty());
        assert_eq!(rc.goal_distance(), None);
        assert_eq!(rc.current(), None);
    }

    #[test]
    fn reset_discards_run() {
        let mut rc = open(6, 6, Point::new(5, 5));
        rc.start(Algorithm::AStar);
        rc.tick();
        rc.tick();
        rc.reset();
        assert_eq!(rc.status(), Status::Idle);
        assert_eq!(rc.frontier_len(), 0);
        assert!(rc.path().is_empty());
        for n in rc.graph().nodes() {
            assert!(!n.is_visited());
            assert!(!n.is_expanded());
            assert_eq!(n.distance(), UNREACHABLE);
            assert_eq!(n.predecessor(), None);
        }
    }

    #[test]
    fn walls_are_locked_during_a_run() {
        let mut r = rng();
        let mut rc = open(4, 4, Point::new(3, 3));
        rc.start(Algorithm::Bfs);
        assert_eq!(rc.set_wall(Point::new(1, 1), true, &mut r), Err(GridError::Busy));
        assert_eq!(rc.shuffle_adjacency(&mut r), Err(GridError::Busy));
        assert!(!rc.graph().is_wall(Point::new(1, 1)));

        rc.run_to_end();
        assert_eq!(rc.set_wall(Point::new(1, 1), true, &mut r), Ok(true));
        assert_eq!(rc.status(), Status::Idle);
        assert!(rc.graph().is_wall(Point::new(1, 1)));
    }

    #[test]
    fn walling_off_the_goal_yields_no_path() {
        let mut r = rng();
        let mut rc = open(5, 5, Point::new(2, 2));
        for p in Point::new(2, 2).neighbors_4() {
            rc.set_wall(p, true, &mut r).unwrap();
        }
        for algorithm in Algorithm::ALL {
            rc.start(algorithm);
            assert_eq!(rc.run_to_end(), Status::NoPath, "{algorithm}");
            assert!(rc.path().is_empty());
            assert_eq!(rc.goal_distance(), None);
        }
    }

    #[test]
    fn start_equals_goal() {
        let mut rc = open(3, 3, Point::ZERO);
        rc.start(Algorithm::Bfs);
        assert_eq!(rc.tick(), Status::Found);
        assert_eq!(rc.path(), vec![Point::ZERO]);
        assert_eq!(rc.goal_distance(), Some(0));
    }

    #[test]
    fn current_tracks_latest_expansion() {
        let mut rc = open(3, 3, Point::new(2, 2));
        rc.start(Algorithm::Dijkstra);
        rc.tick();
        assert_eq!(rc.current(), Some(Point::ZERO));
        rc.tick();
        let cur = rc.current().unwrap();
        assert!(Point::ZERO.is_adjacent_4(cur));
        assert!(rc.graph().node(cur).unwrap().is_expanded());
        assert!(!rc.in_frontier(cur));
    }

    #[test]
    fn into_graph_resets() {
        let mut rc = open(3, 3, Point::new(2, 2));
        rc.start(Algorithm::Bfs);
        rc.run_to_end();
        let g = rc.into_graph();
        assert!(g.nodes().iter().all(|n| !n.is_visited()));
    }
}

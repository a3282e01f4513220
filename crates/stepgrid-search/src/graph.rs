//! The grid graph: node storage, wall assignment and adjacency.

use rand::Rng;
use rand::seq::SliceRandom;
use stepgrid_core::{Point, Range};

use crate::error::{Endpoint, GridError};
use crate::node::Node;

/// A fixed-size grid of [`Node`]s with designated start and goal cells.
///
/// Edges connect 4-directionally adjacent cells with unit cost. Every open
/// node keeps its in-bounds neighbours in a random order chosen at build
/// time; the order only affects tie-breaking, never path lengths. Wall
/// filtering happens when a node is expanded, so open nodes still list wall
/// neighbours.
#[derive(Debug, Clone)]
pub struct GridGraph {
    bounds: Range,
    pub(crate) nodes: Vec<Node>,
    start: usize,
    goal: usize,
}

impl GridGraph {
    /// Build a `rows × cols` grid where every cell is independently a wall
    /// with probability `wall_probability`.
    ///
    /// `start` and `goal` are given as points (`x` = column, `y` = row) and are
    /// always left open. They may coincide.
    pub fn build(
        rows: i32,
        cols: i32,
        wall_probability: f64,
        start: Point,
        goal: Point,
        rng: &mut impl Rng,
    ) -> Result<Self, GridError> {
        let bounds = grid_bounds(rows, cols)?;
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(GridError::InvalidWallProbability(wall_probability));
        }
        let start = locate(bounds, Endpoint::Start, start)?;
        let goal = locate(bounds, Endpoint::Goal, goal)?;

        let nodes = bounds
            .iter()
            .map(|p| Node::new(p, rng.random::<f64>() < wall_probability))
            .collect();
        Ok(Self::assemble(bounds, nodes, start, goal, rng))
    }

    /// Build a grid from an explicit row-major wall mask.
    pub fn from_walls(
        rows: i32,
        cols: i32,
        walls: &[bool],
        start: Point,
        goal: Point,
        rng: &mut impl Rng,
    ) -> Result<Self, GridError> {
        let bounds = grid_bounds(rows, cols)?;
        if walls.len() != bounds.len() {
            return Err(GridError::InconsistentLayout);
        }
        let start = locate(bounds, Endpoint::Start, start)?;
        let goal = locate(bounds, Endpoint::Goal, goal)?;

        let nodes = bounds
            .iter()
            .zip(walls)
            .map(|(p, &wall)| Node::new(p, wall))
            .collect();
        Ok(Self::assemble(bounds, nodes, start, goal, rng))
    }

    /// Build a grid from a text layout.
    ///
    /// Each non-blank line is one row. `#` is a wall, `.` is open, `S` marks
    /// the start, `G` the goal, and `*` a cell that is both. Leading and
    /// trailing whitespace on each line is ignored.
    pub fn from_layout(layout: &str, rng: &mut impl Rng) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = layout_extent(lines.len())?;
        let cols = layout_extent(lines.first().map_or(0, |l| l.chars().count()))?;
        let bounds = grid_bounds(rows, cols)?;

        let mut walls = Vec::with_capacity(bounds.len());
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            if layout_extent(line.chars().count())? != cols {
                return Err(GridError::InconsistentLayout);
            }
            let y = layout_extent(y)?;
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(layout_extent(x)?, y);
                match ch {
                    '#' => walls.push(true),
                    '.' => walls.push(false),
                    'S' | 'G' | '*' => {
                        if ch != 'G' {
                            mark(&mut start, Endpoint::Start, p)?;
                        }
                        if ch != 'S' {
                            mark(&mut goal, Endpoint::Goal, p)?;
                        }
                        walls.push(false);
                    }
                    _ => return Err(GridError::InvalidRune { ch, pos: p }),
                }
            }
        }

        let start = start.ok_or(GridError::MissingEndpoint(Endpoint::Start))?;
        let goal = goal.ok_or(GridError::MissingEndpoint(Endpoint::Goal))?;
        Self::from_walls(rows, cols, &walls, start, goal, rng)
    }

    fn assemble(
        bounds: Range,
        nodes: Vec<Node>,
        start: usize,
        goal: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let mut graph = Self {
            bounds,
            nodes,
            start,
            goal,
        };
        graph.nodes[start].wall = false;
        graph.nodes[goal].wall = false;
        graph.build_adjacency(rng);
        log::debug!(
            "built {}x{} grid: start {}, goal {}, {} walls",
            graph.rows(),
            graph.cols(),
            graph.start(),
            graph.goal(),
            graph.wall_count()
        );
        graph
    }

    /// Recompute every node's neighbour list with a fresh random order.
    pub fn build_adjacency(&mut self, rng: &mut impl Rng) {
        for idx in 0..self.nodes.len() {
            self.link(idx, rng);
        }
    }

    fn link(&mut self, idx: usize, rng: &mut impl Rng) {
        let mut neighbors = std::mem::take(&mut self.nodes[idx].neighbors);
        neighbors.clear();
        if !self.nodes[idx].wall {
            let pos = self.nodes[idx].pos;
            neighbors.extend(
                pos.neighbors_4()
                    .into_iter()
                    .filter_map(|n| self.bounds.index_of(n)),
            );
            neighbors.shuffle(rng);
        }
        self.nodes[idx].neighbors = neighbors;
    }

    /// Turn the cell at `p` into a wall or open it up.
    ///
    /// Returns whether anything changed. The start and goal cannot be walled.
    /// Callers holding a [`RunController`](crate::RunController) must go
    /// through [`RunController::set_wall`](crate::RunController::set_wall).
    pub fn set_wall(&mut self, p: Point, wall: bool, rng: &mut impl Rng) -> Result<bool, GridError> {
        let idx = self.bounds.index_of(p).ok_or(GridError::OutsideGrid(p))?;
        if wall && (idx == self.start || idx == self.goal) {
            return Err(GridError::EndpointWall(p));
        }
        if self.nodes[idx].wall == wall {
            return Ok(false);
        }
        self.nodes[idx].wall = wall;
        self.nodes[idx].reset();
        self.link(idx, rng);
        Ok(true)
    }

    /// Restore every node's per-run fields to baseline.
    pub(crate) fn reset_search(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.nodes[self.start].pos
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.nodes[self.goal].pos
    }

    #[inline]
    pub(crate) fn start_idx(&self) -> usize {
        self.start
    }

    #[inline]
    pub(crate) fn goal_idx(&self) -> usize {
        self.goal
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.bounds.index_of(p)
    }

    /// The node at `p`, or `None` if out of bounds.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.index_of(p).map(|i| &self.nodes[i])
    }

    /// The node at flat index `idx`.
    #[inline]
    pub fn node_at(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// All nodes in row-major order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Whether `p` is a wall. Out-of-bounds points count as walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.node(p).is_none_or(Node::is_wall)
    }

    pub fn wall_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.wall).count()
    }
}

fn grid_bounds(rows: i32, cols: i32) -> Result<Range, GridError> {
    if rows <= 0 || cols <= 0 {
        return Err(GridError::EmptyGrid { rows, cols });
    }
    Ok(Range::new(0, 0, cols, rows))
}

/// A layout line count or width as a grid coordinate.
fn layout_extent(n: usize) -> Result<i32, GridError> {
    i32::try_from(n).map_err(|_| GridError::InconsistentLayout)
}

fn locate(bounds: Range, endpoint: Endpoint, pos: Point) -> Result<usize, GridError> {
    bounds
        .index_of(pos)
        .ok_or(GridError::OutOfBounds { endpoint, pos })
}

fn mark(slot: &mut Option<Point>, endpoint: Endpoint, p: Point) -> Result<(), GridError> {
    if slot.replace(p).is_some() {
        return Err(GridError::DuplicateEndpoint(endpoint));
    }
    Ok(())
}

use stepgrid_core::Point;

/// Sentinel distance meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// One grid cell together with its per-run search fields.
///
/// The wall flag and adjacency are fixed while a search runs; everything else
/// is reset when a run starts.
/// Predecessors are flat indices into the owning graph, never references.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) pos: Point,
    pub(crate) wall: bool,
    pub(crate) neighbors: Vec<usize>,
    pub(crate) visited: bool,
    pub(crate) expanded: bool,
    pub(crate) distance: i32,
    pub(crate) predecessor: Option<usize>,
    pub(crate) heuristic: i32,
    pub(crate) frontier_score: i32,
}

impl Node {
    pub(crate) fn new(pos: Point, wall: bool) -> Self {
        Self {
            pos,
            wall,
            neighbors: Vec::new(),
            visited: false,
            expanded: false,
            distance: UNREACHABLE,
            predecessor: None,
            heuristic: 0,
            frontier_score: UNREACHABLE,
        }
    }

    /// Return the per-run fields to their baseline values.
    pub(crate) fn reset(&mut self) {
        self.visited = false;
        self.expanded = false;
        self.distance = UNREACHABLE;
        self.predecessor = None;
        self.frontier_score = UNREACHABLE;
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row()
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col()
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    /// Whether the node has been inserted into the frontier this run.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether the node has been popped and expanded this run.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Tentative distance from the start, or [`UNREACHABLE`].
    #[inline]
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Flat index of the node this one was reached from.
    #[inline]
    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    /// Manhattan distance to the goal, as of the last A* run.
    #[inline]
    pub fn heuristic(&self) -> i32 {
        self.heuristic
    }

    /// `distance + heuristic` for A*; [`UNREACHABLE`] otherwise.
    #[inline]
    pub fn frontier_score(&self) -> i32 {
        self.frontier_score
    }

    /// Flat indices of the in-bounds cardinal neighbours, in their fixed
    /// shuffled order. Empty for walls.
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }
}

use std::fmt;

use stepgrid_core::Point;

/// Which designated endpoint an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Invalid grid configuration, rejected before any search runs.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid has zero rows or zero columns.
    EmptyGrid { rows: i32, cols: i32 },
    /// An endpoint lies outside the grid.
    OutOfBounds { endpoint: Endpoint, pos: Point },
    /// A cell coordinate lies outside the grid.
    OutsideGrid(Point),
    /// Wall probability is not a finite value in `[0, 1]`.
    InvalidWallProbability(f64),
    /// Layout lines have different widths.
    InconsistentLayout,
    /// A layout character outside `#.SG*` was found.
    InvalidRune { ch: char, pos: Point },
    /// A layout does not designate the given endpoint.
    MissingEndpoint(Endpoint),
    /// A layout designates the given endpoint more than once.
    DuplicateEndpoint(Endpoint),
    /// Attempted to turn the start or goal cell into a wall.
    EndpointWall(Point),
    /// The grid cannot be modified while a search is running.
    Busy,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one cell, got {rows}x{cols}")
            }
            Self::OutOfBounds { endpoint, pos } => {
                write!(f, "{endpoint} {pos} is outside the grid")
            }
            Self::OutsideGrid(p) => write!(f, "cell {p} is outside the grid"),
            Self::InvalidWallProbability(p) => {
                write!(f, "wall probability {p} is not within [0, 1]")
            }
            Self::InconsistentLayout => f.write_str("layout: inconsistent line widths"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingEndpoint(e) => write!(f, "layout has no {e} cell"),
            Self::DuplicateEndpoint(e) => write!(f, "layout has more than one {e} cell"),
            Self::EndpointWall(p) => write!(f, "cannot place a wall on endpoint {p}"),
            Self::Busy => f.write_str("grid is locked while a search is running"),
        }
    }
}

impl std::error::Error for GridError {}

use rand::Rng;
use stepgrid_core::Point;

use crate::error::{Endpoint, GridError};
use crate::graph::GridGraph;

/// Parameters for building a random [`GridGraph`].
///
/// The default is the classic demo board: 40×40 cells, one wall in five,
/// start in the top-left corner and goal on the right edge six rows from the
/// bottom.
///
/// When deserialized, missing fields take their defaults for the configured
/// size, so `{"rows": 10, "cols": 10}` places the goal on that 10×10 board.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    /// Chance for each cell to become a wall, in `[0, 1]`.
    pub wall_probability: f64,
    /// Start cell (`x` = column, `y` = row).
    pub start: Point,
    /// Goal cell (`x` = column, `y` = row).
    pub goal: Point,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::with_size(40, 40)
    }
}

impl GridConfig {
    pub const DEFAULT_WALL_PROBABILITY: f64 = 0.2;

    /// A `rows × cols` board with the default wall probability and the
    /// default endpoint placement for that size.
    pub fn with_size(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            wall_probability: Self::DEFAULT_WALL_PROBABILITY,
            start: Point::ZERO,
            goal: default_goal(rows, cols),
        }
    }

    pub fn with_wall_probability(mut self, p: f64) -> Self {
        self.wall_probability = p;
        self
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    pub fn with_goal(mut self, goal: Point) -> Self {
        self.goal = goal;
        self
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(GridError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(GridError::InvalidWallProbability(self.wall_probability));
        }
        let in_bounds = |p: Point| p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows;
        if !in_bounds(self.start) {
            return Err(GridError::OutOfBounds {
                endpoint: Endpoint::Start,
                pos: self.start,
            });
        }
        if !in_bounds(self.goal) {
            return Err(GridError::OutOfBounds {
                endpoint: Endpoint::Goal,
                pos: self.goal,
            });
        }
        Ok(())
    }

    /// Build a random grid from this configuration.
    pub fn build(&self, rng: &mut impl Rng) -> Result<GridGraph, GridError> {
        GridGraph::build(
            self.rows,
            self.cols,
            self.wall_probability,
            self.start,
            self.goal,
            rng,
        )
    }
}

/// Serialized form of [`GridConfig`] where every field may be omitted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PartialGridConfig {
    rows: Option<i32>,
    cols: Option<i32>,
    wall_probability: Option<f64>,
    start: Option<Point>,
    goal: Option<Point>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GridConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let p = <PartialGridConfig as serde::Deserialize>::deserialize(deserializer)?;
        let base = Self::default();
        let mut cfg = Self::with_size(p.rows.unwrap_or(base.rows), p.cols.unwrap_or(base.cols));
        if let Some(w) = p.wall_probability {
            cfg.wall_probability = w;
        }
        if let Some(start) = p.start {
            cfg.start = start;
        }
        if let Some(goal) = p.goal {
            cfg.goal = goal;
        }
        Ok(cfg)
    }
}

/// Right edge, six rows up from the bottom; clamped onto small boards.
fn default_goal(rows: i32, cols: i32) -> Point {
    Point::from_row_col((rows - 6).max(0), (cols - 1).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_matches_demo_board() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.rows, 40);
        assert_eq!(cfg.cols, 40);
        assert_eq!(cfg.wall_probability, 0.2);
        assert_eq!(cfg.start, Point::ZERO);
        assert_eq!(cfg.goal, Point::from_row_col(34, 39));
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn small_boards_keep_goal_in_bounds() {
        let cfg = GridConfig::with_size(3, 4);
        assert_eq!(cfg.goal, Point::from_row_col(0, 3));
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn validate_matches_build() {
        let mut rng = StdRng::seed_from_u64(9);
        let bad = [
            GridConfig::with_size(0, 4),
            GridConfig::default().with_wall_probability(-0.1),
            GridConfig::default().with_goal(Point::new(40, 0)),
            GridConfig::default().with_start(Point::new(0, -1)),
        ];
        for cfg in bad {
            let err = cfg.validate().unwrap_err();
            assert_eq!(cfg.build(&mut rng).unwrap_err(), err);
        }
    }

    #[test]
    fn build_uses_configured_endpoints() {
        let mut rng = StdRng::seed_from_u64(9);
        let cfg = GridConfig::with_size(10, 12)
            .with_start(Point::new(2, 3))
            .with_goal(Point::new(11, 9));
        let g = cfg.build(&mut rng).unwrap();
        assert_eq!(g.start(), Point::new(2, 3));
        assert_eq!(g.goal(), Point::new(11, 9));
    }
}

//! Step-wise shortest-path search on randomly walled grids.
//!
//! This crate animates three classic searches one expansion at a time:
//!
//! - **BFS** with a first-in first-out frontier
//! - **Dijkstra** with a frontier ordered by distance from the start
//! - **A\*** with a frontier ordered by distance plus Manhattan estimate
//!
//! A [`GridGraph`] holds the cells, walls and fixed (shuffled) adjacency. A
//! [`RunController`] owns the graph, starts one run at a time and advances it
//! with [`RunController::tick`]. Between ticks a renderer reads
//! [`RunController::graph`] and the observable engine fields
//! ([`RunController::current`], [`RunController::frontier_len`]). Once the
//! status is [`Status::Found`], [`RunController::path`] returns the solution.
//!
//! ```
//! use rand::SeedableRng;
//! use stepgrid_search::{Algorithm, GridConfig, RunController, Status};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let graph = GridConfig::with_size(12, 12)
//!     .with_wall_probability(0.0)
//!     .build(&mut rng)
//!     .unwrap();
//! let mut rc = RunController::new(graph);
//! rc.start(Algorithm::AStar);
//! while rc.tick() == Status::Running {}
//! assert_eq!(rc.goal_distance(), Some(17));
//! ```

mod config;
mod controller;
mod distance;
mod engine;
mod error;
mod frontier;
mod graph;
mod heuristic;
mod node;
mod path;

pub use config::GridConfig;
pub use controller::RunController;
pub use distance::manhattan;
pub use engine::{Algorithm, Status, StepEngine};
pub use error::{Endpoint, GridError};
pub use graph::GridGraph;
pub use node::{Node, UNREACHABLE};
pub use stepgrid_core::{Point, Range};

//! **stepgrid-core** — geometry primitives shared by the stepgrid crates.
//!
//! Provides [`Point`] (a grid cell coordinate) and [`Range`] (a half-open
//! rectangle with row-major indexing).

pub mod geom;

pub use geom::{Point, Range, RangeIter};

//! Shortest obstacle-avoiding paths on a square grid.
//!
//! The core is [`algorithms::bfs::BreadthFirstSearch`]: breadth-first search
//! over the 8-connected grid with unit move cost. [`algorithms::find_path`]
//! wraps it as a single call. Everything else presents the result: console
//! narration in [`report`] and a PNG plot in [`render`].

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod planner;
pub mod render;
pub mod report;
pub mod scenario;
pub mod statistics;

pub use algorithms::common::{Path, PathfindingAlgorithm, SearchError, SearchStats};
pub use algorithms::find_path;
pub use error::{PlanError, PlanResult};
pub use grid::{Grid, Move, Position, MOVES};

pub mod a_star;
pub mod bfs;
pub mod common;
pub mod reference;

use crate::error::PlanResult;
use crate::grid::{Grid, Position};
use a_star::AStar;
use bfs::BreadthFirstSearch;
use clap::ValueEnum;
use common::{Path, PathfindingAlgorithm};
use reference::LibraryBfs;
use std::fmt;

/// Search strategies selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    AStar,
    LibraryBfs,
    /// Run every strategy on the same grid and compare.
    All,
}

impl Algorithm {
    pub const SINGLE: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::AStar, Algorithm::LibraryBfs];

    /// Builds the strategy; `All` has no single instance and yields `None`.
    pub fn create(self, max_visits: Option<usize>) -> Option<Box<dyn PathfindingAlgorithm>> {
        match self {
            Algorithm::Bfs => Some(match max_visits {
                Some(limit) => Box::new(BreadthFirstSearch::with_max_visits(limit)),
                None => Box::new(BreadthFirstSearch::new()),
            }),
            Algorithm::AStar => Some(Box::new(AStar::new())),
            Algorithm::LibraryBfs => Some(Box::new(LibraryBfs::new())),
            Algorithm::All => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Bfs => "bfs",
            Algorithm::AStar => "a-star",
            Algorithm::LibraryBfs => "library-bfs",
            Algorithm::All => "all",
        };
        f.write_str(name)
    }
}

/// Shortest path on a `grid_size` square grid avoiding `obstacles`.
///
/// This is the one operation the presentation layers depend on.
pub fn find_path<I>(grid_size: usize, start: Position, goal: Position, obstacles: I) -> PlanResult<Path>
where
    I: IntoIterator<Item = Position>,
{
    let grid = Grid::with_obstacles(grid_size, obstacles)?;
    let path = BreadthFirstSearch::new().find_path(&grid, start, goal)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::common::SearchError;
    use crate::error::PlanError;

    #[test]
    fn find_path_reference_case() {
        let path = find_path(
            4,
            Position::new(0, 0),
            Position::new(3, 3),
            [(1, 1), (1, 2), (2, 2)].into_iter().map(Position::from),
        )
        .unwrap();
        assert_eq!(path.move_count(), 4);
    }

    #[test]
    fn find_path_surfaces_search_errors() {
        let err = find_path(3, Position::new(0, 0), Position::new(5, 5), []).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Search(SearchError::InvalidGoal(p)) if p == Position::new(5, 5)
        ));
        assert!(matches!(
            find_path(0, Position::new(0, 0), Position::new(0, 0), []),
            Err(PlanError::InvalidGridSize)
        ));
    }

    #[test]
    fn every_single_algorithm_can_be_built() {
        for algorithm in Algorithm::SINGLE {
            let built = algorithm.create(None).unwrap();
            assert_eq!(built.name(), algorithm.to_string());
        }
        assert!(Algorithm::All.create(None).is_none());
    }
}

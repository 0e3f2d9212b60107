use crate::algorithms::common::{
    successors, validate_endpoints, Path, PathfindingAlgorithm, SearchError,
};
use crate::grid::{Grid, Position};
use pathfinding::prelude::astar;

/// Implements the A* pathfinding algorithm using the `pathfinding` crate.
#[derive(Default)]
pub struct AStar;

impl AStar {
    /// Creates a new instance of the A* algorithm provider.
    pub fn new() -> Self {
        AStar
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a-star"
    }

    /// Finds a shortest path with A*.
    ///
    /// Chebyshev distance is the heuristic: with unit-cost diagonals it is
    /// the exact cost on an empty grid, so it never overestimates.
    fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<Path, SearchError> {
        validate_endpoints(grid, start, goal)?;

        let result = astar(
            &start,
            |p| successors(grid, p),
            |p| p.chebyshev(goal),
            |p| *p == goal,
        );

        // `astar` yields `(path, cost)`; the cost is just the move count.
        result
            .map(|(cells, _)| Path::from_cells(cells))
            .ok_or(SearchError::Unreachable { start, goal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs::BreadthFirstSearch;

    #[test]
    fn agrees_with_bfs_on_length() {
        let grid = Grid::with_obstacles(
            8,
            [(3, 0), (3, 1), (3, 2), (3, 3), (3, 4), (3, 5), (5, 7), (5, 6), (5, 5), (5, 4), (5, 3)]
                .into_iter()
                .map(Position::from),
        )
        .unwrap();
        let start = Position::new(0, 0);
        let goal = Position::new(7, 0);

        let a = AStar::new().find_path(&grid, start, goal).unwrap();
        let b = BreadthFirstSearch::new().find_path(&grid, start, goal).unwrap();
        assert_eq!(a.move_count(), b.move_count());
        assert_eq!(a.start(), start);
        assert_eq!(a.goal(), goal);
    }

    #[test]
    fn rejects_blocked_goal() {
        let grid = Grid::with_obstacles(3, [Position::new(2, 2)]).unwrap();
        assert_eq!(
            AStar::new().find_path(&grid, Position::new(0, 0), Position::new(2, 2)),
            Err(SearchError::InvalidGoal(Position::new(2, 2)))
        );
    }
}

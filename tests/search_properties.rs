//! Randomized checks of the breadth-first search against a brute-force
//! distance table.

use proptest::prelude::*;
use robot_path_planning::algorithms::a_star::AStar;
use robot_path_planning::algorithms::bfs::BreadthFirstSearch;
use robot_path_planning::algorithms::reference::{distances_from, LibraryBfs};
use robot_path_planning::{Grid, Move, PathfindingAlgorithm, Position, SearchError};
use std::collections::HashSet;

fn scenario() -> impl Strategy<Value = (usize, Vec<(i32, i32)>, (i32, i32), (i32, i32))> {
    (1usize..8).prop_flat_map(|size| {
        let n = size as i32;
        (
            Just(size),
            prop::collection::vec((0..n, 0..n), 0..(size * size)),
            (-1..=n, -1..=n),
            (-1..=n, -1..=n),
        )
    })
}

proptest! {
    #[test]
    fn bfs_paths_are_safe_adjacent_and_minimal(
        (size, obstacles, start, goal) in scenario()
    ) {
        let grid = Grid::with_obstacles(size, obstacles.into_iter().map(Position::from)).unwrap();
        let (start, goal) = (Position::from(start), Position::from(goal));
        let result = BreadthFirstSearch::new().find_path(&grid, start, goal);

        if !grid.is_safe(start) {
            prop_assert_eq!(result, Err(SearchError::InvalidStart(start)));
            return Ok(());
        }
        if !grid.is_safe(goal) {
            prop_assert_eq!(result, Err(SearchError::InvalidGoal(goal)));
            return Ok(());
        }

        let table = distances_from(&grid, start);
        match (result, table.get(goal)) {
            (Ok(path), Some(distance)) => {
                prop_assert_eq!(path.move_count(), distance);
                prop_assert_eq!(path.start(), start);
                prop_assert_eq!(path.goal(), goal);
                for cell in path.cells() {
                    prop_assert!(grid.is_safe(*cell));
                }
                for pair in path.cells().windows(2) {
                    prop_assert!(Move::between(pair[0], pair[1]).is_some());
                }
                let unique: HashSet<_> = path.cells().iter().collect();
                prop_assert_eq!(unique.len(), path.len());
            }
            (Err(SearchError::Unreachable { .. }), None) => {}
            (other, distance) => {
                prop_assert!(false, "bfs gave {:?} but brute force says {:?}", other, distance);
            }
        }
    }

    #[test]
    fn bfs_is_deterministic((size, obstacles, start, goal) in scenario()) {
        let grid = Grid::with_obstacles(size, obstacles.into_iter().map(Position::from)).unwrap();
        let (start, goal) = (Position::from(start), Position::from(goal));
        let first = BreadthFirstSearch::new().find_path(&grid, start, goal);
        let second = BreadthFirstSearch::new().find_path(&grid, start, goal);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn all_algorithms_agree_on_move_count((size, obstacles, start, goal) in scenario()) {
        let grid = Grid::with_obstacles(size, obstacles.into_iter().map(Position::from)).unwrap();
        let (start, goal) = (Position::from(start), Position::from(goal));

        let lengths = |algorithm: &mut dyn PathfindingAlgorithm| {
            algorithm.find_path(&grid, start, goal).map(|p| p.move_count())
        };
        let bfs = lengths(&mut BreadthFirstSearch::new());
        prop_assert_eq!(&bfs, &lengths(&mut AStar::new()));
        prop_assert_eq!(&bfs, &lengths(&mut LibraryBfs::new()));
    }
}

#[test]
fn open_grid_path_is_chebyshev_long() {
    let grid = Grid::new(9).unwrap();
    let start = Position::new(1, 7);
    let goal = Position::new(8, 2);
    let path = BreadthFirstSearch::new().find_path(&grid, start, goal).unwrap();
    assert_eq!(path.move_count() as u32, start.chebyshev(goal));
}

#[test]
fn budget_exceeded_never_returns_partial_path() {
    let grid = Grid::new(30).unwrap();
    let mut bfs = BreadthFirstSearch::with_max_visits(50);
    let result = bfs.find_path(&grid, Position::new(0, 0), Position::new(29, 29));
    assert_eq!(result, Err(SearchError::BudgetExceeded { limit: 50 }));
    assert_eq!(bfs.last_stats().unwrap().expanded, 51);
}

use crate::error::{PlanError, PlanResult};
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;

/// A cell on the grid. Coordinates are signed so that neighbors falling off
/// the edge can still be represented and rejected by `Grid::is_safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(self, mv: Move) -> Position {
        let (dx, dy) = mv.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance, the exact move count on an empty 8-connected grid.
    pub fn chebyshev(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = PlanError;

    /// Accepts `x,y` with optional surrounding parentheses and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (x, y) = trimmed
            .split_once(',')
            .ok_or_else(|| PlanError::InvalidPosition(s.to_string()))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| PlanError::InvalidPosition(s.to_string()))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| PlanError::InvalidPosition(s.to_string()))?;
        Ok(Position { x, y })
    }
}

/// One of the eight unit-cost moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    DownLeft,
    UpLeft,
    DownRight,
    UpRight,
}

/// Canonical expansion order. Breadth-first search breaks ties between
/// equally short paths by this order, so changing it changes which path
/// comes back.
pub const MOVES: [Move; 8] = [
    Move::Up,
    Move::Down,
    Move::Left,
    Move::Right,
    Move::DownLeft,
    Move::UpLeft,
    Move::DownRight,
    Move::UpRight,
];

impl Move {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (0, 1),
            Move::Down => (0, -1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::DownLeft => (-1, -1),
            Move::UpLeft => (-1, 1),
            Move::DownRight => (1, -1),
            Move::UpRight => (1, 1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// The move taking `from` to `to`, if they are adjacent.
    pub fn between(from: Position, to: Position) -> Option<Move> {
        let delta = (to.x - from.x, to.y - from.y);
        MOVES.into_iter().find(|mv| mv.delta() == delta)
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
            Move::DownLeft => "down-left",
            Move::UpLeft => "up-left",
            Move::DownRight => "down-right",
            Move::UpRight => "up-right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Square grid of side `size` with a set of blocked cells.
#[derive(Debug, Clone)]
pub struct Grid {
    pub size: usize,
    obstacles: FxHashSet<Position>,
}

impl Grid {
    pub fn new(size: usize) -> PlanResult<Self> {
        if size == 0 || size > i32::MAX as usize {
            return Err(PlanError::InvalidGridSize);
        }
        Ok(Grid {
            size,
            obstacles: FxHashSet::default(),
        })
    }

    /// Builds a grid with the given obstacles. Obstacles outside the bounds
    /// are kept but never matter.
    pub fn with_obstacles<I>(size: usize, obstacles: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut grid = Grid::new(size)?;
        grid.obstacles.extend(obstacles);
        Ok(grid)
    }

    pub fn add_obstacle(&mut self, pos: Position) -> bool {
        self.obstacles.insert(pos)
    }

    pub fn obstacles(&self) -> &FxHashSet<Position> {
        &self.obstacles
    }

    /// Obstacles in a stable order, for printing and drawing.
    pub fn sorted_obstacles(&self) -> Vec<Position> {
        let mut sorted: Vec<Position> = self.obstacles.iter().copied().collect();
        sorted.sort();
        sorted
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = self.size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// A cell is safe iff it lies inside the grid and is not blocked.
    pub fn is_safe(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.obstacles.contains(&pos)
    }

    /// Safe neighbors of `pos` in canonical move order.
    pub fn get_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        MOVES
            .into_iter()
            .map(move |mv| pos.step(mv))
            .filter(move |next| self.is_safe(*next))
    }

    /// Every safe cell, row by row from the bottom.
    pub fn safe_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| Position { x, y }))
            .filter(move |p| self.is_safe(*p))
    }

    /// Text picture of the grid, top row first so that y grows upward like
    /// the rendered plot.
    pub fn ascii(&self, start: Position, goal: Position, path: Option<&[Position]>) -> String {
        let on_path: FxHashSet<Position> = path.unwrap_or(&[]).iter().copied().collect();
        let mut out = String::from("Legend: S=Start, G=Goal, *=Path, #=Obstacle, .=Free\n");

        for y in (0..self.size as i32).rev() {
            out.push_str(&format!("{:2} ", y));
            for x in 0..self.size as i32 {
                let pos = Position { x, y };
                let ch = if pos == start {
                    'S'
                } else if pos == goal {
                    'G'
                } else if self.is_obstacle(pos) {
                    '#'
                } else if on_path.contains(&pos) {
                    '*'
                } else {
                    '.'
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }

        out.push_str("   ");
        for x in 0..self.size {
            out.push_str(&format!("{} ", x % 10));
        }
        out.push('\n');
        out
    }
}

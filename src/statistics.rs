use crate::algorithms::common::{Path, SearchStats};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Statistics {
    pub total_moves: usize,
    pub straight_moves: usize,
    pub diagonal_moves: usize,
    pub num_obstacles: usize,
    /// Moves needed on the same grid with no obstacles at all.
    pub unobstructed_length: usize,
    pub route_efficiency: f64,
    pub search: Option<SearchStats>,
}

impl Statistics {
    pub fn new(path: &Path, num_obstacles: usize, search: Option<SearchStats>) -> Self {
        let diagonal_moves = path.steps().filter(|(_, _, mv)| mv.is_diagonal()).count();
        let total_moves = path.move_count();
        let mut stats = Statistics {
            total_moves,
            straight_moves: total_moves - diagonal_moves,
            diagonal_moves,
            num_obstacles,
            unobstructed_length: path.start().chebyshev(path.goal()) as usize,
            route_efficiency: 0.0,
            search,
        };
        stats.calculate_efficiency();
        stats
    }

    /// Ratio of moves taken to the obstacle-free lower bound; 1.0 means the
    /// obstacles cost nothing.
    pub fn calculate_efficiency(&mut self) {
        if self.total_moves > 0 && self.unobstructed_length > 0 {
            self.route_efficiency = self.total_moves as f64 / self.unobstructed_length as f64;
        } else {
            self.route_efficiency = 1.0;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Moves: {}", self.total_moves)?;
        writeln!(f, "  Straight: {}", self.straight_moves)?;
        writeln!(f, "  Diagonal: {}", self.diagonal_moves)?;
        writeln!(f, "Unobstructed Path Length: {}", self.unobstructed_length)?;
        writeln!(f, "Number of Obstacles: {}", self.num_obstacles)?;
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        if let Some(search) = self.search {
            writeln!(f, "Cells Expanded: {}", search.expanded)?;
            writeln!(f, "Cells Enqueued: {}", search.enqueued)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        TimingData::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.find_path_times.push(elapsed);
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::ZERO
        } else {
            self.find_path_times.iter().sum::<Duration>() / self.find_path_times.len() as u32
        }
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }
}

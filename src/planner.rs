use crate::algorithms::common::{Path, PathfindingAlgorithm, SearchError};
use crate::algorithms::reference;
use crate::algorithms::Algorithm;
use crate::config::Config;
use crate::error::{PlanError, PlanResult};
use crate::render;
use crate::report;
use crate::scenario::Scenario;
use crate::statistics::{Statistics, TimingData};
use log::{debug, info, warn};
use std::time::Instant;

/// Result of running one algorithm on a scenario.
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub name: String,
    pub outcome: Result<Path, SearchError>,
    pub statistics: Option<Statistics>,
    pub timing_data: TimingData,
    /// Outcome of the brute-force length check; `None` unless `--verify`.
    pub verified: Option<bool>,
}

impl AlgorithmResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub struct Planner {
    config: Config,
    scenario: Scenario,
}

impl Planner {
    pub fn new(config: Config) -> PlanResult<Self> {
        let scenario = Scenario::from_config(&config)?;
        Ok(Planner { config, scenario })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Run one algorithm, timing the search and collecting statistics.
    pub fn run_algorithm(&self, algorithm: &mut dyn PathfindingAlgorithm) -> AlgorithmResult {
        let mut timing_data = TimingData::new();
        let started = Instant::now();
        let outcome = algorithm.find_path(&self.scenario.grid, self.scenario.start, self.scenario.goal);
        timing_data.record(started.elapsed());

        let statistics = outcome.as_ref().ok().map(|path| {
            Statistics::new(path, self.scenario.grid.obstacles().len(), algorithm.last_stats())
        });
        debug!(
            "{}: {:?} in {:.2?}",
            algorithm.name(),
            outcome.as_ref().map(|p| p.move_count()),
            timing_data.average_find_path_time()
        );

        AlgorithmResult {
            name: algorithm.name().to_string(),
            outcome,
            statistics,
            timing_data,
            verified: None,
        }
    }

    /// Plan with the configured algorithm, narrate, and render.
    ///
    /// "No path" is a normal outcome and is returned as `Ok(result)` with a
    /// failed `outcome`; invalid endpoints and exhausted budgets are errors.
    pub fn run(&self) -> PlanResult<AlgorithmResult> {
        let mut algorithm = self
            .config
            .algorithm
            .create(self.config.max_visits)
            .ok_or_else(|| PlanError::Scenario("'all' is not a single algorithm".to_string()))?;

        let mut result = self.run_algorithm(algorithm.as_mut());
        match &result.outcome {
            Ok(path) if self.config.verify => result.verified = Some(self.verify_minimal(path)),
            Ok(_) | Err(SearchError::Unreachable { .. }) => {}
            Err(other) => return Err(PlanError::Search(other.clone())),
        }

        print!("{}", self.narrate(&result));

        if let (Ok(path), false) = (&result.outcome, self.config.no_render) {
            render::save_plot(&self.scenario, path, self.config.cell_px, &self.config.output)?;
            if !self.config.quiet {
                println!("\nPlot saved as {}", self.config.output.display());
            }
        }

        Ok(result)
    }

    /// Console text for a finished run. Empty under `--quiet` unless the
    /// grid picture was asked for.
    pub fn narrate(&self, result: &AlgorithmResult) -> String {
        let mut out = String::new();
        if !self.config.quiet {
            out.push_str(&report::banner(&self.scenario));
            out.push('\n');
            match &result.outcome {
                Ok(path) => {
                    out.push_str(&report::path_report(&self.scenario, path));
                    if let Some(stats) = &result.statistics {
                        out.push_str("\n=== STATISTICS ===\n");
                        out.push_str(&stats.to_string());
                    }
                }
                Err(_) => out.push_str(&report::unreachable_report(
                    self.scenario.start,
                    self.scenario.goal,
                )),
            }
        }
        if self.config.print_grid {
            let path = result.outcome.as_ref().ok().map(|p| p.cells());
            out.push('\n');
            out.push_str(&self.scenario.grid.ascii(self.scenario.start, self.scenario.goal, path));
        }
        out
    }

    /// Cross-check the returned length against the brute-force distance table.
    fn verify_minimal(&self, path: &Path) -> bool {
        let table = reference::distances_from(&self.scenario.grid, self.scenario.start);
        match table.get(self.scenario.goal) {
            Some(distance) if distance == path.move_count() => {
                debug!("path length {} confirmed minimal", distance);
                true
            }
            other => {
                warn!(
                    "path has {} moves but brute-force distance is {:?}",
                    path.move_count(),
                    other
                );
                false
            }
        }
    }

    /// Run every algorithm on the same scenario.
    pub fn run_all_algorithms(&self) -> Vec<AlgorithmResult> {
        let mut results = Vec::new();
        info!(
            "Running comparison of {} algorithms on a {}x{} grid",
            Algorithm::SINGLE.len(),
            self.scenario.grid.size,
            self.scenario.grid.size
        );

        for algorithm in Algorithm::SINGLE {
            if let Some(mut instance) = algorithm.create(self.config.max_visits) {
                let result = self.run_algorithm(instance.as_mut());
                info!("Completed: {} - Success: {}", result.name, result.success());
                results.push(result);
            }
        }
        results
    }

    /// Print comparison results in a table.
    pub fn print_comparison_results(results: &[AlgorithmResult]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===\n");
        println!(
            "{:<14} {:<8} {:<8} {:<10} {:<10} {:<15}",
            "Algorithm", "Success", "Moves", "Expanded", "Enqueued", "Find Path"
        );
        println!("{}", "-".repeat(68));

        for result in results {
            let success_str = if result.success() { "yes" } else { "no" };
            let moves = result
                .outcome
                .as_ref()
                .map(|p| p.move_count().to_string())
                .unwrap_or_else(|_| "-".to_string());
            let search = result.statistics.as_ref().and_then(|s| s.search);
            let expanded = search.map_or("-".to_string(), |s| s.expanded.to_string());
            let enqueued = search.map_or("-".to_string(), |s| s.enqueued.to_string());
            println!(
                "{:<14} {:<8} {:<8} {:<10} {:<10} {:<15}",
                result.name,
                success_str,
                moves,
                expanded,
                enqueued,
                format!("{:.2?}", result.timing_data.average_find_path_time())
            );
        }

        let lengths: Vec<usize> = results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|p| p.move_count()))
            .collect();
        println!();
        match (lengths.iter().min(), lengths.iter().max()) {
            (Some(min), Some(max)) if min == max => {
                println!("All successful algorithms agree on {} moves", min)
            }
            (Some(min), Some(max)) => {
                println!("Move counts disagree: {} to {}", min, max)
            }
            _ => println!("No algorithm reached the goal."),
        }
    }
}

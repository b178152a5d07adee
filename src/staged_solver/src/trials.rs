use std::{fmt, iter};

use log::info;
use pyraminx_core::PuzzleState;

use crate::{
    ConfigurationError, GeneticSearch, SolveStatus, SolverConfig, StagedSolver, success, working,
};

/// One complete solve of one puzzle, reduced to the numbers worth comparing
/// across repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub seed: Option<u64>,
    pub status: SolveStatus,
    pub solution_length: usize,
    pub expanded_length: usize,
    pub generations: usize,
}

impl Trial {
    /// Solve `start` with a fresh genetic search built from `config`.
    ///
    /// # Errors
    ///
    /// Fails if `config` doesn't describe a valid stage plan.
    pub fn run(start: &PuzzleState, config: &SolverConfig) -> Result<Self, ConfigurationError> {
        let mut solver = StagedSolver::new(start, config)?;
        let mut engine = GeneticSearch::new(config.search.clone());
        let status = solver.run(&mut engine);

        Ok(Trial {
            seed: config.search.seed,
            status,
            solution_length: solver.best_solution(false).len(),
            expanded_length: solver.best_solution(true).len(),
            generations: solver.best_solution_generation(),
        })
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "is solved: {}, best solution: {} moves, expanded: {} moves, generations: {}",
            self.is_solved(),
            self.solution_length,
            self.expanded_length,
            self.generations
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialSummary {
    trials: Vec<Trial>,
}

impl TrialSummary {
    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    #[must_use]
    pub fn solved(&self) -> usize {
        self.trials.iter().filter(|trial| trial.is_solved()).count()
    }

    /// The fraction of runs that ended solved, zero when nothing ran.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn solved_rate(&self) -> f64 {
        if self.trials.is_empty() {
            0.0
        } else {
            self.solved() as f64 / self.trials.len() as f64
        }
    }
}

impl FromIterator<Trial> for TrialSummary {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> Self {
        TrialSummary {
            trials: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solved {}/{} ({:.1}%)",
            self.solved(),
            self.trials.len(),
            self.solved_rate() * 100.0
        )
    }
}

/// Run `runs` solves, seeding run `i` with `base_seed + i`. Each run gets
/// its own puzzle from `start`, which is handed the run's seed.
///
/// # Errors
///
/// Fails on the first run whose configuration is invalid.
pub fn run_trials(
    config: &SolverConfig,
    runs: usize,
    base_seed: u64,
    mut start: impl FnMut(u64) -> PuzzleState,
) -> Result<TrialSummary, ConfigurationError> {
    info!(working!("Running {} trials from seed {}"), runs, base_seed);
    let mut config = config.clone();
    let summary = iter::successors(Some(base_seed), |seed| Some(seed.wrapping_add(1)))
        .take(runs)
        .enumerate()
        .map(|(run, seed)| {
            config.search.seed = Some(seed);
            let trial = Trial::run(&start(seed), &config)?;
            info!("Trial {run}: {trial}");
            Ok(trial)
        })
        .collect::<Result<TrialSummary, ConfigurationError>>()?;
    info!(success!("Trials finished, {}"), summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_solved_runs() {
        let trial = |status| Trial {
            seed: None,
            status,
            solution_length: 3,
            expanded_length: 6,
            generations: 10,
        };
        let summary: TrialSummary = [
            trial(SolveStatus::Solved),
            trial(SolveStatus::Abandoned { stage: 2 }),
            trial(SolveStatus::Solved),
            trial(SolveStatus::Abandoned { stage: 3 }),
        ]
        .into_iter()
        .collect();

        assert_eq!(summary.trials().len(), 4);
        assert_eq!(summary.solved(), 2);
        assert!((summary.solved_rate() - 0.5).abs() < 1e-9);
        assert_eq!(summary.to_string(), "solved 2/4 (50.0%)");
        assert_eq!(
            summary.trials()[1].to_string(),
            "is solved: false, best solution: 3 moves, expanded: 6 moves, generations: 10"
        );

        let empty = TrialSummary::default();
        assert_eq!(empty.solved(), 0);
        assert!(empty.solved_rate().abs() < 1e-9);
    }
}

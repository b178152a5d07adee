use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use pyraminx_core::{PuzzleState, Token, expand};

use crate::{
    config::{AcceptancePolicy, ConfigurationError, SolverConfig},
    evaluator::{apply_valid, evaluate},
    objective::Objective,
    search::{SearchEngine, SearchProblem},
    stage::StagePlan,
    start, success, working,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    NotStarted,
    RunningStage(usize),
    /// Every stage was accepted.
    Solved,
    /// The given stage fell short of the acceptance policy, so nothing after
    /// it ran.
    Abandoned { stage: usize },
}

/// Everything a stage's search produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult {
    pub stage: usize,
    pub objective: Objective,
    /// The raw genome the search returned, noise included.
    pub genome: Vec<usize>,
    pub fitness: f64,
    pub generations: usize,
    pub best_generation: usize,
    pub best_target: u32,
    /// The prefix of `genome` that made progress, as tokens.
    pub valid_moves: Vec<Token>,
    /// The best fitness of every generation of this stage.
    pub fitness_trace: Vec<f64>,
    pub is_solved: bool,
}

/// Runs a stage plan against a puzzle, committing every accepted stage to a
/// working copy. The input puzzle is never touched.
#[derive(Debug, Clone)]
pub struct StagedSolver {
    original: PuzzleState,
    working: PuzzleState,
    plan: StagePlan,
    acceptance: AcceptancePolicy,
    move_penalty: f64,
    results: Vec<StageResult>,
    status: SolveStatus,
}

impl StagedSolver {
    /// # Errors
    ///
    /// If `config` fails validation.
    pub fn new(state: &PuzzleState, config: &SolverConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let acceptance = config
            .acceptance
            .ok_or(ConfigurationError::MissingAcceptance)?;
        Self::with_plan(state, config.stage_plan(), acceptance, config.move_penalty)
    }

    /// # Errors
    ///
    /// If the plan or acceptance policy is invalid.
    pub fn with_plan(
        state: &PuzzleState,
        plan: StagePlan,
        acceptance: AcceptancePolicy,
        move_penalty: f64,
    ) -> Result<Self, ConfigurationError> {
        acceptance.validate()?;
        plan.validate(move_penalty)?;
        Ok(StagedSolver {
            original: state.clone(),
            working: state.clone(),
            plan,
            acceptance,
            move_penalty,
            results: vec![],
            status: SolveStatus::NotStarted,
        })
    }

    /// Run every stage in order until one isn't accepted. Only the first call
    /// does any work; later calls return the status it ended with.
    pub fn run<E: SearchEngine + ?Sized>(&mut self, engine: &mut E) -> SolveStatus {
        if self.status != SolveStatus::NotStarted {
            return self.status;
        }

        let start = Instant::now();
        info!(start!("Solving over {} stages"), self.plan.len());
        debug!("Starting from\n{}", self.original);

        let move_penalty = self.move_penalty;
        for (index, stage) in self.plan.stages().iter().enumerate() {
            self.status = SolveStatus::RunningStage(index);
            let stage_start = Instant::now();
            info!(
                working!("Stage {}: {} at {}/{}"),
                index,
                stage.objective,
                stage.objective.measure(&self.working),
                stage.target()
            );

            let snapshot = self.working.clone();
            let fitness =
                |genome: &[usize]| evaluate(&snapshot, stage, genome).fitness(move_penalty);
            let problem = SearchProblem {
                fitness: &fitness,
                genome_length: stage.genome_length,
                allele_space: stage.allele_space(),
                stop_fitness: self.acceptance.stop_fitness(stage, move_penalty),
            };
            let outcome = engine.search(&problem);

            let evaluation = evaluate(&snapshot, stage, &outcome.genome);
            let is_solved =
                self.acceptance
                    .accepts(evaluation.best_target, outcome.fitness, stage.target());
            let valid_moves = if is_solved {
                apply_valid(&mut self.working, stage, &outcome.genome)
            } else {
                vec![]
            };

            self.results.push(StageResult {
                stage: index,
                objective: stage.objective,
                genome: outcome.genome,
                fitness: outcome.fitness,
                generations: outcome.generations,
                best_generation: outcome.best_generation,
                best_target: evaluation.best_target,
                valid_moves,
                fitness_trace: outcome.fitness_trace,
                is_solved,
            });

            if !is_solved {
                warn!(
                    "Stage {} reached {}/{} after {} generations and was not accepted",
                    index,
                    evaluation.best_target,
                    stage.target(),
                    outcome.generations
                );
                self.status = SolveStatus::Abandoned { stage: index };
                return self.status;
            }
            info!(
                success!("Stage {} accepted at {}/{} with {} moves in {:.3}s"),
                index,
                evaluation.best_target,
                stage.target(),
                self.results[index].valid_moves.len(),
                stage_start.elapsed().as_secs_f64()
            );
        }

        self.status = SolveStatus::Solved;
        info!(
            success!("Solved in {} generations and {:.3}s"),
            self.best_solution_generation(),
            start.elapsed().as_secs_f64()
        );
        debug!("Finished at\n{}", self.working);
        self.status
    }

    /// The committed moves of every accepted stage, replayed from the input
    /// puzzle. With `expand` every macro is written out as primitives.
    #[must_use]
    pub fn best_solution(&self, expand_macros: bool) -> Vec<String> {
        let mut replay = self.original.clone();
        let tokens = self
            .results
            .iter()
            .filter(|result| result.is_solved)
            .flat_map(|result| &result.valid_moves)
            .copied()
            .collect_vec();
        for &token in &tokens {
            replay.apply_token(token);
        }
        debug_assert_eq!(replay, self.working);

        tokens
            .iter()
            .map(ToString::to_string)
            .flat_map(|token| {
                if expand_macros {
                    expand(&token)
                } else {
                    vec![token]
                }
            })
            .collect()
    }

    /// The generation each stage's best genome first appeared in, summed
    /// over every stage that ran.
    #[must_use]
    pub fn best_solution_generation(&self) -> usize {
        self.results.iter().map(|result| result.best_generation).sum()
    }

    #[must_use]
    pub fn results(&self) -> &[StageResult] {
        &self.results
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&StageResult> {
        self.results.last()
    }

    #[must_use]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    #[must_use]
    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    #[must_use]
    pub fn working_state(&self) -> &PuzzleState {
        &self.working
    }

    #[must_use]
    pub fn original_state(&self) -> &PuzzleState {
        &self.original
    }
}

//! The contract between the orchestrator and whatever searches genome space.

/// What a stage asks a search engine to optimise.
pub struct SearchProblem<'a> {
    /// Scores a genome. Higher is better. Must not have side effects.
    pub fitness: &'a (dyn Fn(&[usize]) -> f64 + Sync),
    pub genome_length: usize,
    /// Genes are drawn from `0..allele_space`.
    pub allele_space: usize,
    /// Searching may stop once a genome scores at least this.
    pub stop_fitness: Option<f64>,
}

impl SearchProblem<'_> {
    #[must_use]
    pub fn score(&self, genome: &[usize]) -> f64 {
        (self.fitness)(genome)
    }

    #[must_use]
    pub fn is_good_enough(&self, fitness: f64) -> bool {
        self.stop_fitness
            .is_some_and(|stop_fitness| fitness >= stop_fitness)
    }
}

/// The best genome a search found.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub genome: Vec<usize>,
    pub fitness: f64,
    /// Generations actually run, including an early stop.
    pub generations: usize,
    /// The generation in which `genome` was first seen.
    pub best_generation: usize,
    /// The best fitness of every generation, starting with the initial
    /// population.
    pub fitness_trace: Vec<f64>,
}

pub trait SearchEngine {
    fn search(&mut self, problem: &SearchProblem<'_>) -> SearchOutcome;
}

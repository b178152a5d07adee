//! A small generational genetic algorithm over fixed-length integer genomes.

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigurationError,
    search::{SearchEngine, SearchOutcome, SearchProblem},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub generations: usize,
    pub population_size: usize,
    /// How many parents are picked per generation to breed every offspring.
    pub parents_mating: usize,
    pub tournament_size: usize,
    /// How many of the best genomes survive unchanged into the next
    /// generation.
    pub keep_elitism: usize,
    pub crossover_probability: f64,
    /// Chance for each gene of an offspring to be replaced by a random one.
    pub mutation_probability: f64,
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            generations: 100,
            population_size: 10,
            parents_mating: 2,
            tournament_size: 3,
            keep_elitism: 1,
            crossover_probability: 0.7,
            mutation_probability: 0.05,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// # Errors
    ///
    /// If a count is zero, a probability is outside `[0, 1]`, or more elites
    /// are kept than fit in the population.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("generations", self.generations),
            ("population_size", self.population_size),
            ("parents_mating", self.parents_mating),
            ("tournament_size", self.tournament_size),
        ] {
            if value == 0 {
                return Err(ConfigurationError::ZeroSearchParameter(name));
            }
        }
        for (name, value) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.keep_elitism > self.population_size {
            return Err(ConfigurationError::ElitismTooLarge {
                elitism: self.keep_elitism,
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}

pub struct GeneticSearch {
    config: GeneticConfig,
    rng: fastrand::Rng,
}

fn fittest(scores: &[f64]) -> usize {
    scores
        .iter()
        .position_max_by(|a, b| a.total_cmp(b))
        .unwrap_or(0)
}

impl GeneticSearch {
    #[must_use]
    pub fn new(config: GeneticConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        GeneticSearch { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    fn random_genome(&mut self, problem: &SearchProblem<'_>) -> Vec<usize> {
        (0..problem.genome_length)
            .map(|_| self.rng.usize(..problem.allele_space))
            .collect()
    }

    fn tournament(&mut self, scores: &[f64]) -> usize {
        (0..self.config.tournament_size.max(1))
            .map(|_| self.rng.usize(..scores.len()))
            .max_by(|&a, &b| scores[a].total_cmp(&scores[b]))
            .unwrap_or(0)
    }

    fn crossover(&mut self, first: &[usize], second: &[usize]) -> Vec<usize> {
        if first.len() < 2 || self.rng.f64() >= self.config.crossover_probability {
            return first.to_vec();
        }
        let point = self.rng.usize(1..first.len());
        first[..point].iter().chain(&second[point..]).copied().collect()
    }

    fn mutate(&mut self, genome: &mut [usize], allele_space: usize) {
        for gene in genome {
            if self.rng.f64() < self.config.mutation_probability {
                *gene = self.rng.usize(..allele_space);
            }
        }
    }

    fn next_generation(
        &mut self,
        population: &[Vec<usize>],
        scores: &[f64],
        allele_space: usize,
    ) -> Vec<Vec<usize>> {
        let population_size = population.len();
        let parents = (0..self.config.parents_mating.max(1))
            .map(|_| self.tournament(scores))
            .collect_vec();

        let mut next = (0..population_size)
            .sorted_by(|&a, &b| scores[b].total_cmp(&scores[a]))
            .take(self.config.keep_elitism)
            .map(|index| population[index].clone())
            .collect_vec();

        let mut k = 0;
        while next.len() < population_size {
            let first = &population[parents[k % parents.len()]];
            let second = &population[parents[(k + 1) % parents.len()]];
            let mut child = self.crossover(first, second);
            self.mutate(&mut child, allele_space);
            next.push(child);
            k += 1;
        }
        next
    }
}

impl SearchEngine for GeneticSearch {
    fn search(&mut self, problem: &SearchProblem<'_>) -> SearchOutcome {
        if problem.allele_space == 0 || problem.genome_length == 0 {
            let genome = vec![0; problem.genome_length];
            let fitness = problem.score(&genome);
            return SearchOutcome {
                genome,
                fitness,
                generations: 0,
                best_generation: 0,
                fitness_trace: vec![fitness],
            };
        }

        let population_size = self.config.population_size.max(1);
        let mut population = (0..population_size)
            .map(|_| self.random_genome(problem))
            .collect_vec();
        let mut scores = population.iter().map(|genome| problem.score(genome)).collect_vec();

        let champion = fittest(&scores);
        let mut best = (population[champion].clone(), scores[champion], 0);
        let mut fitness_trace = vec![scores[champion]];
        let mut generations = 0;

        while generations < self.config.generations && !problem.is_good_enough(best.1) {
            generations += 1;
            population = self.next_generation(&population, &scores, problem.allele_space);
            scores = population.iter().map(|genome| problem.score(genome)).collect_vec();

            let champion = fittest(&scores);
            fitness_trace.push(scores[champion]);
            trace!("Generation {generations}: best fitness {}", scores[champion]);
            if scores[champion] > best.1 {
                best = (population[champion].clone(), scores[champion], generations);
            }
        }

        let (genome, fitness, best_generation) = best;
        debug!(
            "Search finished after {generations} generations with fitness {fitness} from generation {best_generation}"
        );
        SearchOutcome {
            genome,
            fitness,
            generations,
            best_generation,
            fitness_trace,
        }
    }
}

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    genetic::GeneticConfig,
    stage::{Stage, StagePlan},
};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("No acceptance policy was given")]
    MissingAcceptance,
    #[error("Accept ratio must be in (0, 1], got {0}")]
    AcceptRatioOutOfRange(f64),
    #[error("Acceptance threshold must be finite, got {0}")]
    NonFiniteThreshold(f64),
    #[error("Stage {stage} has a genome length of zero")]
    EmptyGenome { stage: usize },
    #[error("Stage {stage} has no tokens to choose from")]
    EmptyVocabulary { stage: usize },
    #[error(
        "A move penalty of {penalty} over {genome_length} genes outweighs one unit of progress"
    )]
    PenaltyTooLarge { penalty: f64, genome_length: usize },
    #[error("Move penalty must be finite and non-negative, got {0}")]
    InvalidPenalty(f64),
    #[error("The stage plan is empty")]
    NoStages,
    #[error("Search parameter `{0}` must be positive")]
    ZeroSearchParameter(&'static str),
    #[error("Probability `{name}` must be in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("Cannot keep {elitism} elites out of a population of {population_size}")]
    ElitismTooLarge {
        elitism: usize,
        population_size: usize,
    },
    #[error("Could not parse the configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not read the configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// When a stage's best candidate is good enough to commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptancePolicy {
    /// The penalised fitness reached at least this fraction of the target.
    #[serde(rename = "ratio")]
    TargetRatio(f64),
    /// The objective itself, ignoring the move penalty, reached at least this
    /// fraction of its target.
    ProgressRatio(f64),
    /// The penalised fitness reached at least this value.
    Fitness(f64),
    /// The objective reached its target exactly.
    FullTarget,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        AcceptancePolicy::TargetRatio(0.9)
    }
}

impl AcceptancePolicy {
    #[must_use]
    pub fn accepts(self, best_target: u32, fitness: f64, target: u32) -> bool {
        match self {
            AcceptancePolicy::TargetRatio(ratio) => fitness >= ratio * f64::from(target),
            AcceptancePolicy::ProgressRatio(ratio) => {
                f64::from(best_target) >= ratio * f64::from(target)
            }
            AcceptancePolicy::Fitness(threshold) => fitness >= threshold,
            AcceptancePolicy::FullTarget => best_target >= target,
        }
    }

    /// The fitness past which searching `stage` further can't change the
    /// verdict. Every candidate that meets the target scores at least this and
    /// every other candidate scores below it, because the penalty over a whole
    /// genome stays under one unit of progress.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn stop_fitness(self, stage: &Stage, move_penalty: f64) -> Option<f64> {
        match self {
            AcceptancePolicy::TargetRatio(_)
            | AcceptancePolicy::ProgressRatio(_)
            | AcceptancePolicy::FullTarget => Some(
                f64::from(stage.target()) - move_penalty * stage.genome_length as f64,
            ),
            AcceptancePolicy::Fitness(_) => None,
        }
    }

    /// # Errors
    ///
    /// If a ratio is outside `(0, 1]` or a threshold isn't finite.
    pub fn validate(self) -> Result<(), ConfigurationError> {
        match self {
            AcceptancePolicy::TargetRatio(ratio) | AcceptancePolicy::ProgressRatio(ratio)
                if !(ratio > 0.0 && ratio <= 1.0) =>
            {
                Err(ConfigurationError::AcceptRatioOutOfRange(ratio))
            }
            AcceptancePolicy::Fitness(threshold) if !threshold.is_finite() => {
                Err(ConfigurationError::NonFiniteThreshold(threshold))
            }
            _ => Ok(()),
        }
    }
}

/// Which stage plan to solve with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolveMode {
    /// Four stages, from small corners up to whole faces.
    #[default]
    Staged,
    /// One stage over every primitive move.
    Flat,
}

/// Global solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub mode: SolveMode,
    pub acceptance: Option<AcceptancePolicy>,
    pub move_penalty: f64,
    pub stage_genes: [usize; 4],
    pub flat_genes: usize,
    pub search: GeneticConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            mode: SolveMode::default(),
            acceptance: Some(AcceptancePolicy::default()),
            move_penalty: 0.01,
            stage_genes: [8, 8, 18, 6],
            flat_genes: 40,
            search: GeneticConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Parse and validate a TOML configuration. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// If the text isn't valid TOML for this shape or fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let config = toml::from_str::<SolverConfig>(text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// If the file can't be read or [`SolverConfig::from_toml_str`] fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn stage_plan(&self) -> StagePlan {
        match self.mode {
            SolveMode::Staged => StagePlan::staged(self.stage_genes),
            SolveMode::Flat => StagePlan::flat(self.flat_genes),
        }
    }

    /// # Errors
    ///
    /// The first problem found, checking acceptance, then the stage plan,
    /// then search parameters.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.acceptance
            .ok_or(ConfigurationError::MissingAcceptance)?
            .validate()?;
        self.stage_plan().validate(self.move_penalty)?;
        self.search.validate()
    }
}

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! Solves a Pyraminx in stages, each a stochastic search over short move
//! sequences that climbs one progress measure.

pub mod config;
pub mod evaluator;
pub mod genetic;
pub mod objective;
pub mod orchestrator;
pub mod search;
pub mod stage;
pub mod trials;

pub use config::{AcceptancePolicy, ConfigurationError, SolveMode, SolverConfig};
pub use genetic::{GeneticConfig, GeneticSearch};
pub use objective::Objective;
pub use orchestrator::{SolveStatus, StageResult, StagedSolver};
pub use search::{SearchEngine, SearchOutcome, SearchProblem};
pub use stage::{Stage, StagePlan};
pub use trials::{Trial, TrialSummary, run_trials};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

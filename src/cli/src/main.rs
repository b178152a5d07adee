use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};
use pyraminx_core::{Face, PuzzleState, expand};
use staged_solver::{
    GeneticSearch, SolveMode, SolveStatus, SolverConfig, StagedSolver, run_trials,
};

/// Scrambles and solves Pyraminx puzzles with a staged genetic search
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a puzzle and search for a solution.
    Solve {
        /// The solver configuration file to use, in TOML format.
        #[arg(long, short = 'c', value_name = "SOLVER_CONFIG")]
        config: Option<PathBuf>,
        /// Overrides the mode from the configuration.
        #[arg(long, short = 'm')]
        mode: Option<ModeArg>,
        /// How many random moves to scramble with.
        #[arg(long, short = 's', default_value_t = 25)]
        scramble: usize,
        /// Scramble with these moves instead, e.g. "u L' X".
        #[arg(long, conflicts_with = "scramble")]
        moves: Option<String>,
        /// Seeds both the scramble and the search.
        #[arg(long)]
        seed: Option<u64>,
        /// Print macros in the solution as primitive moves.
        #[arg(long, short = 'e')]
        expand: bool,
    },
    /// Solve many seeded scrambles and report how often each run solved.
    Bench {
        /// The solver configuration file to use, in TOML format.
        #[arg(long, short = 'c', value_name = "SOLVER_CONFIG")]
        config: Option<PathBuf>,
        /// Overrides the mode from the configuration.
        #[arg(long, short = 'm')]
        mode: Option<ModeArg>,
        /// How many solves to run.
        #[arg(long, short = 'n', default_value_t = 30)]
        runs: usize,
        /// How many random moves to scramble each run with.
        #[arg(long, short = 's', default_value_t = 25)]
        scramble: usize,
        /// Solve this scramble on every run instead, e.g. "u L' X".
        #[arg(long, conflicts_with = "scramble")]
        moves: Option<String>,
        /// Run `i` is seeded with this plus `i`.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the primitive moves behind each token.
    Expand {
        /// Tokens to expand, e.g. X P' u
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Apply a sequence to a solved puzzle and print the result.
    Show {
        /// The sequence to apply, e.g. "u L' X".
        sequence: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Four stages, from corners to whole faces
    Staged,
    /// A single stage over every primitive move
    Flat,
}

impl From<ModeArg> for SolveMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Staged => SolveMode::Staged,
            ModeArg::Flat => SolveMode::Flat,
        }
    }
}

fn print_state(state: &PuzzleState) {
    println!("{state}");
    println!(
        "small corners {}/4, large corners {}/4, middle pieces {}/3, face uniformity {}/12",
        state.small_corners_solved(),
        state.large_corners_solved(),
        state.middle_pieces_solved(),
        state.face_uniformity()
    );
    println!(
        "colours per face: {}",
        Face::ALL
            .iter()
            .zip(state.colors_per_face())
            .map(|(face, colors)| format!("{}={colors}", face.letter()))
            .join(" ")
    );
}

fn load_config(path: Option<PathBuf>, mode: Option<ModeArg>) -> color_eyre::Result<SolverConfig> {
    let mut config = match path {
        Some(path) => SolverConfig::load(&path)
            .wrap_err_with(|| format!("Failed to load {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(mode) = mode {
        config.mode = mode.into();
    }
    Ok(config)
}

fn solve(
    config: Option<PathBuf>,
    mode: Option<ModeArg>,
    scramble: usize,
    moves: Option<String>,
    seed: Option<u64>,
    expand_macros: bool,
) -> color_eyre::Result<()> {
    let mut config = load_config(config, mode)?;
    if seed.is_some() {
        config.search.seed = seed;
    }

    let mut state = PuzzleState::solved();
    let scramble = match moves {
        Some(moves) => state
            .apply_sequence(&moves)?
            .iter()
            .map(ToString::to_string)
            .join(" "),
        None => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            state.scramble(&mut rng, scramble).iter().join(" ")
        }
    };
    println!("Scramble: {scramble}");
    print_state(&state);

    let mut solver = StagedSolver::new(&state, &config)?;
    let mut engine = GeneticSearch::new(config.search.clone());
    let status = solver.run(&mut engine);

    for result in solver.results() {
        info!(
            "Stage {} ({}): {} moves, fitness {:.2}, best of generation {}/{}",
            result.stage,
            result.objective,
            result.valid_moves.len(),
            result.fitness,
            result.best_generation,
            result.generations
        );
    }

    let solution = solver.best_solution(expand_macros);
    println!(
        "Solution ({} moves): {}",
        solution.len(),
        solution.iter().join(" ")
    );
    println!("Generations: {}", solver.best_solution_generation());
    print_state(solver.working_state());

    match status {
        SolveStatus::Solved => {
            println!("Solved");
            Ok(())
        }
        SolveStatus::Abandoned { stage } => Err(eyre!(
            "Stage {stage} ({}) was not accepted",
            solver.plan().stages()[stage].objective
        )),
        SolveStatus::NotStarted | SolveStatus::RunningStage(_) => {
            Err(eyre!("The solver stopped unexpectedly in {status:?}"))
        }
    }
}

fn bench(
    config: Option<PathBuf>,
    mode: Option<ModeArg>,
    runs: usize,
    scramble: usize,
    moves: Option<String>,
    seed: Option<u64>,
) -> color_eyre::Result<()> {
    let config = load_config(config, mode)?;
    let fixed = match moves {
        Some(moves) => {
            let mut state = PuzzleState::solved();
            state.apply_sequence(&moves)?;
            Some(state)
        }
        None => None,
    };
    let base_seed = seed.unwrap_or_else(|| fastrand::u64(..));
    println!("Base seed: {base_seed}");

    let summary = run_trials(&config, runs, base_seed, |seed| match &fixed {
        Some(state) => state.clone(),
        None => {
            let mut state = PuzzleState::solved();
            state.scramble(&mut fastrand::Rng::with_seed(seed), scramble);
            state
        }
    })?;

    for (run, trial) in summary.trials().iter().enumerate() {
        println!("Run {run}: {trial}");
    }
    println!("Solved rate: {summary}");
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Commands::Solve {
            config,
            mode,
            scramble,
            moves,
            seed,
            expand,
        } => solve(config, mode, scramble, moves, seed, expand),
        Commands::Bench {
            config,
            mode,
            runs,
            scramble,
            moves,
            seed,
        } => bench(config, mode, runs, scramble, moves, seed),
        Commands::Expand { tokens } => {
            println!("{}", tokens.iter().flat_map(|token| expand(token)).join(" "));
            Ok(())
        }
        Commands::Show { sequence } => {
            let mut state = PuzzleState::solved();
            state.apply_sequence(&sequence)?;
            print_state(&state);
            Ok(())
        }
    }
}

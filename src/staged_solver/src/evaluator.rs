//! Replays candidate genomes to score them and to find the part of a genome
//! that actually contributed progress.

use crate::stage::Stage;
use pyraminx_core::{PuzzleState, Token};

/// The outcome of replaying a genome against a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// The highest objective value seen while replaying.
    pub best_target: u32,
    /// How many genes it took to first reach `best_target`.
    pub steps_consumed: usize,
}

impl Evaluation {
    /// Progress reached minus a small cost per gene spent reaching it.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fitness(self, move_penalty: f64) -> f64 {
        f64::from(self.best_target) - move_penalty * self.steps_consumed as f64
    }
}

/// Replay `genome` on a copy of `state`.
///
/// Replay stops as soon as the stage target is met; later genes are ignored.
/// The objective is tracked as a running maximum so a move that temporarily
/// undoes progress is not punished, and `steps_consumed` only counts genes up
/// to the last improvement. Genes outside the vocabulary are skipped.
#[must_use]
pub fn evaluate(state: &PuzzleState, stage: &Stage, genome: &[usize]) -> Evaluation {
    let mut state = state.clone();
    let target = stage.target();
    let mut evaluation = Evaluation {
        best_target: stage.objective.measure(&state),
        steps_consumed: 0,
    };

    for (step, &gene) in genome.iter().enumerate() {
        if evaluation.best_target >= target {
            break;
        }
        let Some(token) = stage.token(gene) else {
            continue;
        };
        state.apply_token(token);
        let reading = stage.objective.measure(&state);
        if reading > evaluation.best_target {
            evaluation = Evaluation {
                best_target: reading,
                steps_consumed: step + 1,
            };
        }
    }

    evaluation
}

/// The tokens of the prefix of `genome` that reaches its best objective
/// value. Everything past that point is noise from the fixed genome length.
#[must_use]
pub fn truncate(state: &PuzzleState, stage: &Stage, genome: &[usize]) -> Vec<Token> {
    let Evaluation { steps_consumed, .. } = evaluate(state, stage, genome);
    genome[..steps_consumed]
        .iter()
        .filter_map(|&gene| stage.token(gene))
        .collect()
}

/// [`truncate`] and commit the surviving tokens to `state`.
pub fn apply_valid(state: &mut PuzzleState, stage: &Stage, genome: &[usize]) -> Vec<Token> {
    let tokens = truncate(state, stage, genome);
    for &token in &tokens {
        state.apply_token(token);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{objective::Objective, stage::StagePlan};
    use pyraminx_core::Move;

    fn stages() -> StagePlan {
        StagePlan::staged([8, 8, 18, 6])
    }

    fn gene(stage: &Stage, token: &str) -> usize {
        let token = token.parse::<Token>().unwrap();
        stage
            .vocabulary
            .iter()
            .position(|&entry| entry == token)
            .unwrap()
    }

    #[test]
    fn test_solved_state_truncates_to_nothing() {
        let solved = PuzzleState::solved();
        let plan = stages();
        let flat = StagePlan::flat(20);
        for stage in plan.stages().iter().chain(flat.stages()) {
            let genome = (0..stage.genome_length)
                .map(|i| i % stage.allele_space())
                .collect::<Vec<_>>();
            let evaluation = evaluate(&solved, stage, &genome);
            assert_eq!(evaluation.best_target, stage.target());
            assert_eq!(evaluation.steps_consumed, 0);
            assert!(truncate(&solved, stage, &genome).is_empty());
        }
    }

    #[test]
    fn test_stops_once_target_is_reached() {
        let plan = stages();
        let stage = &plan.stages()[0];
        let mut state = PuzzleState::solved();
        state.apply("u").unwrap();

        let genome = [gene(stage, "l"), gene(stage, "u'"), gene(stage, "l'"), gene(stage, "b")];
        let evaluation = evaluate(&state, stage, &genome);
        // `l` breaks a second corner, `u'` fixes the first, `l'` fixes the
        // second and reaches the target before `b` is looked at
        assert_eq!(
            evaluation,
            Evaluation {
                best_target: 4,
                steps_consumed: 3
            }
        );
        assert_eq!(
            truncate(&state, stage, &genome)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["l", "u'", "l'"]
        );
    }

    #[test]
    fn test_noise_after_peak_is_discarded() {
        let plan = stages();
        let stage = &plan.stages()[0];
        let mut state = PuzzleState::solved();
        state.apply_sequence("u l").unwrap();

        // Only fixes U, then wanders
        let genome = [gene(stage, "u'"), gene(stage, "b"), gene(stage, "b'"), gene(stage, "r")];
        let evaluation = evaluate(&state, stage, &genome);
        assert_eq!(evaluation.best_target, 3);
        assert_eq!(evaluation.steps_consumed, 1);
        assert!((evaluation.fitness(0.01) - 2.99).abs() < 1e-9);
    }

    #[test]
    fn test_identity_pairs_make_no_progress() {
        let plan = stages();
        let stage = &plan.stages()[0];
        let mut state = PuzzleState::solved();
        state.apply("l").unwrap();
        let initial = stage.objective.measure(&state);

        let genome = [gene(stage, "u"), gene(stage, "u'")].repeat(4);
        let evaluation = evaluate(&state, stage, &genome);
        assert_eq!(evaluation.best_target, initial);
        assert_eq!(evaluation.steps_consumed, 0);
        assert!(truncate(&state, stage, &genome).is_empty());
    }

    #[test]
    fn test_best_target_grows_with_prefix() {
        let mut rng = fastrand::Rng::with_seed(5);
        let flat = StagePlan::flat(30);
        let stage = &flat.stages()[0];
        for _ in 0..50 {
            let mut state = PuzzleState::solved();
            state.scramble(&mut rng, 12);
            let genome = (0..stage.genome_length)
                .map(|_| rng.usize(..stage.allele_space()))
                .collect::<Vec<_>>();
            let full = evaluate(&state, stage, &genome);
            assert!(full.steps_consumed <= genome.len());

            let mut previous = 0;
            for end in 0..=genome.len() {
                let partial = evaluate(&state, stage, &genome[..end]);
                assert!(partial.best_target >= previous);
                assert!(partial.steps_consumed <= end);
                previous = partial.best_target;
            }
            assert_eq!(previous, full.best_target);
        }
    }

    #[test]
    fn test_truncated_prefix_reaches_best_target() {
        let mut rng = fastrand::Rng::with_seed(6);
        let flat = StagePlan::flat(30);
        let stage = &flat.stages()[0];
        for _ in 0..50 {
            let mut state = PuzzleState::solved();
            state.scramble(&mut rng, 12);
            let genome = (0..stage.genome_length)
                .map(|_| rng.usize(..stage.allele_space()))
                .collect::<Vec<_>>();
            let evaluation = evaluate(&state, stage, &genome);

            let mut committed = state.clone();
            let tokens = apply_valid(&mut committed, stage, &genome);
            assert_eq!(tokens.len(), evaluation.steps_consumed);
            assert_eq!(
                Objective::Composite.measure(&committed),
                evaluation.best_target
            );
        }
    }

    #[test]
    fn test_out_of_range_genes_are_skipped() {
        let plan = stages();
        let stage = &plan.stages()[0];
        let mut state = PuzzleState::solved();
        state.apply("b").unwrap();

        let genome = [99, gene(stage, "b'")];
        let evaluation = evaluate(&state, stage, &genome);
        assert_eq!(evaluation.steps_consumed, 2);
        assert_eq!(
            truncate(&state, stage, &genome),
            [Token::Primitive(Move::ALL[7])]
        );
    }

    #[test]
    fn test_evaluation_leaves_input_untouched() {
        let plan = stages();
        let stage = &plan.stages()[1];
        let mut state = PuzzleState::solved();
        state.apply("R").unwrap();
        let before = state.clone();
        let _ = evaluate(&state, stage, &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(state, before);
    }
}

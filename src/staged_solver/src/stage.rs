use crate::{config::ConfigurationError, objective::Objective};
use pyraminx_core::{Layer, MacroMove, Move, Token};

/// One step of a solve: the objective to climb, the tokens a genome may pick
/// from, and how many genes a candidate has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub objective: Objective,
    pub vocabulary: Vec<Token>,
    pub genome_length: usize,
}

/// The ordered stages of a solve. Each stage assumes the objectives of the
/// stages before it hold and does not check them again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    stages: Vec<Stage>,
}

fn primitives_of(layer: Layer) -> Vec<Token> {
    Move::ALL
        .into_iter()
        .filter(|move_| move_.layer == layer)
        .map(Token::from)
        .collect()
}

fn macros() -> Vec<Token> {
    MacroMove::ALL.into_iter().map(Token::from).collect()
}

impl Stage {
    #[must_use]
    pub fn new(objective: Objective, vocabulary: Vec<Token>, genome_length: usize) -> Self {
        Stage {
            objective,
            vocabulary,
            genome_length,
        }
    }

    #[must_use]
    pub const fn target(&self) -> u32 {
        self.objective.target()
    }

    /// Number of distinct values a gene can take.
    #[must_use]
    pub fn allele_space(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn token(&self, gene: usize) -> Option<Token> {
        self.vocabulary.get(gene).copied()
    }

    /// Check the stage can be searched with the given per-move penalty.
    ///
    /// # Errors
    ///
    /// If the vocabulary or genome is empty, or if the penalty over a whole
    /// genome adds up to a unit of progress.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self, index: usize, move_penalty: f64) -> Result<(), ConfigurationError> {
        if self.vocabulary.is_empty() {
            return Err(ConfigurationError::EmptyVocabulary { stage: index });
        }
        if self.genome_length == 0 {
            return Err(ConfigurationError::EmptyGenome { stage: index });
        }
        if move_penalty * self.genome_length as f64 >= 1.0 {
            return Err(ConfigurationError::PenaltyTooLarge {
                penalty: move_penalty,
                genome_length: self.genome_length,
            });
        }
        Ok(())
    }
}

impl StagePlan {
    /// Tips with tip turns, then tips and centres together with wide turns,
    /// then edges with edge-cycling macros, first around face D and finally
    /// everywhere.
    #[must_use]
    pub fn staged(genome_lengths: [usize; 4]) -> Self {
        let [small, large, middle, uniform] = genome_lengths;
        StagePlan {
            stages: vec![
                Stage::new(Objective::SmallCorners, primitives_of(Layer::Tip), small),
                Stage::new(
                    Objective::LargeCorners,
                    primitives_of(Layer::TipAndMiddle),
                    large,
                ),
                Stage::new(Objective::MiddlePieces, macros(), middle),
                Stage::new(Objective::FaceUniformity, macros(), uniform),
            ],
        }
    }

    /// A single stage over all 16 primitive moves, scored on everything at
    /// once.
    #[must_use]
    pub fn flat(genome_length: usize) -> Self {
        StagePlan {
            stages: vec![Stage::new(
                Objective::Composite,
                Move::ALL.into_iter().map(Token::from).collect(),
                genome_length,
            )],
        }
    }

    #[must_use]
    pub fn custom(stages: Vec<Stage>) -> Self {
        StagePlan { stages }
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// # Errors
    ///
    /// If the plan has no stages or any stage is invalid.
    pub fn validate(&self, move_penalty: f64) -> Result<(), ConfigurationError> {
        if !move_penalty.is_finite() || move_penalty < 0.0 {
            return Err(ConfigurationError::InvalidPenalty(move_penalty));
        }
        if self.is_empty() {
            return Err(ConfigurationError::NoStages);
        }
        self.stages
            .iter()
            .enumerate()
            .try_for_each(|(index, stage)| stage.validate(index, move_penalty))
    }
}

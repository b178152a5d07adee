use pyraminx_core::{
    PuzzleState,
    metrics::{MAX_FACE_UNIFORMITY, MAX_LARGE_CORNERS, MAX_MIDDLE_PIECES, MAX_SMALL_CORNERS},
};
use std::fmt;

/// The progress measure a stage climbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    SmallCorners,
    LargeCorners,
    MiddlePieces,
    FaceUniformity,
    /// The sum of every other objective, for solving in a single stage.
    Composite,
}

impl Objective {
    #[must_use]
    pub fn measure(self, state: &PuzzleState) -> u32 {
        match self {
            Objective::SmallCorners => state.small_corners_solved(),
            Objective::LargeCorners => state.large_corners_solved(),
            Objective::MiddlePieces => state.middle_pieces_solved(),
            Objective::FaceUniformity => state.face_uniformity(),
            Objective::Composite => {
                state.small_corners_solved()
                    + state.large_corners_solved()
                    + state.middle_pieces_solved()
                    + state.face_uniformity()
            }
        }
    }

    /// The value `measure` takes once this objective is fully met.
    #[must_use]
    pub const fn target(self) -> u32 {
        match self {
            Objective::SmallCorners => MAX_SMALL_CORNERS,
            Objective::LargeCorners => MAX_LARGE_CORNERS,
            Objective::MiddlePieces => MAX_MIDDLE_PIECES,
            Objective::FaceUniformity => MAX_FACE_UNIFORMITY,
            Objective::Composite => {
                MAX_SMALL_CORNERS + MAX_LARGE_CORNERS + MAX_MIDDLE_PIECES + MAX_FACE_UNIFORMITY
            }
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Objective::SmallCorners => "small corners",
            Objective::LargeCorners => "large corners",
            Objective::MiddlePieces => "middle pieces",
            Objective::FaceUniformity => "face uniformity",
            Objective::Composite => "whole puzzle",
        })
    }
}

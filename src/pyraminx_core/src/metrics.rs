//! Read-only progress measures. Each one only ever grows as the part of the
//! puzzle it looks at gets closer to solved.

use crate::{
    puzzle::{Color, Face, FaceletAddress, PuzzleState},
    topology::{LARGE_CORNER_POSITIONS, MIDDLE_PIECES, SMALL_CORNERS},
};
use itertools::Itertools;

pub const MAX_SMALL_CORNERS: u32 = 4;
pub const MAX_LARGE_CORNERS: u32 = 4;
pub const MAX_MIDDLE_PIECES: u32 = 3;
pub const MAX_FACE_UNIFORMITY: u32 = 12;

fn count(solved: impl Iterator<Item = bool>) -> u32 {
    solved.map(u32::from).sum()
}

impl PuzzleState {
    fn pairs_agree(&self, pairs: &[(FaceletAddress, FaceletAddress)]) -> bool {
        pairs.iter().all(|&(a, b)| self.at(a) == self.at(b))
    }

    /// Corners whose tips agree with the adjacent centre on all three faces.
    #[must_use]
    pub fn small_corners_solved(&self) -> u32 {
        count(SMALL_CORNERS.iter().map(|pairs| self.pairs_agree(pairs)))
    }

    /// Faces whose tips and centres all share one colour.
    #[must_use]
    pub fn large_corners_solved(&self) -> u32 {
        count(Face::ALL.into_iter().map(|face| {
            LARGE_CORNER_POSITIONS
                .iter()
                .map(|&(layer, position)| self.facelet(face, layer, position))
                .all_equal()
        }))
    }

    /// Edge pieces around face D matching the faces they sit on.
    #[must_use]
    pub fn middle_pieces_solved(&self) -> u32 {
        count(MIDDLE_PIECES.iter().map(|pairs| self.pairs_agree(pairs)))
    }

    #[must_use]
    pub fn colors_on_face(&self, face: Face) -> usize {
        self.face(face).iter().unique().count()
    }

    /// Distinct colours on every face, indexed by `Face as usize`.
    #[must_use]
    pub fn colors_per_face(&self) -> [usize; 4] {
        Face::ALL.map(|face| self.colors_on_face(face))
    }

    /// Sum over faces of how many colours are missing from that face. Twelve
    /// when every face shows a single colour.
    #[must_use]
    pub fn face_uniformity(&self) -> u32 {
        let missing: usize = self
            .colors_per_face()
            .iter()
            .map(|&colors| Color::ALL.len() - colors)
            .sum();
        u32::try_from(missing).unwrap_or(u32::MAX)
    }
}

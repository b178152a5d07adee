//! Static puzzle topology: which facelets co-rotate under each turn.
//!
//! Each face is a triangle whose tip is `(0, 0)`. The faces L, F and R have
//! their tip at the U corner, face D has its tip at the B corner. A trio is
//! listed in the order a clockwise turn carries a facelet's colour along.

use crate::{
    moves::{Corner, Layer},
    puzzle::{Face, FaceletAddress},
};

pub type Trio = [FaceletAddress; 3];

const fn at(face: Face, layer: u8, position: u8) -> FaceletAddress {
    FaceletAddress::new(face, layer, position)
}

use Face::{D, F, L, R};

/// Indexed by `Corner as usize`. The first trio of every corner holds its
/// three tips and is the only one moved by a tip turn; the remaining trios
/// are an edge, the centre and the other edge of the middle layer.
const SWITCHING_TRIOS: [[Trio; 4]; 4] = [
    // U
    [
        [at(F, 0, 0), at(R, 0, 0), at(L, 0, 0)],
        [at(F, 1, 0), at(R, 1, 0), at(L, 1, 0)],
        [at(F, 1, 1), at(R, 1, 1), at(L, 1, 1)],
        [at(F, 1, 2), at(R, 1, 2), at(L, 1, 2)],
    ],
    // L
    [
        [at(F, 2, 0), at(L, 2, 4), at(D, 2, 0)],
        [at(F, 1, 0), at(L, 2, 2), at(D, 2, 2)],
        [at(F, 2, 1), at(L, 2, 3), at(D, 2, 1)],
        [at(F, 2, 2), at(L, 1, 2), at(D, 1, 0)],
    ],
    // R
    [
        [at(F, 2, 4), at(D, 2, 4), at(R, 2, 0)],
        [at(F, 1, 2), at(D, 2, 2), at(R, 2, 2)],
        [at(F, 2, 3), at(D, 2, 3), at(R, 2, 1)],
        [at(F, 2, 2), at(D, 1, 2), at(R, 1, 0)],
    ],
    // B
    [
        [at(R, 2, 4), at(D, 0, 0), at(L, 2, 0)],
        [at(R, 1, 2), at(D, 1, 2), at(L, 2, 2)],
        [at(R, 2, 3), at(D, 1, 1), at(L, 2, 1)],
        [at(R, 2, 2), at(D, 1, 0), at(L, 1, 0)],
    ],
];

/// The trios cycled by a turn of `corner` reaching `layer` deep.
#[must_use]
pub fn switching_trios(corner: Corner, layer: Layer) -> &'static [Trio] {
    let trios = &SWITCHING_TRIOS[corner as usize];
    match layer {
        Layer::Tip => &trios[..1],
        Layer::TipAndMiddle => trios,
    }
}

/// Per corner, the `(tip, centre)` pair on each of the three faces meeting
/// at that corner. A small corner is solved when every pair agrees.
pub(crate) const SMALL_CORNERS: [[(FaceletAddress, FaceletAddress); 3]; 4] = [
    // U
    [
        (at(F, 0, 0), at(F, 1, 1)),
        (at(R, 0, 0), at(R, 1, 1)),
        (at(L, 0, 0), at(L, 1, 1)),
    ],
    // L
    [
        (at(F, 2, 0), at(F, 2, 1)),
        (at(L, 2, 4), at(L, 2, 3)),
        (at(D, 2, 0), at(D, 2, 1)),
    ],
    // R
    [
        (at(F, 2, 4), at(F, 2, 3)),
        (at(D, 2, 4), at(D, 2, 3)),
        (at(R, 2, 0), at(R, 2, 1)),
    ],
    // B
    [
        (at(R, 2, 4), at(R, 2, 3)),
        (at(D, 0, 0), at(D, 1, 1)),
        (at(L, 2, 0), at(L, 2, 1)),
    ],
];

/// `(layer, position)` of the tips and centres of a face.
pub(crate) const LARGE_CORNER_POSITIONS: [(u8, u8); 6] =
    [(0, 0), (1, 1), (2, 0), (2, 1), (2, 3), (2, 4)];

/// The edges between face D and the faces L, F and R. Each check pairs an
/// edge facelet with the centre `(1, 1)` of the face it sits on.
pub(crate) const MIDDLE_PIECES: [[(FaceletAddress, FaceletAddress); 2]; 3] = [
    // L-R
    [
        (at(F, 2, 2), at(F, 1, 1)),
        (at(D, 2, 2), at(D, 1, 1)),
    ],
    // L-B
    [
        (at(L, 2, 2), at(L, 1, 1)),
        (at(D, 1, 0), at(D, 1, 1)),
    ],
    // R-B
    [
        (at(R, 2, 2), at(R, 1, 1)),
        (at(D, 1, 2), at(D, 1, 1)),
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_trio_counts() {
        for corner in Corner::ALL {
            assert_eq!(switching_trios(corner, Layer::Tip).len(), 1);
            assert_eq!(switching_trios(corner, Layer::TipAndMiddle).len(), 4);
            assert_eq!(
                switching_trios(corner, Layer::Tip)[0],
                switching_trios(corner, Layer::TipAndMiddle)[0]
            );
        }
    }

    #[test]
    fn test_addresses_are_in_bounds_and_distinct() {
        for corner in Corner::ALL {
            let addresses = switching_trios(corner, Layer::TipAndMiddle)
                .iter()
                .flatten()
                .collect_vec();
            assert!(addresses.iter().all(|address| address.is_valid()));
            assert!(addresses.iter().all_unique());
            // A trio never holds two facelets of the same face
            for trio in switching_trios(corner, Layer::TipAndMiddle) {
                assert!(trio.iter().map(|address| address.face).all_unique());
            }
        }
    }

    #[test]
    fn test_tips_are_face_corners() {
        let corners = [(0, 0), (2, 0), (2, 4)];
        let tips = Corner::ALL
            .into_iter()
            .flat_map(|corner| switching_trios(corner, Layer::Tip)[0])
            .collect_vec();
        assert_eq!(tips.len(), 12);
        assert!(tips.iter().all_unique());
        assert!(
            tips.iter()
                .all(|tip| corners.contains(&(tip.layer, tip.position)))
        );
    }

    #[test]
    fn test_exact_tip_and_middle_addresses() {
        assert_eq!(
            switching_trios(Corner::U, Layer::TipAndMiddle)[2],
            [at(F, 1, 1), at(R, 1, 1), at(L, 1, 1)]
        );
        assert_eq!(
            switching_trios(Corner::L, Layer::TipAndMiddle)[1],
            [at(F, 1, 0), at(L, 2, 2), at(D, 2, 2)]
        );
        assert_eq!(
            switching_trios(Corner::R, Layer::TipAndMiddle)[3],
            [at(F, 2, 2), at(D, 1, 2), at(R, 1, 0)]
        );
        assert_eq!(
            switching_trios(Corner::B, Layer::Tip),
            [[at(R, 2, 4), at(D, 0, 0), at(L, 2, 0)]]
        );
    }

    #[test]
    fn test_metric_tables_use_valid_addresses() {
        assert!(
            SMALL_CORNERS
                .iter()
                .flatten()
                .all(|(tip, centre)| tip.is_valid() && centre.is_valid() && tip.face == centre.face)
        );
        assert!(
            MIDDLE_PIECES
                .iter()
                .flatten()
                .all(|(edge, centre)| edge.is_valid() && centre.is_valid() && edge.face == centre.face)
        );
    }
}

//! Named shorthands for fixed sequences of primitive moves.
//!
//! Every macro is a commutator `A B A' B'` of two tip and middle turns. Both
//! turns are undone within the sequence, so tips and centres end up exactly
//! where they started and only edge pieces are cycled. The primed symbol is
//! the inverse commutator `B A B' A'`.

use crate::moves::{Corner, Direction, InvalidMoveError, Layer, Move, Token};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MacroMove {
    /// `R' L R L'`
    X,
    XPrime,
    /// `L' B L B'`
    Y,
    YPrime,
    /// `B' R B R'`
    Z,
    ZPrime,
    /// `R U R' U'`
    P,
    PPrime,
    /// `L U L' U'`
    Q,
    QPrime,
    /// `B U B' U'`
    S,
    SPrime,
}

const fn wide(corner: Corner, direction: Direction) -> Move {
    Move::new(corner, Layer::TipAndMiddle, direction)
}

const CW: Direction = Direction::Clockwise;
const CCW: Direction = Direction::CounterClockwise;

impl MacroMove {
    pub const ALL: [Self; 12] = [
        MacroMove::X,
        MacroMove::XPrime,
        MacroMove::Y,
        MacroMove::YPrime,
        MacroMove::Z,
        MacroMove::ZPrime,
        MacroMove::P,
        MacroMove::PPrime,
        MacroMove::Q,
        MacroMove::QPrime,
        MacroMove::S,
        MacroMove::SPrime,
    ];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            MacroMove::X => "X",
            MacroMove::XPrime => "X'",
            MacroMove::Y => "Y",
            MacroMove::YPrime => "Y'",
            MacroMove::Z => "Z",
            MacroMove::ZPrime => "Z'",
            MacroMove::P => "P",
            MacroMove::PPrime => "P'",
            MacroMove::Q => "Q",
            MacroMove::QPrime => "Q'",
            MacroMove::S => "S",
            MacroMove::SPrime => "S'",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        MacroMove::ALL
            .into_iter()
            .find(|macro_move| macro_move.symbol() == symbol)
    }

    /// The pair `(A, B)` of the commutator `A B A' B'`.
    const fn commutator(self) -> (Move, Move) {
        let (a, b) = match self {
            MacroMove::X | MacroMove::XPrime => (wide(Corner::R, CCW), wide(Corner::L, CW)),
            MacroMove::Y | MacroMove::YPrime => (wide(Corner::L, CCW), wide(Corner::B, CW)),
            MacroMove::Z | MacroMove::ZPrime => (wide(Corner::B, CCW), wide(Corner::R, CW)),
            MacroMove::P | MacroMove::PPrime => (wide(Corner::R, CW), wide(Corner::U, CW)),
            MacroMove::Q | MacroMove::QPrime => (wide(Corner::L, CW), wide(Corner::U, CW)),
            MacroMove::S | MacroMove::SPrime => (wide(Corner::B, CW), wide(Corner::U, CW)),
        };
        if self.is_prime() { (b, a) } else { (a, b) }
    }

    #[must_use]
    pub const fn is_prime(self) -> bool {
        matches!(
            self,
            MacroMove::XPrime
                | MacroMove::YPrime
                | MacroMove::ZPrime
                | MacroMove::PPrime
                | MacroMove::QPrime
                | MacroMove::SPrime
        )
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            MacroMove::X => MacroMove::XPrime,
            MacroMove::XPrime => MacroMove::X,
            MacroMove::Y => MacroMove::YPrime,
            MacroMove::YPrime => MacroMove::Y,
            MacroMove::Z => MacroMove::ZPrime,
            MacroMove::ZPrime => MacroMove::Z,
            MacroMove::P => MacroMove::PPrime,
            MacroMove::PPrime => MacroMove::P,
            MacroMove::Q => MacroMove::QPrime,
            MacroMove::QPrime => MacroMove::Q,
            MacroMove::S => MacroMove::SPrime,
            MacroMove::SPrime => MacroMove::S,
        }
    }

    #[must_use]
    pub const fn primitives(self) -> [Move; 4] {
        let (a, b) = self.commutator();
        [a, b, a.inverse(), b.inverse()]
    }
}

impl FromStr for MacroMove {
    type Err = InvalidMoveError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        MacroMove::from_symbol(symbol)
            .ok_or_else(|| InvalidMoveError::UnknownToken(symbol.to_owned()))
    }
}

/// Expand a token into primitive move tokens. Anything that is not a macro
/// symbol is returned unchanged as a single-element sequence.
#[must_use]
pub fn expand(token: &str) -> Vec<String> {
    match MacroMove::from_symbol(token) {
        Some(macro_move) => Token::Macro(macro_move)
            .primitives()
            .map(|move_| move_.to_string())
            .collect(),
        None => vec![token.to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PuzzleState;
    use itertools::Itertools;

    #[test]
    fn test_expand_table() {
        assert_eq!(expand("X"), ["R'", "L", "R", "L'"]);
        assert_eq!(expand("X'"), ["L", "R'", "L'", "R"]);
        assert_eq!(expand("Y"), ["L'", "B", "L", "B'"]);
        assert_eq!(expand("Z"), ["B'", "R", "B", "R'"]);
        assert_eq!(expand("P"), ["R", "U", "R'", "U'"]);
        assert_eq!(expand("Q'"), ["U", "L", "U'", "L'"]);
        assert_eq!(expand("S"), ["B", "U", "B'", "U'"]);
    }

    #[test]
    fn test_expand_passes_through_unknown_tokens() {
        assert_eq!(expand("r'"), ["r'"]);
        assert_eq!(expand("U"), ["U"]);
        assert_eq!(expand("nonsense"), ["nonsense"]);
    }

    #[test]
    fn test_symbols_round_trip() {
        for macro_move in MacroMove::ALL {
            assert_eq!(macro_move.symbol().parse::<MacroMove>(), Ok(macro_move));
            assert_eq!(macro_move.inverse().inverse(), macro_move);
            assert_ne!(macro_move.is_prime(), macro_move.inverse().is_prime());
        }
        assert!("x".parse::<MacroMove>().is_err());
    }

    #[test]
    fn test_macro_then_inverse_is_identity() {
        let mut rng = fastrand::Rng::with_seed(7);
        for macro_move in MacroMove::ALL {
            let mut state = PuzzleState::solved();
            state.scramble(&mut rng, 25);
            let before = state.clone();
            state.apply_token(Token::Macro(macro_move));
            state.apply_token(Token::Macro(macro_move.inverse()));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_macro_matches_expanded_sequence() {
        let mut rng = fastrand::Rng::with_seed(11);
        for macro_move in MacroMove::ALL {
            let mut start = PuzzleState::solved();
            start.scramble(&mut rng, 25);

            let mut via_macro = start.clone();
            assert!(via_macro.apply(macro_move.symbol()).is_err());
            via_macro.apply_sequence(macro_move.symbol()).unwrap();

            let mut via_expansion = start.clone();
            for token in expand(macro_move.symbol()) {
                via_expansion.apply(&token).unwrap();
            }
            assert_eq!(via_macro, via_expansion);

            let mut via_joined = start;
            via_joined
                .apply_sequence(&expand(macro_move.symbol()).iter().join(" "))
                .unwrap();
            assert_eq!(via_macro, via_joined);
        }
    }

    #[test]
    fn test_macros_keep_tips_and_centres() {
        for macro_move in MacroMove::ALL {
            let mut state = PuzzleState::solved();
            state.apply_token(Token::Macro(macro_move));
            assert_eq!(state.small_corners_solved(), 4, "{}", macro_move.symbol());
            assert_eq!(state.large_corners_solved(), 4, "{}", macro_move.symbol());
            assert!(!state.is_solved(), "{}", macro_move.symbol());
        }
    }
}

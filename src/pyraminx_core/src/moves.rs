use crate::macro_moves::MacroMove;
use itertools::Either;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The four corners of the tetrahedron a turn can be made around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    U,
    L,
    R,
    B,
}

/// How deep a turn reaches into the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Only the tip is turned. Written with a lowercase letter.
    Tip,
    /// The tip and the middle layer below it are turned. Written with an
    /// uppercase letter.
    TipAndMiddle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// A primitive turn: one of the 16 combinations of corner, layer and
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub corner: Corner,
    pub layer: Layer,
    pub direction: Direction,
}

/// A gene of a stage's vocabulary: either a primitive turn or a macro that
/// expands to a fixed sequence of primitive turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Primitive(Move),
    Macro(MacroMove),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("Move {0:?} must be one or two characters long")]
    InvalidLength(String),
    #[error("Move {0:?} does not start with one of the corners U, L, R or B")]
    UnknownCorner(String),
    #[error("Move {0:?} may only be followed by an apostrophe")]
    InvalidSuffix(String),
    #[error("{0:?} is neither a primitive move nor a macro move")]
    UnknownToken(String),
}

impl Corner {
    pub const ALL: [Self; 4] = [Corner::U, Corner::L, Corner::R, Corner::B];

    /// Case-insensitive lookup of a corner letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Corner::U),
            'L' => Some(Corner::L),
            'R' => Some(Corner::R),
            'B' => Some(Corner::B),
            _ => None,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Corner::U => 'U',
            Corner::L => 'L',
            Corner::R => 'R',
            Corner::B => 'B',
        }
    }
}

impl Layer {
    #[must_use]
    pub const fn depth(self) -> u8 {
        match self {
            Layer::Tip => 1,
            Layer::TipAndMiddle => 2,
        }
    }
}

impl Direction {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl Move {
    /// Every primitive move in vocabulary order: all tip moves first, then all
    /// tip and middle moves, each corner followed by its inverse.
    pub const ALL: [Self; 16] = {
        let mut all = [Move::new(Corner::U, Layer::Tip, Direction::Clockwise); 16];
        let layers = [Layer::Tip, Layer::TipAndMiddle];
        let directions = [Direction::Clockwise, Direction::CounterClockwise];
        let mut i = 0;
        while i < all.len() {
            all[i] = Move::new(Corner::ALL[(i / 2) % 4], layers[i / 8], directions[i % 2]);
            i += 1;
        }
        all
    };

    #[must_use]
    pub const fn new(corner: Corner, layer: Layer, direction: Direction) -> Self {
        Move {
            corner,
            layer,
            direction,
        }
    }

    /// The move undoing this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Move {
            direction: self.direction.flipped(),
            ..self
        }
    }

    /// Position of this move in [`Move::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        let layer = match self.layer {
            Layer::Tip => 0,
            Layer::TipAndMiddle => 8,
        };
        let direction = match self.direction {
            Direction::Clockwise => 0,
            Direction::CounterClockwise => 1,
        };
        layer + self.corner as usize * 2 + direction
    }
}

impl FromStr for Move {
    type Err = InvalidMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let (Some(letter), suffix, None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(InvalidMoveError::InvalidLength(token.to_owned()));
        };
        let corner = Corner::from_letter(letter)
            .ok_or_else(|| InvalidMoveError::UnknownCorner(token.to_owned()))?;
        let layer = if letter.is_ascii_lowercase() {
            Layer::Tip
        } else {
            Layer::TipAndMiddle
        };
        let direction = match suffix {
            None => Direction::Clockwise,
            Some('\'') => Direction::CounterClockwise,
            Some(_) => return Err(InvalidMoveError::InvalidSuffix(token.to_owned())),
        };
        Ok(Move::new(corner, layer, direction))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.layer {
            Layer::Tip => self.corner.letter().to_ascii_lowercase(),
            Layer::TipAndMiddle => self.corner.letter(),
        };
        match self.direction {
            Direction::Clockwise => write!(f, "{letter}"),
            Direction::CounterClockwise => write!(f, "{letter}'"),
        }
    }
}

impl Token {
    /// The primitive moves this token stands for, in application order.
    pub fn primitives(self) -> impl Iterator<Item = Move> {
        match self {
            Token::Primitive(move_) => Either::Left(std::iter::once(move_)),
            Token::Macro(macro_move) => Either::Right(macro_move.primitives().into_iter()),
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Token::Primitive(move_) => Token::Primitive(move_.inverse()),
            Token::Macro(macro_move) => Token::Macro(macro_move.inverse()),
        }
    }
}

impl From<Move> for Token {
    fn from(move_: Move) -> Self {
        Token::Primitive(move_)
    }
}

impl From<MacroMove> for Token {
    fn from(macro_move: MacroMove) -> Self {
        Token::Macro(macro_move)
    }
}

impl FromStr for Token {
    type Err = InvalidMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if let Some(macro_move) = MacroMove::from_symbol(token) {
            return Ok(Token::Macro(macro_move));
        }
        match token.parse::<Move>() {
            Ok(move_) => Ok(Token::Primitive(move_)),
            Err(InvalidMoveError::UnknownCorner(token)) => {
                Err(InvalidMoveError::UnknownToken(token))
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Primitive(move_) => fmt::Display::fmt(move_, f),
            Token::Macro(macro_move) => f.write_str(macro_move.symbol()),
        }
    }
}

use crate::{
    moves::{Direction, InvalidMoveError, Move, Token},
    topology::{Trio, switching_trios},
};
use itertools::Itertools;
use log::trace;
use std::fmt;

pub const LAYER_COUNT: u8 = 3;
pub const FACELETS_PER_FACE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    L,
    F,
    R,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Yellow,
    Green,
    Red,
    Blue,
}

/// A facelet named by its face, its layer counted from the face's tip, and
/// its position within that layer. Layer `k` holds `2k + 1` facelets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceletAddress {
    pub face: Face,
    pub layer: u8,
    pub position: u8,
}

/// The colours of all 36 facelets. Each face is stored flat, layer by layer,
/// so layer `k` starts at index `k * k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    faces: [[Color; FACELETS_PER_FACE]; 4],
}

impl Face {
    pub const ALL: [Self; 4] = [Face::L, Face::F, Face::R, Face::D];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::L => 'L',
            Face::F => 'F',
            Face::R => 'R',
            Face::D => 'D',
        }
    }

    /// The colour of this face on a solved puzzle.
    #[must_use]
    pub const fn home_color(self) -> Color {
        match self {
            Face::L => Color::Yellow,
            Face::F => Color::Green,
            Face::R => Color::Red,
            Face::D => Color::Blue,
        }
    }
}

impl Color {
    pub const ALL: [Self; 4] = [Color::Yellow, Color::Green, Color::Red, Color::Blue];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Blue => 'B',
        }
    }
}

impl FaceletAddress {
    #[must_use]
    pub const fn new(face: Face, layer: u8, position: u8) -> Self {
        FaceletAddress {
            face,
            layer,
            position,
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.layer < LAYER_COUNT && self.position <= 2 * self.layer
    }

    /// Index of this facelet within its face's flat storage.
    #[must_use]
    pub const fn offset(self) -> usize {
        (self.layer * self.layer + self.position) as usize
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        PuzzleState::solved()
    }
}

impl PuzzleState {
    /// The canonical solved puzzle: L yellow, F green, R red, D blue.
    #[must_use]
    pub fn solved() -> Self {
        PuzzleState {
            faces: Face::ALL.map(|face| [face.home_color(); FACELETS_PER_FACE]),
        }
    }

    /// Overwrite the puzzle with arbitrary colours, indexed by `Face as usize`.
    #[must_use]
    pub const fn from_faces(faces: [[Color; FACELETS_PER_FACE]; 4]) -> Self {
        PuzzleState { faces }
    }

    #[must_use]
    pub const fn faces(&self) -> &[[Color; FACELETS_PER_FACE]; 4] {
        &self.faces
    }

    #[must_use]
    pub const fn face(&self, face: Face) -> &[Color; FACELETS_PER_FACE] {
        &self.faces[face as usize]
    }

    /// The `2 * layer + 1` facelets of one layer of a face.
    ///
    /// # Panics
    ///
    /// If `layer` is not below [`LAYER_COUNT`].
    #[must_use]
    pub fn layer(&self, face: Face, layer: u8) -> &[Color] {
        assert!(layer < LAYER_COUNT, "A face only has {LAYER_COUNT} layers");
        let start = FaceletAddress::new(face, layer, 0).offset();
        &self.face(face)[start..=start + 2 * layer as usize]
    }

    /// # Panics
    ///
    /// If the address does not name a facelet.
    #[must_use]
    pub fn facelet(&self, face: Face, layer: u8, position: u8) -> Color {
        self.at(FaceletAddress::new(face, layer, position))
    }

    /// # Panics
    ///
    /// If the address does not name a facelet.
    #[must_use]
    pub fn at(&self, address: FaceletAddress) -> Color {
        assert!(address.is_valid(), "{address:?} is not a facelet");
        self.faces[address.face as usize][address.offset()]
    }

    fn at_mut(&mut self, address: FaceletAddress) -> &mut Color {
        &mut self.faces[address.face as usize][address.offset()]
    }

    /// Parse and apply a single primitive move token such as `"u"` or `"B'"`.
    ///
    /// # Errors
    ///
    /// If the token does not follow the move grammar. The state is left
    /// untouched in that case.
    pub fn apply(&mut self, token: &str) -> Result<(), InvalidMoveError> {
        let move_ = token.parse::<Move>()?;
        self.apply_move(move_);
        Ok(())
    }

    pub fn apply_move(&mut self, move_: Move) {
        trace!("Applying {move_}");
        for trio in switching_trios(move_.corner, move_.layer) {
            self.cycle(trio, move_.direction);
        }
    }

    /// Apply a primitive move or every primitive of a macro move in order.
    pub fn apply_token(&mut self, token: Token) {
        for move_ in token.primitives() {
            self.apply_move(move_);
        }
    }

    /// Apply whitespace-separated tokens, primitives or macros. Every token is
    /// parsed before anything is applied.
    ///
    /// # Errors
    ///
    /// If any token is neither a primitive move nor a macro move.
    pub fn apply_sequence(&mut self, sequence: &str) -> Result<Vec<Token>, InvalidMoveError> {
        let tokens = sequence
            .split_whitespace()
            .map(str::parse::<Token>)
            .collect::<Result<Vec<_>, _>>()?;
        for &token in &tokens {
            self.apply_token(token);
        }
        Ok(tokens)
    }

    /// Clockwise carries each colour to the next address of the trio,
    /// counter-clockwise to the previous one.
    fn cycle(&mut self, trio: &Trio, direction: Direction) {
        let [a, b, c] = trio.map(|address| self.at(address));
        let rotated = match direction {
            Direction::Clockwise => [c, a, b],
            Direction::CounterClockwise => [b, c, a],
        };
        for (&address, color) in trio.iter().zip(rotated) {
            *self.at_mut(address) = color;
        }
    }

    /// Apply `move_count` uniformly random primitive moves and return them.
    pub fn scramble(&mut self, rng: &mut fastrand::Rng, move_count: usize) -> Vec<Move> {
        (0..move_count)
            .map(|_| {
                let move_ = Move::ALL[rng.usize(..Move::ALL.len())];
                self.apply_move(move_);
                move_
            })
            .collect()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.faces.iter().all(|face| face.iter().all_equal())
    }

    /// How many facelets of every colour, indexed by `Color as usize`.
    #[must_use]
    pub fn color_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for &color in self.faces.iter().flatten() {
            counts[color as usize] += 1;
        }
        counts
    }

    fn format_layer(&self, face: Face, layer: u8) -> String {
        let row = self
            .layer(face, layer)
            .iter()
            .map(|color| color.letter())
            .join(" ");
        format!("{row:^11}")
    }
}

impl fmt::Display for PuzzleState {
    /// L, F and R side by side with their tips up, D below pointing down.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in 0..LAYER_COUNT {
            let row = [Face::L, Face::F, Face::R]
                .map(|face| self.format_layer(face, layer))
                .join("  ");
            writeln!(f, "{}", row.trim_end())?;
        }
        for layer in (0..LAYER_COUNT).rev() {
            writeln!(
                f,
                "{:13}{}",
                "",
                self.format_layer(Face::D, layer).trim_end()
            )?;
        }
        Ok(())
    }
}

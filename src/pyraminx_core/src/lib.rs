#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]

//! State and move engine for the Pyraminx: four triangular faces L, F, R and
//! D, each made of three layers of 1, 3 and 5 facelets.

pub mod macro_moves;
pub mod metrics;
pub mod moves;
pub mod puzzle;
pub mod topology;

pub use macro_moves::{MacroMove, expand};
pub use moves::{Corner, Direction, InvalidMoveError, Layer, Move, Token};
pub use puzzle::{Color, Face, FaceletAddress, PuzzleState};

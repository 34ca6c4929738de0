//! Grid, piece and shape primitives.
//!
//! - [`Grid`] - Fixed-size playfield of [`Cell`]s with collision, merge and line clear
//! - [`Piece`] - A piece kind at a rotation and position
//! - [`PieceKind`] / [`Shape`] - The seven shapes and their rotation tables

pub use self::{grid::*, piece::*, shape::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;

//! Core types for the solochess engine.
//!
//! This crate provides the fundamental value types shared across the
//! workspace:
//! - [`Color`] for the two players
//! - [`Piece`] and [`PieceKind`] for the one-byte piece encoding
//! - [`Square`] for board coordinates
//! - [`MoveRecord`] for generated and recorded moves
//! - [`GameStatus`] for the game lifecycle

mod color;
mod piece;
mod record;
mod square;
mod status;

pub use color::Color;
pub use piece::{Piece, PieceKind};
pub use record::MoveRecord;
pub use square::Square;
pub use status::GameStatus;

use thiserror::Error;

/// Errors decoding wire bytes into core types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid square index: {0} (expected 0-63)")]
    InvalidSquare(u8),

    #[error("invalid piece type: {0} (expected 1-6)")]
    InvalidPieceKind(u8),
}

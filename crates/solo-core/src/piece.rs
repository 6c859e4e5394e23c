//! Piece encoding.
//!
//! A piece is a single byte, and the board is 64 of them: the low three bits
//! carry the type, bit 3 the color, bit 4 whether the piece has moved (used
//! for castling eligibility). Bits 5-7 are reserved zero. The byte is also
//! the wire encoding, so board snapshots are a straight copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;

/// The six piece types. Discriminants match the wire type bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// All piece types in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Creates a piece kind from its wire value (1-6).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Returns the wire value (1-6).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns true for knight and bishop.
    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }

    /// Returns true if this kind is a valid promotion target.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Returns the lowercase letter used in board display.
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = crate::EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PieceKind::from_index(value).ok_or(crate::EncodingError::InvalidPieceKind(value))
    }
}

impl From<PieceKind> for u8 {
    fn from(kind: PieceKind) -> u8 {
        kind.index()
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A board cell: either empty or a piece byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(u8);

impl Piece {
    const TYPE_MASK: u8 = 0b0000_0111;
    const COLOR_BIT: u8 = 0b0000_1000;
    const MOVED_BIT: u8 = 0b0001_0000;

    /// The empty cell.
    pub const EMPTY: Piece = Piece(0);

    /// Creates a fresh (never-moved) piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        let color_bit = match color {
            Color::White => 0,
            Color::Black => Self::COLOR_BIT,
        };
        Piece(kind.index() | color_bit)
    }

    /// Decodes a wire byte, rejecting reserved bits and invalid types.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte == 0 {
            return Some(Piece::EMPTY);
        }
        if byte & !(Self::TYPE_MASK | Self::COLOR_BIT | Self::MOVED_BIT) != 0 {
            return None;
        }
        match PieceKind::from_index(byte & Self::TYPE_MASK) {
            Some(_) => Some(Piece(byte)),
            None => None,
        }
    }

    /// Returns the wire byte.
    #[inline]
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Returns true if the cell is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the piece type, or `None` for an empty cell.
    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_index(self.0 & Self::TYPE_MASK)
    }

    /// Returns the color. Only meaningful for a non-empty cell.
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & Self::COLOR_BIT != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Returns true if the cell holds a piece of the given color.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        !self.is_empty() && (self.0 & Self::COLOR_BIT != 0) == matches!(color, Color::Black)
    }

    /// Returns true if the cell holds the given kind of the given color.
    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.is_color(color) && self.kind() == Some(kind)
    }

    /// Returns true if the piece has relocated at least once.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.0 & Self::MOVED_BIT != 0
    }

    /// Returns this piece with the has-moved flag set.
    #[inline]
    pub const fn with_moved(self) -> Self {
        Piece(self.0 | Self::MOVED_BIT)
    }

    /// Returns this piece re-typed to the given kind, preserving color and
    /// the has-moved flag. Used for promotion.
    #[inline]
    pub const fn promoted_to(self, kind: PieceKind) -> Self {
        Piece((self.0 & !Self::TYPE_MASK) | kind.index())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({})", self)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            None => write!(f, "."),
            Some(kind) => {
                let c = kind.to_char();
                match self.color() {
                    Color::White => write!(f, "{}", c.to_ascii_uppercase()),
                    Color::Black => write!(f, "{}", c),
                }
            }
        }
    }
}

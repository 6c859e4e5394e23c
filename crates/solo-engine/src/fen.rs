//! FEN (Forsyth-Edwards Notation) import and export for positions.
//!
//! The has-moved flags in the piece encoding subsume FEN's castling-rights
//! field: on import, an absent right marks the corresponding rook as moved;
//! on export, rights are derived from unmoved kings and rooks on their home
//! squares. The fullmove counter is accepted but not stored; move counting
//! lives in [`Game`](crate::Game).

use solo_core::{Color, Piece, PieceKind, Square};
use thiserror::Error;

use crate::Position;

/// The standard starting position.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

impl Position {
    /// Parses a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let mut position = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row as u8; // FEN lists rank 8 first
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else if let Some((kind, color)) = piece_from_char(c) {
                    let sq = Square::from_coords(file, rank).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!("rank overflow at '{}'", c))
                    })?;
                    position.place(sq, Piece::new(kind, color));
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}'",
                        c
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} files",
                    rank + 1,
                    file
                )));
            }
        }

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        // An absent castling right means the involved rook has moved (or is
        // gone); mark the rook so eligibility matches the FEN exactly.
        for (right, file, color) in [
            ('K', 7u8, Color::White),
            ('Q', 0u8, Color::White),
            ('k', 7u8, Color::Black),
            ('q', 0u8, Color::Black),
        ] {
            if !parts[2].contains(right) {
                if let Some(corner) = Square::from_coords(file, color.back_rank()) {
                    let rook = position.piece_at(corner);
                    if rook.is(PieceKind::Rook, color) {
                        position.place(corner, rook.with_moved());
                    }
                }
            }
        }

        position.en_passant = match parts[3] {
            "-" => None,
            s => Some(
                Square::from_algebraic(s)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(s.to_string()))?,
            ),
        };

        position.halfmove_clock = parts[4]
            .parse::<u64>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        parts[5]
            .parse::<u64>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(position)
    }

    /// Serializes the position to FEN. The fullmove field is emitted as 1.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                // SAFETY: file and rank are both in 0-7
                let sq = unsafe { Square::from_index_unchecked(rank * 8 + file) };
                let piece = self.piece_at(sq);
                match piece.kind() {
                    None => empty_run += 1,
                    Some(kind) => {
                        if empty_run > 0 {
                            fen.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let c = kind.to_char();
                        fen.push(match piece.color() {
                            Color::White => c.to_ascii_uppercase(),
                            Color::Black => c,
                        });
                    }
                }
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let mut any_right = false;
        for (right, file, color) in [
            ('K', 7u8, Color::White),
            ('Q', 0u8, Color::White),
            ('k', 7u8, Color::Black),
            ('q', 0u8, Color::Black),
        ] {
            if self.castling_right(file, color) {
                fen.push(right);
                any_right = true;
            }
        }
        if !any_right {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} 1", self.halfmove_clock));
        fen
    }

    fn castling_right(&self, rook_file: u8, color: Color) -> bool {
        let back = color.back_rank();
        let king_home = Square::from_coords(4, back);
        let corner = Square::from_coords(rook_file, back);
        match (king_home, corner) {
            (Some(king_home), Some(corner)) => {
                let king = self.piece_at(king_home);
                let rook = self.piece_at(corner);
                king.is(PieceKind::King, color)
                    && !king.has_moved()
                    && rook.is(PieceKind::Rook, color)
                    && !rook.has_moved()
            }
            _ => false,
        }
    }
}

fn piece_from_char(c: char) -> Option<(PieceKind, Color)> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some((kind, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_roundtrip() {
        let pos = Position::from_fen(STARTPOS_FEN).unwrap();
        assert_eq!(pos, Position::startpos());
        assert_eq!(pos.to_fen(), STARTPOS_FEN);
    }

    #[test]
    fn parses_side_and_clock() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/4K2k b - - 42 9").unwrap();
        assert_eq!(pos.side_to_move, Color::Black);
        assert_eq!(pos.halfmove_clock, 42);
        assert_eq!(pos.en_passant, None);
    }

    #[test]
    fn parses_en_passant_target() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        assert_eq!(pos.en_passant, Square::from_algebraic("d6"));
    }

    #[test]
    fn castling_rights_map_to_moved_flags() {
        let pos =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Kq - 0 1").unwrap();
        // White kingside kept, queenside gone.
        assert!(!pos.piece_at(Square::H1).has_moved());
        assert!(pos.piece_at(Square::A1).has_moved());
        // Black queenside kept, kingside gone.
        assert!(!pos.piece_at(Square::A8).has_moved());
        assert!(pos.piece_at(Square::H8).has_moved());
        assert_eq!(pos.to_fen(), "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Kq - 0 1");
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(matches!(
            Position::from_fen("8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPartCount(_))
        ));
        assert!(matches!(
            Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/4K2k x - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/4K2k w - zz 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/4K2k w - - x 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
    }
}

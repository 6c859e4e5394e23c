//! Static position evaluation.
//!
//! Scores are signed centipawns from the engine's fixed orientation: Black
//! ahead is positive, White ahead is negative. Three components: material,
//! placement bonuses measured from each piece's own side of the board, and
//! king safety. The starting position scores exactly zero.

use solo_core::{Color, PieceKind, Square};
use solo_engine::Position;

/// Piece values in centipawns.
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

/// Returns the material value of a piece kind.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Evaluates the position. Positive favors Black, negative favors White.
pub fn evaluate(position: &Position) -> i32 {
    let mut score = 0i32;

    for index in 0..64u8 {
        // SAFETY: index is in 0-63
        let sq = unsafe { Square::from_index_unchecked(index) };
        let piece = position.piece_at(sq);
        let Some(kind) = piece.kind() else { continue };
        let color = piece.color();
        let sign = if color == Color::Black { 1 } else { -1 };
        score += sign * (piece_value(kind) + placement_bonus(sq, kind, color));
    }

    score + king_safety(position, Color::Black) - king_safety(position, Color::White)
}

/// Placement bonus for a piece, measured from its own side of the board.
fn placement_bonus(sq: Square, kind: PieceKind, color: Color) -> i32 {
    let file = sq.file();
    let rank = sq.rank();
    let advance = color.relative_rank(rank);

    match kind {
        PieceKind::Pawn => {
            let mut bonus = advance as i32 * 10;
            if (2..=5).contains(&file) {
                bonus += 10;
            }
            if (file == 3 || file == 4) && advance >= 4 {
                bonus += 15;
            }
            bonus
        }
        PieceKind::Knight => {
            if central_block(file, rank) {
                30
            } else if is_corner(file, rank) {
                0
            } else {
                10
            }
        }
        PieceKind::Bishop => {
            if central_block(file, rank) {
                20
            } else {
                0
            }
        }
        PieceKind::Rook => {
            if advance == 6 {
                30
            } else {
                0
            }
        }
        PieceKind::Queen => {
            if (2..=5).contains(&rank) {
                5
            } else {
                0
            }
        }
        PieceKind::King => {
            if advance == 0 && (file <= 1 || file >= 6) {
                30
            } else {
                0
            }
        }
    }
}

/// The central 4x4 block (files c-f, ranks 3-6).
#[inline]
const fn central_block(file: u8, rank: u8) -> bool {
    file >= 2 && file <= 5 && rank >= 2 && rank <= 5
}

#[inline]
const fn is_corner(file: u8, rank: u8) -> bool {
    (file == 0 || file == 7) && (rank == 0 || rank == 7)
}

/// King safety for one side: a castling bonus plus the pawn shield one rank
/// in front of the king across its three files.
fn king_safety(position: &Position, color: Color) -> i32 {
    let mut bonus = if position.has_castled(color) { 40 } else { 0 };
    let king = position.king_square(color);
    let forward = color.pawn_direction();
    for file_delta in [-1, 0, 1] {
        if let Some(shield) = king.offset(file_delta, forward) {
            if position.piece_at(shield).is(PieceKind::Pawn, color) {
                bonus += 15;
            }
        }
    }
    bonus
}

//! Attack geometry.
//!
//! The attacked-square predicate scans the full board and asks, per piece
//! of the attacking color, whether its geometry reaches the target with a
//! clear path. The path predicates walk one step at a time through checked
//! square arithmetic, so edge squares never underflow.

use solo_core::{Color, Piece, PieceKind, Square};

/// Returns true if `target` is attacked by any piece of color `by`.
pub fn is_square_attacked(board: &[Piece; 64], target: Square, by: Color) -> bool {
    for index in 0..64u8 {
        // SAFETY: index is in 0-63
        let from = unsafe { Square::from_index_unchecked(index) };
        let piece = board[index as usize];
        if !piece.is_color(by) {
            continue;
        }
        let Some(kind) = piece.kind() else { continue };
        if can_attack(board, from, target, kind, by) {
            return true;
        }
    }
    false
}

/// Returns true if a piece of the given kind and color on `from` attacks `to`.
///
/// Pawn attacks are diagonal only; pushes do not attack.
pub fn can_attack(board: &[Piece; 64], from: Square, to: Square, kind: PieceKind, by: Color) -> bool {
    if from == to {
        return false;
    }
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;

    match kind {
        PieceKind::Pawn => rank_delta == by.pawn_direction() && file_delta.abs() == 1,
        PieceKind::Knight => {
            (file_delta.abs() == 1 && rank_delta.abs() == 2)
                || (file_delta.abs() == 2 && rank_delta.abs() == 1)
        }
        PieceKind::Bishop => {
            file_delta.abs() == rank_delta.abs() && diagonal_clear(board, from, to)
        }
        PieceKind::Rook => {
            ((file_delta == 0) != (rank_delta == 0)) && line_clear(board, from, to)
        }
        PieceKind::Queen => {
            (file_delta.abs() == rank_delta.abs() && diagonal_clear(board, from, to))
                || (((file_delta == 0) != (rank_delta == 0)) && line_clear(board, from, to))
        }
        PieceKind::King => file_delta.abs() <= 1 && rank_delta.abs() <= 1,
    }
}

/// Returns true if the diagonal between `from` and `to` is empty, endpoints
/// exclusive.
///
/// Tolerates non-diagonal arguments by reporting clear; callers gate on the
/// geometry before using the result.
pub fn diagonal_clear(board: &[Piece; 64], from: Square, to: Square) -> bool {
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    if file_delta == 0 || file_delta.abs() != rank_delta.abs() {
        return true;
    }
    walk_clear(board, from, to, file_delta.signum(), rank_delta.signum())
}

/// Returns true if the rank or file between `from` and `to` is empty,
/// endpoints exclusive.
///
/// Tolerates non-straight arguments by reporting clear.
pub fn line_clear(board: &[Piece; 64], from: Square, to: Square) -> bool {
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    if (file_delta == 0) == (rank_delta == 0) {
        return true;
    }
    walk_clear(board, from, to, file_delta.signum(), rank_delta.signum())
}

fn walk_clear(board: &[Piece; 64], from: Square, to: Square, file_step: i8, rank_step: i8) -> bool {
    let mut current = from.offset(file_step, rank_step);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board[sq.index() as usize].is_empty() {
            return false;
        }
        current = sq.offset(file_step, rank_step);
    }
    // The walk left the board without reaching `to`; only possible for
    // mismatched geometry, which callers discard.
    true
}

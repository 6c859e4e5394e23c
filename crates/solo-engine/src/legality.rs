//! Move legality.
//!
//! Validation is two-stage: the pseudo-legal check enforces each piece's
//! movement geometry, occupancy, and path clearance; the king-safety check
//! simulates the move on a working copy and rejects anything that leaves
//! the mover's king attacked.

use solo_core::{Color, PieceKind, Square};
use thiserror::Error;

use crate::attacks::{diagonal_clear, is_square_attacked, line_clear};
use crate::Position;

/// Errors rejecting a requested mutation. The position is unchanged on any
/// of these.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("no piece on the source square")]
    NoPiece,

    #[error("the piece on the source square belongs to the opponent")]
    WrongColor,

    #[error("the move does not follow the rules for that piece")]
    InvalidMove,

    #[error("promotion type missing or supplied on a non-promoting move")]
    InvalidPromotion,

    #[error("the move would leave the king in check")]
    WouldBeInCheck,

    #[error("neither the fifty-move rule nor insufficient material applies")]
    CannotClaimDraw,
}

/// Validates a move for the side to move, distinguishing failure causes.
pub fn validate_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<(), MoveError> {
    let mover = position.piece_at(from);
    if mover.is_empty() {
        return Err(MoveError::NoPiece);
    }
    let us = position.side_to_move;
    if !mover.is_color(us) {
        return Err(MoveError::WrongColor);
    }
    let kind = mover.kind().ok_or(MoveError::NoPiece)?;

    let target = position.piece_at(to);
    if target.is_color(us) {
        return Err(MoveError::InvalidMove);
    }

    // Promotion gating: exactly when a pawn reaches the last rank, and only
    // to knight, bishop, rook, or queen.
    let promoting = kind == PieceKind::Pawn && to.rank() == us.promotion_rank();
    match (promoting, promotion) {
        (true, Some(p)) if p.is_promotion_target() => {}
        (true, _) => return Err(MoveError::InvalidPromotion),
        (false, Some(_)) => return Err(MoveError::InvalidPromotion),
        (false, None) => {}
    }

    if !pseudo_legal(position, from, to, kind, us) {
        return Err(MoveError::InvalidMove);
    }

    let mut working = position.clone();
    working.apply(from, to, promotion);
    if working.in_check(us) {
        return Err(MoveError::WouldBeInCheck);
    }

    Ok(())
}

/// Returns true if the move passes both validation stages.
pub fn is_legal(position: &Position, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
    validate_move(position, from, to, promotion).is_ok()
}

fn pseudo_legal(position: &Position, from: Square, to: Square, kind: PieceKind, us: Color) -> bool {
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;
    if file_delta == 0 && rank_delta == 0 {
        return false;
    }
    let board = position.board();
    let target = position.piece_at(to);

    match kind {
        PieceKind::Pawn => {
            let dir = us.pawn_direction();
            let push = file_delta == 0 && rank_delta == dir && target.is_empty();
            let double = file_delta == 0
                && rank_delta == 2 * dir
                && from.rank() == us.pawn_start_rank()
                && target.is_empty()
                && matches!(from.offset(0, dir),
                    Some(mid) if position.piece_at(mid).is_empty());
            let capture =
                file_delta.abs() == 1 && rank_delta == dir && target.is_color(us.opposite());
            let en_passant = file_delta.abs() == 1
                && rank_delta == dir
                && target.is_empty()
                && position.en_passant == Some(to);
            push || double || capture || en_passant
        }
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
        PieceKind::King => {
            let adjacent = file_delta.abs() <= 1 && rank_delta.abs() <= 1;
            adjacent
                || (rank_delta == 0
                    && file_delta.abs() == 2
                    && castling_legal(position, us, from, to))
        }
    }
}

/// Full castling legality: unmoved king on its home square, unmoved rook on
/// the involved corner, empty span between them, king not in check, and no
/// attacked square on the king's path (traversed square and destination).
pub(crate) fn castling_legal(position: &Position, us: Color, from: Square, to: Square) -> bool {
    let king = position.piece_at(from);
    if king.has_moved() {
        return false;
    }
    let back = us.back_rank();
    if from.rank() != back || from.file() != 4 || to.rank() != back {
        return false;
    }

    let kingside = to.file() > from.file();
    if to.file() != if kingside { 6 } else { 2 } {
        return false;
    }

    let rook_file = if kingside { 7 } else { 0 };
    let Some(rook_sq) = Square::from_coords(rook_file, back) else {
        return false;
    };
    let rook = position.piece_at(rook_sq);
    if !rook.is(PieceKind::Rook, us) || rook.has_moved() {
        return false;
    }

    // Every square strictly between king and rook must be empty.
    let span = if kingside { 5..7 } else { 1..4 };
    for file in span {
        match Square::from_coords(file, back) {
            Some(sq) if position.piece_at(sq).is_empty() => {}
            _ => return false,
        }
    }

    if position.in_check(us) {
        return false;
    }

    // The king may not pass through or land on an attacked square.
    let them = us.opposite();
    let step: i8 = if kingside { 1 } else { -1 };
    for hop in [step, 2 * step] {
        match from.offset(hop, 0) {
            Some(sq) if !is_square_attacked(position.board(), sq, them) => {}
            _ => return false,
        }
    }

    true
}

//! Legal move generation.
//!
//! Generation is piece-centric: each piece of the side to move enumerates
//! its candidate destinations directly (offsets for leapers, ray walks for
//! sliders), candidates are filtered by king-safety simulation, and the
//! surviving moves are ordered captures-first with queen/rook victims ahead
//! of minor-piece victims. The ordering is stable, so insertion order breaks
//! ties; it is the only source of variation in search behavior.

use solo_core::{Color, MoveRecord, PieceKind, Square};

use crate::legality::castling_legal;
use crate::Position;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// Generates all legal moves for the side to move.
///
/// Promotions are generated to queen only; underpromotion is reachable
/// solely through explicit validation of a human-supplied promotion type.
pub fn generate_moves(position: &Position) -> Vec<MoveRecord> {
    generate(position, false)
}

/// Generates only the legal captures (including en passant), for quiescence.
pub fn generate_captures(position: &Position) -> Vec<MoveRecord> {
    generate(position, true)
}

fn generate(position: &Position, captures_only: bool) -> Vec<MoveRecord> {
    let us = position.side_to_move;
    let mut moves: Vec<MoveRecord> = Vec::with_capacity(64);

    for index in 0..64u8 {
        // SAFETY: index is in 0-63
        let from = unsafe { Square::from_index_unchecked(index) };
        let piece = position.piece_at(from);
        if !piece.is_color(us) {
            continue;
        }
        let Some(kind) = piece.kind() else { continue };
        match kind {
            PieceKind::Pawn => pawn_moves(position, from, us, captures_only, &mut moves),
            PieceKind::Knight => {
                leaper_moves(position, from, us, &KNIGHT_OFFSETS, captures_only, &mut moves)
            }
            PieceKind::Bishop => {
                slider_moves(position, from, us, &BISHOP_DIRS, captures_only, &mut moves)
            }
            PieceKind::Rook => {
                slider_moves(position, from, us, &ROOK_DIRS, captures_only, &mut moves)
            }
            PieceKind::Queen => {
                slider_moves(position, from, us, &QUEEN_DIRS, captures_only, &mut moves)
            }
            PieceKind::King => {
                leaper_moves(position, from, us, &KING_OFFSETS, captures_only, &mut moves);
                if !captures_only {
                    castling_moves(position, from, us, &mut moves);
                }
            }
        }
    }

    // King-safety filter: simulate each candidate and drop any that leave
    // the mover's king attacked.
    moves.retain(|m| {
        let mut working = position.clone();
        working.apply(m.from, m.to, m.promotion);
        !working.in_check(us)
    });

    // Stable sort keeps insertion order within each class.
    moves.sort_by_key(order_class);
    moves
}

/// Capture-ordering class: big victims, then other captures, then quiets.
fn order_class(m: &MoveRecord) -> u8 {
    match m.captured {
        Some(PieceKind::Queen) | Some(PieceKind::Rook) => 0,
        Some(_) => 1,
        None => 2,
    }
}

fn pawn_record(from: Square, to: Square, us: Color, captured: Option<PieceKind>) -> MoveRecord {
    let promotion = if to.rank() == us.promotion_rank() {
        Some(PieceKind::Queen)
    } else {
        None
    };
    MoveRecord {
        from,
        to,
        promotion,
        captured,
        is_castling: false,
        is_en_passant: false,
    }
}

fn pawn_moves(
    position: &Position,
    from: Square,
    us: Color,
    captures_only: bool,
    moves: &mut Vec<MoveRecord>,
) {
    let dir = us.pawn_direction();

    if !captures_only {
        if let Some(to) = from.offset(0, dir) {
            if position.piece_at(to).is_empty() {
                moves.push(pawn_record(from, to, us, None));
                if from.rank() == us.pawn_start_rank() {
                    if let Some(two) = to.offset(0, dir) {
                        if position.piece_at(two).is_empty() {
                            moves.push(MoveRecord::quiet(from, two));
                        }
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(to) = from.offset(side, dir) else { continue };
        let target = position.piece_at(to);
        if target.is_color(us.opposite()) {
            moves.push(pawn_record(from, to, us, target.kind()));
        } else if target.is_empty() && position.en_passant == Some(to) {
            moves.push(MoveRecord {
                from,
                to,
                promotion: None,
                captured: Some(PieceKind::Pawn),
                is_castling: false,
                is_en_passant: true,
            });
        }
    }
}

fn leaper_moves(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    captures_only: bool,
    moves: &mut Vec<MoveRecord>,
) {
    for &(file_delta, rank_delta) in offsets {
        let Some(to) = from.offset(file_delta, rank_delta) else { continue };
        let target = position.piece_at(to);
        if target.is_color(us) {
            continue;
        }
        if captures_only && target.is_empty() {
            continue;
        }
        moves.push(MoveRecord {
            from,
            to,
            promotion: None,
            captured: target.kind(),
            is_castling: false,
            is_en_passant: false,
        });
    }
}

fn slider_moves(
    position: &Position,
    from: Square,
    us: Color,
    dirs: &[(i8, i8)],
    captures_only: bool,
    moves: &mut Vec<MoveRecord>,
) {
    for &(file_delta, rank_delta) in dirs {
        let mut current = from.offset(file_delta, rank_delta);
        while let Some(to) = current {
            let target = position.piece_at(to);
            if target.is_color(us) {
                break;
            }
            if !target.is_empty() {
                moves.push(MoveRecord {
                    from,
                    to,
                    promotion: None,
                    captured: target.kind(),
                    is_castling: false,
                    is_en_passant: false,
                });
                break;
            }
            if !captures_only {
                moves.push(MoveRecord::quiet(from, to));
            }
            current = to.offset(file_delta, rank_delta);
        }
    }
}

fn castling_moves(position: &Position, from: Square, us: Color, moves: &mut Vec<MoveRecord>) {
    for target_file in [6u8, 2u8] {
        let Some(to) = Square::from_coords(target_file, from.rank()) else { continue };
        if castling_legal(position, us, from, to) {
            moves.push(MoveRecord {
                from,
                to,
                promotion: None,
                captured: None,
                is_castling: true,
                is_en_passant: false,
            });
        }
    }
}

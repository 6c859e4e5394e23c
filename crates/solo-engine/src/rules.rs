//! Termination detection.

use solo_core::{Color, GameStatus, PieceKind, Square};

use crate::movegen::generate_moves;
use crate::Position;

/// Determines the status of the position for the side to move.
///
/// Runs after every mutation. The cascade order matters: mate and stalemate
/// are detected first (no legal moves decides the game regardless of the
/// clocks), then the fifty-move rule, then insufficient material.
pub fn detect_status(position: &Position) -> GameStatus {
    if generate_moves(position).is_empty() {
        return if position.in_check(position.side_to_move) {
            GameStatus::win_for(position.side_to_move.opposite())
        } else {
            GameStatus::Stalemate
        };
    }
    if position.halfmove_clock >= 100 {
        return GameStatus::Draw;
    }
    if is_insufficient_material(position) {
        return GameStatus::Draw;
    }
    GameStatus::Active
}

/// Returns true if checkmate is impossible by any legal sequence: bare
/// kings, or a lone king against a king with a single minor piece.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = [0u32; 2];
    for index in 0..64u8 {
        // SAFETY: index is in 0-63
        let sq = unsafe { Square::from_index_unchecked(index) };
        let piece = position.piece_at(sq);
        let Some(kind) = piece.kind() else { continue };
        match kind {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight | PieceKind::Bishop => {
                minors[piece.color().index()] += 1;
            }
            PieceKind::King => {}
        }
    }
    matches!(
        (minors[Color::White.index()], minors[Color::Black.index()]),
        (0, 0) | (1, 0) | (0, 1)
    )
}

/// Returns true if a draw claim would succeed on this position.
pub fn draw_claimable(position: &Position) -> bool {
    position.halfmove_clock >= 100 || is_insufficient_material(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_active() {
        assert_eq!(detect_status(&Position::startpos()), GameStatus::Active);
    }

    #[test]
    fn checkmate_detected() {
        // Fool's mate final position, white to move and mated.
        let pos = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w - - 1 3",
        )
        .unwrap();
        assert!(pos.in_check(Color::White));
        assert_eq!(detect_status(&pos), GameStatus::BlackWin);
    }

    #[test]
    fn stalemate_detected() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!pos.in_check(Color::Black));
        assert_eq!(detect_status(&pos), GameStatus::Stalemate);
    }

    #[test]
    fn fifty_move_rule_draws() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/R3K2k w - - 100 1").unwrap();
        assert_eq!(detect_status(&pos), GameStatus::Draw);
        assert!(draw_claimable(&pos));
    }

    #[test]
    fn insufficient_material_cases() {
        let kk = Position::from_fen("8/8/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        assert!(is_insufficient_material(&kk));
        assert_eq!(detect_status(&kk), GameStatus::Draw);

        let knk = Position::from_fen("8/8/8/8/8/8/8/4KN1k w - - 0 1").unwrap();
        assert!(is_insufficient_material(&knk));

        let kbk = Position::from_fen("8/8/8/8/8/2b5/8/4K2k w - - 0 1").unwrap();
        assert!(is_insufficient_material(&kbk));

        // Two minors on one side can still mate; so can a single pawn.
        let knnk = Position::from_fen("8/8/8/8/8/8/8/3NKN1k w - - 0 1").unwrap();
        assert!(!is_insufficient_material(&knnk));
        let kbkb = Position::from_fen("8/8/8/8/8/1b6/8/4KB1k w - - 0 1").unwrap();
        assert!(!is_insufficient_material(&kbkb));
        let kpk = Position::from_fen("8/8/8/8/8/4P3/8/4K2k w - - 0 1").unwrap();
        assert!(!is_insufficient_material(&kpk));
        let krk = Position::from_fen("8/8/8/8/8/8/8/4KR1k w - - 0 1").unwrap();
        assert!(!is_insufficient_material(&krk));
    }

    #[test]
    fn mate_beats_clock_in_the_cascade() {
        // Mated position with the clock already at 100: the mate wins.
        let pos = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w - - 100 3",
        )
        .unwrap();
        assert_eq!(detect_status(&pos), GameStatus::BlackWin);
    }
}

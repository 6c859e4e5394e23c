//! Wire-facing read models.

use serde::{Deserialize, Serialize};
use solo_core::{Color, GameStatus, MoveRecord, Square};
use solo_engine::Game;

/// Read-only view of a game, in wire form.
///
/// The board is the raw 64-byte encoding, square 0 (a1) first. The en
/// passant byte uses 255 as the no-square sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(with = "board_bytes")]
    pub board: [u8; 64],
    pub side_to_move: Color,
    pub status: GameStatus,
    pub move_count: u64,
    pub white_king: Square,
    pub black_king: Square,
    pub en_passant: u8,
    pub in_check: bool,
}

impl GameSnapshot {
    /// Captures the current state of a game.
    pub fn from_game(game: &Game) -> Self {
        let position = game.position();
        let mut board = [0u8; 64];
        for (index, cell) in board.iter_mut().enumerate() {
            // SAFETY: index is in 0-63
            let sq = unsafe { Square::from_index_unchecked(index as u8) };
            *cell = position.piece_at(sq).byte();
        }
        GameSnapshot {
            board,
            side_to_move: position.side_to_move,
            status: game.status(),
            move_count: game.move_count(),
            white_king: position.king_square(Color::White),
            black_king: position.king_square(Color::Black),
            en_passant: position
                .en_passant
                .map(|sq| sq.index())
                .unwrap_or(Square::NONE_BYTE),
            in_check: game.is_check(),
        }
    }
}

/// Result of one `make_move` transaction: the human's move, the engine's
/// reply if the game was still live, and the status afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub human: MoveRecord,
    pub reply: Option<MoveRecord>,
    pub status: GameStatus,
}

/// Serde passthrough for the fixed-size board array.
mod board_bytes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(board: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(board.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 64], D::Error> {
        let bytes: Vec<u8> = Vec::deserialize(deserializer)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"a 64-byte board"))
    }
}

//! Game status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;

/// The lifecycle state of a game.
///
/// A game starts `Active` and transitions at most once, into one of the
/// terminal states. Terminal states are frozen: no further mutation is
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// The game is in progress.
    Active,
    /// White won, by checkmate or Black's resignation.
    WhiteWin,
    /// Black won, by checkmate or White's resignation.
    BlackWin,
    /// Drawn: fifty-move rule, insufficient material, or a successful claim.
    Draw,
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl GameStatus {
    /// Returns true for any state other than `Active`.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }

    /// Returns the winner, if this status names one.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::WhiteWin => Some(Color::White),
            GameStatus::BlackWin => Some(Color::Black),
            _ => None,
        }
    }

    /// The status for a win by the given color.
    #[inline]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteWin,
            Color::Black => GameStatus::BlackWin,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Active => "active",
            GameStatus::WhiteWin => "white wins",
            GameStatus::BlackWin => "black wins",
            GameStatus::Draw => "draw",
            GameStatus::Stalemate => "stalemate",
        };
        write!(f, "{}", s)
    }
}

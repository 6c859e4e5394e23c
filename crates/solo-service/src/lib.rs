//! Owner-keyed game service for solochess.
//!
//! [`GameService`] is the boundary the surrounding system talks to: each
//! owner holds at most one game, the human always plays White, and the
//! engine's reply is computed and applied inside the same `make_move`
//! transaction as the human's move. Every operation runs to completion on
//! the calling thread; distinct owners' games are isolated behind separate
//! locks, so one player's reads proceed concurrently with another's moves.

mod snapshot;
mod stats;

pub use snapshot::{GameSnapshot, MoveOutcome};
pub use stats::PlayerStats;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use solo_bot::{choose_reply, SearchError};
use solo_core::{Color, GameStatus, MoveRecord, PieceKind, Square};
use solo_engine::{Game, MoveError};
use thiserror::Error;

use stats::StatsBook;

/// Opaque owner identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        OwnerId(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        OwnerId(s)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by the service. All are recoverable except `Search`,
/// which reports a broken internal invariant; in every error case the
/// stored game is left unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    #[error("no game exists for this owner")]
    GameNotFound,

    #[error("it is not the human player's turn")]
    NotYourTurn,

    #[error("invalid square index: {0} (expected 0-63)")]
    InvalidSquare(u8),

    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("engine failure: {0}")]
    Search(#[from] SearchError),
}

/// The owner-keyed game table.
#[derive(Debug, Default)]
pub struct GameService {
    games: RwLock<HashMap<OwnerId, Arc<RwLock<Game>>>>,
    stats: StatsBook,
}

impl GameService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh game for the owner, replacing any existing one.
    pub fn new_game(&self, owner: &OwnerId) -> GameSnapshot {
        let game = Game::new();
        let snapshot = GameSnapshot::from_game(&game);
        self.games
            .write()
            .expect("game table lock poisoned")
            .insert(owner.clone(), Arc::new(RwLock::new(game)));
        tracing::info!(%owner, "new game started");
        snapshot
    }

    /// Replaces the owner's game with a prepared one (custom starting
    /// positions, imports).
    pub fn install_game(&self, owner: &OwnerId, game: Game) -> GameSnapshot {
        let snapshot = GameSnapshot::from_game(&game);
        self.games
            .write()
            .expect("game table lock poisoned")
            .insert(owner.clone(), Arc::new(RwLock::new(game)));
        tracing::info!(%owner, status = %snapshot.status, "game installed");
        snapshot
    }

    /// Returns true if the owner has a game.
    pub fn has_game(&self, owner: &OwnerId) -> bool {
        self.games
            .read()
            .expect("game table lock poisoned")
            .contains_key(owner)
    }

    /// Plays the human's move and, if the game stays live, the engine's
    /// reply, as one atomic transaction: either both half-moves and the
    /// resulting status commit, or the stored game is untouched.
    ///
    /// Squares arrive as wire bytes; `promotion` is 0 for none, else the
    /// piece-type value (2-5 for knight through queen).
    pub fn make_move(
        &self,
        owner: &OwnerId,
        from: u8,
        to: u8,
        promotion: u8,
    ) -> Result<MoveOutcome, ServiceError> {
        let from = Square::from_index(from).ok_or(ServiceError::InvalidSquare(from))?;
        let to = Square::from_index(to).ok_or(ServiceError::InvalidSquare(to))?;
        let promotion = decode_promotion(promotion)?;

        let slot = self.slot(owner)?;
        let mut game = slot.write().expect("game lock poisoned");
        if game.status().is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        if game.position().side_to_move != Color::White {
            return Err(ServiceError::NotYourTurn);
        }

        // Work on a copy; the slot is overwritten only on success.
        let mut working = game.clone();
        let human = working.play_move(from, to, promotion)?;
        let reply = if working.status() == GameStatus::Active {
            let chosen = choose_reply(&working)?;
            Some(working.play_move(chosen.from, chosen.to, chosen.promotion)?)
        } else {
            None
        };
        let status = working.status();
        *game = working;
        drop(game);

        tracing::debug!(%owner, %human, reply = ?reply, "move played");
        if status.is_terminal() {
            self.stats.record(owner, status);
            tracing::info!(%owner, %status, "game finished");
        }

        Ok(MoveOutcome {
            human,
            reply,
            status,
        })
    }

    /// Resigns the human's game; the engine side wins.
    pub fn resign(&self, owner: &OwnerId) -> Result<GameStatus, ServiceError> {
        let slot = self.slot(owner)?;
        let mut game = slot.write().expect("game lock poisoned");
        let status = game.resign(Color::White)?;
        drop(game);

        self.stats.record(owner, status);
        tracing::info!(%owner, %status, "game resigned");
        Ok(status)
    }

    /// Claims a draw by the fifty-move rule or insufficient material.
    pub fn claim_draw(&self, owner: &OwnerId) -> Result<GameStatus, ServiceError> {
        let slot = self.slot(owner)?;
        let mut game = slot.write().expect("game lock poisoned");
        let was_terminal = game.status().is_terminal();
        let status = game.claim_draw()?;
        drop(game);

        if !was_terminal {
            self.stats.record(owner, status);
            tracing::info!(%owner, "draw claimed");
        }
        Ok(status)
    }

    /// Returns a read-only snapshot of the owner's game.
    pub fn snapshot(&self, owner: &OwnerId) -> Result<GameSnapshot, ServiceError> {
        let slot = self.slot(owner)?;
        let game = slot.read().expect("game lock poisoned");
        Ok(GameSnapshot::from_game(&game))
    }

    /// Returns the owner's full move history, oldest first.
    pub fn history(&self, owner: &OwnerId) -> Result<Vec<MoveRecord>, ServiceError> {
        let slot = self.slot(owner)?;
        let game = slot.read().expect("game lock poisoned");
        Ok(game.history().to_vec())
    }

    /// Returns the owner's win/loss/draw record.
    pub fn stats(&self, owner: &OwnerId) -> PlayerStats {
        self.stats.get(owner)
    }

    fn slot(&self, owner: &OwnerId) -> Result<Arc<RwLock<Game>>, ServiceError> {
        self.games
            .read()
            .expect("game table lock poisoned")
            .get(owner)
            .cloned()
            .ok_or(ServiceError::GameNotFound)
    }
}

fn decode_promotion(byte: u8) -> Result<Option<PieceKind>, ServiceError> {
    if byte == 0 {
        return Ok(None);
    }
    match PieceKind::from_index(byte) {
        Some(kind) => Ok(Some(kind)),
        None => Err(MoveError::InvalidPromotion.into()),
    }
}

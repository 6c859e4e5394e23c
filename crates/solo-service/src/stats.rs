//! Per-owner result tallies.
//!
//! Statistics live outside the engine: the service derives them from
//! terminal statuses alone, and nothing in the rules or search layers
//! knows they exist.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use solo_core::GameStatus;

use crate::OwnerId;

/// Win/loss/draw record from the human player's perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

/// Owner-keyed statistics table.
#[derive(Debug, Default)]
pub(crate) struct StatsBook {
    table: RwLock<HashMap<OwnerId, PlayerStats>>,
}

impl StatsBook {
    /// Tallies a finished game for the owner. The human always plays White.
    pub(crate) fn record(&self, owner: &OwnerId, status: GameStatus) {
        let mut table = self.table.write().expect("stats lock poisoned");
        let entry = table.entry(owner.clone()).or_default();
        match status {
            GameStatus::WhiteWin => entry.wins += 1,
            GameStatus::BlackWin => entry.losses += 1,
            GameStatus::Draw | GameStatus::Stalemate => entry.draws += 1,
            GameStatus::Active => {}
        }
    }

    /// Returns the owner's record; zeroes if no game has finished.
    pub(crate) fn get(&self, owner: &OwnerId) -> PlayerStats {
        self.table
            .read()
            .expect("stats lock poisoned")
            .get(owner)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_by_status() {
        let book = StatsBook::default();
        let alice = OwnerId::from("alice");

        book.record(&alice, GameStatus::WhiteWin);
        book.record(&alice, GameStatus::BlackWin);
        book.record(&alice, GameStatus::Draw);
        book.record(&alice, GameStatus::Stalemate);
        book.record(&alice, GameStatus::Active); // ignored

        let stats = book.get(&alice);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.draws, 2);

        assert_eq!(book.get(&OwnerId::from("bob")), PlayerStats::default());
    }
}

//! Deterministic bounded-depth search.
//!
//! Minimax with alpha-beta pruning from the engine's fixed orientation:
//! Black maximizes, White minimizes, scores are always Black-positive. The
//! horizon is softened by a captures-only quiescence extension, and late
//! quiet moves are searched at reduced depth first (re-searched at full
//! depth only when the reduced result looks promising). Move ordering and
//! the root tie-break are the only sources of move choice, so identical
//! positions always produce identical replies.

use solo_core::{Color, MoveRecord};
use solo_engine::{generate_captures, generate_moves, Game, Position};
use thiserror::Error;

use crate::eval::evaluate;

/// Total search depth in plies, counting the engine's own move.
pub const SEARCH_DEPTH: u32 = 3;

/// Maximum capture plies explored by quiescence.
pub const QUIESCENCE_DEPTH: u32 = 4;

/// Moves searched at full depth before late-move reductions begin.
const LMR_FULL_MOVES: usize = 3;

/// Base score for checkmate; remaining depth is added so nearer mates
/// score closer to the bound and are preferred.
const MATE_SCORE: i32 = 100_000;

/// Errors from the searcher.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The search was invoked on a position with no legal moves. The
    /// termination detector should have ended the game first; this is an
    /// invariant failure, not a user error.
    #[error("search invoked with no legal moves; the game should already be over")]
    NoLegalMoves,
}

/// Picks the engine's reply for the game's side to move.
pub fn choose_reply(game: &Game) -> Result<MoveRecord, SearchError> {
    search_root(game.position(), game.move_count())
}

/// Root search: scores every legal move at `SEARCH_DEPTH - 1` below the
/// applied move and tracks the best, breaking score ties deterministically
/// on `(from * 7 + to * 3 + move_count) mod 5`.
pub fn search_root(position: &Position, move_count: u64) -> Result<MoveRecord, SearchError> {
    let moves = generate_moves(position);
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let maximizing = position.side_to_move == Color::Black;
    let mut searcher = Searcher { nodes: 0 };
    let mut best: Option<(MoveRecord, i32, u64)> = None;

    for m in &moves {
        let mut child = position.clone();
        child.apply(m.from, m.to, m.promotion);
        let score = searcher.alpha_beta(&child, SEARCH_DEPTH - 1, i32::MIN + 1, i32::MAX - 1);
        let key = tie_break_key(m, move_count);

        let replace = match best {
            None => true,
            Some((_, best_score, best_key)) => {
                let better = if maximizing {
                    score > best_score
                } else {
                    score < best_score
                };
                better || (score == best_score && key > best_key)
            }
        };
        if replace {
            best = Some((*m, score, key));
        }
    }

    // The move list is non-empty, so a best move exists.
    let (record, score, _) = best.ok_or(SearchError::NoLegalMoves)?;
    tracing::debug!(%record, score, nodes = searcher.nodes, "reply chosen");
    Ok(record)
}

fn tie_break_key(m: &MoveRecord, move_count: u64) -> u64 {
    (m.from.index() as u64 * 7 + m.to.index() as u64 * 3 + move_count) % 5
}

struct Searcher {
    nodes: u64,
}

impl Searcher {
    fn alpha_beta(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return self.quiescence(position, QUIESCENCE_DEPTH, alpha, beta);
        }

        let moves = generate_moves(position);
        let us = position.side_to_move;
        if moves.is_empty() {
            return if position.in_check(us) {
                // The side to move is mated.
                match us {
                    Color::White => MATE_SCORE + depth as i32,
                    Color::Black => -(MATE_SCORE + depth as i32),
                }
            } else {
                0
            };
        }

        let maximizing = us == Color::Black;
        let mut best = if maximizing { i32::MIN + 1 } else { i32::MAX - 1 };

        for (index, m) in moves.iter().enumerate() {
            let mut child = position.clone();
            child.apply(m.from, m.to, m.promotion);

            let reduce = index >= LMR_FULL_MOVES && !m.is_capture() && depth >= 2;
            let score = if reduce {
                let reduced = self.alpha_beta(&child, depth - 2, alpha, beta);
                let promising = if maximizing { reduced > alpha } else { reduced < beta };
                if promising {
                    self.alpha_beta(&child, depth - 1, alpha, beta)
                } else {
                    reduced
                }
            } else {
                self.alpha_beta(&child, depth - 1, alpha, beta)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Captures-only extension: the side to move may stand pat on the
    /// static evaluation or try captures until the position is quiet.
    fn quiescence(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = evaluate(position);
        let maximizing = position.side_to_move == Color::Black;
        if maximizing {
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        } else if stand_pat < beta {
            beta = stand_pat;
        }
        if beta <= alpha {
            return stand_pat;
        }
        if depth == 0 {
            return stand_pat;
        }

        let mut best = stand_pat;
        for m in &generate_captures(position) {
            let mut child = position.clone();
            child.apply(m.from, m.to, m.promotion);
            let score = self.quiescence(&child, depth - 1, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

//! The solochess playing engine: evaluation and search.
//!
//! [`choose_reply`] is the single entry point the service calls to compute
//! the machine's move. The search is strictly deterministic: a fixed depth,
//! fixed move ordering from the generator, and a fully specified root
//! tie-break. No randomness, no clocks, no shared state between calls.

mod eval;
mod search;

pub use eval::{evaluate, piece_value, BISHOP_VALUE, KING_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE};
pub use search::{choose_reply, search_root, SearchError, QUIESCENCE_DEPTH, SEARCH_DEPTH};

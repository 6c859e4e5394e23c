//! Chess rules engine for solochess.
//!
//! This crate owns everything between the raw value types and the search:
//! - [`Position`] - mailbox board state with the move mutator
//! - attack geometry and the two-stage legality check
//! - piece-centric legal move generation with capture-first ordering
//! - termination detection (mate, stalemate, fifty-move, material)
//! - [`Game`] - full game management with history tracking
//!
//! The board is a 64-byte mailbox rather than bitboards: the piece byte
//! encoding is itself the wire format, and the position must stay cheap to
//! copy because the search clones it per node.

mod attacks;
mod fen;
mod game;
mod legality;
mod movegen;
pub mod perft;
mod position;
mod rules;

pub use attacks::{can_attack, diagonal_clear, is_square_attacked, line_clear};
pub use fen::{FenError, STARTPOS_FEN};
pub use game::Game;
pub use legality::{is_legal, validate_move, MoveError};
pub use movegen::{generate_captures, generate_moves};
pub use position::Position;
pub use rules::{detect_status, draw_claimable, is_insufficient_material};

//! Move records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PieceKind, Square};

/// A single half-move, as generated, validated, and recorded in history.
///
/// The record is a self-contained value: it carries the captured piece type
/// so history replay and capture ordering never need to probe a board. Wire
/// serialization emits the fields in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Promotion target for a pawn reaching the last rank, else `None`.
    pub promotion: Option<PieceKind>,
    /// Type of the captured piece, if any. En passant records a pawn.
    pub captured: Option<PieceKind>,
    /// True if this move castled (king moved two files).
    pub is_castling: bool,
    /// True if this move captured en passant.
    pub is_en_passant: bool,
}

impl MoveRecord {
    /// Creates a quiet (non-capturing, non-special) move record.
    pub const fn quiet(from: Square, to: Square) -> Self {
        MoveRecord {
            from,
            to,
            promotion: None,
            captured: None,
            is_castling: false,
            is_en_passant: false,
        }
    }

    /// Returns true if this move captured a piece (including en passant).
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for MoveRecord {
    /// Coordinate notation: source, destination, and a promotion suffix
    /// (e.g. `e2e4`, `e7e8q`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_record() {
        let from = Square::from_algebraic("e2").unwrap();
        let to = Square::from_algebraic("e4").unwrap();
        let m = MoveRecord::quiet(from, to);
        assert!(!m.is_capture());
        assert!(!m.is_castling);
        assert!(!m.is_en_passant);
        assert_eq!(m.to_string(), "e2e4");
    }

    #[test]
    fn promotion_display() {
        let m = MoveRecord {
            from: Square::from_algebraic("e7").unwrap(),
            to: Square::from_algebraic("e8").unwrap(),
            promotion: Some(PieceKind::Queen),
            captured: None,
            is_castling: false,
            is_en_passant: false,
        };
        assert_eq!(m.to_string(), "e7e8q");
    }

    #[test]
    fn wire_field_order() {
        let m = MoveRecord {
            from: Square::from_algebraic("e5").unwrap(),
            to: Square::from_algebraic("d6").unwrap(),
            promotion: None,
            captured: Some(PieceKind::Pawn),
            is_castling: false,
            is_en_passant: true,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(
            json,
            r#"{"from":36,"to":43,"promotion":null,"captured":1,"is_castling":false,"is_en_passant":true}"#
        );
    }
}

//! Move records.
//!
//! This module contains the immutable snapshot written to the game history after every successful move.

use std::fmt;

use serde::Serialize;

use crate::types::{Color, PieceKind, Square};

/// Which side of the board a castling move went to.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Castling side implied by a two-column king move, if it is one.
    pub fn of_king_move(from: Square, to: Square) -> Option<Self> {
        if from.row() != to.row() {
            return None;
        }
        match to.col() - from.col() {
            2 => Some(Self::King),
            -2 => Some(Self::Queen),
            _ => None,
        }
    }

    /// Column delta from the king to the rook it castles with.
    #[inline(always)]
    pub const fn rook_delta(self) -> i8 {
        match self {
            Self::King => 3,
            Self::Queen => -4,
        }
    }

    /// Column delta from the king's origin to the rook's destination.
    #[inline(always)]
    pub const fn rook_landing_delta(self) -> i8 {
        match self {
            Self::King => 1,
            Self::Queen => -1,
        }
    }

    /// King origin and destination squares for `color` castling on this side.
    pub const fn king_squares(self, color: Color) -> (Square, Square) {
        match (color, self) {
            (Color::White, Self::King) => (Square::E1, Square::G1),
            (Color::White, Self::Queen) => (Square::E1, Square::C1),
            (Color::Black, Self::King) => (Square::E8, Square::G8),
            (Color::Black, Self::Queen) => (Square::E8, Square::C8),
        }
    }

    /// Conventional notation, `O-O` or `O-O-O`.
    pub const fn notation(self) -> &'static str {
        match self {
            Self::King => "O-O",
            Self::Queen => "O-O-O",
        }
    }
}

/// One completed move, as stored in the history.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
pub struct MoveRecord {
    pub piece: PieceKind,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceKind>,
    pub castle: Option<CastleSide>,
}

impl MoveRecord {
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub const fn is_castling(&self) -> bool {
        self.castle.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} to {}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " capturing {captured}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_quiet_moves_and_captures() {
        let mut record = MoveRecord {
            piece: PieceKind::Pawn,
            color: Color::White,
            from: Square::E2,
            to: Square::E4,
            captured: None,
            castle: None,
        };
        assert_eq!(record.to_string(), "Pawn from e2 to e4");
        assert!(!record.is_capture());

        record.piece = PieceKind::Bishop;
        record.from = Square::F1;
        record.to = Square::B5;
        record.captured = Some(PieceKind::Knight);
        assert_eq!(record.to_string(), "Bishop from f1 to b5 capturing Knight");
    }

    #[test]
    fn only_two_column_row_moves_are_castling() {
        assert_eq!(CastleSide::of_king_move(Square::E1, Square::G1), Some(CastleSide::King));
        assert_eq!(CastleSide::of_king_move(Square::E8, Square::C8), Some(CastleSide::Queen));
        assert_eq!(CastleSide::of_king_move(Square::E1, Square::F1), None);
        assert_eq!(CastleSide::of_king_move(Square::E1, Square::G2), None);
    }

    #[test]
    fn king_squares_follow_the_side_to_move() {
        assert_eq!(CastleSide::King.king_squares(Color::White), (Square::E1, Square::G1));
        assert_eq!(CastleSide::Queen.king_squares(Color::Black), (Square::E8, Square::C8));
        for color in [Color::White, Color::Black] {
            for side in [CastleSide::King, CastleSide::Queen] {
                let (from, to) = side.king_squares(color);
                assert_eq!(CastleSide::of_king_move(from, to), Some(side));
            }
        }
    }
}

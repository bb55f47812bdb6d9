//! Chessboard representation
//!
//! This module contains the Board object: an 8x8 mailbox of optional pieces indexed `[row][col]`, plus the
//! position-loading (start position, FEN) and text rendering that surround it. The board knows nothing about
//! turns or history; those live in `GameState`.

use std::fmt;
use std::ops::{Index, IndexMut};

use thiserror::Error;

use crate::types::{Color, Piece, PieceKind, Square};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[rustfmt::skip]
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
    PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
];

/// Errors raised while reading a FEN string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN missing board part")]
    MissingBoard,
    #[error("FEN missing side to move")]
    MissingSide,
    #[error("invalid FEN rank count: expected 8, found {0}")]
    RankCount(usize),
    #[error("invalid FEN rank length on rank {rank}")]
    RankLength { rank: usize },
    #[error("invalid FEN piece letter '{0}'")]
    PieceLetter(char),
    #[error("invalid side to move '{0}'")]
    Side(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
}

/// Chess board representation.
///
/// Exactly one piece per occupied cell. Pieces are stored by value, so moving one is a take from the source
/// cell followed by a put into the destination cell (which drops any captured piece).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    mailbox: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Empty board.
    pub const fn empty() -> Self {
        Self { mailbox: [[None; 8]; 8] }
    }

    /// Board in the standard starting position.
    pub fn startpos() -> Self {
        let mut board = Self::empty();
        for col in 0..8 {
            board.mailbox[0][col] = Some(Piece::new(BACK_RANK[col], Color::White));
            board.mailbox[1][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.mailbox[6][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.mailbox[7][col] = Some(Piece::new(BACK_RANK[col], Color::Black));
        }
        board
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self[sq]
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self[sq].is_none()
    }

    /// Removes and returns the piece on `sq`.
    #[inline(always)]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self[sq].take()
    }

    /// Puts `piece` on `sq`, returning whatever stood there before.
    #[inline(always)]
    pub fn put(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self[sq].replace(piece)
    }

    /// Iterates over occupied squares in a1, b1, ..., h8 order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL.into_iter().filter_map(|sq| self[sq].map(|p| (sq, p)))
    }

    /// Number of pieces of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Builds a board and side to move from a FEN string.
    ///
    /// Only the placement, side and castling fields are read; en passant and clocks are accepted and ignored.
    /// Kings and rooks count as moved unless a castling right keeps them on their home squares unmoved.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), FenError> {
        let mut parts = fen.split_whitespace();
        let board_part = parts.next().ok_or(FenError::MissingBoard)?;
        let side_part = parts.next().ok_or(FenError::MissingSide)?;
        let castling_part = parts.next().unwrap_or("-");

        let mut board = Self::empty();

        // ===== Parse board squares =====
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank) in ranks.iter().enumerate() {
            let row = 7 - rank_idx; //FEN top rank = 7
            let mut col = 0usize;

            for ch in rank.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    col += skip as usize;
                } else {
                    if col >= 8 {
                        return Err(FenError::RankLength { rank: row + 1 });
                    }
                    let mut piece = Piece::from_char(ch).ok_or(FenError::PieceLetter(ch))?;
                    piece.has_moved = matches!(piece.kind, PieceKind::King | PieceKind::Rook);
                    board.mailbox[row][col] = Some(piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(FenError::RankLength { rank: row + 1 });
            }
        }

        // ===== Parse side to move =====
        let side = match side_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::Side(other.to_string())),
        };

        // ===== Parse castling rights =====
        for ch in castling_part.chars() {
            let (color, rook_sq, king_sq) = match ch {
                'K' => (Color::White, Square::H1, Square::E1),
                'Q' => (Color::White, Square::A1, Square::E1),
                'k' => (Color::Black, Square::H8, Square::E8),
                'q' => (Color::Black, Square::A8, Square::E8),
                '-' => continue,
                _ => return Err(FenError::Castling(castling_part.to_string())),
            };
            board.unmark(king_sq, PieceKind::King, color);
            board.unmark(rook_sq, PieceKind::Rook, color);
        }

        Ok((board, side))
    }

    // Clears `has_moved` on `sq` if it holds the expected piece.
    fn unmark(&mut self, sq: Square, kind: PieceKind, color: Color) {
        if let Some(piece) = self[sq].as_mut() {
            if piece.kind == kind && piece.color == color {
                piece.has_moved = false;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    fn index(&self, sq: Square) -> &Self::Output {
        &self.mailbox[sq.row() as usize][sq.col() as usize]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.mailbox[sq.row() as usize][sq.col() as usize]
    }
}

/// Renders the board with rank 8 on top, unicode glyphs and `.` for empty cells.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;
            for cell in &self.mailbox[row] {
                write!(f, "{} ", cell.map_or('.', |p| p.symbol()))?;
            }
            writeln!(f, "{}", row + 1)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_matches_start_fen() {
        let (from_fen, side) = Board::from_fen(START_FEN).unwrap();
        assert_eq!(side, Color::White);
        assert_eq!(from_fen, Board::startpos());
    }

    #[test]
    fn startpos_has_sixteen_per_side() {
        let board = Board::startpos();
        assert_eq!(board.count(Color::White), 16);
        assert_eq!(board.count(Color::Black), 16);
        assert_eq!(board.piece_at(Square::E1).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(board.piece_at(Square::D8).map(|p| p.kind), Some(PieceKind::Queen));
        assert!(board.is_empty(Square::E4));
    }

    #[test]
    fn castling_field_controls_moved_flags() {
        let (board, side) = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").unwrap();
        assert_eq!(side, Color::Black);
        let moved = |sq| board.piece_at(sq).unwrap().has_moved;
        assert!(!moved(Square::E1));
        assert!(!moved(Square::H1));
        assert!(moved(Square::A1));
        assert!(!moved(Square::E8));
        assert!(!moved(Square::A8));
        assert!(moved(Square::H8));
    }

    #[test]
    fn rejects_malformed_fen() {
        assert_eq!(Board::from_fen(""), Err(FenError::MissingBoard));
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8"), Err(FenError::MissingSide));
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8 w"), Err(FenError::RankCount(7)));
        assert_eq!(Board::from_fen("9/8/8/8/8/8/8/8 w"), Err(FenError::RankLength { rank: 8 }));
        assert_eq!(Board::from_fen("7x/8/8/8/8/8/8/8 w"), Err(FenError::PieceLetter('x')));
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8 x"), Err(FenError::Side("x".into())));
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8 w KX"), Err(FenError::Castling("KX".into())));
    }

    #[test]
    fn take_and_put_move_ownership() {
        let mut board = Board::startpos();
        let pawn = board.take(Square::E2).unwrap();
        assert!(board.is_empty(Square::E2));
        assert_eq!(board.put(Square::E4, pawn), None);
        let captured = board.put(Square::E4, Piece::new(PieceKind::Knight, Color::Black));
        assert_eq!(captured, Some(pawn));
    }

    #[test]
    fn renders_rank_eight_first() {
        let text = Board::startpos().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 . . . . . . . . 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}

//! Game state machine
//!
//! `GameState` owns the board, the side to move and the move history. Moves enter as square text or squares,
//! pass the bounds/ownership/turn checks and the piece's movement rule, and are then committed as a whole:
//! relocation (two pieces when castling), history append and turn flip. A rejected move leaves the state as it
//! was.

use tracing::{debug, info};

use crate::board::{Board, FenError};
use crate::error::{MoveError, MoveResult};
use crate::movement;
use crate::moves::{CastleSide, MoveRecord};
use crate::types::{Color, Coord, Piece, PieceKind, Square};

/// Message reported to the player after a successful move.
pub const MOVE_OK: &str = "Move successful.";

/// Parses square text such as `e2`.
pub fn parse_square(text: &str) -> MoveResult<Square> {
    Square::parse(text).ok_or(MoveError::InvalidNotation)
}

/// One game: board, side to move and the append-only move history.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// New game from the standard starting position, white to move.
    pub fn new() -> Self {
        Self { board: Board::startpos(), side_to_move: Color::White, history: Vec::new() }
    }

    /// New game from a FEN position. The history starts empty.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, side_to_move) = Board::from_fen(fen)?;
        Ok(Self { board, side_to_move, history: Vec::new() })
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub fn current_turn(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Completed moves, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Checks a move without playing it.
    ///
    /// Checks run in a fixed order and the first failure is reported: both squares on the board, a piece on
    /// `start`, that piece belongs to the side to move, `start != end`, and finally the piece's movement rule.
    pub fn validate_move(&self, start: impl Into<Coord>, end: impl Into<Coord>) -> MoveResult<()> {
        let (Some(from), Some(to)) = (start.into().to_square(), end.into().to_square()) else {
            return Err(MoveError::OutOfBounds);
        };
        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySource)?;
        if piece.color != self.side_to_move {
            return Err(MoveError::WrongTurn(self.side_to_move));
        }
        if from == to {
            return Err(MoveError::SameSquare);
        }
        if !movement::can_move(&self.board, from, to) {
            return Err(MoveError::IllegalShape(piece.kind));
        }
        Ok(())
    }

    /// Parses both squares and plays the move, returning its history record.
    pub fn apply_move(&mut self, start: &str, end: &str) -> MoveResult<&MoveRecord> {
        let (Ok(from), Ok(to)) = (parse_square(start), parse_square(end)) else {
            debug!(start, end, "unparsable square text");
            return Err(MoveError::InvalidNotation);
        };
        self.make_move(from, to)
    }

    /// Validates and plays a move given as squares.
    pub fn make_move(&mut self, from: Square, to: Square) -> MoveResult<&MoveRecord> {
        if let Err(err) = self.validate_move(from, to) {
            debug!(%from, %to, reason = %err, "move rejected");
            return Err(err);
        }
        let mut moving = self.board.piece_at(from).ok_or(MoveError::EmptySource)?;

        let castle = match moving.kind {
            PieceKind::King => CastleSide::of_king_move(from, to),
            _ => None,
        };
        if let Some(side) = castle {
            if let Err(err) = self.relocate_castling_rook(from, side) {
                debug!(%from, %to, reason = %err, "castling refused");
                return Err(err);
            }
        }

        self.board.take(from);
        moving.has_moved = true;
        let captured = self.board.put(to, moving).map(|p| p.kind);

        let record = MoveRecord { piece: moving.kind, color: moving.color, from, to, captured, castle };
        info!(ply = self.history.len() + 1, %record, "move applied");

        let idx = self.history.len();
        self.history.push(record);
        self.side_to_move = !self.side_to_move;
        Ok(&self.history[idx])
    }

    // Moves the castling rook next to the king's destination, after checking it is still there and unmoved.
    // Nothing is touched when the check fails.
    fn relocate_castling_rook(&mut self, king_sq: Square, side: CastleSide) -> MoveResult<()> {
        let rook_sq = king_sq.offset(0, side.rook_delta()).ok_or(MoveError::CastlingPrecondition)?;
        let landing = king_sq.offset(0, side.rook_landing_delta()).ok_or(MoveError::CastlingPrecondition)?;
        let Some(mut rook) = self.board.piece_at(rook_sq).filter(|p| !p.has_moved) else {
            return Err(MoveError::CastlingPrecondition);
        };

        self.board.take(rook_sq);
        rook.has_moved = true;
        self.board.put(landing, rook);
        info!(side = side.notation(), rook_from = %rook_sq, rook_to = %landing, "castling");
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

//! Error types for move handling
//!
//! Every rejection the game can produce. None of them is fatal: the game state is left untouched and the
//! caller may simply try another move. The `Display` text is the message shown to the player.

use thiserror::Error;

use crate::types::{Color, PieceKind};

/// Reasons a move is refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Square text is not a file `a`..`h` followed by a rank `1`..`8`
    #[error("Invalid position input.")]
    InvalidNotation,

    #[error("Position out of bounds.")]
    OutOfBounds,

    #[error("No piece at starting position.")]
    EmptySource,

    /// The piece belongs to the side that is not on move; carries the side that is
    #[error("It is {0}'s turn.")]
    WrongTurn(Color),

    #[error("Cannot move to same position.")]
    SameSquare,

    /// The movement rule of the piece rejected the move
    #[error("{0} cannot move like that.")]
    IllegalShape(PieceKind),

    /// The castling rook vanished or moved between the shape check and the relocation
    #[error("Castling not allowed: rook has moved or missing")]
    CastlingPrecondition,
}

/// Result type alias for move operations
pub type MoveResult<T> = Result<T, MoveError>;

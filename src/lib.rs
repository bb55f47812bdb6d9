//! A two-player chess rules engine.
//!
//! The engine keeps the board, the side to move and the move history, and checks proposed moves against the
//! movement rule of each piece (shape and path only: check, mate, en passant and promotion are not handled).

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod movement;
pub mod moves;
pub mod perft;
pub mod tree;
pub mod types;

pub use board::{Board, FenError, START_FEN};
pub use error::{MoveError, MoveResult};
pub use game::{GameState, MOVE_OK, parse_square};
pub use moves::{CastleSide, MoveRecord};
pub use types::{Color, Coord, Piece, PieceKind, Square};

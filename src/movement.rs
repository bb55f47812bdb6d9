//! Piece movement rules.
//!
//! One shape predicate per piece kind, selected by a single `match` on `PieceKind`. A predicate answers whether
//! the piece standing on `from` may travel to `to` given its geometry, the squares it passes and what stands on
//! the destination. Turn order, check and pins are not considered here.
//!
//! Predicates only read the board.

use crate::board::Board;
use crate::moves::CastleSide;
use crate::types::{Color, Piece, PieceKind, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [(2, 1), (2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2), (-2, 1), (-2, -1)];

/// Row from which each color's pawns may double-step, indexed by `Color`.
const PAWN_HOME_ROW: [i8; 2] = [1, 6];

/// Returns whether the piece on `from` may move to `to` by shape. An empty `from` never moves.
pub fn can_move(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_can_move(board, from, to, piece.color),
        PieceKind::Knight => knight_can_move(board, from, to, piece.color),
        PieceKind::Bishop => bishop_can_move(board, from, to, piece.color),
        PieceKind::Rook => rook_can_move(board, from, to, piece.color),
        PieceKind::Queen => {
            rook_can_move(board, from, to, piece.color) || bishop_can_move(board, from, to, piece.color)
        }
        PieceKind::King => king_can_move(board, from, to, piece),
    }
}

/// Every square the piece on `from` may reach by shape, in a1..h8 order.
pub fn destinations(board: &Board, from: Square) -> Vec<Square> {
    Square::ALL.into_iter().filter(|&to| can_move(board, from, to)).collect()
}

/// The rook a king on `king_sq` would castle with on `side`, if one stands there unmoved.
pub fn castling_rook(board: &Board, king_sq: Square, side: CastleSide) -> Option<(Square, Piece)> {
    let rook_sq = king_sq.offset(0, side.rook_delta())?;
    board
        .piece_at(rook_sq)
        .filter(|p| p.kind == PieceKind::Rook && !p.has_moved)
        .map(|rook| (rook_sq, rook))
}

// The destination is free or holds an opposing piece.
#[inline(always)]
fn lands_on_empty_or_enemy(board: &Board, to: Square, color: Color) -> bool {
    board.piece_at(to).is_none_or(|p| p.color != color)
}

fn pawn_can_move(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let dir = color.forward();
    let d_row = to.row() - from.row();
    let d_col = to.col() - from.col();

    // Pushes
    if d_col == 0 {
        if d_row == dir {
            return board.is_empty(to);
        }
        if d_row == 2 * dir && from.row() == PAWN_HOME_ROW[color] {
            let passes_empty = from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid));
            return passes_empty && board.is_empty(to);
        }
    }

    // Diagonal captures; no en passant
    d_col.abs() == 1 && d_row == dir && board.piece_at(to).is_some_and(|p| p.color != color)
}

fn knight_can_move(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let delta = (to.row() - from.row(), to.col() - from.col());
    KNIGHT_DELTAS.contains(&delta) && lands_on_empty_or_enemy(board, to, color)
}

fn rook_can_move(board: &Board, from: Square, to: Square, color: Color) -> bool {
    if from.row() != to.row() && from.col() != to.col() {
        return false;
    }
    let row_step = (to.row() - from.row()).signum();
    let col_step = (to.col() - from.col()).signum();

    let mut sq = from;
    loop {
        sq = match sq.offset(row_step, col_step) {
            Some(next) => next,
            None => return false,
        };
        if sq == to {
            break;
        }
        if !board.is_empty(sq) {
            return false;
        }
    }
    lands_on_empty_or_enemy(board, to, color)
}

fn bishop_can_move(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let d_row = to.row() - from.row();
    let d_col = to.col() - from.col();
    if d_row.abs() != d_col.abs() || d_row == 0 {
        return false;
    }
    let row_step = d_row.signum();
    let col_step = d_col.signum();

    // Scan stops as soon as either coordinate reaches the target.
    let (mut r, mut c) = (from.row() + row_step, from.col() + col_step);
    while r != to.row() && c != to.col() {
        match Square::from_coords(r, c) {
            Some(sq) if board.is_empty(sq) => {}
            _ => return false,
        }
        r += row_step;
        c += col_step;
    }
    lands_on_empty_or_enemy(board, to, color)
}

fn king_can_move(board: &Board, from: Square, to: Square, king: Piece) -> bool {
    let d_row = (to.row() - from.row()).abs();
    let d_col = (to.col() - from.col()).abs();

    // Castling: shape and piece identity only, attacked squares are not checked
    if !king.has_moved {
        if let Some(side) = CastleSide::of_king_move(from, to) {
            if castling_path_clear(board, from, side) {
                return true;
            }
        }
    }

    d_row.max(d_col) == 1 && lands_on_empty_or_enemy(board, to, king.color)
}

// Unmoved rook in place and every square strictly between king and rook empty.
fn castling_path_clear(board: &Board, king_sq: Square, side: CastleSide) -> bool {
    if castling_rook(board, king_sq, side).is_none() {
        return false;
    }
    let delta = side.rook_delta();
    (1..delta.abs()).all(|i| king_sq.offset(0, i * delta.signum()).is_some_and(|sq| board.is_empty(sq)))
}

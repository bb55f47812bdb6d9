//! Move generation.
//!
//! Lists every move `GameState::validate_move` would accept for the side to move. Since the rules engine only
//! checks shape and path, these are pseudo-legal moves: a move that leaves the own king attacked is listed too.

use crate::game::GameState;
use crate::movement;
use crate::types::Square;

/// Includes the list of moves generated for a position, as (from, to) pairs in a1..h8 source order.
/// Positions reached from the start rarely go past ~100 shape-legal moves, hence the initial capacity.
pub struct MoveList {
    moves: Vec<(Square, Square)>,
}

impl MoveList {
    pub fn new() -> Self {
        Self { moves: Vec::with_capacity(128) }
    }

    pub fn push(&mut self, from: Square, to: Square) {
        self.moves.push((from, to));
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.moves.contains(&(from, to))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Square, Square)> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[(Square, Square)] {
        &self.moves
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates every shape-legal move for the side to move.
pub fn generate_moves(game: &GameState) -> MoveList {
    let mut list = MoveList::new();
    let board = game.board();

    for (from, piece) in board.pieces() {
        if piece.color != game.current_turn() {
            continue;
        }
        for to in movement::destinations(board, from) {
            list.push(from, to);
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn twenty_moves_from_the_start() {
        let game = GameState::new();
        let list = generate_moves(&game);
        assert_eq!(list.len(), 20);
        assert!(list.contains(Square::E2, Square::E4));
        assert!(list.contains(Square::G1, Square::F3));
        assert!(!list.contains(Square::E7, Square::E5));
    }

    #[test]
    fn every_generated_move_validates() {
        let game = GameState::from_fen("r3k2r/pppq1ppp/2n2n2/3pp3/2B1P1b1/2NP1N2/PPP2PPP/R1BQK2R w KQkq - 0 1")
            .unwrap();
        let list = generate_moves(&game);
        assert!(list.contains(Square::E1, Square::G1));
        for &(from, to) in list.iter() {
            assert_eq!(game.validate_move(from, to), Ok(()), "{from}{to}");
        }
        for from in Square::ALL {
            for to in Square::ALL {
                if game.validate_move(from, to).is_ok() {
                    assert!(list.contains(from, to), "{from}{to} missing");
                }
            }
        }
    }

    #[test]
    fn empty_side_has_no_moves() {
        let game = GameState::from_fen("8/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(game.current_turn(), Color::Black);
        assert!(generate_moves(&game).is_empty());
    }
}

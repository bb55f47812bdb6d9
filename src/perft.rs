use crate::game::GameState;
use crate::movegen::generate_moves;

/// Counts the leaves of the shape-legal move tree `depth` plies below `game`.
///
/// There is no unmake, so every child is played on a clone. Since check is never considered, the numbers
/// match standard perft only for shallow depths from quiet positions.
pub fn perft(game: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let list = generate_moves(game);
    if depth == 1 {
        return list.len() as u64;
    }

    let mut nodes = 0;

    for &(from, to) in list.iter() {
        let mut child = game.clone();
        if child.make_move(from, to).is_ok() {
            nodes += perft(&child, depth - 1);
        }
    }

    nodes
}

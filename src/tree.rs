//! History export.
//!
//! Renders a finished game's history for outside tools: a Graphviz DOT chain (one node per move hanging off a
//! root node) and a JSON dump of the records.

use serde::Serialize;

use crate::moves::MoveRecord;
use crate::types::Color;

const ROOT_LABEL: &str = "Game";

/// Renders `history` as a DOT digraph.
///
/// The root is filled gold; each move becomes the child of the previous one, labeled `"{n}. {record}"` and
/// filled white or gray after the side that played it.
pub fn to_dot(history: &[MoveRecord]) -> String {
    let mut out = format!("digraph tree {{\n    n0 [label=\"{ROOT_LABEL}\", fillcolor=gold, style=filled];\n");

    for (idx, record) in history.iter().enumerate() {
        let node = idx + 1;
        let fill = match record.color {
            Color::White => "white",
            Color::Black => "gray",
        };
        out.push_str(&format!("    n{node} [label=\"{node}. {record}\", fillcolor={fill}, style=filled];\n"));
        out.push_str(&format!("    n{} -> n{node};\n", node - 1));
    }

    out.push_str("}\n");
    out
}

#[derive(Serialize)]
struct Entry<'a> {
    ply: usize,
    text: String,
    #[serde(flatten)]
    record: &'a MoveRecord,
}

/// Serializes `history` as a pretty-printed JSON array, one object per move with its ply number and text.
pub fn to_json(history: &[MoveRecord]) -> serde_json::Result<String> {
    let entries: Vec<Entry<'_>> = history
        .iter()
        .enumerate()
        .map(|(idx, record)| Entry { ply: idx + 1, text: record.to_string(), record })
        .collect();
    serde_json::to_string_pretty(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    fn short_game() -> GameState {
        let mut game = GameState::new();
        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5")] {
            game.apply_move(from, to).unwrap();
        }
        game
    }

    #[test]
    fn dot_chain_has_root_and_one_node_per_move() {
        let dot = to_dot(short_game().history());
        assert!(dot.starts_with("digraph tree {\n"));
        assert!(dot.contains("n0 [label=\"Game\", fillcolor=gold, style=filled];"));
        assert!(dot.contains("n1 [label=\"1. Pawn from e2 to e4\", fillcolor=white, style=filled];"));
        assert!(dot.contains("n2 [label=\"2. Pawn from d7 to d5\", fillcolor=gray, style=filled];"));
        assert!(dot.contains("n3 [label=\"3. Pawn from e4 to d5 capturing Pawn\", fillcolor=white"));
        assert!(dot.contains("n2 -> n3;"));
        assert_eq!(dot.matches("->").count(), 3);
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn empty_history_is_just_the_root() {
        let dot = to_dot(&[]);
        assert_eq!(dot.matches("[label=").count(), 1);
        assert!(!dot.contains("->"));
    }

    #[test]
    fn json_lists_records_in_order() {
        let json = to_json(short_game().history()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["ply"], 1);
        assert_eq!(entries[0]["from"], "e2");
        assert_eq!(entries[0]["color"], "white");
        assert_eq!(entries[0]["captured"], serde_json::Value::Null);
        assert_eq!(entries[2]["piece"], "Pawn");
        assert_eq!(entries[2]["captured"], "Pawn");
        assert_eq!(entries[2]["text"], "Pawn from e4 to d5 capturing Pawn");
    }
}

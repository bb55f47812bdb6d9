use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use scachiera::movement::destinations;
use scachiera::perft::perft;
use scachiera::{CastleSide, GameState, MOVE_OK, START_FEN, Square, tree};

/// Two-player chess on the terminal.
#[derive(Parser, Debug)]
#[command(name = "scachiera", version, about)]
struct Args {
    /// Starting position as FEN
    #[arg(long, default_value = START_FEN)]
    fen: String,

    /// Where to write the move tree (Graphviz DOT) at the end of the game
    #[arg(long, default_value = "game_tree.dot")]
    tree: PathBuf,

    /// Also render the move tree to PNG with the external `dot` tool
    #[arg(long)]
    png: bool,

    /// Also write the move history as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Print perft counts up to DEPTH for the starting position and exit
    #[arg(long, value_name = "DEPTH")]
    perft: Option<u32>,
}

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    Move(&'a str, &'a str),
    Castle(CastleSide),
    History,
    Moves(&'a str),
    Invalid,
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("exit") {
        return Input::Exit;
    }
    if line.eq_ignore_ascii_case("history") {
        return Input::History;
    }
    match line.to_ascii_uppercase().as_str() {
        "O-O" => return Input::Castle(CastleSide::King),
        "O-O-O" => return Input::Castle(CastleSide::Queen),
        _ => {}
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [cmd, sq] if cmd.eq_ignore_ascii_case("moves") => Input::Moves(*sq),
        [from, to] => Input::Move(*from, *to),
        _ => Input::Invalid,
    }
}

fn write_history<W: Write>(game: &GameState, out: &mut W) -> io::Result<()> {
    for (idx, record) in game.history().iter().enumerate() {
        writeln!(out, "{}. {record}", idx + 1)?;
    }
    Ok(())
}

/// Runs the prompt until `exit` or end of input.
fn run<R: BufRead, W: Write>(game: &mut GameState, input: R, out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to scachiera!")?;
    writeln!(out, "Enter moves in format: e2 e4 or O-O / O-O-O for castling")?;

    let mut lines = input.lines();
    loop {
        writeln!(out, "{}", game.board())?;
        writeln!(out, "{}'s turn.", game.current_turn().title())?;
        write!(out, "Your move (start end) or 'exit': ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        let result = match parse_input(&line) {
            Input::Exit => break,
            Input::History => {
                write_history(game, out)?;
                continue;
            }
            Input::Moves(text) => {
                match Square::parse(text) {
                    Some(sq) => {
                        let targets: Vec<String> =
                            destinations(game.board(), sq).iter().map(|to| to.to_string()).collect();
                        writeln!(out, "{sq}: {}", targets.join(" "))?;
                    }
                    None => writeln!(out, "Invalid position input.")?,
                }
                continue;
            }
            Input::Invalid => {
                writeln!(out, "Invalid input.")?;
                continue;
            }
            Input::Castle(side) => {
                let (from, to) = side.king_squares(game.current_turn());
                game.make_move(from, to).map(|_| ())
            }
            Input::Move(from, to) => game.apply_move(from, to).map(|_| ()),
        };

        match result {
            Ok(()) => writeln!(out, "{MOVE_OK}")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    writeln!(out, "Game over. Move history:")?;
    write_history(game, out)
}

fn render_png(dot_path: &Path) {
    let png_path = dot_path.with_extension("png");
    match process::Command::new("dot").arg("-Tpng").arg(dot_path).arg("-o").arg(&png_path).status() {
        Ok(status) if status.success() => info!(path = %png_path.display(), "move tree rendered"),
        Ok(status) => warn!(%status, "dot exited with an error"),
        Err(err) => warn!(%err, "could not run dot"),
    }
}

fn export(game: &GameState, args: &Args) -> anyhow::Result<()> {
    fs::write(&args.tree, tree::to_dot(game.history()))
        .with_context(|| format!("writing move tree to {}", args.tree.display()))?;
    println!("Game tree written to {}", args.tree.display());

    if args.png {
        render_png(&args.tree);
    }

    if let Some(path) = &args.json {
        let json = tree::to_json(game.history())?;
        fs::write(path, json).with_context(|| format!("writing history to {}", path.display()))?;
        println!("History written to {}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = GameState::from_fen(&args.fen).with_context(|| format!("invalid --fen '{}'", args.fen))?;

    if let Some(depth) = args.perft {
        for depth in 1..=depth {
            println!("perft({}): {}", depth, perft(&game, depth));
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(&mut game, stdin.lock(), &mut stdout)?;
    export(&game, &args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prompt_lines() {
        assert_eq!(parse_input("exit"), Input::Exit);
        assert_eq!(parse_input("  EXIT "), Input::Exit);
        assert_eq!(parse_input("e2 e4"), Input::Move("e2", "e4"));
        assert_eq!(parse_input("o-o"), Input::Castle(CastleSide::King));
        assert_eq!(parse_input("O-O-O"), Input::Castle(CastleSide::Queen));
        assert_eq!(parse_input("history"), Input::History);
        assert_eq!(parse_input("moves g1"), Input::Moves("g1"));
        assert_eq!(parse_input("MOVES g1"), Input::Moves("g1"));
        assert_eq!(parse_input("Moves e2"), Input::Moves("e2"));
        assert_eq!(parse_input("e2"), Input::Invalid);
        assert_eq!(parse_input("e2 e4 e5"), Input::Invalid);
        assert_eq!(parse_input(""), Input::Invalid);
    }

    fn session(script: &str) -> (GameState, String) {
        let mut game = GameState::new();
        let mut out = Vec::new();
        run(&mut game, script.as_bytes(), &mut out).unwrap();
        (game, String::from_utf8(out).unwrap())
    }

    #[test]
    fn plays_moves_and_reports_results() {
        let (game, out) = session("e2 e4\ne7 e5\ne4 e5\nbogus\nexit\n");
        assert_eq!(game.history().len(), 2);
        assert_eq!(out.matches(MOVE_OK).count(), 2);
        assert!(out.contains("Pawn cannot move like that."));
        assert!(out.contains("Invalid input."));
        assert!(out.contains("Game over. Move history:\n1. Pawn from e2 to e4\n2. Pawn from e7 to e5\n"));
    }

    #[test]
    fn castling_shorthand_uses_side_to_move() {
        let script = "e2 e4\ne7 e5\ng1 f3\ng8 f6\nf1 c4\nf8 c5\nO-O\nO-O\n";
        let (game, out) = session(script);
        let tail = "5. Bishop from f1 to c4\n6. Bishop from f8 to c5\n7. King from e1 to g1\n8. King from e8 to g8\n";
        assert!(out.ends_with(tail));
        assert_eq!(game.piece_at(Square::F1).map(|p| p.kind), Some(scachiera::PieceKind::Rook));
        assert_eq!(game.piece_at(Square::F8).map(|p| p.kind), Some(scachiera::PieceKind::Rook));
    }

    #[test]
    fn moves_hint_lists_destinations() {
        let (_, out) = session("moves g1\nmoves z9\n");
        assert!(out.contains("g1: f3 h3\n"));
        assert!(out.contains("Invalid position input."));
    }
}

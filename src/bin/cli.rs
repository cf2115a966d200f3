//! Interactive REPL for the engine (spec.md §6.2, `cli` feature).
//!
//! Commands: `new`, `go <difficulty>`, `show`, `quit`.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use xiangqi_engine::{
    BoardSnapshot, Coord, Difficulty, Engine, Language, MoveCoords, SnapshotPiece, SnapshotPieceKind, SnapshotSide,
};

fn starting_snapshot() -> BoardSnapshot {
    let mut rows = vec![vec![None; 9]; 10];
    let back_rank = [
        SnapshotPieceKind::Rook,
        SnapshotPieceKind::Horse,
        SnapshotPieceKind::Elephant,
        SnapshotPieceKind::Advisor,
        SnapshotPieceKind::King,
        SnapshotPieceKind::Advisor,
        SnapshotPieceKind::Elephant,
        SnapshotPieceKind::Horse,
        SnapshotPieceKind::Rook,
    ];
    for (col, kind) in back_rank.iter().enumerate() {
        rows[0][col] = Some(SnapshotPiece { kind: *kind, side: SnapshotSide::Black });
        rows[9][col] = Some(SnapshotPiece { kind: *kind, side: SnapshotSide::Red });
    }
    rows[2][1] = Some(SnapshotPiece { kind: SnapshotPieceKind::Cannon, side: SnapshotSide::Black });
    rows[2][7] = Some(SnapshotPiece { kind: SnapshotPieceKind::Cannon, side: SnapshotSide::Black });
    rows[7][1] = Some(SnapshotPiece { kind: SnapshotPieceKind::Cannon, side: SnapshotSide::Red });
    rows[7][7] = Some(SnapshotPiece { kind: SnapshotPieceKind::Cannon, side: SnapshotSide::Red });
    for col in (0..9).step_by(2) {
        rows[3][col] = Some(SnapshotPiece { kind: SnapshotPieceKind::Pawn, side: SnapshotSide::Black });
        rows[6][col] = Some(SnapshotPiece { kind: SnapshotPieceKind::Pawn, side: SnapshotSide::Red });
    }
    BoardSnapshot { rows }
}

fn parse_difficulty(s: &str) -> Option<Difficulty> {
    match s {
        "beginner" => Some(Difficulty::Beginner),
        "intermediate" => Some(Difficulty::Intermediate),
        "expert" => Some(Difficulty::Expert),
        "master" => Some(Difficulty::Master),
        "grandmaster" => Some(Difficulty::Grandmaster),
        _ => None,
    }
}

fn fmt_coord(c: Coord) -> String {
    format!("({},{})", c.row, c.col)
}

fn fmt_move(mv: MoveCoords) -> String {
    format!("{}->{}", fmt_coord(mv.from), fmt_coord(mv.to))
}

fn main() {
    #[cfg(feature = "cli")]
    if let Ok(path) = std::env::var("XIANGQI_LOG") {
        xiangqi_engine::logger::init_logging(path, "xiangqi_engine=debug");
    }

    let mut engine = Engine::new();
    engine.load_board(&starting_snapshot(), xiangqi_engine::board::Color::Red);

    println!("info string xiangqi-engine ready");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts[0] {
            "new" => {
                engine.reset();
                engine.load_board(&starting_snapshot(), xiangqi_engine::board::Color::Red);
                println!("info string new game");
            }
            "go" => {
                let difficulty = parts.get(1).and_then(|s| parse_difficulty(s)).unwrap_or(Difficulty::Intermediate);

                let spinner = ProgressBar::new_spinner();
                spinner.set_style(ProgressStyle::with_template("{spinner} thinking... {elapsed}").unwrap());
                spinner.enable_steady_tick(Duration::from_millis(100));

                let outcome = engine.get_best_move(difficulty, Language::English);
                spinner.finish_and_clear();

                match outcome {
                    Some(outcome) => {
                        println!("bestmove {} score {} ({})", fmt_move(outcome.mv), outcome.score, outcome.reasoning);
                    }
                    None => println!("bestmove none ({:?})", engine.status()),
                }
            }
            "show" => {
                println!("{engine}");
            }
            "quit" => break,
            _ => {
                println!("info string unknown command: {}", parts[0]);
            }
        }
        let _ = io::stdout().flush();
    }
}

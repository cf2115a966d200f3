//! Thin `wasm-bindgen` wrapper over [`crate::engine::Engine`] for the
//! browser-facing build (spec.md §6.1). Board state crosses the JS
//! boundary as a simple row-major string, not the internal snapshot type.

use wasm_bindgen::prelude::*;

use crate::board::{Color, PieceType};
use crate::engine::{BoardSnapshot, Difficulty, Engine, Language, SnapshotPiece, SnapshotPieceKind, SnapshotSide};

fn piece_kind_from_char(c: char) -> Option<SnapshotPieceKind> {
    match c.to_ascii_lowercase() {
        'k' => Some(SnapshotPieceKind::King),
        'a' => Some(SnapshotPieceKind::Advisor),
        'e' => Some(SnapshotPieceKind::Elephant),
        'h' => Some(SnapshotPieceKind::Horse),
        'r' => Some(SnapshotPieceKind::Rook),
        'c' => Some(SnapshotPieceKind::Cannon),
        'p' => Some(SnapshotPieceKind::Pawn),
        _ => None,
    }
}

fn difficulty_from_str(s: &str) -> Difficulty {
    match s {
        "beginner" => Difficulty::Beginner,
        "intermediate" => Difficulty::Intermediate,
        "expert" => Difficulty::Expert,
        "master" => Difficulty::Master,
        _ => Difficulty::Grandmaster,
    }
}

/// Row-major board text: 10 rows of 9 characters, uppercase = Red,
/// lowercase = Black, `.` = empty. Row 0 is Black's back rank.
fn parse_rows(text: &str) -> BoardSnapshot {
    let mut rows = vec![vec![None; 9]; 10];
    for (r, line) in text.lines().take(10).enumerate() {
        for (c, ch) in line.chars().take(9).enumerate() {
            if ch == '.' {
                continue;
            }
            if let Some(kind) = piece_kind_from_char(ch) {
                let side = if ch.is_ascii_uppercase() { SnapshotSide::Red } else { SnapshotSide::Black };
                rows[r][c] = Some(SnapshotPiece { kind, side });
            }
        }
    }
    BoardSnapshot { rows }
}

#[wasm_bindgen]
pub struct XiangqiEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl XiangqiEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> XiangqiEngine {
        console_error_panic_hook::set_once();
        XiangqiEngine { engine: Engine::new() }
    }

    /// Clear search state and re-seed the Zobrist table for a new game.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Load a position from the row-major board text plus `"red"`/`"black"`
    /// for the side to move.
    pub fn load_board(&mut self, board_text: &str, side_to_move: &str) {
        let side = if side_to_move == "red" { Color::Red } else { Color::Black };
        let snapshot = parse_rows(board_text);
        self.engine.load_board(&snapshot, side);
    }

    /// Run a search at the named difficulty (`"beginner"`..`"grandmaster"`).
    /// Returns a JSON string: `{"from":{"row":r,"col":c},"to":{...},"score":n,"reasoning":"..."}`
    /// or `{"status":"checkmate"|"stalemate"}` if there is no legal move.
    pub fn go(&mut self, difficulty: &str, language: &str) -> String {
        let difficulty = difficulty_from_str(difficulty);
        let language = if language == "zh" { Language::SimplifiedChinese } else { Language::English };

        match self.engine.get_best_move(difficulty, language) {
            Some(outcome) => format!(
                r#"{{"from":{{"row":{},"col":{}}},"to":{{"row":{},"col":{}}},"score":{},"reasoning":"{}"}}"#,
                outcome.mv.from.row,
                outcome.mv.from.col,
                outcome.mv.to.row,
                outcome.mv.to.col,
                outcome.score,
                outcome.reasoning.replace('"', "'"),
            ),
            None => {
                let status = self.engine.status();
                let status = match status {
                    crate::status::GameStatus::Checkmate => "checkmate",
                    crate::status::GameStatus::Stalemate => "stalemate",
                    crate::status::GameStatus::InPlay => "in_play",
                };
                format!(r#"{{"status":"{status}"}}"#)
            }
        }
    }

    /// The current board as a FEN-like display string (display only).
    pub fn show(&self) -> String {
        self.engine.to_string()
    }
}

impl Default for XiangqiEngine {
    fn default() -> Self {
        Self::new()
    }
}

//! Public engine API (spec.md §6, expanded in SPEC_FULL.md §6).
//!
//! This is the one type external callers touch: native binaries, the
//! `wasm.rs` binding, and tests all go through `Engine`.

use crate::board::{Board, Color, PieceType};
use crate::hash::zobrist::ZobristKeys;
use crate::moves::types::Move;
use crate::search::context::SearchContext;
use crate::search::iterative_deepening;
use crate::search::tt::TranspositionTable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Master,
    Grandmaster,
}

impl Difficulty {
    /// `(maxDepth, timeLimit)` per spec.md §4.5.
    pub fn params(self) -> (i32, Duration) {
        match self {
            Difficulty::Beginner => (3, Duration::from_millis(800)),
            Difficulty::Intermediate => (5, Duration::from_millis(1500)),
            Difficulty::Expert => (7, Duration::from_millis(2500)),
            Difficulty::Master => (10, Duration::from_millis(4000)),
            Difficulty::Grandmaster => (24, Duration::from_millis(6000)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    SimplifiedChinese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotPieceKind {
    King,
    Advisor,
    Elephant,
    Horse,
    Rook,
    Cannon,
    Pawn,
}

impl From<SnapshotPieceKind> for PieceType {
    fn from(kind: SnapshotPieceKind) -> PieceType {
        match kind {
            SnapshotPieceKind::King => PieceType::King,
            SnapshotPieceKind::Advisor => PieceType::Advisor,
            SnapshotPieceKind::Elephant => PieceType::Elephant,
            SnapshotPieceKind::Horse => PieceType::Horse,
            SnapshotPieceKind::Rook => PieceType::Rook,
            SnapshotPieceKind::Cannon => PieceType::Cannon,
            SnapshotPieceKind::Pawn => PieceType::Pawn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotSide {
    Red,
    Black,
}

impl From<SnapshotSide> for Color {
    fn from(side: SnapshotSide) -> Color {
        match side {
            SnapshotSide::Red => Color::Red,
            SnapshotSide::Black => Color::Black,
        }
    }
}

impl From<Color> for SnapshotSide {
    fn from(color: Color) -> SnapshotSide {
        match color {
            Color::Red => SnapshotSide::Red,
            Color::Black => SnapshotSide::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPiece {
    pub kind: SnapshotPieceKind,
    pub side: SnapshotSide,
}

/// 10-row x 9-col grid, row 0 = Black back rank, row 9 = Red back rank
/// (spec.md §6 "Board snapshot format").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Vec<Vec<Option<SnapshotPiece>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCoords {
    pub from: Coord,
    pub to: Coord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub mv: MoveCoords,
    pub reasoning: String,
    pub score: i32,
}

fn move_to_coords(mv: Move) -> MoveCoords {
    let from = mv.from();
    let to = mv.to();
    MoveCoords {
        from: Coord { row: from.row(), col: from.col() },
        to: Coord { row: to.row(), col: to.col() },
    }
}

fn reasoning(depth: i32, nodes: u64, score: i32, language: Language) -> String {
    let kilonodes = nodes / 1000;
    match language {
        Language::English => format!("depth {depth}, {kilonodes}k nodes, score {score:+}"),
        Language::SimplifiedChinese => format!("深度 {depth}，{kilonodes}千节点，评分 {score:+}"),
    }
}

/// Owns the board, the per-instance Zobrist keys, the transposition table
/// and the killer/history tables — one `Engine` is created once and reused
/// across many `get_best_move` calls (spec.md §5 "Ordering").
pub struct Engine {
    board: Board,
    keys: ZobristKeys,
    tt: TranspositionTable,
    ctx: SearchContext,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            board: Board::default(),
            keys: ZobristKeys::generate(),
            tt: TranspositionTable::default(),
            ctx: SearchContext::new(),
        }
    }

    /// Clears TT, history and killers, and re-seeds the Zobrist table —
    /// the reseed changes move preference on symmetric choices, giving
    /// variety across games (spec.md §3 "Lifecycle").
    pub fn reset(&mut self) {
        self.tt.clear();
        self.ctx.clear();
        self.keys = ZobristKeys::generate();
        self.board.recompute_hash(&self.keys);
    }

    pub fn load_board(&mut self, snapshot: &BoardSnapshot, side: Color) {
        let pieces = snapshot.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter().enumerate().filter_map(move |(col, piece)| {
                piece.map(|p| (row as u8, col as u8, Color::from(p.side), PieceType::from(p.kind)))
            })
        });
        self.board.load(pieces, side, &self.keys);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// `getBestMove` (spec.md §4.5 / §6). Returns `None` iff there is no
    /// legal move at the root (mate or stalemate).
    pub fn get_best_move(&mut self, difficulty: Difficulty, language: Language) -> Option<SearchOutcome> {
        let (max_depth, time_limit) = difficulty.params();
        let result = iterative_deepening(&mut self.board, &self.keys, &mut self.ctx, &mut self.tt, max_depth, time_limit);

        if result.best_move.is_none() {
            return None;
        }

        Some(SearchOutcome {
            mv: move_to_coords(result.best_move),
            reasoning: reasoning(result.depth_reached, result.nodes, result.score, language),
            score: result.score,
        })
    }

    /// Mate vs. stalemate classification for the current position
    /// (spec.md §7's error-handling table: `get_best_move` alone cannot
    /// tell a caller which one produced its `None`).
    pub fn status(&mut self) -> crate::status::GameStatus {
        crate::status::position_status(&mut self.board, &self.keys)
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}

//! Iterative deepening, negamax/PVS, null-move pruning, LMR and
//! quiescence — the core of spec.md §4.5.

use crate::board::{Board, EMPTY};
use crate::hash::zobrist::ZobristKeys;
use crate::moves::execute::{make_move, make_null_move, undo_move, undo_null_move};
use crate::moves::movegen::generate_moves;
use crate::moves::square_control::in_check;
use crate::moves::types::{Move, NO_MOVE};
use crate::search::context::SearchContext;
use crate::search::eval::evaluate;
use crate::search::ordering::{order_captures, order_moves};
use crate::search::tt::{Bound, TranspositionTable};
use std::time::{Duration, Instant};
use tracing::debug;

pub const INF: i32 = 20_000;
pub const MATE_SCORE: i32 = 20_000;
/// `|score| > MATE_THRESHOLD` signals a detected forced mate (spec.md §4.5
/// aspiration loop breaks early on `|s| > 15000`).
pub const MATE_THRESHOLD: i32 = 15_000;

const NODE_CHECK_MASK: u64 = 2047;
const NULL_MOVE_MIN_DEPTH: i32 = 3;
const NULL_MOVE_REDUCTION: i32 = 2;
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_LEGAL: i32 = 4;
const ASPIRATION_WINDOW: i32 = 50;
const MAX_QUIESCENCE_PLY: usize = 64;

pub struct TimeManager {
    start: Instant,
    limit: Duration,
}

impl TimeManager {
    pub fn new(limit: Duration) -> Self {
        TimeManager { start: Instant::now(), limit }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

pub struct SearchState {
    pub nodes: u64,
    pub abort: bool,
}

impl SearchState {
    pub fn new() -> Self {
        SearchState { nodes: 0, abort: false }
    }

    #[inline]
    fn poll(&mut self, time: &TimeManager) {
        self.nodes += 1;
        if self.nodes & NODE_CHECK_MASK == 0 && time.expired() {
            self.abort = true;
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// One fully self-contained search session, bundling everything `negamax`
/// and `quiescence` need so their call signatures stay short.
pub struct Searcher<'a> {
    pub board: &'a mut Board,
    pub keys: &'a ZobristKeys,
    pub ctx: &'a mut SearchContext,
    pub tt: &'a mut TranspositionTable,
    pub state: &'a mut SearchState,
    pub time: &'a TimeManager,
}

impl<'a> Searcher<'a> {
    pub fn quiescence(&mut self, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.state.poll(self.time);
        if self.state.abort {
            return alpha;
        }

        let stand_pat = evaluate(self.board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if ply >= MAX_QUIESCENCE_PLY {
            return alpha;
        }

        let side = self.board.side_to_move;
        let mut captures = generate_moves(self.board, side, true);
        order_captures(&mut captures, self.board);

        for mv in captures {
            let undo = make_move(self.board, self.keys, mv);
            if in_check(self.board, side) {
                undo_move(self.board, self.keys, undo);
                continue;
            }
            let score = -self.quiescence(ply + 1, -beta, -alpha);
            undo_move(self.board, self.keys, undo);

            if self.state.abort {
                return alpha;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Negamax with PVS, null-move pruning and LMR. Returns a score in
    /// `[-MATE_SCORE, MATE_SCORE]` from `board.side_to_move`'s perspective.
    pub fn search(&mut self, mut depth: i32, mut alpha: i32, beta: i32, ply: usize, is_null: bool) -> i32 {
        self.state.poll(self.time);
        if self.state.abort {
            return alpha;
        }

        let side = self.board.side_to_move;
        let in_chk = in_check(self.board, side);
        let hash = self.board.zobrist;

        if let Some((tt_depth, tt_score, bound, _)) = self.tt.probe(hash) {
            if tt_depth >= depth && !in_chk {
                match bound {
                    Bound::Exact => return tt_score,
                    Bound::Lower if tt_score >= beta => return tt_score,
                    Bound::Upper if tt_score <= alpha => return tt_score,
                    _ => {}
                }
            }
        }

        if depth <= 0 {
            if !in_chk {
                return self.quiescence(ply, alpha, beta);
            }
            depth = 1;
        }

        if !is_null && !in_chk && depth >= NULL_MOVE_MIN_DEPTH {
            make_null_move(self.board, self.keys);
            let v = -self.search(depth - 1 - NULL_MOVE_REDUCTION, -beta, -beta + 1, ply + 1, true);
            undo_null_move(self.board, self.keys);
            if self.state.abort {
                return alpha;
            }
            if v >= beta {
                return beta;
            }
        }

        let tt_move = self.tt.probe(hash).map(|(_, _, _, m)| m).filter(|m| !m.is_none());
        let mut moves = generate_moves(self.board, side, false);
        order_moves(&mut moves, self.board, tt_move, ply, self.ctx);

        let original_alpha = alpha;
        let mut legal = 0i32;
        let mut best_score = -INF;
        let mut best_move = NO_MOVE;
        let mut bound = Bound::Upper;

        for (i, &mv) in moves.iter().enumerate() {
            let captured = self.board.piece_at(mv.to());
            let undo = make_move(self.board, self.keys, mv);
            if in_check(self.board, side) {
                undo_move(self.board, self.keys, undo);
                continue;
            }
            legal += 1;

            let score = if i == 0 {
                -self.search(depth - 1, -beta, -alpha, ply + 1, false)
            } else {
                let reduce = depth >= LMR_MIN_DEPTH && legal > LMR_MIN_LEGAL && captured == EMPTY && !in_chk;
                let r = if reduce { 1 } else { 0 };
                let mut s = -self.search(depth - 1 - r, -alpha - 1, -alpha, ply + 1, false);
                if s > alpha && r > 0 {
                    s = -self.search(depth - 1, -alpha - 1, -alpha, ply + 1, false);
                }
                if s > alpha && s < beta {
                    s = -self.search(depth - 1, -beta, -alpha, ply + 1, false);
                }
                s
            };

            undo_move(self.board, self.keys, undo);
            if self.state.abort {
                return alpha;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
                bound = Bound::Exact;
            }
            if alpha >= beta {
                bound = Bound::Lower;
                if captured == EMPTY {
                    self.ctx.push_killer(ply, mv);
                    self.ctx.bump_history(mv, depth);
                }
                break;
            }
        }

        if legal == 0 {
            return if in_chk { -MATE_SCORE + ply as i32 } else { 0 };
        }

        if !best_move.is_none() {
            let stored_bound = if best_score <= original_alpha { Bound::Upper } else { bound };
            debug!(depth, ply, best_score, ?stored_bound, "storing tt entry");
            self.tt.store(hash, depth, best_score, stored_bound, best_move);
        }

        best_score
    }
}

/// Result of one complete (or aborted) top-level search call.
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth_reached: i32,
    pub nodes: u64,
}

/// Iterative deepening with aspiration windows (spec.md §4.5). Runs until
/// `max_depth` completes, the time limit elapses, or a mate is found.
pub fn iterative_deepening(
    board: &mut Board,
    keys: &ZobristKeys,
    ctx: &mut SearchContext,
    tt: &mut TranspositionTable,
    max_depth: i32,
    time_limit: Duration,
) -> SearchResult {
    let time = TimeManager::new(time_limit);
    let mut state = SearchState::new();

    let mut alpha = -INF;
    let mut beta = INF;
    let mut best_move = NO_MOVE;
    let mut best_score = 0;
    let mut depth_reached = 0;

    for depth in 1..=max_depth {
        debug!(depth, alpha, beta, "starting iteration");
        let mut searcher = Searcher { board: &mut *board, keys, ctx: &mut *ctx, tt: &mut *tt, state: &mut state, time: &time };
        let mut s = searcher.search(depth, alpha, beta, 0, false);

        if s <= alpha || s >= beta {
            debug!(depth, s, alpha, beta, "aspiration window missed, re-searching full width");
            let mut searcher = Searcher { board: &mut *board, keys, ctx: &mut *ctx, tt: &mut *tt, state: &mut state, time: &time };
            s = searcher.search(depth, -INF, INF, 0, false);
        }

        if state.abort {
            break;
        }

        alpha = s - ASPIRATION_WINDOW;
        beta = s + ASPIRATION_WINDOW;
        best_score = s;
        depth_reached = depth;

        if let Some((_, _, _, mv)) = tt.probe(board.zobrist) {
            if !mv.is_none() {
                best_move = mv;
            }
        }

        if s.abs() > MATE_THRESHOLD {
            break;
        }
    }

    if best_move.is_none() {
        let side = board.side_to_move;
        let legal = first_legal_move(board, keys, side);
        if let Some(mv) = legal {
            best_move = mv;
            best_score = 0;
        }
    }

    SearchResult { best_move, score: best_score, depth_reached: depth_reached.max(0), nodes: state.nodes }
}

/// Fallback used when iterative deepening aborts before recording any best
/// move (spec.md §4.5 "Fallback"): any legal move, preferring the first one
/// generation happens to produce.
fn first_legal_move(board: &mut Board, keys: &ZobristKeys, side: crate::board::Color) -> Option<Move> {
    let moves = generate_moves(board, side, false);
    for mv in moves {
        let undo = make_move(board, keys, mv);
        let ok = !in_check(board, side);
        undo_move(board, keys, undo);
        if ok {
            return Some(mv);
        }
    }
    None
}

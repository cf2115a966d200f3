//! Pseudo-legal move generation (spec.md §4.3).
//!
//! Direction tables are plain constant arrays, not closures (spec.md §9
//! Design Notes: "a systems implementation should inline the direction
//! tables as constant arrays and use plain loops").

use crate::board::{Board, Color, EMPTY, PieceType, in_palace, on_own_side, unpack};
use crate::moves::types::{Move, MoveList};
use crate::square::Square;

const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const ADVISOR_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
/// `(dr, dc)` of the elephant's two-step diagonal; the "eye" is the
/// midpoint, i.e. `(dr/2, dc/2)`.
const ELEPHANT_DIRS: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];
/// `(dr, dc, leg_dr, leg_dc)` for each of the horse's 8 destinations.
const HORSE_MOVES: [(i8, i8, i8, i8); 8] = [
    (2, 1, 1, 0),
    (2, -1, 1, 0),
    (-2, 1, -1, 0),
    (-2, -1, -1, 0),
    (1, 2, 0, 1),
    (1, -2, 0, -1),
    (-1, 2, 0, 1),
    (-1, -2, 0, -1),
];

/// Push `from -> to` if on-board and not blocked by a friendly piece.
/// Returns whether the destination was occupied (by either side) so
/// sliding generators know whether to keep walking.
#[inline]
fn try_push(board: &Board, side: Color, from: Square, to: Square, moves: &mut MoveList, captures_only: bool) -> bool {
    let byte = board.piece_at(to);
    if byte == EMPTY {
        if !captures_only {
            moves.push(Move::new(from, to));
        }
        false
    } else {
        let (color, _) = unpack(byte);
        if color != side {
            moves.push(Move::new(from, to));
        }
        true
    }
}

fn gen_king(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    for &(dr, dc) in &ORTHO_DIRS {
        if let Some(to) = sq.offset(dr, dc) {
            if in_palace(side, to) {
                try_push(board, side, sq, to, moves, captures_only);
            }
        }
    }
}

fn gen_advisor(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    for &(dr, dc) in &ADVISOR_DIRS {
        if let Some(to) = sq.offset(dr, dc) {
            if in_palace(side, to) {
                try_push(board, side, sq, to, moves, captures_only);
            }
        }
    }
}

fn gen_elephant(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    for &(dr, dc) in &ELEPHANT_DIRS {
        if let Some(to) = sq.offset(dr, dc) {
            if !on_own_side(side, to) {
                continue;
            }
            let eye = sq.offset(dr / 2, dc / 2).expect("elephant eye always on-board");
            if board.is_empty(eye) {
                try_push(board, side, sq, to, moves, captures_only);
            }
        }
    }
}

fn gen_horse(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    for &(dr, dc, leg_dr, leg_dc) in &HORSE_MOVES {
        let Some(to) = sq.offset(dr, dc) else { continue };
        let leg = sq.offset(leg_dr, leg_dc).expect("horse leg always on-board");
        if board.is_empty(leg) {
            try_push(board, side, sq, to, moves, captures_only);
        }
    }
}

fn gen_sliding(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    for &(dr, dc) in &ORTHO_DIRS {
        let mut cur = sq;
        loop {
            let Some(next) = cur.offset(dr, dc) else { break };
            let blocked = try_push(board, side, sq, next, moves, captures_only);
            if blocked {
                break;
            }
            cur = next;
        }
    }
}

fn gen_cannon(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    for &(dr, dc) in &ORTHO_DIRS {
        let mut cur = sq;
        // Quiet moves: walk until the screen (first occupied square).
        let screen = loop {
            let Some(next) = cur.offset(dr, dc) else { break None };
            if board.is_empty(next) {
                if !captures_only {
                    moves.push(Move::new(sq, next));
                }
                cur = next;
                continue;
            }
            break Some(next);
        };
        let Some(screen_sq) = screen else { continue };
        // Past the screen, the first occupied square (of either colour)
        // is the only capturable target.
        let mut scan = screen_sq;
        loop {
            let Some(next) = scan.offset(dr, dc) else { break };
            if board.is_empty(next) {
                scan = next;
                continue;
            }
            let (color, _) = unpack(board.piece_at(next));
            if color != side {
                moves.push(Move::new(sq, next));
            }
            break;
        }
    }
}

fn gen_pawn(board: &Board, side: Color, sq: Square, moves: &mut MoveList, captures_only: bool) {
    let forward = match side {
        Color::Red => (-1, 0),
        Color::Black => (1, 0),
    };
    if on_own_side(side, sq) {
        if let Some(to) = sq.offset(forward.0, forward.1) {
            try_push(board, side, sq, to, moves, captures_only);
        }
        return;
    }
    for &(dr, dc) in &[forward, (0, 1), (0, -1)] {
        if let Some(to) = sq.offset(dr, dc) {
            try_push(board, side, sq, to, moves, captures_only);
        }
    }
}

/// All pseudo-legal moves for `side` (or, with `captures_only`, only the
/// moves whose destination holds an enemy piece). Piece-movement rules are
/// enforced; the result may still leave `side`'s own king in check — the
/// caller filters that with `inCheck` after `makeMove` (spec.md §4.3).
pub fn generate_moves(board: &Board, side: Color, captures_only: bool) -> MoveList {
    let mut moves = MoveList::new();
    for idx in 0u16..256 {
        let sq = Square::from_index(idx as u8);
        if !sq.is_valid() {
            continue;
        }
        let byte = board.piece_at(sq);
        if byte == EMPTY {
            continue;
        }
        let (color, kind) = unpack(byte);
        if color != side {
            continue;
        }
        match kind {
            PieceType::King => gen_king(board, side, sq, &mut moves, captures_only),
            PieceType::Advisor => gen_advisor(board, side, sq, &mut moves, captures_only),
            PieceType::Elephant => gen_elephant(board, side, sq, &mut moves, captures_only),
            PieceType::Horse => gen_horse(board, side, sq, &mut moves, captures_only),
            PieceType::Rook => gen_sliding(board, side, sq, &mut moves, captures_only),
            PieceType::Cannon => gen_cannon(board, side, sq, &mut moves, captures_only),
            PieceType::Pawn => gen_pawn(board, side, sq, &mut moves, captures_only),
        }
    }
    moves
}

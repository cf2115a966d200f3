//! Make/undo a move on the board, keeping the Zobrist hash, side to move
//! and king-square tracking consistent (spec.md §4.3 "Make/Undo Move").
//!
//! Every hash update here is an XOR, and XOR is its own inverse, so `undo`
//! replays the exact same XOR sequence as `make` instead of needing a
//! separately stored pre-move hash.

use crate::board::{Board, Color, EMPTY, PieceType, pack, unpack};
use crate::hash::zobrist::ZobristKeys;
use crate::moves::types::Move;

/// Enough to reverse one `make_move`: the moved piece's original square and
/// byte, and whatever (possibly `EMPTY`) byte sat on the destination.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    mv: Move,
    moved: u8,
    captured: u8,
}

/// Apply `mv`, which must be pseudo-legal for the side currently on move.
pub fn make_move(board: &mut Board, keys: &ZobristKeys, mv: Move) -> Undo {
    let from = mv.from();
    let to = mv.to();
    let moved = board.piece_at(from);
    let captured = board.piece_at(to);
    debug_assert_ne!(moved, EMPTY, "make_move called with no piece on the source square");

    let mut hash = board.zobrist;
    hash ^= keys.piece(from, moved);
    if captured != EMPTY {
        hash ^= keys.piece(to, captured);
    }
    hash ^= keys.piece(to, moved);
    hash ^= keys.side_key;

    board.set_square(from, EMPTY);
    board.set_square(to, moved);
    let (color, kind) = unpack(moved);
    if kind == PieceType::King {
        board.set_king_square(color, to);
    }
    board.side_to_move = board.side_to_move.opposite();
    board.zobrist = hash;

    #[cfg(all(debug_assertions, feature = "paranoid_hash"))]
    {
        let full = board.compute_full_hash(keys);
        debug_assert_eq!(board.zobrist, full, "incremental hash diverged from full recompute after make_move");
    }

    Undo { mv, moved, captured }
}

/// Reverse the effect of the `make_move` call that produced `undo`. Must be
/// called on exactly the board state `make_move` left behind, in LIFO order.
pub fn undo_move(board: &mut Board, keys: &ZobristKeys, undo: Undo) {
    let from = undo.mv.from();
    let to = undo.mv.to();

    let mut hash = board.zobrist;
    hash ^= keys.side_key;
    hash ^= keys.piece(to, undo.moved);
    if undo.captured != EMPTY {
        hash ^= keys.piece(to, undo.captured);
    }
    hash ^= keys.piece(from, undo.moved);

    board.set_square(to, undo.captured);
    board.set_square(from, undo.moved);
    let (color, kind) = unpack(undo.moved);
    if kind == PieceType::King {
        board.set_king_square(color, from);
    }
    board.side_to_move = board.side_to_move.opposite();
    board.zobrist = hash;

    #[cfg(all(debug_assertions, feature = "paranoid_hash"))]
    {
        let full = board.compute_full_hash(keys);
        debug_assert_eq!(board.zobrist, full, "incremental hash diverged from full recompute after undo_move");
    }
}

/// Flip the side to move without touching the board, for null-move pruning
/// (spec.md §4.5). No piece moves, so only the side key needs XORing.
pub fn make_null_move(board: &mut Board, keys: &ZobristKeys) {
    board.zobrist ^= keys.side_key;
    board.side_to_move = board.side_to_move.opposite();
}

pub fn undo_null_move(board: &mut Board, keys: &ZobristKeys) {
    make_null_move(board, keys);
}

//! Game-outcome classification (spec.md §7), trimmed to the three
//! statuses this engine can actually distinguish — draw/repetition rules
//! are an explicit non-goal, so there is no threefold/fifty-move tracking
//! to classify against.

use crate::board::{Board, Color};
use crate::moves::execute::{make_move, undo_move};
use crate::moves::movegen::generate_moves;
use crate::moves::square_control::in_check;
use crate::hash::zobrist::ZobristKeys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    Checkmate,
    Stalemate,
}

/// True iff `side` has at least one pseudo-legal move that does not leave
/// its own king in check.
fn has_legal_move(board: &mut Board, keys: &ZobristKeys, side: Color) -> bool {
    let moves = generate_moves(board, side, false);
    for mv in moves {
        let undo = make_move(board, keys, mv);
        let ok = !in_check(board, side);
        undo_move(board, keys, undo);
        if ok {
            return true;
        }
    }
    false
}

/// Classify the position for `board.side_to_move`.
pub fn position_status(board: &mut Board, keys: &ZobristKeys) -> GameStatus {
    let side = board.side_to_move;
    if has_legal_move(board, keys, side) {
        GameStatus::InPlay
    } else if in_check(board, side) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceType;

    #[test]
    fn normal_position_is_in_play() {
        let keys = ZobristKeys::generate();
        let mut board = Board::default();
        board.load(
            [
                (9, 4, Color::Red, PieceType::King),
                (0, 8, Color::Black, PieceType::King),
                (9, 0, Color::Red, PieceType::Rook),
            ],
            Color::Red,
            &keys,
        );
        assert_eq!(position_status(&mut board, &keys), GameStatus::InPlay);
    }

    #[test]
    fn mate_in_one_delivered_is_checkmate_for_the_mated_side() {
        let keys = ZobristKeys::generate();
        let mut board = Board::default();
        board.load(
            [
                (9, 8, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
                (0, 0, Color::Red, PieceType::Rook),
                (5, 4, Color::Red, PieceType::Rook),
            ],
            Color::Black,
            &keys,
        );
        assert_eq!(position_status(&mut board, &keys), GameStatus::Checkmate);
    }
}

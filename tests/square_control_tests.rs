//! `in_check`, including the flying-general rule, through the public API.

use xiangqi_engine::board::{Board, Color, PieceType};
use xiangqi_engine::hash::zobrist::ZobristKeys;
use xiangqi_engine::moves::square_control::in_check;

fn board_with(pieces: &[(u8, u8, Color, PieceType)], side: Color) -> Board {
    let keys = ZobristKeys::generate();
    let mut board = Board::default();
    board.load(pieces.iter().copied(), side, &keys);
    board
}

#[test]
fn flying_general_counts_as_check_on_both_sides() {
    // Kings share file 4 with nothing between them.
    let board = board_with(&[(9, 4, Color::Red, PieceType::King), (0, 4, Color::Black, PieceType::King)], Color::Red);
    assert!(in_check(&board, Color::Red));
    assert!(in_check(&board, Color::Black));
}

#[test]
fn a_blocker_between_the_kings_clears_flying_general() {
    let board = board_with(
        &[(9, 4, Color::Red, PieceType::King), (0, 4, Color::Black, PieceType::King), (5, 4, Color::Red, PieceType::Pawn)],
        Color::Red,
    );
    assert!(!in_check(&board, Color::Red));
    assert!(!in_check(&board, Color::Black));
}

#[test]
fn rook_gives_check_along_a_clear_file() {
    let board = board_with(
        &[(9, 4, Color::Red, PieceType::King), (0, 8, Color::Black, PieceType::King), (0, 4, Color::Black, PieceType::Rook)],
        Color::Red,
    );
    assert!(in_check(&board, Color::Red));
    assert!(!in_check(&board, Color::Black));
}

#[test]
fn pawn_several_squares_away_on_an_open_file_does_not_check() {
    // A Xiangqi pawn only ever captures one square away. Even though the
    // pawn's forward direction points straight down the open file at the
    // king, it is six squares distant and threatens nothing.
    let board = board_with(
        &[(9, 4, Color::Red, PieceType::King), (0, 8, Color::Black, PieceType::King), (3, 4, Color::Black, PieceType::Pawn)],
        Color::Red,
    );
    assert!(!in_check(&board, Color::Red));
}

#[test]
fn cannon_needs_exactly_one_screen_to_check() {
    let board = board_with(
        &[
            (9, 4, Color::Red, PieceType::King),
            (0, 8, Color::Black, PieceType::King),
            (5, 4, Color::Black, PieceType::Cannon),
            (7, 4, Color::Red, PieceType::Pawn),
        ],
        Color::Red,
    );
    assert!(in_check(&board, Color::Red));
}

#[test]
fn cannon_with_no_screen_does_not_check() {
    let board = board_with(
        &[(9, 4, Color::Red, PieceType::King), (0, 8, Color::Black, PieceType::King), (5, 4, Color::Black, PieceType::Cannon)],
        Color::Red,
    );
    assert!(!in_check(&board, Color::Red));
}

#[test]
fn horse_check_respects_the_leg_block() {
    let mut board = board_with(
        &[
            (9, 4, Color::Red, PieceType::King),
            (0, 8, Color::Black, PieceType::King),
            (7, 3, Color::Black, PieceType::Horse),
            (8, 4, Color::Red, PieceType::Advisor),
        ],
        Color::Red,
    );
    // leg at (8,4) is occupied, so the horse at (7,3) cannot check (9,4)
    assert!(!in_check(&board, Color::Red));
    board.load(
        [
            (9, 4, Color::Red, PieceType::King),
            (0, 8, Color::Black, PieceType::King),
            (7, 3, Color::Black, PieceType::Horse),
        ],
        Color::Red,
        &ZobristKeys::generate(),
    );
    assert!(in_check(&board, Color::Red));
}

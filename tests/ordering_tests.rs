//! Move-ordering priorities (TT move, captures by MVV-LVA, killers,
//! history) through the public `search::ordering` API.

use xiangqi_engine::board::{Board, Color, PieceType};
use xiangqi_engine::hash::zobrist::ZobristKeys;
use xiangqi_engine::moves::types::Move;
use xiangqi_engine::search::context::SearchContext;
use xiangqi_engine::search::ordering::{order_captures, order_moves};
use xiangqi_engine::square::Square;

fn board_with(pieces: &[(u8, u8, Color, PieceType)]) -> Board {
    let keys = ZobristKeys::generate();
    let mut board = Board::default();
    board.load(pieces.iter().copied(), Color::Red, &keys);
    board
}

#[test]
fn tt_move_always_sorts_first_even_above_a_capture() {
    let board = board_with(&[
        (9, 4, Color::Red, PieceType::King),
        (0, 4, Color::Black, PieceType::King),
        (9, 0, Color::Red, PieceType::Rook),
        (5, 0, Color::Black, PieceType::Pawn),
    ]);
    let ctx = SearchContext::new();
    let quiet = Move::new(Square::new(9, 0), Square::new(8, 0));
    let capture = Move::new(Square::new(9, 0), Square::new(5, 0));
    let mut moves = [capture, quiet];
    order_moves(&mut moves, &board, Some(quiet), 0, &ctx);
    assert_eq!(moves[0], quiet);
}

#[test]
fn higher_value_victim_outranks_lower_value_victim() {
    let board = board_with(&[
        (9, 4, Color::Red, PieceType::King),
        (0, 4, Color::Black, PieceType::King),
        (9, 0, Color::Red, PieceType::Rook),
        (9, 8, Color::Red, PieceType::Rook),
        (5, 0, Color::Black, PieceType::Pawn),
        (5, 8, Color::Black, PieceType::Rook),
    ]);
    let ctx = SearchContext::new();
    let take_pawn = Move::new(Square::new(9, 0), Square::new(5, 0));
    let take_rook = Move::new(Square::new(9, 8), Square::new(5, 8));
    let mut moves = [take_pawn, take_rook];
    order_moves(&mut moves, &board, None, 0, &ctx);
    assert_eq!(moves[0], take_rook);
}

#[test]
fn killer_moves_outrank_ordinary_quiet_moves() {
    let board = board_with(&[
        (9, 4, Color::Red, PieceType::King),
        (0, 4, Color::Black, PieceType::King),
        (9, 0, Color::Red, PieceType::Rook),
    ]);
    let mut ctx = SearchContext::new();
    let killer = Move::new(Square::new(9, 0), Square::new(7, 0));
    let other = Move::new(Square::new(9, 0), Square::new(8, 0));
    ctx.push_killer(3, killer);
    let mut moves = [other, killer];
    order_moves(&mut moves, &board, None, 3, &ctx);
    assert_eq!(moves[0], killer);
}

#[test]
fn higher_history_score_breaks_ties_between_quiet_moves() {
    let board = board_with(&[
        (9, 4, Color::Red, PieceType::King),
        (0, 4, Color::Black, PieceType::King),
        (9, 0, Color::Red, PieceType::Rook),
    ]);
    let mut ctx = SearchContext::new();
    let favoured = Move::new(Square::new(9, 0), Square::new(7, 0));
    let other = Move::new(Square::new(9, 0), Square::new(8, 0));
    ctx.bump_history(favoured, 6);
    let mut moves = [other, favoured];
    order_moves(&mut moves, &board, None, 0, &ctx);
    assert_eq!(moves[0], favoured);
}

#[test]
fn order_captures_sorts_by_mvv_lva() {
    let board = board_with(&[
        (9, 4, Color::Red, PieceType::King),
        (0, 4, Color::Black, PieceType::King),
        (9, 0, Color::Red, PieceType::Rook),
        (5, 0, Color::Black, PieceType::Pawn),
        (5, 4, Color::Black, PieceType::Rook),
    ]);
    let take_pawn = Move::new(Square::new(9, 0), Square::new(5, 0));
    let take_rook = Move::new(Square::new(9, 0), Square::new(5, 4));
    let mut captures = [take_pawn, take_rook];
    order_captures(&mut captures, &board);
    assert_eq!(captures[0], take_rook);
}

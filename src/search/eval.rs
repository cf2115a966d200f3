//! Static position evaluation (spec.md §4.4).
//!
//! Material plus small positional bonuses, returned from the side-to-move's
//! perspective. No tapered phases, no mobility or king-safety scan — every
//! term here is a per-piece lookup against fixed row/column bands.

use crate::board::{Board, Color, EMPTY, PieceType, crossed_river, on_own_side, unpack};
use crate::square::Square;

const CENTRAL_FILES: [u8; 3] = [3, 4, 5];

fn is_central_file(col: u8) -> bool {
    CENTRAL_FILES.contains(&col)
}

/// Rows advanced from the piece's own back rank, always non-negative.
fn rows_advanced(color: Color, row: u8) -> i32 {
    match color {
        Color::Red => 9 - row as i32,
        Color::Black => row as i32,
    }
}

fn piece_bonus(color: Color, kind: PieceType, sq: Square) -> i32 {
    let crossed = crossed_river(color, sq);
    let central = is_central_file(sq.col());
    match kind {
        PieceType::Pawn => {
            let mut bonus = rows_advanced(color, sq.row()) * 2;
            if crossed {
                bonus += 30;
                if central {
                    bonus += 20;
                }
            }
            bonus
        }
        PieceType::Horse => {
            let mut bonus = 0;
            if central {
                bonus += 15;
            }
            if crossed {
                bonus += 30;
            }
            bonus
        }
        PieceType::Cannon => {
            let mut bonus = 0;
            if central {
                bonus += 25;
            }
            if crossed {
                bonus += 15;
            }
            bonus
        }
        PieceType::Rook => {
            let mut bonus = 0;
            if crossed {
                bonus += 20;
            }
            if central {
                bonus += 10;
            }
            bonus
        }
        PieceType::King => {
            let home = match color {
                Color::Red => sq.row() >= 8,
                Color::Black => sq.row() <= 1,
            };
            if home { 10 } else { -20 }
        }
        PieceType::Advisor | PieceType::Elephant => 0,
    }
}

/// Small deterministic-per-position jitter derived from the current hash,
/// large enough to break ties between otherwise-equal moves but far too
/// small to change a real evaluation (spec.md §4.4).
fn tie_break_noise(hash: u32) -> i32 {
    (hash & 0x1F) as i32 - 16
}

/// Evaluate the position from `board.side_to_move`'s perspective: positive
/// means the side to move stands better.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0i32;
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
        let value = kind.value() + piece_bonus(color, kind, sq);
        score += if color == Color::Red { value } else { -value };
    }
    score += tie_break_noise(board.zobrist);

    if board.side_to_move == Color::Red { score } else { -score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::zobrist::ZobristKeys;

    fn board_with(pieces: &[(u8, u8, Color, PieceType)], side: Color) -> Board {
        let keys = ZobristKeys::generate();
        let mut board = Board::default();
        board.load(pieces.iter().copied(), side, &keys);
        board
    }

    #[test]
    fn symmetric_position_scores_near_zero() {
        let board = board_with(
            &[
                (9, 4, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
            ],
            Color::Red,
        );
        assert!(evaluate(&board).abs() <= 16);
    }

    #[test]
    fn material_advantage_dominates() {
        let board = board_with(
            &[
                (9, 4, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
                (5, 0, Color::Red, PieceType::Rook),
            ],
            Color::Red,
        );
        assert!(evaluate(&board) > 500);
    }

    #[test]
    fn advanced_pawn_scores_higher_than_unadvanced() {
        let behind = board_with(
            &[
                (9, 4, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
                (6, 0, Color::Red, PieceType::Pawn),
            ],
            Color::Red,
        );
        let ahead = board_with(
            &[
                (9, 4, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
                (3, 0, Color::Red, PieceType::Pawn),
            ],
            Color::Red,
        );
        // both have crossed the river (rows <=4); the more advanced one scores higher
        assert!(evaluate(&ahead) > evaluate(&behind));
    }

    #[test]
    fn crossed_pawn_beats_uncrossed_pawn_at_similar_advancement() {
        let uncrossed = board_with(
            &[
                (9, 4, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
                (5, 0, Color::Red, PieceType::Pawn),
            ],
            Color::Red,
        );
        let crossed = board_with(
            &[
                (9, 4, Color::Red, PieceType::King),
                (0, 4, Color::Black, PieceType::King),
                (4, 0, Color::Red, PieceType::Pawn),
            ],
            Color::Red,
        );
        assert!(evaluate(&crossed) > evaluate(&uncrossed));
    }

    #[test]
    fn king_outside_home_rows_is_penalised() {
        let home = board_with(
            &[(9, 4, Color::Red, PieceType::King), (0, 4, Color::Black, PieceType::King)],
            Color::Red,
        );
        let wandered = board_with(
            &[(6, 4, Color::Red, PieceType::King), (0, 4, Color::Black, PieceType::King)],
            Color::Red,
        );
        assert!(evaluate(&home) > evaluate(&wandered));
    }

    #[test]
    fn on_own_side_helper_matches_crossed_river() {
        let sq = Square::new(4, 4);
        assert_eq!(on_own_side(Color::Red, sq), !crossed_river(Color::Red, sq));
    }
}

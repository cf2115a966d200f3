//! King-safety queries (spec.md §4.3 "Check Detection").
//!
//! `in_check` does not call move generation: each attacker type is checked
//! directly by walking rays/offsets outward from the king, which is the
//! only way to cheaply support the flying-general rule (kings attack each
//! other directly, with no piece allowed between them on a shared file).

use crate::board::{Board, Color, EMPTY, PieceType, unpack};
use crate::square::Square;

const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// True iff the two kings face each other on an open file with no piece in
/// between — an illegal exposure, so it counts as "in check" for whichever
/// side is to be evaluated (either side exposing it is in check).
fn flying_general(board: &Board) -> bool {
    let red = board.king_square(Color::Red);
    let black = board.king_square(Color::Black);
    if red.col() != black.col() {
        return false;
    }
    let (top, bottom) = if red.row() < black.row() { (red, black) } else { (black, red) };
    for row in (top.row() + 1)..bottom.row() {
        if !board.is_empty(Square::new(row, top.col())) {
            return false;
        }
    }
    true
}

/// True iff `side`'s king is currently attacked.
pub fn in_check(board: &Board, side: Color) -> bool {
    if flying_general(board) {
        return true;
    }

    let king_sq = board.king_square(side);
    let enemy = side.opposite();

    for &(dr, dc) in &ORTHO_DIRS {
        let mut jump = 0u8;
        let mut cur = king_sq;
        loop {
            let Some(next) = cur.offset(dr, dc) else { break };
            // Only the very first step away from the king sits at distance 1;
            // a pawn's capture geometry only ever reaches an adjacent square.
            let adjacent_to_king = cur == king_sq;
            let byte = board.piece_at(next);
            if byte == EMPTY {
                cur = next;
                continue;
            }
            let (color, kind) = unpack(byte);
            if jump == 0 {
                if color == enemy {
                    match kind {
                        PieceType::Rook => return true,
                        PieceType::King => return true,
                        PieceType::Pawn if adjacent_to_king => {
                            // A pawn attacks one step in its forward direction
                            // (or sideways once it has crossed the river).
                            // From the king's perspective the attacker sits at
                            // `next`, offset `(dr, dc)` from the king, so the
                            // pawn's own forward direction is `(-dr, -dc)`.
                            let enemy_forward = match enemy {
                                Color::Red => (-1, 0),
                                Color::Black => (1, 0),
                            };
                            let is_forward = (dr, dc) == (-enemy_forward.0, -enemy_forward.1);
                            let is_sideways = dc != 0 && dr == 0;
                            let crossed = crate::board::crossed_river(enemy, next);
                            if is_forward || (is_sideways && crossed) {
                                return true;
                            }
                        }
                        _ => {}
                    }
                }
                jump += 1;
                cur = next;
                continue;
            }
            if jump == 1 {
                if color == enemy && kind == PieceType::Cannon {
                    return true;
                }
                break;
            }
            break;
        }
    }

    for &(dr, dc) in &KNIGHT_OFFSETS {
        let Some(attacker_sq) = king_sq.offset(dr, dc) else { continue };
        let byte = board.piece_at(attacker_sq);
        if byte == EMPTY {
            continue;
        }
        let (color, kind) = unpack(byte);
        if color != enemy || kind != PieceType::Horse {
            continue;
        }
        let leg = if dr.abs() == 2 {
            king_sq.offset(dr / 2, 0).expect("horse-check leg always on-board")
        } else {
            king_sq.offset(0, dc / 2).expect("horse-check leg always on-board")
        };
        if board.is_empty(leg) {
            return true;
        }
    }

    false
}

//! Per-instance Zobrist key table.
//!
//! `spec.md` §3 specifies `Z[256][24]` random 32-bit keys plus one
//! `SIDE_KEY`. Unlike the teacher's bitboard engine — which stashes its
//! keys in a process-wide `OnceCell` because chess engines rarely need to
//! re-seed them — `spec.md` §3's `reset()` must be able to re-seed the
//! table (it "changes the engine's move preference on symmetric choices,
//! giving variety across games"), so the keys live on `Engine` instead of
//! behind a `OnceCell`. See `DESIGN.md` for the resolved Open Question.

use crate::board::ZOBRIST_PIECE_SLOTS;
use crate::square::Square;
use rand::{RngCore, SeedableRng, rngs::StdRng};

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x5869_616e_7167_6921;

fn make_zobrist_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

/// `Z[256][24]` piece keys plus the side-to-move key, owned by one `Engine`.
#[derive(Debug, Clone)]
pub struct ZobristKeys {
    piece: Box<[[u32; ZOBRIST_PIECE_SLOTS]; 256]>,
    pub side_key: u32,
}

impl ZobristKeys {
    /// Fill the table with uniformly distributed 32-bit values from a
    /// process-wide RNG (or a fixed seed under `deterministic_zobrist`).
    pub fn generate() -> ZobristKeys {
        let mut rng = make_zobrist_rng();
        let mut piece = Box::new([[0u32; ZOBRIST_PIECE_SLOTS]; 256]);
        for row in piece.iter_mut() {
            for slot in row.iter_mut() {
                *slot = rng.next_u32();
            }
        }
        ZobristKeys { piece, side_key: rng.next_u32() }
    }

    /// `Z[sq][piece]` — `piece` is the raw packed board byte, used directly
    /// as the second-dimension index (most rows are unused, per spec.md §3).
    #[inline(always)]
    pub fn piece(&self, sq: Square, piece_byte: u8) -> u32 {
        self.piece[sq.index() as usize][piece_byte as usize]
    }
}

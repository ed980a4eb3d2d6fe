use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::{Position, Side};

/// Picks uniformly among the legal moves.
///
/// ChaCha8 keeps the sequence identical for a given seed on every target,
/// which is what the controller tests rely on.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomMoveSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeds from the wall clock. `web-time` keeps this working in the browser.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..moves.len());
        Some(moves[idx])
    }
}

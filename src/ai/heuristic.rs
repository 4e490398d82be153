use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::EngineError;
use crate::game::{Board, Token};

/// Two-ply classification of every legal column, from one player's point of
/// view. Sets are ordered, so `first()` follows legal-move order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assessment {
    /// Columns that win on the spot.
    pub wins: BTreeSet<usize>,
    /// Columns that hand the next player a winning reply.
    pub losses: BTreeSet<usize>,
    /// Columns where the next player would win if left open.
    pub blocks: BTreeSet<usize>,
    /// Columns the player after next could win in once the next player has
    /// moved.
    pub sacrifices: BTreeSet<usize>,
}

impl Assessment {
    /// Classify every legal column for `own`. The board is only touched
    /// through simulation guards and is unchanged on return.
    pub fn classify(board: &mut Board, own: Token) -> Result<Self, EngineError> {
        let opponent = board
            .next_token(own)
            .ok_or(EngineError::UnknownToken(own))?;
        let follower = board
            .next_token(opponent)
            .ok_or(EngineError::UnknownToken(opponent))?;

        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let mut assessment = Assessment::default();

        // Our move, then the opponent's reply
        for &col in &legal {
            let Ok(mut ours) = board.simulate(col, own) else {
                continue;
            };
            if ours.winner() == Some(own) {
                assessment.wins.insert(col);
                continue;
            }
            for reply in ours.legal_moves() {
                let Ok(theirs) = ours.simulate(reply, opponent) else {
                    continue;
                };
                if theirs.winner() == Some(opponent) {
                    assessment.losses.insert(col);
                    break;
                }
            }
        }

        // The opponent's move, then whoever follows them
        for &col in &legal {
            let Ok(mut theirs) = board.simulate(col, opponent) else {
                continue;
            };
            if theirs.winner() == Some(opponent) {
                assessment.blocks.insert(col);
                continue;
            }
            for reply in theirs.legal_moves() {
                let Ok(next) = theirs.simulate(reply, follower) else {
                    continue;
                };
                if next.winner() == Some(follower) {
                    assessment.sacrifices.insert(reply);
                }
            }
        }

        Ok(assessment)
    }

    /// Columns to pick from at random once there is nothing to win or block:
    /// safe moves first, then sacrifices, then anything legal.
    pub fn fallback_pool(&self, legal: &[usize]) -> Vec<usize> {
        let safe: Vec<usize> = legal
            .iter()
            .copied()
            .filter(|c| !self.losses.contains(c) && !self.sacrifices.contains(c))
            .collect();
        if !safe.is_empty() {
            safe
        } else if !self.sacrifices.is_empty() {
            self.sacrifices.iter().copied().collect()
        } else {
            legal.to_vec()
        }
    }
}

/// Heuristic move chooser: take a win, else block, else play at random while
/// avoiding columns that lose or give something away.
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    rng: StdRng,
}

impl HeuristicEngine {
    pub fn new() -> Self {
        HeuristicEngine {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible engine for tests and replays
    pub fn seeded(seed: u64) -> Self {
        HeuristicEngine {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a column for `own`. The board's cells are identical before and
    /// after the call.
    pub fn decide(&mut self, board: &mut Board, own: Token) -> Result<usize, EngineError> {
        let assessment = Assessment::classify(board, own)?;
        debug!(
            token = %own,
            wins = ?assessment.wins,
            losses = ?assessment.losses,
            blocks = ?assessment.blocks,
            sacrifices = ?assessment.sacrifices,
            "classified columns"
        );

        if let Some(&col) = assessment.wins.first() {
            debug!(token = %own, column = col, "playing winning move");
            return Ok(col);
        }
        if let Some(&col) = assessment.blocks.first() {
            debug!(token = %own, column = col, "blocking");
            return Ok(col);
        }

        let legal = board.legal_moves();
        let pool = assessment.fallback_pool(&legal);
        let col = self.pick(board, &pool)?;
        debug!(token = %own, column = col, pool = ?pool, "random pick");
        Ok(col)
    }

    /// Random start into the pool, then the first column that is still legal.
    fn pick(&mut self, board: &Board, pool: &[usize]) -> Result<usize, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        let start = self.rng.random_range(0..pool.len());
        (0..pool.len())
            .map(|i| pool[(start + i) % pool.len()])
            .find(|&col| board.legal_move(col))
            .ok_or(EngineError::NoLegalMoves)
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new()
    }
}

//! Unattended computer-vs-computer games and their running tally.

mod episode;
mod tally;

pub use episode::play_game;
pub use tally::{GameResult, MatchTally};

use tracing::info;

use crate::config::AppConfig;
use crate::error::MatchError;

/// Play `games` fresh games with every seat driven by the heuristic.
pub fn run_match(config: &AppConfig, games: usize) -> Result<MatchTally, MatchError> {
    let mut tally = MatchTally::new();
    for index in 0..games {
        let mut game = config.new_ai_game(index as u64)?;
        let result = play_game(&mut game)?;
        match result.winner {
            Some(token) => info!(game = index + 1, winner = %token, moves = result.moves, "game finished"),
            None => info!(game = index + 1, moves = result.moves, "game drawn"),
        }
        tally.record(result);
    }
    Ok(tally)
}

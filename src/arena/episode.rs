use crate::error::MatchError;
use crate::game::{GameView, MoveSource, Outcome, TurnController, TurnReport, TurnState};

use super::tally::GameResult;

/// Feeds nothing; unattended games seat only computer players.
struct NoInput;

impl MoveSource for NoInput {
    fn choose(&mut self, _view: &GameView<'_>) -> Option<usize> {
        None
    }
}

/// Play one game to the end with no human input.
pub fn play_game(game: &mut TurnController) -> Result<GameResult, MatchError> {
    if let Some(human) = game.players().iter().find(|p| p.is_human()) {
        return Err(MatchError::HumanSeat(human.name().to_string()));
    }

    let mut moves = 0;
    loop {
        let player = game
            .active_player()
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        match game.play_turn(&mut NoInput)? {
            TurnReport::Accepted { state, .. } => {
                moves += 1;
                if let TurnState::GameOver(outcome) = state {
                    let winner = match outcome {
                        Outcome::Won(token) => Some(token),
                        Outcome::Draw | Outcome::Ongoing => None,
                    };
                    return Ok(GameResult { winner, moves });
                }
            }
            TurnReport::Rejected(source) => {
                return Err(MatchError::IllegalMove { player, source });
            }
        }
    }
}

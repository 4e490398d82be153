use rand::Rng;
use tracing::{debug, info, warn};

use super::board::{Board, Outcome};
use super::player::{MoveSource, Player};
use crate::error::{EngineError, MoveError, SetupError};

/// Who moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingTurn {
    /// Uniform over the players
    #[default]
    Random,
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting on the player at this index
    AwaitingMove(usize),
    /// Terminal; carries `Won` or `Draw`
    GameOver(Outcome),
}

/// What happened to one move attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnReport {
    Accepted {
        column: usize,
        row: usize,
        state: TurnState,
    },
    /// Nothing changed; the same player is asked again
    Rejected(MoveError),
}

/// Runs one game: owns the board and the players, applies validated moves in
/// round-robin order, and stops at the first win or a full board.
#[derive(Debug)]
pub struct TurnController {
    board: Board,
    players: Vec<Player>,
    state: TurnState,
}

impl TurnController {
    /// Seat `i` must play `board.tokens()[i]`, one seat per token, so turn
    /// order and [`Board::next_token`] agree.
    pub fn new(
        board: Board,
        players: Vec<Player>,
        start: StartingTurn,
    ) -> Result<Self, SetupError> {
        if players.len() < 2 {
            return Err(SetupError::TooFewPlayers(players.len()));
        }
        if let Some(p) = players.iter().find(|p| !board.tokens().contains(&p.token())) {
            return Err(SetupError::TokenNotInPlay {
                name: p.name().to_string(),
                token: p.token(),
            });
        }
        if players.len() != board.tokens().len() {
            return Err(SetupError::SeatCount {
                players: players.len(),
                tokens: board.tokens().len(),
            });
        }
        for (seat, (player, &expected)) in players.iter().zip(board.tokens()).enumerate() {
            if player.token() != expected {
                return Err(SetupError::SeatOrder {
                    seat,
                    expected,
                    found: player.token(),
                });
            }
        }
        let first = match start {
            StartingTurn::Random => rand::rng().random_range(0..players.len()),
            StartingTurn::Fixed(index) if index < players.len() => index,
            StartingTurn::Fixed(index) => {
                return Err(SetupError::StartOutOfRange {
                    index,
                    players: players.len(),
                })
            }
        };

        info!(
            width = board.width(),
            height = board.height(),
            win_size = board.win_size(),
            first = %players[first].name(),
            "new game"
        );

        Ok(TurnController {
            board,
            players,
            state: TurnState::AwaitingMove(first),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::GameOver(_))
    }

    /// Player whose turn it is, or `None` once the game is over
    pub fn active_player(&self) -> Option<&Player> {
        match self.state {
            TurnState::AwaitingMove(index) => self.players.get(index),
            TurnState::GameOver(_) => None,
        }
    }

    /// Ask the active player for a column and apply it.
    ///
    /// A bad choice comes back as [`TurnReport::Rejected`]. An error here means
    /// the heuristic engine was asked to move on a board it cannot play.
    pub fn play_turn(&mut self, input: &mut dyn MoveSource) -> Result<TurnReport, EngineError> {
        let TurnState::AwaitingMove(index) = self.state else {
            return Ok(TurnReport::Rejected(MoveError::GameOver));
        };
        let choice = self.players[index].decide(&mut self.board, input)?;
        Ok(self.submit(choice))
    }

    /// Apply a column choice for the active player.
    pub fn submit(&mut self, choice: Option<usize>) -> TurnReport {
        match self.try_submit(choice) {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "move rejected");
                TurnReport::Rejected(err)
            }
        }
    }

    fn try_submit(&mut self, choice: Option<usize>) -> Result<TurnReport, MoveError> {
        let TurnState::AwaitingMove(index) = self.state else {
            return Err(MoveError::GameOver);
        };
        let column = choice.ok_or(MoveError::NoChoice)?;
        let player = &self.players[index];
        let row = self.board.insert(column, player.token())?;
        debug!(player = %player.name(), token = %player.token(), column, row, "move applied");

        self.state = match self.board.outcome() {
            Outcome::Ongoing => TurnState::AwaitingMove((index + 1) % self.players.len()),
            outcome => {
                info!(?outcome, moves = self.board.move_count(), "game over");
                TurnState::GameOver(outcome)
            }
        };

        Ok(TurnReport::Accepted {
            column,
            row,
            state: self.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::HeuristicEngine;
    use crate::game::Token;

    const X: Token = Token::new('X');
    const O: Token = Token::new('O');

    fn humans() -> TurnController {
        TurnController::new(
            Board::standard(vec![X, O]).unwrap(),
            vec![Player::human("Alice", X), Player::human("Bob", O)],
            StartingTurn::Fixed(0),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let game = humans();
        assert_eq!(game.state(), TurnState::AwaitingMove(0));
        assert_eq!(game.active_player().unwrap().name(), "Alice");
        assert_eq!(game.board().move_count(), 0);
    }

    #[test]
    fn test_random_start_is_in_range() {
        for _ in 0..20 {
            let game = TurnController::new(
                Board::standard(vec![X, O]).unwrap(),
                vec![Player::human("Alice", X), Player::human("Bob", O)],
                StartingTurn::Random,
            )
            .unwrap();
            assert!(matches!(game.state(), TurnState::AwaitingMove(0 | 1)));
        }
    }

    #[test]
    fn test_rejects_bad_setup() {
        let board = Board::standard(vec![X, O]).unwrap();
        assert!(matches!(
            TurnController::new(board.clone(), vec![Player::human("A", X)], StartingTurn::Random),
            Err(SetupError::TooFewPlayers(1))
        ));
        assert!(matches!(
            TurnController::new(
                board.clone(),
                vec![Player::human("A", X), Player::human("B", Token::new('Z'))],
                StartingTurn::Random
            ),
            Err(SetupError::TokenNotInPlay { .. })
        ));
        assert!(matches!(
            TurnController::new(
                board,
                vec![Player::human("A", X), Player::human("B", O)],
                StartingTurn::Fixed(2)
            ),
            Err(SetupError::StartOutOfRange { index: 2, players: 2 })
        ));
    }

    #[test]
    fn test_seats_must_match_board_tokens() {
        let hash = Token::new('#');
        let three = Board::standard(vec![X, O, hash]).unwrap();
        // A token with no seat would never move, but the heuristic would still
        // guard against it
        assert!(matches!(
            TurnController::new(
                three.clone(),
                vec![
                    Player::human("Alice", X),
                    Player::heuristic("Marvin", O, HeuristicEngine::seeded(0)),
                ],
                StartingTurn::Fixed(0)
            ),
            Err(SetupError::SeatCount { players: 2, tokens: 3 })
        ));
        assert!(matches!(
            TurnController::new(
                three,
                vec![
                    Player::human("Alice", X),
                    Player::human("Bob", X),
                    Player::human("Carol", hash),
                ],
                StartingTurn::Fixed(0)
            ),
            Err(SetupError::SeatOrder { seat: 1, .. })
        ));

        let board = Board::standard(vec![X, O]).unwrap();
        assert!(matches!(
            TurnController::new(
                board,
                vec![Player::human("Bob", O), Player::human("Alice", X)],
                StartingTurn::Fixed(0)
            ),
            Err(SetupError::SeatOrder { seat: 0, expected, found }) if expected == X && found == O
        ));
    }

    #[test]
    fn test_accepted_move_advances_turn() {
        let mut game = humans();
        let report = game.submit(Some(3));
        assert_eq!(
            report,
            TurnReport::Accepted {
                column: 3,
                row: 0,
                state: TurnState::AwaitingMove(1)
            }
        );
        assert_eq!(game.board().get(3, 0), Some(X));
        assert_eq!(game.active_player().unwrap().name(), "Bob");
    }

    #[test]
    fn test_rejected_moves_keep_same_player() {
        let mut game = humans();
        assert_eq!(game.submit(None), TurnReport::Rejected(MoveError::NoChoice));
        assert_eq!(
            game.submit(Some(9)),
            TurnReport::Rejected(MoveError::InvalidColumn {
                column: 9,
                width: 7
            })
        );
        assert_eq!(game.state(), TurnState::AwaitingMove(0));
        assert_eq!(game.board().move_count(), 0);
    }

    #[test]
    fn test_full_column_is_rejected() {
        let mut game = humans();
        for _ in 0..6 {
            assert!(matches!(game.submit(Some(0)), TurnReport::Accepted { .. }));
        }
        let before = game.state();
        assert_eq!(game.submit(Some(0)), TurnReport::Rejected(MoveError::ColumnFull(0)));
        assert_eq!(game.state(), before);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = humans();
        // X plays 0,1,2,3 on the bottom row; O stacks on top
        for col in [0, 0, 1, 1, 2, 2] {
            game.submit(Some(col));
        }
        let report = game.submit(Some(3));
        assert_eq!(
            report,
            TurnReport::Accepted {
                column: 3,
                row: 0,
                state: TurnState::GameOver(Outcome::Won(X))
            }
        );
        assert!(game.is_over());
        assert!(game.active_player().is_none());
        assert_eq!(game.submit(Some(4)), TurnReport::Rejected(MoveError::GameOver));
    }

    #[test]
    fn test_draw_ends_game() {
        // 2x2 board needing 3 in a row can never be won
        let mut game = TurnController::new(
            Board::new(2, 2, 3, vec![X, O]).unwrap(),
            vec![Player::human("Alice", X), Player::human("Bob", O)],
            StartingTurn::Fixed(1),
        )
        .unwrap();
        for col in [0, 0, 1] {
            assert!(matches!(game.submit(Some(col)), TurnReport::Accepted { .. }));
        }
        assert_eq!(game.state(), TurnState::AwaitingMove(0));
        game.submit(Some(1));
        assert_eq!(game.state(), TurnState::GameOver(Outcome::Draw));
    }

    #[test]
    fn test_play_turn_uses_input_for_humans() {
        let mut game = humans();
        let mut input = vec![None, Some(2usize)].into_iter();
        assert_eq!(
            game.play_turn(&mut input),
            Ok(TurnReport::Rejected(MoveError::NoChoice))
        );
        assert!(matches!(
            game.play_turn(&mut input),
            Ok(TurnReport::Accepted { column: 2, .. })
        ));
    }

    #[test]
    fn test_ai_game_runs_to_completion() {
        let mut game = TurnController::new(
            Board::standard(vec![X, O]).unwrap(),
            vec![
                Player::heuristic("Marvin", X, HeuristicEngine::seeded(1)),
                Player::heuristic("Eddie", O, HeuristicEngine::seeded(2)),
            ],
            StartingTurn::Fixed(0),
        )
        .unwrap();
        let mut input = Vec::<Option<usize>>::new().into_iter();
        let mut turns = 0;
        while !game.is_over() {
            let report = game.play_turn(&mut input).unwrap();
            assert!(matches!(report, TurnReport::Accepted { .. }));
            turns += 1;
            assert!(turns <= 42);
        }
        assert_eq!(turns, game.board().move_count());
        assert!(matches!(
            game.state(),
            TurnState::GameOver(Outcome::Won(_) | Outcome::Draw)
        ));
    }
}

use connect_n::ai::{Assessment, HeuristicEngine};
use connect_n::config::AppConfig;
use connect_n::game::{
    Board, Outcome, Player, StartingTurn, Token, TurnController, TurnReport, TurnState,
};

const X: Token = Token::new('X');
const O: Token = Token::new('O');

fn assert_gravity(board: &Board) {
    for col in 0..board.width() {
        let filled = board.column(col).unwrap().len();
        for row in 0..board.height() {
            assert_eq!(
                board.get(col, row).is_some(),
                row < filled,
                "gap in column {col} at row {row}"
            );
        }
    }
}

#[test]
fn test_computer_games_keep_invariants() {
    for seed in 0..10 {
        let mut game = TurnController::new(
            Board::standard(vec![X, O]).unwrap(),
            vec![
                Player::heuristic("Marvin", X, HeuristicEngine::seeded(seed)),
                Player::heuristic("Eddie", O, HeuristicEngine::seeded(seed + 100)),
            ],
            StartingTurn::Fixed((seed % 2) as usize),
        )
        .unwrap();
        let mut input = Vec::<Option<usize>>::new().into_iter();

        while !game.is_over() {
            let active = game.active_player().unwrap().token();
            let before = game.board().clone();
            // A spare engine deciding for the active token must not disturb the board
            let mut probe = game.board().clone();
            HeuristicEngine::seeded(seed)
                .decide(&mut probe, active)
                .unwrap();
            assert_eq!(probe, before);

            match game.play_turn(&mut input).unwrap() {
                TurnReport::Accepted { column, row, .. } => {
                    assert_eq!(game.board().get(column, row), Some(active));
                    assert_eq!(game.board().move_count(), before.move_count() + 1);
                }
                TurnReport::Rejected(err) => panic!("computer move rejected: {err}"),
            }
            assert_gravity(game.board());
        }

        match game.state() {
            TurnState::GameOver(Outcome::Won(token)) => {
                assert_eq!(game.board().winner(), Some(token));
            }
            TurnState::GameOver(Outcome::Draw) => {
                assert!(game.board().full());
                assert_eq!(game.board().winner(), None);
            }
            other => panic!("unexpected final state {other:?}"),
        }
    }
}

#[test]
fn test_computer_takes_wins_and_blocks_in_play() {
    // X stacks the leftmost open column every turn; O must always take a win
    // when it has one, and otherwise block X's.
    let mut game = TurnController::new(
        Board::standard(vec![X, O]).unwrap(),
        vec![
            Player::human("Stacker", X),
            Player::heuristic("Marvin", O, HeuristicEngine::seeded(9)),
        ],
        StartingTurn::Fixed(0),
    )
    .unwrap();

    while !game.is_over() {
        if game.active_player().unwrap().is_human() {
            let column = game.board().legal_moves()[0];
            let mut input = vec![Some(column)].into_iter();
            game.play_turn(&mut input).unwrap();
            continue;
        }

        let mut probe = game.board().clone();
        let assessment = Assessment::classify(&mut probe, O).unwrap();
        let mut input = Vec::<Option<usize>>::new().into_iter();
        let TurnReport::Accepted { column, .. } = game.play_turn(&mut input).unwrap() else {
            panic!("computer move rejected");
        };
        if let Some(&win) = assessment.wins.first() {
            assert_eq!(column, win);
        } else if let Some(&block) = assessment.blocks.first() {
            assert_eq!(column, block);
        }
    }
}

#[test]
fn test_configured_game_plays_to_the_end() {
    let mut config = AppConfig::default();
    config.board.width = 5;
    config.board.height = 4;
    config.board.win_size = 3;
    config.game.ai_seed = Some(3);
    config.validate().unwrap();

    let mut game = config.new_ai_game(0).unwrap();
    let result = connect_n::arena::play_game(&mut game).unwrap();
    assert!(result.moves <= 20);
    assert_eq!(result.winner, game.board().winner());
}

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, SetupError};
use crate::game::{GameView, MoveSource, Outcome, TurnController, TurnReport, TurnState};

/// The keypress waiting to be handed to the active human player.
struct Pending(Option<usize>);

impl MoveSource for Pending {
    fn choose(&mut self, _view: &GameView<'_>) -> Option<usize> {
        self.0.take()
    }
}

pub struct App {
    config: AppConfig,
    game: TurnController,
    games_started: u64,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    pending: Option<Option<usize>>,
    ai_ready_at: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, SetupError> {
        let game = config.new_game(0)?;
        let selected_column = game.board().width() / 2;
        let mut app = App {
            config,
            game,
            games_started: 1,
            selected_column,
            should_quit: false,
            message: None,
            pending: None,
            ai_ready_at: None,
        };
        app.announce_turn();
        Ok(app)
    }

    pub fn game(&self) -> &TurnController {
        &self.game
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.advance(Instant::now())?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        let width = self.game.board().width();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.queue_choice(Some(self.selected_column));
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let column = c.to_digit(10).map(|d| d as usize);
                if let Some(col) = column.filter(|&col| col < width) {
                    self.selected_column = col;
                }
                self.queue_choice(column);
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    /// Hand a choice to the active human player, if there is one.
    fn queue_choice(&mut self, choice: Option<usize>) {
        if self.game.is_over() {
            self.message = Some("Game over! Press 'r' to play again.".to_string());
            return;
        }
        if self.game.active_player().is_some_and(|p| p.is_human()) {
            self.pending = Some(choice);
        }
    }

    /// Start a fresh game on a fresh board
    fn restart(&mut self) {
        match self.config.new_game(self.games_started) {
            Ok(game) => {
                self.games_started += 1;
                self.selected_column = game.board().width() / 2;
                self.game = game;
                self.pending = None;
                self.ai_ready_at = None;
                info!(game = self.games_started, "restarted");
                self.announce_turn();
            }
            Err(err) => {
                self.message = Some(format!("Could not start a new game: {err}"));
            }
        }
    }

    /// Play whatever move is ready: a queued human choice, or the computer's
    /// move once its delay has passed.
    fn advance(&mut self, now: Instant) -> Result<(), AppError> {
        let Some(player) = self.game.active_player() else {
            return Ok(());
        };

        let report = if player.is_human() {
            let Some(choice) = self.pending.take() else {
                return Ok(());
            };
            self.game.play_turn(&mut Pending(choice))?
        } else {
            let delay = Duration::from_millis(self.config.ui.ai_delay_ms);
            let ready_at = *self.ai_ready_at.get_or_insert(now + delay);
            if now < ready_at {
                return Ok(());
            }
            self.ai_ready_at = None;
            self.game.play_turn(&mut Pending(None))?
        };

        match report {
            TurnReport::Rejected(err) => {
                self.message = Some(format!("Illegal move ({err}). Try again."));
            }
            TurnReport::Accepted {
                state: TurnState::GameOver(outcome),
                ..
            } => {
                self.message = Some(self.outcome_message(outcome));
            }
            TurnReport::Accepted { .. } => self.announce_turn(),
        }
        Ok(())
    }

    fn announce_turn(&mut self) {
        self.message = self
            .game
            .active_player()
            .map(|p| format!("{} {}'s turn. Move (column #):", p.token(), p.name()));
    }

    fn outcome_message(&self, outcome: Outcome) -> String {
        match outcome {
            Outcome::Won(token) => {
                let name = self
                    .game
                    .players()
                    .iter()
                    .find(|p| p.token() == token)
                    .map(|p| p.name())
                    .unwrap_or_default();
                format!("GAME OVER. {token} {name} wins! Press 'r' to play again.")
            }
            Outcome::Draw => "GAME OVER. Draw. Press 'r' to play again.".to_string(),
            Outcome::Ongoing => String::new(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game, self.selected_column, &self.message);
    }
}

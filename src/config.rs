use std::path::Path;

use tracing::warn;

use crate::ai::HeuristicEngine;
use crate::error::{ConfigError, SetupError};
use crate::game::{
    Board, Player, StartingTurn, Token, TurnController, DEFAULT_AI_NAME, DEFAULT_HEIGHT,
    DEFAULT_WIDTH, DEFAULT_WIN_SIZE,
};

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub win_size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_size: DEFAULT_WIN_SIZE,
        }
    }
}

/// Tokens in turn order and who opens.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tokens: Vec<Token>,
    /// Seed for heuristic players; fresh OS entropy when unset
    pub ai_seed: Option<u64>,
    pub starting_turn: StartingTurn,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tokens: vec![Token::new('X'), Token::new('O')],
            ai_seed: None,
            starting_turn: StartingTurn::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKindConfig {
    Human,
    Ai,
}

/// One seat at the table. Player `i` plays token `i`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub name: String,
    pub kind: PlayerKindConfig,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        PlayerConfig {
            name: name.into(),
            kind: PlayerKindConfig::Human,
        }
    }

    pub fn ai() -> Self {
        PlayerConfig {
            name: DEFAULT_AI_NAME.to_string(),
            kind: PlayerKindConfig::Ai,
        }
    }

    /// Parse a command-line seat: a blank name or `ai` means a computer
    /// player, anything else is a human with that name.
    pub fn parse_arg(arg: &str) -> Self {
        let arg = arg.trim();
        if arg.is_empty() || arg.eq_ignore_ascii_case("ai") {
            Self::ai()
        } else {
            Self::human(arg)
        }
    }

    /// Name shown for this seat, filling in a default when blank
    pub fn display_name(&self) -> &str {
        match (self.kind, self.name.is_empty()) {
            (PlayerKindConfig::Ai, true) => DEFAULT_AI_NAME,
            (PlayerKindConfig::Human, true) => "Player",
            _ => &self.name,
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before a computer player moves, so its move can be seen
    pub ai_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { ai_delay_ms: 400 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub game: GameConfig,
    pub players: Vec<PlayerConfig>,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            game: GameConfig::default(),
            players: vec![PlayerConfig::human("Player"), PlayerConfig::ai()],
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 {
            return Err(ConfigError::Validation("board.width must be > 0".into()));
        }
        if self.board.height == 0 {
            return Err(ConfigError::Validation("board.height must be > 0".into()));
        }
        if self.board.win_size == 0 {
            return Err(ConfigError::Validation("board.win_size must be > 0".into()));
        }
        if self.board.win_size > self.board.width.max(self.board.height) {
            return Err(ConfigError::Validation(
                "board.win_size must fit within board.width or board.height".into(),
            ));
        }

        let tokens = &self.game.tokens;
        if tokens.len() < 2 {
            return Err(ConfigError::Validation(
                "game.tokens must list at least 2 tokens".into(),
            ));
        }
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].contains(token) {
                return Err(ConfigError::Validation(format!(
                    "game.tokens lists '{token}' more than once"
                )));
            }
        }

        if self.players.len() != tokens.len() {
            return Err(ConfigError::Validation(format!(
                "players must have one entry per token ({} tokens, {} players)",
                tokens.len(),
                self.players.len()
            )));
        }
        if let StartingTurn::Fixed(index) = self.game.starting_turn {
            if index >= self.players.len() {
                return Err(ConfigError::Validation(
                    "game.starting_turn must index an existing player".into(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }

    /// Fresh empty board for a new game
    pub fn new_board(&self) -> Result<Board, SetupError> {
        Board::new(
            self.board.width,
            self.board.height,
            self.board.win_size,
            self.game.tokens.clone(),
        )
    }

    /// Fresh board and controller with the configured seats.
    pub fn new_game(&self, game_index: u64) -> Result<TurnController, SetupError> {
        self.build_game(false, game_index)
    }

    /// Fresh board and controller with every seat driven by the heuristic.
    pub fn new_ai_game(&self, game_index: u64) -> Result<TurnController, SetupError> {
        self.build_game(true, game_index)
    }

    fn build_game(&self, all_ai: bool, game_index: u64) -> Result<TurnController, SetupError> {
        let board = self.new_board()?;
        let players = self
            .players
            .iter()
            .zip(&self.game.tokens)
            .enumerate()
            .map(|(seat, (player, &token))| {
                if all_ai || player.kind == PlayerKindConfig::Ai {
                    let engine = self.engine(seat as u64, game_index);
                    Player::heuristic(player.display_name(), token, engine)
                } else {
                    Player::human(player.display_name(), token)
                }
            })
            .collect();
        TurnController::new(board, players, self.game.starting_turn)
    }

    fn engine(&self, seat: u64, game_index: u64) -> HeuristicEngine {
        match self.game.ai_seed {
            Some(seed) => HeuristicEngine::seeded(
                seed.wrapping_add(game_index.wrapping_mul(1_000))
                    .wrapping_add(seat),
            ),
            None => HeuristicEngine::new(),
        }
    }
}

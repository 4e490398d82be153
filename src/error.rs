use std::path::PathBuf;

use crate::game::Token;

/// A move attempt that was refused. Always recoverable: the same player is
/// asked again and nothing on the board changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no valid column was chosen")]
    NoChoice,

    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised by the heuristic engine. These indicate a caller bug and are
/// not retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("token '{0}' is not in play on this board")]
    UnknownToken(Token),
}

/// Errors building a board or a turn controller from bad parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("board dimensions must be non-zero (got {width}x{height}, win size {win_size})")]
    Dimensions {
        width: usize,
        height: usize,
        win_size: usize,
    },

    #[error("at least two tokens are required (got {0})")]
    TooFewTokens(usize),

    #[error("token '{0}' appears more than once")]
    DuplicateToken(Token),

    #[error("player '{name}' uses token '{token}' which is not in play")]
    TokenNotInPlay { name: String, token: Token },

    #[error("at least two players are required (got {0})")]
    TooFewPlayers(usize),

    #[error("{players} players seated for {tokens} tokens; every token needs exactly one player")]
    SeatCount { players: usize, tokens: usize },

    #[error("seat {seat} must play token '{expected}' but has '{found}'")]
    SeatOrder {
        seat: usize,
        expected: Token,
        found: Token,
    },

    #[error("starting turn {index} is out of range for {players} players")]
    StartOutOfRange { index: usize, players: usize },
}

/// Errors that can occur while playing out unattended games.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("player '{player}' made an illegal move: {source}")]
    IllegalMove { player: String, source: MoveError },

    #[error("player '{0}' needs input, but unattended games only seat computer players")]
    HumanSeat(String),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("setup error: {0}")]
    Setup(#[from] SetupError),
}

/// Errors that end an interactive session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("setup error: {0}")]
    Setup(#[from] SetupError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

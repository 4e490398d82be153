use super::board::Board;
use super::token::Token;
use crate::ai::HeuristicEngine;
use crate::error::EngineError;

pub const DEFAULT_AI_NAME: &str = "Marvin";

/// Read-only snapshot handed to whoever picks a human player's move.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub board: &'a Board,
    pub name: &'a str,
    pub token: Token,
}

/// Source of a human player's column choice (keyboard, stdin, a script).
pub trait MoveSource {
    /// `None` means the input did not name a column.
    fn choose(&mut self, view: &GameView<'_>) -> Option<usize>;
}

/// Replays a fixed list of choices, then gives up.
impl MoveSource for std::vec::IntoIter<Option<usize>> {
    fn choose(&mut self, _view: &GameView<'_>) -> Option<usize> {
        self.next().flatten()
    }
}

/// How a player picks moves.
#[derive(Debug, Clone)]
pub enum PlayerKind {
    Human,
    Heuristic(HeuristicEngine),
}

/// A participant: a name, a token, and a way of choosing columns.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    token: Token,
    kind: PlayerKind,
}

impl Player {
    pub fn human(name: impl Into<String>, token: Token) -> Self {
        Player {
            name: name.into(),
            token,
            kind: PlayerKind::Human,
        }
    }

    pub fn heuristic(name: impl Into<String>, token: Token, engine: HeuristicEngine) -> Self {
        Player {
            name: name.into(),
            token,
            kind: PlayerKind::Heuristic(engine),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    /// Pick a column. Humans defer to `input`; the heuristic engine searches
    /// the board and leaves it exactly as it found it.
    pub fn decide(
        &mut self,
        board: &mut Board,
        input: &mut dyn MoveSource,
    ) -> Result<Option<usize>, EngineError> {
        match &mut self.kind {
            PlayerKind::Human => {
                let view = GameView {
                    board: &*board,
                    name: &self.name,
                    token: self.token,
                };
                Ok(input.choose(&view))
            }
            PlayerKind::Heuristic(engine) => engine.decide(board, self.token).map(Some),
        }
    }
}

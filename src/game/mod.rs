//! Core connect-N logic: gravity columns, the board and its win scan,
//! reversible simulation, players, and the turn controller.

mod board;
mod column;
mod player;
mod simulation;
mod state;
mod token;

pub use board::{
    Board, Direction, Line, Outcome, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_SIZE,
};
pub use column::Column;
pub use player::{GameView, MoveSource, Player, PlayerKind, DEFAULT_AI_NAME};
pub use simulation::Simulation;
pub use state::{StartingTurn, TurnController, TurnReport, TurnState};
pub use token::{Cell, Token};

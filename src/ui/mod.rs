//! Terminal UI: the board, whose turn it is, and keyboard input for human
//! players. Computer players move on their own.

mod app;
mod game_view;

pub use app::App;
pub use game_view::token_color;

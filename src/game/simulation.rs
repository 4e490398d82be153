use std::ops::Deref;

use super::board::Board;
use super::token::Token;
use crate::error::MoveError;

/// A hypothetical move on a borrowed board. The token is lifted again when the
/// guard drops, so the board can never be left holding a simulated move.
///
/// Guards nest: [`Simulation::simulate`] borrows the parent guard mutably, so
/// inner moves are always undone before outer ones.
#[derive(Debug)]
pub struct Simulation<'a> {
    board: &'a mut Board,
    column: usize,
}

impl Board {
    /// Tentatively drop `token` into `col`, rolled back when the returned
    /// guard goes out of scope.
    pub fn simulate(&mut self, col: usize, token: Token) -> Result<Simulation<'_>, MoveError> {
        self.insert(col, token)?;
        Ok(Simulation {
            board: self,
            column: col,
        })
    }
}

impl Simulation<'_> {
    /// Stack another hypothetical move on top of this one
    pub fn simulate(&mut self, col: usize, token: Token) -> Result<Simulation<'_>, MoveError> {
        self.board.simulate(col, token)
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        let removed = self.board.remove(self.column);
        debug_assert!(removed, "simulated column {} was empty on undo", self.column);
    }
}

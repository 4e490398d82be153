use super::token::{Cell, Token};

/// A single gravity-ordered stack of cells, indexed bottom (0) to top.
///
/// Filled cells always form a contiguous prefix starting at row 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    cells: Vec<Cell>,
}

impl Column {
    /// Create an empty column of the given height
    pub fn new(height: usize) -> Self {
        Column {
            cells: vec![None; height],
        }
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Cell at `row`, or `None` past the top
    pub fn get(&self, row: usize) -> Cell {
        self.cells.get(row).copied().flatten()
    }

    /// Number of filled cells
    pub fn len(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.get(0).is_none()
    }

    /// Check if the top cell is filled
    pub fn full(&self) -> bool {
        self.cells.last().is_some_and(|c| c.is_some())
    }

    /// Topmost token, if any
    pub fn top(&self) -> Cell {
        self.cells.iter().rev().find_map(|c| *c)
    }

    /// Drop a token onto the stack. Returns false without mutating if the
    /// column is full.
    pub fn insert(&mut self, token: Token) -> bool {
        for row in 0..self.cells.len() {
            let supported = row == 0 || self.cells[row - 1].is_some();
            if self.cells[row].is_none() && supported {
                self.cells[row] = Some(token);
                return true;
            }
        }
        false
    }

    /// Lift the topmost token. Returns false without mutating if the column is
    /// empty.
    pub fn remove(&mut self) -> bool {
        let height = self.cells.len();
        for row in (0..height).rev() {
            let uncovered = row + 1 == height || self.cells[row + 1].is_none();
            if self.cells[row].is_some() && uncovered {
                self.cells[row] = None;
                return true;
            }
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

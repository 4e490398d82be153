use super::column::Column;
use super::token::{Cell, Token};
use crate::error::{MoveError, SetupError};

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIN_SIZE: usize = 4;

/// The four directions a line can run in, each stepping upward or rightward
/// from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Ascending to the right (/)
    DiagonalUp,
    /// Ascending to the left (\)
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// (column, row) step
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }
}

/// A completed run of `win_size` equal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub token: Token,
    pub origin: (usize, usize),
    pub direction: Direction,
    pub len: usize,
}

impl Line {
    /// The (column, row) positions making up the line, origin first
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dc, dr) = self.direction.step();
        let (col, row) = self.origin;
        (0..self.len).map(move |i| {
            let i = i as isize;
            (
                (col as isize + dc * i) as usize,
                (row as isize + dr * i) as usize,
            )
        })
    }
}

/// What the board says about the game right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won(Token),
    Draw,
}

/// A fixed grid of gravity columns plus the ordered tokens in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
    height: usize,
    win_size: usize,
    tokens: Vec<Token>,
}

impl Board {
    /// Create an empty board. Tokens are listed in turn order.
    pub fn new(
        width: usize,
        height: usize,
        win_size: usize,
        tokens: Vec<Token>,
    ) -> Result<Self, SetupError> {
        if width == 0 || height == 0 || win_size == 0 {
            return Err(SetupError::Dimensions {
                width,
                height,
                win_size,
            });
        }
        if tokens.len() < 2 {
            return Err(SetupError::TooFewTokens(tokens.len()));
        }
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].contains(token) {
                return Err(SetupError::DuplicateToken(*token));
            }
        }

        Ok(Board {
            columns: vec![Column::new(height); width],
            height,
            win_size,
            tokens,
        })
    }

    /// Classic 7x6 connect-four board
    pub fn standard(tokens: Vec<Token>) -> Result<Self, SetupError> {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_WIN_SIZE, tokens)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn win_size(&self) -> usize {
        self.win_size
    }

    /// Tokens in play, in turn order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token that moves after `token` in turn order, wrapping around
    pub fn next_token(&self, token: Token) -> Option<Token> {
        let idx = self.tokens.iter().position(|&t| t == token)?;
        Some(self.tokens[(idx + 1) % self.tokens.len()])
    }

    /// Get the cell at a position. Row 0 is the bottom.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.columns.get(col).and_then(|c| c.get(row))
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    /// Total tokens on the board
    pub fn move_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Drop a token in a column, returns the row where it landed
    pub fn insert(&mut self, col: usize, token: Token) -> Result<usize, MoveError> {
        let width = self.width();
        let column = self.columns.get_mut(col).ok_or(MoveError::InvalidColumn {
            column: col,
            width,
        })?;
        if !column.insert(token) {
            return Err(MoveError::ColumnFull(col));
        }
        Ok(column.len() - 1)
    }

    /// Lift the top token off a column. Only reachable through
    /// [`Simulation`](super::Simulation), which pairs it with an insert.
    pub(crate) fn remove(&mut self, col: usize) -> bool {
        self.columns.get_mut(col).is_some_and(Column::remove)
    }

    /// Check if a column can accept another token
    pub fn legal_move(&self, col: usize) -> bool {
        self.columns.get(col).is_some_and(|c| !c.full())
    }

    /// Columns that are not full, ascending
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.width()).filter(|&c| self.legal_move(c)).collect()
    }

    /// Check if the board is completely full
    pub fn full(&self) -> bool {
        self.columns.iter().all(Column::full)
    }

    /// First token holding a full line, scanning origins column by column,
    /// bottom to top, and tokens in turn order.
    pub fn winner(&self) -> Option<Token> {
        self.winning_line().map(|line| line.token)
    }

    /// Same scan as [`winner`](Self::winner), returning where the line is.
    pub fn winning_line(&self) -> Option<Line> {
        for col in 0..self.width() {
            for row in 0..self.height {
                for &token in &self.tokens {
                    for direction in Direction::ALL {
                        if self.line_from(col, row, direction, token) {
                            return Some(Line {
                                token,
                                origin: (col, row),
                                direction,
                                len: self.win_size,
                            });
                        }
                    }
                }
            }
        }
        None
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(token) => Outcome::Won(token),
            None if self.full() => Outcome::Draw,
            None => Outcome::Ongoing,
        }
    }

    /// Whether `win_size` cells from (col, row) along `direction` are all in
    /// bounds and hold `token`.
    fn line_from(&self, col: usize, row: usize, direction: Direction, token: Token) -> bool {
        let (dc, dr) = direction.step();
        (0..self.win_size as isize).all(|i| {
            let c = col as isize + dc * i;
            let r = row as isize + dr * i;
            c >= 0 && r >= 0 && self.get(c as usize, r as usize) == Some(token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Token = Token::new('X');
    const O: Token = Token::new('O');

    fn board() -> Board {
        Board::standard(vec![X, O]).unwrap()
    }

    /// Fill columns from a list of strings, each listing a column bottom-up.
    fn board_from(columns: &[&str]) -> Board {
        let mut board = board();
        for (col, cells) in columns.iter().enumerate() {
            for symbol in cells.chars() {
                board.insert(col, Token::new(symbol)).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board();
        for col in 0..board.width() {
            for row in 0..board.height() {
                assert_eq!(board.get(col, row), None);
            }
        }
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = board();
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_rejects_bad_setup() {
        assert!(matches!(
            Board::new(0, 6, 4, vec![X, O]),
            Err(SetupError::Dimensions { .. })
        ));
        assert_eq!(
            Board::new(7, 6, 4, vec![X]),
            Err(SetupError::TooFewTokens(1))
        );
        assert_eq!(
            Board::new(7, 6, 4, vec![X, O, X]),
            Err(SetupError::DuplicateToken(X))
        );
    }

    #[test]
    fn test_insert_returns_row() {
        let mut board = board();
        assert_eq!(board.insert(3, X), Ok(0));
        assert_eq!(board.insert(3, O), Ok(1));
        assert_eq!(board.get(3, 0), Some(X));
        assert_eq!(board.get(3, 1), Some(O));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = board();
        assert_eq!(
            board.insert(7, X),
            Err(MoveError::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert!(!board.legal_move(7));
    }

    #[test]
    fn test_column_full() {
        let mut board = board();
        for _ in 0..board.height() {
            board.insert(0, X).unwrap();
        }
        assert!(!board.legal_move(0));
        assert_eq!(board.insert(0, O), Err(MoveError::ColumnFull(0)));
    }

    #[test]
    fn test_legal_moves_on_empty_board() {
        assert_eq!(board().legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_legal_moves_skip_full_columns() {
        let board = board_from(&["XOXOXO", "", "OXOXOX"]);
        assert_eq!(board.legal_moves(), vec![1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_horizontal_win() {
        let board = board_from(&["X", "X", "X", "X"]);
        assert_eq!(board.winner(), Some(X));
        let line = board.winning_line().unwrap();
        assert_eq!(line.direction, Direction::Horizontal);
        assert_eq!(
            line.cells().collect::<Vec<_>>(),
            vec![(0, 0), (1, 0), (2, 0), (3, 0)]
        );
    }

    #[test]
    fn test_vertical_win() {
        let board = board_from(&["", "", "", "XOOOO"]);
        assert_eq!(board.winner(), Some(O));
        assert_eq!(board.winning_line().unwrap().origin, (3, 1));
    }

    #[test]
    fn test_diagonal_up_win() {
        let board = board_from(&["X", "OX", "OOX", "OOOX"]);
        let line = board.winning_line().unwrap();
        assert_eq!(line.token, X);
        assert_eq!(line.direction, Direction::DiagonalUp);
    }

    #[test]
    fn test_diagonal_down_win() {
        let board = board_from(&["", "", "", "OOOX", "OOX", "OX", "X"]);
        let line = board.winning_line().unwrap();
        assert_eq!(line.token, X);
        assert_eq!(line.direction, Direction::DiagonalDown);
        assert_eq!(line.origin, (6, 0));
    }

    #[test]
    fn test_no_win_with_three() {
        let board = board_from(&["X", "X", "X", "", "X"]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_line_must_stay_in_bounds() {
        let board = board_from(&["", "", "", "", "X", "X", "X"]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // Pairs of rows alternate so no four line up in any direction.
        let board = board_from(&[
            "XXOOXX", "OOXXOO", "XXOOXX", "OOXXOO", "XXOOXX", "OOXXOO", "XXOOXX",
        ]);
        assert!(board.full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Outcome::Draw);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_next_token_wraps() {
        let board = Board::new(4, 4, 3, vec![X, O, Token::new('#')]).unwrap();
        assert_eq!(board.next_token(X), Some(O));
        assert_eq!(board.next_token(Token::new('#')), Some(X));
        assert_eq!(board.next_token(Token::new('?')), None);
    }

    #[test]
    fn test_smaller_win_size() {
        let mut board = Board::new(3, 3, 3, vec![X, O]).unwrap();
        for col in 0..3 {
            board.insert(col, O).unwrap();
        }
        assert_eq!(board.outcome(), Outcome::Won(O));
    }
}

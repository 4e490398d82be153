use std::fmt;

/// A participant's mark. Compared by symbol only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Token(char);

impl Token {
    pub const fn new(symbol: char) -> Self {
        Token(symbol)
    }

    /// The character drawn for this token
    pub fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board cell: empty, or holding exactly one token.
pub type Cell = Option<Token>;

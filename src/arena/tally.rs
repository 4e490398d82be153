use crate::game::Token;

/// Result of a single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Option<Token>,
    pub moves: usize,
}

/// Running totals over a series of games.
#[derive(Debug, Clone, Default)]
pub struct MatchTally {
    results: Vec<GameResult>,
}

impl MatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        self.results.push(result);
    }

    pub fn total_games(&self) -> usize {
        self.results.len()
    }

    pub fn wins(&self, token: Token) -> usize {
        self.results
            .iter()
            .filter(|r| r.winner == Some(token))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.results.iter().filter(|r| r.winner.is_none()).count()
    }

    /// Fraction of games `token` won
    pub fn win_rate(&self, token: Token) -> f32 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.wins(token) as f32 / self.results.len() as f32
    }

    pub fn average_length(&self) -> f32 {
        if self.results.is_empty() {
            return 0.0;
        }
        let total: usize = self.results.iter().map(|r| r.moves).sum();
        total as f32 / self.results.len() as f32
    }

    pub fn results(&self) -> &[GameResult] {
        &self.results
    }
}

mod heuristic;

pub use heuristic::{Assessment, HeuristicEngine};

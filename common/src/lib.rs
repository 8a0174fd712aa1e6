pub mod config;
pub mod game;
pub mod leaderboard;
pub mod logger;

pub use game::{GamePhase, GameSnapshot};
pub use leaderboard::{HighScoreEntry, Leaderboard};

use common::game::{Direction, GameSnapshot};
use common::leaderboard::HighScoreEntry;

/// Discrete input signals the runner consumes. Text-entry events only matter
/// while the name prompt is open; the runner interprets them by mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Char(char),
    Backspace,
    Enter,
    Escape,
    Quit,
}

/// Presentation boundary: the simulation emits data through this trait and
/// never touches the screen itself.
pub trait GameDriver {
    /// Called on start and after every tick.
    fn render(&mut self, snapshot: &GameSnapshot);

    fn show_game_over(&mut self, score: u32);

    fn show_high_scores(&mut self, entries: &[HighScoreEntry]);

    /// Shows the name prompt with the text typed so far.
    fn show_name_prompt(&mut self, buffer: &str);

    /// Non-fatal notices, e.g. leaderboard failures.
    fn notify(&mut self, message: &str);
}

mod food;
mod game_state;
mod session_rng;
mod settings;
mod snake;
mod types;

pub use food::{Food, FoodSpawner, FRUIT_SPRITE_COUNT};
pub use game_state::{GamePhase, GameSnapshot, SnakeGameState, TickOutcome};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use snake::Snake;
pub use types::{DeathReason, Direction, FieldSize, Point};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::log;
use super::food::{Food, FoodSpawner};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{DeathReason, Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Playing,
    GameOver,
}

/// What a single tick did; the driver uses this to re-arm its clock or run
/// the game-over sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain move, length preserved.
    Moved,
    /// Growth event: the snake ate and the tick interval may have changed.
    Ate,
    Died(DeathReason),
    /// Tick received outside the Playing phase; nothing happened.
    Skipped,
}

/// Render-ready view of the field, emitted on start and after every tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub food: Option<Food>,
    pub score: u32,
    pub phase: GamePhase,
}

/// The whole mutable game state behind one controller value: snake, food and
/// phase are only ever touched through `start`, `set_direction` and `tick`.
pub struct SnakeGameState {
    settings: GameSettings,
    snake: Snake,
    food: Option<Food>,
    phase: GamePhase,
    growth_count: u32,
}

impl SnakeGameState {
    pub fn new(settings: GameSettings) -> Self {
        let snake = Snake::new(settings.start_position, settings.start_direction);
        Self {
            settings,
            snake,
            food: None,
            phase: GamePhase::Idle,
            growth_count: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Score is derived from body length, never stored.
    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    pub fn tick_interval(&self) -> Duration {
        self.settings.tick_interval(self.growth_count)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Starts a fresh run from any phase; restarting from GameOver is the
    /// normal way to play again.
    pub fn start(&mut self, rng: &mut SessionRng) {
        self.snake = Snake::new(self.settings.start_position, self.settings.start_direction);
        self.growth_count = 0;
        self.food = FoodSpawner::place(&self.settings.field_size(), &self.snake, rng);
        self.phase = GamePhase::Playing;
        log!("Game started, tick interval {:?}", self.tick_interval());
    }

    /// Latches a turn for the next tick. Reversals and input outside the
    /// Playing phase are silently ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase == GamePhase::Playing && !direction.is_opposite(&self.snake.direction) {
            self.snake.pending_direction = Some(direction);
        }
    }

    /// Advances the simulation by one cell.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Skipped;
        }

        if let Some(direction) = self.snake.pending_direction.take() {
            self.snake.direction = direction;
        }

        let head = match self.checked_next_head() {
            Ok(head) => head,
            Err(reason) => return self.die(reason),
        };

        if self.food.is_some_and(|food| food.position == head) {
            self.snake.grow(head);
            self.growth_count += 1;
            self.food = FoodSpawner::place(&self.settings.field_size(), &self.snake, rng);
            log!(
                "Ate food at ({}, {}). Score: {}, tick interval {:?}",
                head.x,
                head.y,
                self.score(),
                self.tick_interval()
            );
            TickOutcome::Ate
        } else {
            self.snake.step(head);
            TickOutcome::Moved
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.cells().collect(),
            food: self.food,
            score: self.score(),
            phase: self.phase,
        }
    }

    fn checked_next_head(&self) -> Result<Point, DeathReason> {
        let (x, y) = self.snake.next_head();
        let field = self.settings.field_size();
        if x < 0 || y < 0 || x as usize >= field.width || y as usize >= field.height {
            return Err(DeathReason::OutOfBounds);
        }

        let head = Point::new(x as usize, y as usize);
        // Moving into the cell the tail is about to vacate is legal.
        if self.snake.occupies(head) && head != self.snake.tail() {
            return Err(DeathReason::SelfCollision);
        }
        Ok(head)
    }

    fn die(&mut self, reason: DeathReason) -> TickOutcome {
        self.phase = GamePhase::GameOver;
        log!("Game over: {:?}, final score {}", reason, self.score());
        TickOutcome::Died(reason)
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Option<Food>) {
        self.food = food;
    }

    #[cfg(test)]
    fn set_snake(&mut self, cells: Vec<Point>, direction: Direction) {
        let mut iter = cells.into_iter().rev();
        let tail = iter.next().expect("test snake needs at least one cell");
        let mut snake = Snake::new(tail, direction);
        for cell in iter {
            snake.grow(cell);
        }
        self.snake = snake;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::FRUIT_SPRITE_COUNT;

    fn playing_state(settings: GameSettings) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let mut state = SnakeGameState::new(settings);
        state.start(&mut rng);
        (state, rng)
    }

    fn food_at(x: usize, y: usize) -> Option<Food> {
        Some(Food {
            position: Point::new(x, y),
            sprite: 0,
        })
    }

    #[test]
    fn test_idle_until_started() {
        let mut state = SnakeGameState::new(GameSettings::default());
        assert_eq!(state.phase(), GamePhase::Idle);
        let mut rng = SessionRng::new(1);
        assert_eq!(state.tick(&mut rng), TickOutcome::Skipped);
    }

    #[test]
    fn test_five_ticks_without_food_move_head_five_cells() {
        let (mut state, mut rng) = playing_state(GameSettings::default());
        state.set_food(food_at(0, 0));

        for _ in 0..5 {
            assert_eq!(state.tick(&mut rng), TickOutcome::Moved);
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake, vec![Point::new(10, 5)]);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.phase, GamePhase::Playing);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let settings = GameSettings {
            start_position: Point::new(19, 5),
            ..GameSettings::default()
        };
        let (mut state, mut rng) = playing_state(settings);
        state.set_food(food_at(0, 0));

        assert_eq!(
            state.tick(&mut rng),
            TickOutcome::Died(DeathReason::OutOfBounds)
        );
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.tick(&mut rng), TickOutcome::Skipped);
    }

    #[test]
    fn test_self_collision_on_coil_ends_game() {
        let (mut state, mut rng) = playing_state(GameSettings::default());
        state.set_food(food_at(0, 0));
        // Head at (5,5) curling down into its own body.
        state.set_snake(
            vec![
                Point::new(5, 5),
                Point::new(6, 5),
                Point::new(6, 6),
                Point::new(5, 6),
                Point::new(4, 6),
            ],
            Direction::Down,
        );

        assert_eq!(
            state.tick(&mut rng),
            TickOutcome::Died(DeathReason::SelfCollision)
        );
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_not_fatal() {
        let (mut state, mut rng) = playing_state(GameSettings::default());
        state.set_food(food_at(0, 0));
        // 2x2 loop: the head moves into the cell the tail leaves this tick.
        state.set_snake(
            vec![
                Point::new(5, 6),
                Point::new(6, 6),
                Point::new(6, 5),
                Point::new(5, 5),
            ],
            Direction::Up,
        );

        assert_eq!(state.tick(&mut rng), TickOutcome::Moved);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_eating_grows_and_respawns_food_off_snake() {
        let (mut state, mut rng) = playing_state(GameSettings::default());
        state.set_food(food_at(6, 5));

        assert_eq!(state.tick(&mut rng), TickOutcome::Ate);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake.len(), 2);
        assert_eq!(snapshot.score, 1);

        let food = snapshot.food.expect("food should respawn");
        assert!(!snapshot.snake.contains(&food.position));
        assert!(food.sprite < FRUIT_SPRITE_COUNT);
    }

    #[test]
    fn test_speed_ramps_down_on_growth_only() {
        let (mut state, mut rng) = playing_state(GameSettings::default());
        let base = state.tick_interval();

        state.set_food(food_at(0, 0));
        state.tick(&mut rng);
        assert_eq!(state.tick_interval(), base);

        state.set_food(food_at(7, 5));
        assert_eq!(state.tick(&mut rng), TickOutcome::Ate);
        assert!(state.tick_interval() < base);
    }

    #[test]
    fn test_reversal_is_rejected_and_other_turns_accepted() {
        let (mut state, mut rng) = playing_state(GameSettings::default());
        state.set_food(food_at(0, 0));

        // Moving right; a left turn must be dropped.
        state.set_direction(Direction::Left);
        state.tick(&mut rng);
        assert_eq!(state.snapshot().snake[0], Point::new(6, 5));

        state.set_direction(Direction::Up);
        state.tick(&mut rng);
        assert_eq!(state.snapshot().snake[0], Point::new(6, 4));
    }

    #[test]
    fn test_restart_from_game_over_resets_run() {
        let settings = GameSettings {
            start_position: Point::new(19, 5),
            ..GameSettings::default()
        };
        let (mut state, mut rng) = playing_state(settings);
        state.set_food(food_at(0, 0));
        state.tick(&mut rng);
        assert_eq!(state.phase(), GamePhase::GameOver);

        state.start(&mut rng);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.snake, vec![Point::new(19, 5)]);
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.food.is_some());
    }

    #[test]
    fn test_direction_input_ignored_when_not_playing() {
        let mut state = SnakeGameState::new(GameSettings::default());
        state.set_direction(Direction::Up);
        let mut rng = SessionRng::new(42);
        state.start(&mut rng);
        // The pre-start input must not have latched.
        state.set_food(food_at(0, 0));
        state.tick(&mut rng);
        assert_eq!(state.snapshot().snake[0], Point::new(6, 5));
    }
}

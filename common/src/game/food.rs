use serde::{Deserialize, Serialize};

use super::session_rng::SessionRng;
use super::snake::Snake;
use super::types::{FieldSize, Point};

/// Number of fruit sprites the renderer can draw; the index is purely
/// cosmetic and chosen independently of the position.
pub const FRUIT_SPRITE_COUNT: u8 = 5;

const MAX_RANDOM_ATTEMPTS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Point,
    pub sprite: u8,
}

pub struct FoodSpawner;

impl FoodSpawner {
    /// Draws a free cell uniformly at random, falling back to a row-major
    /// scan after bounded retries so placement can never loop forever.
    /// Returns `None` only when the snake covers the whole field.
    pub fn place(field: &FieldSize, snake: &Snake, rng: &mut SessionRng) -> Option<Food> {
        let position = Self::pick_free_cell(field, snake, rng)?;
        let sprite = rng.random_range(0..FRUIT_SPRITE_COUNT);
        Some(Food { position, sprite })
    }

    fn pick_free_cell(field: &FieldSize, snake: &Snake, rng: &mut SessionRng) -> Option<Point> {
        if snake.len() >= field.cell_count() {
            return None;
        }

        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let pos = Point::new(
                rng.random_range(0..field.width),
                rng.random_range(0..field.height),
            );
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Dense board: scan for the first free cell instead.
        for y in 0..field.height {
            for x in 0..field.width {
                let pos = Point::new(x, y);
                if !snake.occupies(pos) {
                    return Some(pos);
                }
            }
        }

        None
    }
}

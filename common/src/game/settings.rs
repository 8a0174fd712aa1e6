use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;
use super::types::{Direction, FieldSize, Point};

/// Everything that shapes a single-player run: field geometry, start state
/// and the speed ramp. The tick interval shrinks by `tick_decrement_ms` per
/// growth event, floored at `min_tick_interval_ms`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub start_position: Point,
    pub start_direction: Direction,
    pub base_tick_interval_ms: u64,
    pub tick_decrement_ms: u64,
    pub min_tick_interval_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 20,
            start_position: Point::new(5, 5),
            start_direction: Direction::Right,
            base_tick_interval_ms: 100,
            tick_decrement_ms: 2,
            min_tick_interval_ms: 50,
        }
    }
}

impl GameSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize {
            width: self.field_width,
            height: self.field_height,
        }
    }

    /// Tick interval after the given number of growth events; monotone
    /// non-increasing and floored.
    pub fn tick_interval(&self, growth_count: u32) -> Duration {
        let ramp = self.tick_decrement_ms.saturating_mul(u64::from(growth_count));
        let ms = self
            .base_tick_interval_ms
            .saturating_sub(ramp)
            .max(self.min_tick_interval_ms);
        Duration::from_millis(ms)
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 10 || self.field_width > 100 {
            return Err("Field width must be between 10 and 100".to_string());
        }
        if self.field_height < 10 || self.field_height > 100 {
            return Err("Field height must be between 10 and 100".to_string());
        }
        if !self.field_size().contains(self.start_position) {
            return Err("Start position must be inside the field".to_string());
        }
        if self.base_tick_interval_ms < 50 || self.base_tick_interval_ms > 5000 {
            return Err("Base tick interval must be between 50ms and 5000ms".to_string());
        }
        if self.min_tick_interval_ms < 20 || self.min_tick_interval_ms > self.base_tick_interval_ms
        {
            return Err(
                "Min tick interval must be between 20ms and the base interval".to_string(),
            );
        }
        Ok(())
    }
}

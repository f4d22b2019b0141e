use std::time::Duration;

use crate::config::Validate;
use super::snake::INITIAL_SNAKE_LENGTH;

pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSettings {
    pub grid_size: usize,
    pub move_interval: Duration,
    pub move_animation_duration: Duration,
    pub max_snake_length: usize,
    pub fruit_speed_boost_multiplier: f32,
    pub extra_obstacles_min: usize,
    pub extra_obstacles_max: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            grid_size: 12,
            move_interval: Duration::from_millis(400),
            move_animation_duration: Duration::from_millis(200),
            max_snake_length: 20,
            fruit_speed_boost_multiplier: 0.95,
            extra_obstacles_min: 2,
            extra_obstacles_max: 5,
        }
    }
}

impl Validate for SimulationSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "Grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }
        if self.move_interval.is_zero() {
            return Err("Move interval must be greater than zero".to_string());
        }
        if !self.fruit_speed_boost_multiplier.is_finite()
            || self.fruit_speed_boost_multiplier <= 0.0
            || self.fruit_speed_boost_multiplier > 1.0
        {
            return Err(format!(
                "Fruit speed boost multiplier must be in (0, 1], got {}",
                self.fruit_speed_boost_multiplier
            ));
        }
        if self.max_snake_length <= INITIAL_SNAKE_LENGTH {
            return Err(format!(
                "Max snake length must be greater than {}, got {}",
                INITIAL_SNAKE_LENGTH, self.max_snake_length
            ));
        }
        if self.extra_obstacles_min > self.extra_obstacles_max {
            return Err(format!(
                "Extra obstacles range is empty: min {} > max {}",
                self.extra_obstacles_min, self.extra_obstacles_max
            ));
        }

        let interior = (self.grid_size - 2).pow(2);

        // Snake, the cell in front of its head and one fruit must still fit.
        let reserved = INITIAL_SNAKE_LENGTH + 2;
        if self.extra_obstacles_max + reserved > interior {
            return Err(format!(
                "At most {} extra obstacles fit on a {}x{} grid, got {}",
                interior.saturating_sub(reserved),
                self.grid_size,
                self.grid_size,
                self.extra_obstacles_max
            ));
        }
        if self.max_snake_length + self.extra_obstacles_max > interior {
            return Err(format!(
                "Max snake length {} is unreachable on a {}x{} grid with up to {} extra obstacles",
                self.max_snake_length, self.grid_size, self.grid_size, self.extra_obstacles_max
            ));
        }
        Ok(())
    }
}

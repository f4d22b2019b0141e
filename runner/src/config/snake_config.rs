use std::time::Duration;

use grid_snake_common::config::Validate;
use grid_snake_common::games::snake::SimulationSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SnakeConfig {
    pub grid_size: u32,
    pub move_interval_ms: u32,
    pub move_animation_duration_ms: u32,
    pub max_snake_length: u32,
    pub fruit_speed_boost_multiplier: f32,
    pub extra_obstacles_min: u32,
    pub extra_obstacles_max: u32,
}

impl From<&SnakeConfig> for SimulationSettings {
    fn from(config: &SnakeConfig) -> Self {
        Self {
            grid_size: config.grid_size as usize,
            move_interval: Duration::from_millis(config.move_interval_ms as u64),
            move_animation_duration: Duration::from_millis(config.move_animation_duration_ms as u64),
            max_snake_length: config.max_snake_length as usize,
            fruit_speed_boost_multiplier: config.fruit_speed_boost_multiplier,
            extra_obstacles_min: config.extra_obstacles_min as usize,
            extra_obstacles_max: config.extra_obstacles_max as usize,
        }
    }
}

impl Validate for SnakeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.move_interval_ms < 10 {
            return Err("move_interval_ms must be at least 10".to_string());
        }
        if self.move_animation_duration_ms > self.move_interval_ms {
            return Err("move_animation_duration_ms must not exceed move_interval_ms".to_string());
        }
        SimulationSettings::from(self).validate()
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 12,
            move_interval_ms: 400,
            move_animation_duration_ms: 200,
            max_snake_length: 20,
            fruit_speed_boost_multiplier: 0.95,
            extra_obstacles_min: 2,
            extra_obstacles_max: 5,
        }
    }
}

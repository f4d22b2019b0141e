use grid_snake_common::config::Validate;
use grid_snake_common::games::snake::Outcome;
use serde::{Deserialize, Serialize};

/// Text shown when a level ends.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LevelResults {
    pub win: String,
    pub lose: String,
}

impl LevelResults {
    pub fn text_for(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Win => &self.win,
            Outcome::Lose => &self.lose,
        }
    }
}

impl Validate for LevelResults {
    fn validate(&self) -> Result<(), String> {
        if self.win.trim().is_empty() {
            return Err("level_results.win must not be empty".to_string());
        }
        if self.lose.trim().is_empty() {
            return Err("level_results.lose must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for LevelResults {
    fn default() -> Self {
        Self {
            win: "You win!".to_string(),
            lose: "Game over".to_string(),
        }
    }
}

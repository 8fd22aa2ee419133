use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::difficulty::{DEFAULT_DIFFICULTY, DifficultyOnRestart, DifficultyTable};
use super::types::Point;

pub const DEFAULT_GRID_SIZE: usize = 35;
const MIN_GRID_SIZE: usize = 2;
const MAX_GRID_SIZE: usize = 200;
const MAX_INTERVAL_MS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub grid_size: usize,
    pub initial_head: Point,
    pub difficulties: DifficultyTable,
    pub default_difficulty: usize,
    pub difficulty_on_restart: DifficultyOnRestart,
    pub seed: Option<u64>,
}

impl SnakeSettings {
    pub fn with_grid(grid_size: usize, initial_head: Point) -> Self {
        Self {
            grid_size,
            initial_head,
            ..Self::default()
        }
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_head: Point::new(17, 17),
            difficulties: DifficultyTable::default(),
            default_difficulty: DEFAULT_DIFFICULTY,
            difficulty_on_restart: DifficultyOnRestart::default(),
            seed: None,
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "Grid size must be between {} and {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE
            ));
        }
        if self.initial_head.x >= self.grid_size || self.initial_head.y >= self.grid_size {
            return Err(format!(
                "Initial head {} is outside a {}x{} grid",
                self.initial_head, self.grid_size, self.grid_size
            ));
        }
        if self.difficulties.is_empty() {
            return Err("Difficulty table must not be empty".to_string());
        }
        if self
            .difficulties
            .intervals_ms()
            .iter()
            .any(|ms| !(1..=MAX_INTERVAL_MS).contains(ms))
        {
            return Err(format!(
                "Difficulty intervals must be between 1ms and {}ms",
                MAX_INTERVAL_MS
            ));
        }
        if !self.difficulties.contains_level(self.default_difficulty) {
            return Err(format!(
                "Default difficulty must be between 1 and {}",
                self.difficulties.len()
            ));
        }
        Ok(())
    }
}

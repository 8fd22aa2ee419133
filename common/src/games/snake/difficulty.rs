use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_DIFFICULTY: usize = 3;

/// Tick intervals in milliseconds, indexed by 1-based difficulty level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTable {
    intervals_ms: Vec<u64>,
}

impl DifficultyTable {
    pub fn new(intervals_ms: Vec<u64>) -> Self {
        Self { intervals_ms }
    }

    pub fn len(&self) -> usize {
        self.intervals_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals_ms.is_empty()
    }

    pub fn contains_level(&self, level: usize) -> bool {
        (1..=self.len()).contains(&level)
    }

    pub fn interval(&self, level: usize) -> Option<Duration> {
        let index = level.checked_sub(1)?;
        self.intervals_ms
            .get(index)
            .map(|ms| Duration::from_millis(*ms))
    }

    pub fn intervals_ms(&self) -> &[u64] {
        &self.intervals_ms
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::new(vec![1000, 500, 100, 50, 10])
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyOnRestart {
    #[default]
    Keep,
    Reset,
}

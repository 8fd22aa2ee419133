use std::sync::{Arc, Mutex};

use snake_common::games::GameBroadcaster;
use snake_common::log;
use snake_common::snake::{GameStatus, SnakeSnapshot};

#[derive(Clone, Default)]
pub struct ConsoleBroadcaster {
    last_seen: Arc<Mutex<Option<(GameStatus, u32)>>>,
}

impl ConsoleBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameBroadcaster for ConsoleBroadcaster {
    async fn broadcast_state(&self, snapshot: SnakeSnapshot) {
        let current = (snapshot.status, snapshot.score);
        let Ok(mut last_seen) = self.last_seen.lock() else {
            return;
        };
        if *last_seen == Some(current) {
            return;
        }
        *last_seen = Some(current);
        drop(last_seen);

        log!(
            "status {} | score {} | length {} | difficulty {} ({:?}/tick) | heading {}",
            snapshot.status,
            snapshot.score,
            snapshot.body.len(),
            snapshot.difficulty,
            snapshot.tick_interval,
            snapshot.direction
        );
    }

    async fn broadcast_game_over(&self, snapshot: SnakeSnapshot) {
        log!(
            "Game over after {} ticks: {:?}. Final score {}. Type 'restart' to play again.",
            snapshot.tick,
            snapshot.end_reason,
            snapshot.score
        );
    }
}

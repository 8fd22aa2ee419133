use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::games::GameBroadcaster;
use crate::log;
use super::engine::SnakeEngine;
use super::types::GameStatus;

#[derive(Default)]
pub struct TickDriver {
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm<B: GameBroadcaster>(
        &mut self,
        engine: Arc<Mutex<SnakeEngine>>,
        epoch: u64,
        period: Duration,
        broadcaster: B,
    ) {
        self.disarm();
        log!("Tick driver armed for epoch {} every {:?}", epoch, period);
        self.handle = Some(tokio::spawn(run_ticks(engine, epoch, period, broadcaster)));
    }

    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.disarm();
    }
}

async fn run_ticks<B: GameBroadcaster>(
    engine: Arc<Mutex<SnakeEngine>>,
    epoch: u64,
    period: Duration,
    broadcaster: B,
) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;

        let mut engine_guard = engine.lock().await;
        if engine_guard.tick_for_epoch(epoch).is_none() {
            break;
        }
        let snapshot = engine_guard.snapshot();
        drop(engine_guard);

        let game_over = snapshot.status == GameStatus::GameOver;
        broadcaster.broadcast_state(snapshot.clone()).await;

        if game_over {
            broadcaster.broadcast_game_over(snapshot).await;
            break;
        }
    }

    log!("Tick driver for epoch {} finished", epoch);
}

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::games::GameBroadcaster;
use super::engine::{SnakeEngine, SnakeSnapshot};
use super::game_state::StepOutcome;
use super::tick_driver::TickDriver;
use super::types::{Direction, GameStatus};

pub struct SnakeSession<B: GameBroadcaster> {
    engine: Arc<Mutex<SnakeEngine>>,
    driver: TickDriver,
    broadcaster: B,
}

impl<B: GameBroadcaster> SnakeSession<B> {
    pub fn new(engine: SnakeEngine, broadcaster: B) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            driver: TickDriver::new(),
            broadcaster,
        }
    }

    pub async fn snapshot(&self) -> SnakeSnapshot {
        self.engine.lock().await.snapshot()
    }

    pub async fn status(&self) -> GameStatus {
        self.engine.lock().await.status()
    }

    pub fn is_ticking(&self) -> bool {
        self.driver.is_armed()
    }

    pub async fn start(&mut self) -> bool {
        self.run_lifecycle(SnakeEngine::start).await
    }

    pub async fn stop(&mut self) -> bool {
        self.run_lifecycle(SnakeEngine::stop).await
    }

    pub async fn resume(&mut self) -> bool {
        self.run_lifecycle(SnakeEngine::resume).await
    }

    pub async fn restart(&mut self) -> bool {
        self.run_lifecycle(SnakeEngine::restart).await
    }

    pub async fn set_direction(&self, direction: Direction) -> Direction {
        self.engine.lock().await.set_direction(direction)
    }

    pub async fn set_difficulty(&self, level: usize) -> usize {
        let mut engine = self.engine.lock().await;
        let before = engine.difficulty();
        let after = engine.set_difficulty(level);
        let snapshot = engine.snapshot();
        drop(engine);

        if after != before {
            self.broadcaster.broadcast_state(snapshot).await;
        }
        after
    }

    pub async fn step(&mut self) -> Option<StepOutcome> {
        let mut engine = self.engine.lock().await;
        let outcome = engine.tick();
        let snapshot = engine.snapshot();
        drop(engine);

        if outcome.is_none() {
            return None;
        }
        let game_over = snapshot.status == GameStatus::GameOver;
        if game_over {
            self.driver.disarm();
        }
        self.broadcaster.broadcast_state(snapshot.clone()).await;
        if game_over {
            self.broadcaster.broadcast_game_over(snapshot).await;
        }
        outcome
    }

    async fn run_lifecycle(&mut self, command: fn(&mut SnakeEngine) -> bool) -> bool {
        let mut engine = self.engine.lock().await;
        if !command(&mut *engine) {
            return false;
        }

        if engine.status() == GameStatus::Playing {
            self.driver.arm(
                self.engine.clone(),
                engine.epoch(),
                engine.tick_interval(),
                self.broadcaster.clone(),
            );
        } else {
            self.driver.disarm();
        }
        let snapshot = engine.snapshot();
        drop(engine);

        self.broadcaster.broadcast_state(snapshot).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use super::*;
    use crate::games::SessionRng;
    use crate::games::snake::settings::SnakeSettings;
    use crate::games::snake::types::{DeathReason, GameEndReason, Point};

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        states: Arc<StdMutex<Vec<SnakeSnapshot>>>,
        game_overs: Arc<StdMutex<Vec<SnakeSnapshot>>>,
    }

    impl RecordingBroadcaster {
        fn state_count(&self) -> usize {
            self.states.lock().unwrap().len()
        }

        fn game_over_count(&self) -> usize {
            self.game_overs.lock().unwrap().len()
        }
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: SnakeSnapshot) {
            self.states.lock().unwrap().push(snapshot);
        }

        async fn broadcast_game_over(&self, snapshot: SnakeSnapshot) {
            self.game_overs.lock().unwrap().push(snapshot);
        }
    }

    fn session(size: usize, head: Point) -> (SnakeSession<RecordingBroadcaster>, RecordingBroadcaster) {
        let engine =
            SnakeEngine::with_rng(SnakeSettings::with_grid(size, head), SessionRng::new(7)).unwrap();
        let broadcaster = RecordingBroadcaster::default();
        (SnakeSession::new(engine, broadcaster.clone()), broadcaster)
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_ticks_only_while_playing() {
        let (mut session, _) = session(20, Point::new(10, 10));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(session.snapshot().await.tick, 0);
        assert!(!session.is_ticking());

        assert!(session.start().await);
        assert!(session.is_ticking());
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(session.snapshot().await.tick, 3);

        assert!(session.stop().await);
        assert!(!session.is_ticking());
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(session.snapshot().await.tick, 3);

        assert!(session.resume().await);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(session.snapshot().await.tick, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_stops_driver_and_notifies_once() {
        let (mut session, broadcaster) = session(5, Point::new(2, 2));

        session.start().await;
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.status, GameStatus::GameOver);
        assert_eq!(
            snapshot.end_reason,
            Some(GameEndReason::Collision(DeathReason::WallCollision))
        );
        assert_eq!(snapshot.tick, 3);
        assert_eq!(broadcaster.game_over_count(), 1);
        assert!(!session.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_never_lets_old_driver_move_new_snake() {
        let (mut session, _) = session(20, Point::new(10, 10));

        session.start().await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(session.snapshot().await.tick, 1);

        session.stop().await;
        assert!(session.restart().await);
        assert!(session.start().await);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.body, vec![Point::new(10, 10)]);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.body[0], Point::new(10, 9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_difficulty_sets_driver_period() {
        let (mut session, _) = session(20, Point::new(10, 15));

        assert_eq!(session.set_difficulty(2).await, 2);
        session.start().await;
        assert_eq!(session.set_difficulty(5).await, 2);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.tick, 2);
        assert_eq!(snapshot.tick_interval, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_step_and_ignored_commands() {
        let (mut session, broadcaster) = session(20, Point::new(10, 10));

        assert_eq!(session.step().await, None);
        assert!(!session.stop().await);
        assert!(!session.resume().await);
        assert!(!session.restart().await);
        assert_eq!(broadcaster.state_count(), 0);

        session.start().await;
        session.stop().await;
        assert_eq!(session.step().await, None);

        session.resume().await;
        assert_eq!(session.set_direction(Direction::Left).await, Direction::Left);
        assert!(session.step().await.is_some());
        assert_eq!(session.snapshot().await.body[0], Point::new(9, 10));
    }
}

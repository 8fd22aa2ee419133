use std::time::Duration;

use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::controls::request_direction;
use super::difficulty::{DEFAULT_TICK_INTERVAL, DifficultyOnRestart};
use super::game_state::{SnakeGameState, StepOutcome};
use super::grid::Grid;
use super::lifecycle::{LifecycleCommand, transition};
use super::settings::SnakeSettings;
use super::types::{Direction, GameEndReason, GameStatus, Point};

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSnapshot {
    pub grid: Grid,
    pub body: Vec<Point>,
    pub status: GameStatus,
    pub difficulty: usize,
    pub direction: Direction,
    pub score: u32,
    pub tick: u64,
    pub tick_interval: Duration,
    pub end_reason: Option<GameEndReason>,
}

pub struct SnakeEngine {
    settings: SnakeSettings,
    state: SnakeGameState,
    status: GameStatus,
    difficulty: usize,
    end_reason: Option<GameEndReason>,
    epoch: u64,
    tick: u64,
    rng: SessionRng,
}

impl SnakeEngine {
    pub fn new(settings: SnakeSettings) -> Result<Self, String> {
        let rng = SessionRng::from_optional_seed(settings.seed);
        Self::with_rng(settings, rng)
    }

    pub fn with_rng(settings: SnakeSettings, mut rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;
        let state = SnakeGameState::new(settings.grid_size, settings.initial_head, &mut rng);
        log!(
            "Engine created: grid {}x{}, head {}, seed {}",
            settings.grid_size,
            settings.grid_size,
            settings.initial_head,
            rng.seed()
        );
        Ok(Self {
            difficulty: settings.default_difficulty,
            settings,
            state,
            status: GameStatus::Init,
            end_reason: None,
            epoch: 0,
            tick: 0,
            rng,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.end_reason
    }

    pub fn game_state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn tick_interval(&self) -> Duration {
        self.settings
            .difficulties
            .interval(self.difficulty)
            .unwrap_or(DEFAULT_TICK_INTERVAL)
    }

    pub fn start(&mut self) -> bool {
        self.apply(LifecycleCommand::Start)
    }

    pub fn stop(&mut self) -> bool {
        self.apply(LifecycleCommand::Stop)
    }

    pub fn resume(&mut self) -> bool {
        self.apply(LifecycleCommand::Resume)
    }

    pub fn restart(&mut self) -> bool {
        if !self.apply(LifecycleCommand::Restart) {
            return false;
        }

        if self.settings.difficulty_on_restart == DifficultyOnRestart::Reset {
            self.difficulty = self.settings.default_difficulty;
        }
        self.state = SnakeGameState::new(
            self.settings.grid_size,
            self.settings.initial_head,
            &mut self.rng,
        );
        self.end_reason = None;
        self.tick = 0;
        true
    }

    pub fn set_direction(&mut self, requested: Direction) -> Direction {
        let applied = self.state.applied_direction();
        let resolved = request_direction(applied, requested, self.status);
        if resolved == applied && requested != applied && self.status == GameStatus::Playing {
            log!("Ignored reversal from {} to {}", applied, requested);
            return self.state.direction();
        }
        if self.status == GameStatus::Playing {
            self.state.queue_direction(resolved);
        }
        self.state.direction()
    }

    pub fn set_difficulty(&mut self, level: usize) -> usize {
        if self.status != GameStatus::Init {
            log!("Ignored difficulty {} while {}", level, self.status);
            return self.difficulty;
        }
        if !self.settings.difficulties.contains_level(level) {
            log!("Ignored out of range difficulty {}", level);
            return self.difficulty;
        }
        self.difficulty = level;
        log!("Difficulty set to {} ({:?} per tick)", level, self.tick_interval());
        self.difficulty
    }

    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.status != GameStatus::Playing {
            return None;
        }

        let outcome = self.state.step(&mut self.rng);
        self.tick += 1;

        match outcome {
            StepOutcome::Died(reason) => self.finish(GameEndReason::Collision(reason)),
            StepOutcome::Grew { food: None } => self.finish(GameEndReason::BoardFilled),
            StepOutcome::Moved | StepOutcome::Grew { .. } => {}
        }
        Some(outcome)
    }

    pub fn tick_for_epoch(&mut self, epoch: u64) -> Option<StepOutcome> {
        if epoch != self.epoch {
            log!("Dropped stale tick from epoch {} (current {})", epoch, self.epoch);
            return None;
        }
        self.tick()
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            grid: self.state.grid().clone(),
            body: self.state.snake().segments().copied().collect(),
            status: self.status,
            difficulty: self.difficulty,
            direction: self.state.direction(),
            score: self.state.score(),
            tick: self.tick,
            tick_interval: self.tick_interval(),
            end_reason: self.end_reason,
        }
    }

    fn apply(&mut self, command: LifecycleCommand) -> bool {
        match transition(self.status, command) {
            Some(next) => {
                log!("{:?}: {} -> {}", command, self.status, next);
                self.set_status(next);
                true
            }
            None => {
                log!("Ignored {:?} while {}", command, self.status);
                false
            }
        }
    }

    fn finish(&mut self, reason: GameEndReason) {
        log!("Game over after {} ticks: {:?}, score {}", self.tick, reason, self.state.score());
        self.end_reason = Some(reason);
        self.set_status(GameStatus::GameOver);
    }

    fn set_status(&mut self, status: GameStatus) {
        self.status = status;
        self.epoch += 1;
    }
}

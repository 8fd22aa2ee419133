mod body;
mod controls;
mod difficulty;
mod engine;
mod game_state;
mod grid;
mod lifecycle;
mod session;
mod settings;
mod tick_driver;
mod types;

pub use body::Snake;
pub use controls::request_direction;
pub use difficulty::{DEFAULT_DIFFICULTY, DEFAULT_TICK_INTERVAL, DifficultyOnRestart, DifficultyTable};
pub use engine::{SnakeEngine, SnakeSnapshot};
pub use game_state::{SnakeGameState, StepOutcome};
pub use grid::Grid;
pub use lifecycle::{LifecycleCommand, transition};
pub use session::SnakeSession;
pub use settings::{DEFAULT_GRID_SIZE, SnakeSettings};
pub use tick_driver::TickDriver;
pub use types::{Cell, DeathReason, Direction, GameEndReason, GameStatus, Point};

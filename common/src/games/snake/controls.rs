use super::types::{Direction, GameStatus};

pub fn request_direction(current: Direction, requested: Direction, status: GameStatus) -> Direction {
    if status != GameStatus::Playing {
        return current;
    }
    if requested.is_opposite(&current) {
        return current;
    }
    requested
}

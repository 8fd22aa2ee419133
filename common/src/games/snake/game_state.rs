use crate::log;
use crate::games::SessionRng;
use super::body::Snake;
use super::grid::Grid;
use super::types::{Cell, DeathReason, Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Food was eaten. `food` is the replacement, `None` if the board is full.
    Grew { food: Option<Point> },
    Died(DeathReason),
}

impl StepOutcome {
    pub fn is_alive(&self) -> bool {
        !matches!(self, StepOutcome::Died(_))
    }

    pub fn grew(&self) -> bool {
        matches!(self, StepOutcome::Grew { .. })
    }
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    grid: Grid,
    snake: Snake,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
}

impl SnakeGameState {
    pub fn new(size: usize, initial_head: Point, rng: &mut SessionRng) -> Self {
        let mut state = Self {
            grid: Grid::new(size, initial_head),
            snake: Snake::new(initial_head),
            direction: Direction::Up,
            pending_direction: None,
            score: 0,
        };
        if let Some(food) = state.grid.place_food(state.snake.occupied(), rng) {
            log!("Food placed at {}", food);
        }
        state
    }

    pub fn with_snake(size: usize, snake: Snake, direction: Direction, food: Option<Point>) -> Self {
        let mut grid = Grid::new(size, snake.head());
        for segment in snake.segments() {
            grid.set(*segment, Cell::Snake);
        }
        if let Some(food) = food
            && grid.get(food) == Some(Cell::Empty)
        {
            grid.set(food, Cell::Food);
        }
        Self {
            grid,
            snake,
            direction,
            pending_direction: None,
            score: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    pub fn applied_direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn queue_direction(&mut self, direction: Direction) {
        if direction == self.direction {
            self.pending_direction = None;
        } else {
            self.pending_direction = Some(direction);
        }
    }

    pub fn step(&mut self, rng: &mut SessionRng) -> StepOutcome {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = match self.next_head() {
            Ok(pos) => pos,
            Err(reason) => {
                log!("Snake died at {} heading {}: {:?}", self.snake.head(), self.direction, reason);
                return StepOutcome::Died(reason);
            }
        };

        let ate_food = self.grid.get(next_head) == Some(Cell::Food);
        if !ate_food
            && let Some(tail) = self.snake.pop_tail()
        {
            self.grid.set(tail, Cell::Empty);
        }

        self.snake.push_head(next_head);
        self.grid.set(next_head, Cell::Snake);

        if !ate_food {
            return StepOutcome::Moved;
        }

        self.score += 1;
        let food = self.grid.place_food(self.snake.occupied(), rng);
        match food {
            Some(pos) => log!("Ate food at {}, score {}, next food at {}", next_head, self.score, pos),
            None => log!("Ate food at {}, score {}, no free cell left", next_head, self.score),
        }
        StepOutcome::Grew { food }
    }

    // Collision checks read the grid as it is before the move, so the cell
    // the tail is about to leave still counts as snake.
    fn next_head(&self) -> Result<Point, DeathReason> {
        let next_head = self
            .snake
            .head()
            .moved(self.direction)
            .filter(|pos| self.grid.contains(*pos))
            .ok_or(DeathReason::WallCollision)?;

        if self.grid.get(next_head) == Some(Cell::Snake) {
            return Err(DeathReason::SelfCollision);
        }

        Ok(next_head)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn snake_of(points: &[(usize, usize)]) -> Snake {
        Snake::from_segments(points.iter().map(|&(x, y)| Point::new(x, y))).unwrap()
    }

    fn assert_grid_matches_body(state: &SnakeGameState) {
        let marked: HashSet<Point> = state.grid().positions_of(Cell::Snake).into_iter().collect();
        assert_eq!(&marked, state.snake().occupied());
    }

    #[test]
    fn test_new_places_one_food() {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::new(35, Point::new(17, 17), &mut rng);
        assert_eq!(state.grid().positions_of(Cell::Food).len(), 1);
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.snake().len(), 1);
        assert_grid_matches_body(&state);
    }

    #[test]
    fn test_step_up_moves_head_and_clears_tail() {
        let mut rng = SessionRng::new(1);
        let mut state = SnakeGameState::with_snake(5, snake_of(&[(2, 2)]), Direction::Up, None);

        let outcome = state.step(&mut rng);

        assert_eq!(outcome, StepOutcome::Moved);
        assert!(outcome.is_alive());
        assert_eq!(state.snake().head(), Point::new(2, 1));
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.grid().get(Point::new(2, 2)), Some(Cell::Empty));
        assert_grid_matches_body(&state);
    }

    #[test]
    fn test_step_left_off_edge_dies() {
        let mut rng = SessionRng::new(1);
        let mut state = SnakeGameState::with_snake(5, snake_of(&[(0, 2)]), Direction::Left, None);
        let grid_before = state.grid().clone();
        let snake_before = state.snake().clone();

        let outcome = state.step(&mut rng);

        assert_eq!(outcome, StepOutcome::Died(DeathReason::WallCollision));
        assert!(!outcome.is_alive());
        assert_eq!(state.grid(), &grid_before);
        assert_eq!(state.snake(), &snake_before);
    }

    #[test]
    fn test_step_past_far_edges_dies() {
        let mut rng = SessionRng::new(1);
        for (head, direction) in [((4, 2), Direction::Right), ((2, 4), Direction::Down), ((2, 0), Direction::Up)] {
            let mut state = SnakeGameState::with_snake(5, snake_of(&[head]), direction, None);
            assert_eq!(state.step(&mut rng), StepOutcome::Died(DeathReason::WallCollision));
            assert_eq!(state.snake().head(), Point::new(head.0, head.1));
        }
    }

    #[test]
    fn test_self_collision_with_body() {
        let mut rng = SessionRng::new(1);
        // Head at (2,2) heading left into (1,2), which is a mid-body segment.
        let snake = snake_of(&[(2, 2), (2, 3), (1, 3), (1, 2), (1, 1)]);
        let mut state = SnakeGameState::with_snake(5, snake, Direction::Left, None);
        let snake_before = state.snake().clone();

        let outcome = state.step(&mut rng);

        assert_eq!(outcome, StepOutcome::Died(DeathReason::SelfCollision));
        assert_eq!(state.snake(), &snake_before);
        assert_grid_matches_body(&state);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_collision() {
        let mut rng = SessionRng::new(1);
        // A 2x2 loop: the next cell is the current tail.
        let snake = snake_of(&[(1, 1), (1, 2), (2, 2), (2, 1)]);
        let mut state = SnakeGameState::with_snake(5, snake, Direction::Right, None);

        assert_eq!(state.step(&mut rng), StepOutcome::Died(DeathReason::SelfCollision));
    }

    #[test]
    fn test_eating_food_grows_and_respawns() {
        let mut rng = SessionRng::new(9);
        let snake = snake_of(&[(2, 2), (2, 3)]);
        let mut state =
            SnakeGameState::with_snake(5, snake, Direction::Up, Some(Point::new(2, 1)));

        let outcome = state.step(&mut rng);

        assert!(outcome.grew());
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().tail(), Point::new(2, 3));
        assert_eq!(state.grid().get(Point::new(2, 3)), Some(Cell::Snake));
        assert_eq!(state.score(), 1);

        let StepOutcome::Grew { food: Some(food) } = outcome else {
            panic!("expected a replacement food, got {:?}", outcome);
        };
        assert!(!state.snake().contains(&food));
        assert_eq!(state.grid().positions_of(Cell::Food), vec![food]);
        assert_grid_matches_body(&state);
    }

    #[test]
    fn test_eating_last_free_cell_reports_no_food() {
        let mut rng = SessionRng::new(2);
        let snake = snake_of(&[(0, 1), (1, 1), (1, 0)]);
        let mut state =
            SnakeGameState::with_snake(2, snake, Direction::Up, Some(Point::new(0, 0)));

        assert_eq!(state.step(&mut rng), StepOutcome::Grew { food: None });
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.grid().food(), None);
    }

    #[test]
    fn test_pending_direction_applies_on_next_step() {
        let mut rng = SessionRng::new(1);
        let mut state = SnakeGameState::with_snake(5, snake_of(&[(2, 2)]), Direction::Up, None);

        state.queue_direction(Direction::Right);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.applied_direction(), Direction::Up);

        state.step(&mut rng);
        assert_eq!(state.snake().head(), Point::new(3, 2));
        assert_eq!(state.applied_direction(), Direction::Right);
    }

    #[test]
    fn test_invariant_holds_over_long_walk() {
        let mut rng = SessionRng::new(123);
        let mut state = SnakeGameState::new(8, Point::new(4, 4), &mut rng);
        let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

        for i in 0..200 {
            if i % 3 == 0 {
                let turn = turns[(i / 3) % turns.len()];
                if !turn.is_opposite(&state.applied_direction()) {
                    state.queue_direction(turn);
                }
            }
            let outcome = state.step(&mut rng);
            assert_grid_matches_body(&state);
            assert!(state.grid().positions_of(Cell::Food).len() <= 1);
            if !outcome.is_alive() {
                break;
            }
        }
    }
}

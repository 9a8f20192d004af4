use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    self, BoundaryPolicy, GridSize, INITIAL_SNAKE_LENGTH, INVINCIBILITY_DURATION_TICKS,
    POWER_UP_SPAWN_ONE_IN,
};
use crate::grid::Grid;
use crate::input::Direction;
use crate::snake::{Position, Snake, StatusKind};
use crate::spawner::{self, Food, PowerUp, PowerUpKind};

/// Why a game ended.
///
/// `BoardFull` means the snake consumed the last free cell, leaving
/// nowhere to respawn food; it is shown to the player as a win.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    BoardFull,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Over(GameOverReason),
}

/// Outcome of one simulation step.
///
/// `GameOver` is a normal terminal state of the per-game state machine,
/// not an error; the host reports it and may offer a restart.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[must_use]
pub enum TickResult {
    Continue,
    GameOver(GameOverReason),
}

/// Complete mutable game state for one session.
///
/// Owns the grid, snake, food, optional power-up, and score. Mutated only
/// by [`GameState::tick`]; the renderer reads it immutably.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub power_up: Option<PowerUp>,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    grid: Grid,
    power_ups_enabled: bool,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game with an entropy-seeded RNG.
    #[must_use]
    pub fn new(size: GridSize, boundary: BoundaryPolicy, power_ups_enabled: bool) -> Self {
        Self::with_rng(size, boundary, power_ups_enabled, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible games.
    #[must_use]
    pub fn new_with_seed(
        size: GridSize,
        boundary: BoundaryPolicy,
        power_ups_enabled: bool,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            size,
            boundary,
            power_ups_enabled,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        size: GridSize,
        boundary: BoundaryPolicy,
        power_ups_enabled: bool,
        mut rng: StdRng,
    ) -> Self {
        let grid = Grid::new(size, boundary);
        let snake = Snake::with_length(grid.center(), Direction::Right, INITIAL_SNAKE_LENGTH);
        let food = spawner::spawn_food(&mut rng, grid, &snake, &[])
            .expect("a fresh board must have at least one free cell");

        Self {
            snake,
            food,
            power_up: None,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            grid,
            power_ups_enabled,
            rng,
        }
    }

    /// Returns the immutable board description.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Advances the simulation by exactly one step.
    ///
    /// `input` is the direction requested since the previous tick; `None`
    /// keeps the current heading. Calling `tick` on a finished game is a
    /// no-op that returns the terminal result again.
    pub fn tick(&mut self, input: Option<Direction>) -> TickResult {
        if let GameStatus::Over(reason) = self.status {
            return TickResult::GameOver(reason);
        }

        self.tick_count += 1;

        if let Some(direction) = input {
            self.snake.set_direction(direction);
        }

        let mut next_head = self.snake.head().offset(self.snake.direction());
        match self.grid.policy() {
            BoundaryPolicy::Wrapping => {
                next_head = next_head.wrapped(self.grid.size());
            }
            BoundaryPolicy::Blocking => {
                // Invincibility bypasses self-collision only; the world
                // boundary always ends the game.
                if self.grid.is_wall(next_head) || !self.grid.in_bounds(next_head) {
                    return self.finish(GameOverReason::WallCollision);
                }
            }
        }

        if self.snake.occupies(next_head) && !self.snake.is_invincible() {
            return self.finish(GameOverReason::SelfCollision);
        }

        // Food before power-up; the spawner guarantees the two never share
        // a cell, so at most one branch fires per tick.
        let grew = next_head == self.food.position;
        if grew {
            self.score += config::FOOD_POINTS;
        }

        if self
            .power_up
            .is_some_and(|power_up| power_up.position == next_head)
        {
            let power_up = self.power_up.take().expect("pickup checked above");
            next_head = self.apply_power_up(power_up.kind, next_head);
        }

        self.snake.advance(next_head, grew);

        // Respawn after the body has moved, so the new food can never land
        // on the cell the head just took.
        if grew {
            let occupied = self.occupied();
            match spawner::spawn_food(&mut self.rng, self.grid, &self.snake, &occupied) {
                Some(food) => self.food = food,
                None => return self.finish(GameOverReason::BoardFull),
            }
        }

        self.snake.tick_status();

        if self.power_ups_enabled
            && self.power_up.is_none()
            && self.rng.gen_range(0..POWER_UP_SPAWN_ONE_IN) == 0
        {
            self.power_up =
                spawner::spawn_power_up(&mut self.rng, self.grid, &self.snake, self.food.position);
        }

        TickResult::Continue
    }

    /// Applies a picked-up power-up and returns the (possibly relocated)
    /// head position for this tick.
    fn apply_power_up(&mut self, kind: PowerUpKind, next_head: Position) -> Position {
        match kind {
            PowerUpKind::ScoreBonus => {
                self.score += config::SCORE_BONUS_POINTS;
                next_head
            }
            PowerUpKind::Shrink => {
                self.snake.shrink_by(1);
                next_head
            }
            PowerUpKind::Invincibility => {
                self.snake
                    .apply_status(StatusKind::Invincible, INVINCIBILITY_DURATION_TICKS);
                next_head
            }
            PowerUpKind::Teleport => {
                // The head jumps to a free cell; the tail still follows the
                // normal grow/no-grow rule when the body advances.
                spawner::place(&mut self.rng, self.grid, &self.snake, &[self.food.position])
                    .unwrap_or(next_head)
            }
        }
    }

    fn occupied(&self) -> Vec<Position> {
        self.power_up
            .iter()
            .map(|power_up| power_up.position)
            .collect()
    }

    fn finish(&mut self, reason: GameOverReason) -> TickResult {
        self.status = GameStatus::Over(reason);
        TickResult::GameOver(reason)
    }
}

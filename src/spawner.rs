use rand::Rng;

use crate::grid::Grid;
use crate::snake::{Position, Snake};

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Transient pickup kinds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PowerUpKind {
    ScoreBonus,
    Shrink,
    Invincibility,
    Teleport,
}

impl PowerUpKind {
    /// All kinds, in sampling order.
    pub const ALL: [Self; 4] = [
        Self::ScoreBonus,
        Self::Shrink,
        Self::Invincibility,
        Self::Teleport,
    ];

    /// Samples a kind uniformly.
    #[must_use]
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Power-up entity currently active on the board; at most one exists.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

/// Samples a free playable cell, or `None` when the board is full.
///
/// Candidates are every interior cell not occupied by the snake and not
/// listed in `occupied_extra` (already-placed entities the new one must
/// not cover). Collecting candidates up front keeps the call terminating
/// even on a nearly full board.
#[must_use]
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    occupied_extra: &[Position],
) -> Option<Position> {
    let candidates: Vec<Position> = grid
        .interior()
        .filter(|cell| !snake.occupies(*cell) && !occupied_extra.contains(cell))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Spawns food on a free cell, or `None` when no cell is free.
#[must_use]
pub fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    occupied_extra: &[Position],
) -> Option<Food> {
    place(rng, grid, snake, occupied_extra).map(Food::new)
}

/// Spawns a random-kind power-up on a free cell that avoids the food.
#[must_use]
pub fn spawn_power_up<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    food: Position,
) -> Option<PowerUp> {
    let position = place(rng, grid, snake, &[food])?;
    Some(PowerUp {
        position,
        kind: PowerUpKind::sample(rng),
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::{BoundaryPolicy, GridSize};
    use crate::grid::Grid;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{place, spawn_power_up, PowerUpKind};

    fn blocking_grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height }, BoundaryPolicy::Blocking)
    }

    #[test]
    fn place_never_hits_snake_walls_or_extras() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = blocking_grid(8, 6);
        let snake = Snake::from_segments(
            vec![
                Position { x: 1, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 3, y: 1 },
            ],
            Direction::Left,
        );
        let extra = [Position { x: 4, y: 4 }];

        for _ in 0..100 {
            let cell = place(&mut rng, grid, &snake, &extra).expect("board has free cells");

            assert!(!snake.occupies(cell));
            assert!(!grid.is_wall(cell));
            assert!(grid.in_bounds(cell));
            assert_ne!(cell, extra[0]);
        }
    }

    #[test]
    fn place_returns_none_when_board_is_full() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Grid::new(
            GridSize {
                width: 2,
                height: 2,
            },
            BoundaryPolicy::Wrapping,
        );
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 1, y: 1 },
                Position { x: 0, y: 1 },
            ],
            Direction::Up,
        );

        assert_eq!(place(&mut rng, grid, &snake, &[]), None);
    }

    #[test]
    fn power_up_avoids_the_food_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = blocking_grid(6, 5);
        let snake = Snake::new(Position { x: 2, y: 2 }, Direction::Right);
        let food = Position { x: 3, y: 2 };

        for _ in 0..100 {
            let power_up =
                spawn_power_up(&mut rng, grid, &snake, food).expect("board has free cells");
            assert_ne!(power_up.position, food);
            assert!(!snake.occupies(power_up.position));
        }
    }

    #[test]
    fn sampling_covers_every_power_up_kind() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let kind = PowerUpKind::sample(&mut rng);
            let index = PowerUpKind::ALL
                .iter()
                .position(|k| *k == kind)
                .expect("sampled kind must be listed");
            seen[index] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }
}

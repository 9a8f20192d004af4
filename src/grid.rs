use crate::config::{BoundaryPolicy, GridSize};
use crate::snake::Position;

/// Immutable cell classification for one game board.
///
/// The grid holds no mutable entities; snake, food, and power-up occupancy
/// is derived from the owning [`crate::engine::GameState`] each tick. Under
/// the blocking policy the perimeter ring is wall; under the wrapping
/// policy no cell is a wall and edges continue toroidally.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    policy: BoundaryPolicy,
}

impl Grid {
    /// Creates a grid of `size` under the given boundary policy.
    #[must_use]
    pub fn new(size: GridSize, policy: BoundaryPolicy) -> Self {
        debug_assert!(size.width >= 2 && size.height >= 2);
        Self { size, policy }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn size(self) -> GridSize {
        self.size
    }

    /// Returns the active boundary policy.
    #[must_use]
    pub fn policy(self) -> BoundaryPolicy {
        self.policy
    }

    /// Returns true when the position lies inside the grid's coordinate range.
    #[must_use]
    pub fn in_bounds(self, position: Position) -> bool {
        position.is_within_bounds(self.size)
    }

    /// Returns true when the position is a wall cell.
    #[must_use]
    pub fn is_wall(self, position: Position) -> bool {
        match self.policy {
            BoundaryPolicy::Wrapping => false,
            BoundaryPolicy::Blocking => {
                position.x == 0
                    || position.y == 0
                    || position.x == i32::from(self.size.width) - 1
                    || position.y == i32::from(self.size.height) - 1
            }
        }
    }

    /// Returns the center of the playable area, used as the snake start.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.size.width / 2),
            y: i32::from(self.size.height / 2),
        }
    }

    /// Iterates over every playable (non-wall) cell.
    pub fn interior(self) -> impl Iterator<Item = Position> {
        let (x_range, y_range) = match self.policy {
            BoundaryPolicy::Blocking => (
                1..i32::from(self.size.width) - 1,
                1..i32::from(self.size.height) - 1,
            ),
            BoundaryPolicy::Wrapping => {
                (0..i32::from(self.size.width), 0..i32::from(self.size.height))
            }
        };

        y_range.flat_map(move |y| x_range.clone().map(move |x| Position { x, y }))
    }
}

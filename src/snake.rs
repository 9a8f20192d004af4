use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the neighboring position one cell along `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Kinds of timed status effect a snake can carry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusKind {
    Invincible,
}

/// A timed modifier, decremented once per simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_ticks: u32,
}

/// Mutable snake state: body segments, heading, and status effect.
///
/// The body is a deque with the head at the front. Growth appends through
/// the deque's amortized-doubling buffer, so no manual capacity handling
/// is needed. The body always holds at least one segment.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    status: Option<StatusEffect>,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::with_length(start, direction, 1)
    }

    /// Creates a snake of `length` segments with its head at `start`.
    ///
    /// The body extends opposite the movement direction, so the snake can
    /// immediately advance without stepping onto itself.
    #[must_use]
    pub fn with_length(start: Position, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let mut body = VecDeque::with_capacity(length);
        let mut segment = start;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.offset(direction.opposite());
        }

        Self {
            body,
            direction,
            status: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(
            !segments.is_empty(),
            "snake body must always contain at least one segment"
        );
        Self {
            body: VecDeque::from(segments),
            direction,
            status: None,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Updates the heading, rejecting direct 180° reversals.
    ///
    /// A reversal request is a silent no-op; the snake keeps moving in its
    /// current direction.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested == self.direction.opposite() {
            return;
        }
        self.direction = requested;
    }

    /// Applies one movement step: prepends `new_head` and, unless the
    /// snake grew this tick, drops the tail segment.
    pub fn advance(&mut self, new_head: Position, grew: bool) {
        self.body.push_front(new_head);
        if !grew {
            let _ = self.body.pop_back();
        }
    }

    /// Removes up to `n` tail segments, never shrinking below one segment.
    pub fn shrink_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.body.len() <= 1 {
                break;
            }
            let _ = self.body.pop_back();
        }
    }

    /// Sets or refreshes the timed status effect.
    pub fn apply_status(&mut self, kind: StatusKind, duration_ticks: u32) {
        self.status = Some(StatusEffect {
            kind,
            remaining_ticks: duration_ticks,
        });
    }

    /// Decrements the active status effect, clearing it at zero.
    ///
    /// Called exactly once per simulation tick.
    pub fn tick_status(&mut self) {
        if let Some(effect) = &mut self.status {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            if effect.remaining_ticks == 0 {
                self.status = None;
            }
        }
    }

    /// Returns the active status effect, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusEffect> {
        self.status
    }

    /// Returns true while an invincibility effect is active.
    #[must_use]
    pub fn is_invincible(&self) -> bool {
        matches!(
            self.status,
            Some(StatusEffect {
                kind: StatusKind::Invincible,
                ..
            })
        )
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments (never under the invariant).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

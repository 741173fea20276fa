use std::collections::{HashSet, VecDeque};

use log::trace;
use rand::Rng;

use crate::grid::{Grid, Position};
use crate::input::{direction_change_is_valid, Direction};

/// Mutable snake state: body, heading arbitration and lazy growth.
#[derive(Debug, Clone)]
pub struct Snake {
    grid: Grid,
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    length: usize,
    last_removed: Option<Position>,
}

impl Snake {
    /// Creates a one-cell snake at the grid center with the provided direction.
    #[must_use]
    pub fn new(grid: Grid, direction: Direction) -> Self {
        Self::from_segments(grid, vec![grid.center()], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The target length is the number of segments, so the body keeps its
    /// size until [`Snake::grow`] is called.
    #[must_use]
    pub fn from_segments(grid: Grid, segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one body segment");

        Self {
            grid,
            length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            last_removed: None,
        }
    }

    /// Records `direction` for the next tick unless it reverses the current heading.
    ///
    /// Later valid requests overwrite earlier ones, so several inputs between
    /// two ticks coalesce to the last accepted one.
    pub fn request_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.direction, direction) {
            trace!("rejected reversal {direction:?} while heading {:?}", self.direction);
            return;
        }

        self.pending_direction = Some(direction);
    }

    /// Promotes the pending direction, if any, to the current heading.
    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Moves one cell forward, wrapping at the edges.
    ///
    /// The tail is dropped only once the body exceeds the target length, so
    /// afterwards `len() == min(length, previous len + 1)`.
    pub fn advance(&mut self) {
        let next_head = self.grid.wrap(self.head().stepped(self.direction, 1));
        self.body.push_front(next_head);

        self.last_removed = if self.body.len() > self.length {
            self.body.pop_back()
        } else {
            None
        };
    }

    /// Returns true when the head overlaps a segment at index 2 or later.
    ///
    /// Index 1 always sits next to the head and is never counted.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(2).any(|segment| *segment == head)
    }

    /// Raises the target length; the body catches up on the next advance.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Restores a fresh one-cell snake at the center with a random heading.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.length = 1;
        self.direction = Direction::random(rng);
        self.pending_direction = None;
        self.last_removed = None;
        self.body.clear();
        self.body.push_front(self.grid.center());
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

    /// Returns the set of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Iterates over body segments from head to tail.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the target body length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Tail cell vacated by the latest advance, if the snake did not grow.
    #[must_use]
    pub fn last_removed(&self) -> Option<Position> {
        self.last_removed
    }
}

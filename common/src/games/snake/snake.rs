use std::collections::VecDeque;

use super::types::{Direction, Point};

pub const INITIAL_SNAKE_LENGTH: usize = 2;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    pub direction: Direction,
    pending_directions: VecDeque<Direction>,
}

impl Snake {
    /// Two segments centred on the board, heading up with the tail one cell below the head.
    pub fn centered(grid_size: usize) -> Self {
        let head = Point::new(grid_size / 2, grid_size / 2);
        let tail = Point::new(head.x, head.z - 1);
        Self {
            body: VecDeque::from([head, tail]),
            direction: Direction::Up,
            pending_directions: VecDeque::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_body(body: Vec<Point>, direction: Direction) -> Self {
        assert!(body.len() >= INITIAL_SNAKE_LENGTH);
        Self {
            body: body.into(),
            direction,
            pending_directions: VecDeque::new(),
        }
    }

    // The body never drops below INITIAL_SNAKE_LENGTH segments, so indexing is safe.
    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn cell_in_front(&self) -> Option<Point> {
        self.head().offset(self.direction)
    }

    /// Displacement from the second-to-last segment to the tail.
    pub fn tail_direction(&self) -> Option<Direction> {
        let tail = self.tail();
        let before_tail = self.body[self.body.len() - 2];
        Direction::from_delta(
            tail.x as isize - before_tail.x as isize,
            tail.z as isize - before_tail.z as isize,
        )
    }

    /// Moves the head to `next_head`. Unless `grow` is set the tail is
    /// dropped and returned so the caller can free its cell.
    pub fn advance(&mut self, next_head: Point, grow: bool) -> Option<Point> {
        let vacated = if grow { None } else { self.body.pop_back() };
        self.body.push_front(next_head);
        vacated
    }

    /// Queues `direction` unless the same direction is already waiting anywhere in the queue.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.pending_directions.contains(&direction) {
            return false;
        }
        self.pending_directions.push_back(direction);
        true
    }

    pub fn take_pending_direction(&mut self) -> Option<Direction> {
        self.pending_directions.pop_front()
    }

    pub fn pending_directions(&self) -> impl ExactSizeIterator<Item = Direction> + '_ {
        self.pending_directions.iter().copied()
    }
}

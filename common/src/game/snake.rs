use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Snake body: front of the deque is the head. The set mirrors the deque for
/// O(1) occupancy checks and is kept in lock-step with it.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

#[allow(clippy::len_without_is_empty)]
impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(start_pos);
        body_set.insert(start_pos);

        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    /// Body length; never less than one.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// The cell the head would move into, in grid coordinates that may fall
    /// outside the field. Bounds checking belongs to the collision engine, so
    /// the result is signed.
    pub fn next_head(&self) -> (i64, i64) {
        let head = self.head();
        let (dx, dy) = match self.direction {
            Direction::Up => (0i64, -1i64),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        };
        (head.x as i64 + dx, head.y as i64 + dy)
    }

    /// Prepends the new head without removing the tail; used on a growth event.
    pub fn grow(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    /// Prepends the new head and vacates the tail; net length is unchanged.
    pub fn step(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
        let tail = self
            .body
            .pop_back()
            .expect("Snake body should never be empty");
        // The head may have moved into the vacated tail cell.
        if !self.body.contains(&tail) {
            self.body_set.remove(&tail);
        }
    }
}

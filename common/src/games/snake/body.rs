use std::collections::{HashSet, VecDeque};

use super::types::Point;

// Head first. `body_set` mirrors `body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(head: Point) -> Self {
        Self {
            body: VecDeque::from([head]),
            body_set: HashSet::from([head]),
        }
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Option<Self> {
        let body: VecDeque<Point> = segments.into_iter().collect();
        let body_set: HashSet<Point> = body.iter().copied().collect();
        if body.is_empty() || body_set.len() != body.len() {
            return None;
        }
        Some(Self { body, body_set })
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: &Point) -> bool {
        self.body_set.contains(pos)
    }

    pub fn occupied(&self) -> &HashSet<Point> {
        &self.body_set
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub(crate) fn push_head(&mut self, pos: Point) {
        self.body.push_front(pos);
        self.body_set.insert(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Point> {
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}

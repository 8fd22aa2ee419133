use std::collections::HashSet;

use crate::games::SessionRng;
use super::types::{Cell, Point};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(size: usize, initial_head: Point) -> Self {
        let mut grid = Self {
            size,
            rows: vec![vec![Cell::Empty; size]; size],
        };
        grid.set(initial_head, Cell::Snake);
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Point) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn get(&self, pos: Point) -> Option<Cell> {
        self.rows.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub(crate) fn set(&mut self, pos: Point, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *slot = cell;
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cells(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Point::new(x, y), *cell))
        })
    }

    pub fn positions_of(&self, cell: Cell) -> Vec<Point> {
        self.cells()
            .filter(|(_, c)| *c == cell)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn food(&self) -> Option<Point> {
        self.cells()
            .find(|(_, cell)| *cell == Cell::Food)
            .map(|(pos, _)| pos)
    }

    pub fn place_food(&mut self, occupied: &HashSet<Point>, rng: &mut SessionRng) -> Option<Point> {
        let free: Vec<Point> = self
            .cells()
            .filter(|(pos, cell)| *cell == Cell::Empty && !occupied.contains(pos))
            .map(|(pos, _)| pos)
            .collect();

        let pos = free[rng.pick_index(free.len())?];
        self.set(pos, Cell::Food);
        Some(pos)
    }
}

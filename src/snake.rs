use std::collections::VecDeque;

use crate::board::Cell;

/// Ordered snake body: tail at the front, head at the back.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a snake from cells ordered tail first, head last.
    ///
    /// # Panics
    ///
    /// Panics when `cells` is empty.
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "snake needs at least one cell");
        Self { body }
    }

    /// Replaces the body with `cells`, tail first.
    pub fn initialize(&mut self, cells: impl IntoIterator<Item = Cell>) {
        *self = Self::new(cells);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Pushes `cell` as the new head. The caller marks the board.
    pub fn advance_head(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    /// Removes and returns the tail. The caller marks the board.
    ///
    /// A one-cell snake keeps its only cell and returns `None`.
    pub fn retract_tail(&mut self) -> Option<Cell> {
        if self.body.len() <= 1 {
            return None;
        }
        self.body.pop_front()
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

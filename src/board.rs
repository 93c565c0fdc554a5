use rand::Rng;
use thiserror::Error;

use crate::input::Direction;

/// Grid cell addressed by zero-based row and column.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`, or `None` when
    /// the step would leave a `size`×`size` board.
    ///
    /// Horizontal steps never change the row: moving right from the last
    /// column is off the board, not the first cell of the next row.
    #[must_use]
    pub fn step(self, direction: Direction, size: u16) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        let row = i32::from(self.row) + d_row;
        let col = i32::from(self.col) + d_col;

        let axis = 0..i32::from(size);
        if !axis.contains(&row) || !axis.contains(&col) {
            return None;
        }

        Some(Self {
            row: u16::try_from(row).ok()?,
            col: u16::try_from(col).ok()?,
        })
    }
}

/// State of one board cell. Every cell holds exactly one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
    Food,
}

/// Food could not be placed because every cell is taken.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no empty cells left on the board")]
pub struct NoEmptyCells;

const NOT_EMPTY: usize = usize::MAX;

/// Square grid of cell states with an incrementally maintained empty set.
///
/// `empty` lists the flat indices of every Empty cell in no particular
/// order; `empty_slot[i]` is the position of index `i` inside `empty`, or
/// `NOT_EMPTY`. Both are updated in O(1) by swap-removal.
#[derive(Debug, Clone)]
pub struct Board {
    size: u16,
    cells: Vec<CellState>,
    empty: Vec<usize>,
    empty_slot: Vec<usize>,
}

impl Board {
    /// Creates a `size`×`size` board with every cell Empty.
    #[must_use]
    pub fn new(size: u16) -> Self {
        let total = usize::from(size) * usize::from(size);
        Self {
            size,
            cells: vec![CellState::Empty; total],
            empty: (0..total).collect(),
            empty_slot: (0..total).collect(),
        }
    }

    /// Resets the board to `size`×`size`, all Empty.
    pub fn initialize(&mut self, size: u16) {
        *self = Self::new(size);
    }

    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Returns the state of `cell`.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the board.
    #[must_use]
    pub fn state(&self, cell: Cell) -> CellState {
        self.cells[self.index_of(cell)]
    }

    /// Sets the state of `cell`, keeping the empty set in step.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the board.
    pub fn set_cell_state(&mut self, cell: Cell, state: CellState) {
        let index = self.index_of(cell);
        self.cells[index] = state;

        let tracked = self.empty_slot[index] != NOT_EMPTY;
        match (state, tracked) {
            (CellState::Empty, false) => {
                self.empty_slot[index] = self.empty.len();
                self.empty.push(index);
            }
            (CellState::Occupied | CellState::Food, true) => self.untrack(index),
            _ => {}
        }
    }

    /// Picks a uniformly random Empty cell.
    pub fn pick_random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Cell, NoEmptyCells> {
        if self.empty.is_empty() {
            return Err(NoEmptyCells);
        }

        let index = self.empty[rng.gen_range(0..self.empty.len())];
        Ok(self.cell_at(index))
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// Iterates over every cell with its state, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, state)| (self.cell_at(index), *state))
    }

    fn untrack(&mut self, index: usize) {
        let slot = self.empty_slot[index];
        self.empty.swap_remove(slot);
        if let Some(&moved) = self.empty.get(slot) {
            self.empty_slot[moved] = slot;
        }
        self.empty_slot[index] = NOT_EMPTY;
    }

    fn index_of(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "cell ({}, {}) is outside the {}×{} board",
            cell.row,
            cell.col,
            self.size,
            self.size,
        );
        usize::from(cell.row) * usize::from(self.size) + usize::from(cell.col)
    }

    fn cell_at(&self, index: usize) -> Cell {
        let size = usize::from(self.size);
        // index < size * size, so both parts fit in u16
        Cell {
            row: (index / size) as u16,
            col: (index % size) as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Board, Cell, CellState, NoEmptyCells};
    use crate::input::Direction;

    fn empty_set_matches_grid(board: &Board) -> bool {
        let from_grid: HashSet<Cell> = board
            .cells()
            .filter(|(_, state)| *state == CellState::Empty)
            .map(|(cell, _)| cell)
            .collect();
        let tracked: HashSet<Cell> = board.empty.iter().map(|&i| board.cell_at(i)).collect();
        from_grid == tracked && tracked.len() == board.empty.len()
    }

    #[test]
    fn new_board_is_all_empty() {
        let board = Board::new(10);

        assert_eq!(board.total_cells(), 100);
        assert_eq!(board.empty_count(), 100);
        assert!(board.cells().all(|(_, state)| state == CellState::Empty));
    }

    #[test]
    fn setting_states_keeps_empty_set_consistent() {
        let mut board = Board::new(5);

        board.set_cell_state(Cell::new(0, 0), CellState::Occupied);
        board.set_cell_state(Cell::new(4, 4), CellState::Food);
        board.set_cell_state(Cell::new(2, 3), CellState::Occupied);
        assert_eq!(board.empty_count(), 22);
        assert!(empty_set_matches_grid(&board));

        board.set_cell_state(Cell::new(0, 0), CellState::Empty);
        board.set_cell_state(Cell::new(4, 4), CellState::Occupied);
        assert_eq!(board.empty_count(), 23);
        assert!(empty_set_matches_grid(&board));
    }

    #[test]
    fn repeated_state_writes_do_not_duplicate_entries() {
        let mut board = Board::new(3);

        board.set_cell_state(Cell::new(1, 1), CellState::Empty);
        board.set_cell_state(Cell::new(1, 1), CellState::Occupied);
        board.set_cell_state(Cell::new(1, 1), CellState::Food);

        assert_eq!(board.empty_count(), 8);
        assert!(empty_set_matches_grid(&board));
    }

    #[test]
    fn random_pick_only_returns_empty_cells() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new(4);
        for col in 0..4 {
            board.set_cell_state(Cell::new(0, col), CellState::Occupied);
            board.set_cell_state(Cell::new(2, col), CellState::Occupied);
        }

        for _ in 0..100 {
            let cell = board
                .pick_random_empty_cell(&mut rng)
                .expect("half the board is empty");
            assert_eq!(board.state(cell), CellState::Empty);
        }
    }

    #[test]
    fn random_pick_on_full_board_fails() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(2);
        for row in 0..2 {
            for col in 0..2 {
                board.set_cell_state(Cell::new(row, col), CellState::Occupied);
            }
        }

        assert_eq!(board.pick_random_empty_cell(&mut rng), Err(NoEmptyCells));
    }

    #[test]
    fn initialize_clears_previous_state() {
        let mut board = Board::new(3);
        board.set_cell_state(Cell::new(1, 2), CellState::Food);

        board.initialize(4);

        assert_eq!(board.size(), 4);
        assert_eq!(board.empty_count(), 16);
        assert_eq!(board.state(Cell::new(1, 2)), CellState::Empty);
    }

    #[test]
    #[should_panic(expected = "outside the 3×3 board")]
    fn out_of_range_cell_fails_fast() {
        let mut board = Board::new(3);
        board.set_cell_state(Cell::new(3, 0), CellState::Occupied);
    }

    #[test]
    fn step_stays_inside_the_row() {
        assert_eq!(Cell::new(0, 9).step(Direction::Right, 10), None);
        assert_eq!(Cell::new(5, 0).step(Direction::Left, 10), None);
        assert_eq!(Cell::new(0, 4).step(Direction::Up, 10), None);
        assert_eq!(Cell::new(9, 4).step(Direction::Down, 10), None);
        assert_eq!(
            Cell::new(3, 3).step(Direction::Right, 10),
            Some(Cell::new(3, 4))
        );
        assert_eq!(
            Cell::new(3, 3).step(Direction::Down, 10),
            Some(Cell::new(4, 3))
        );
    }
}

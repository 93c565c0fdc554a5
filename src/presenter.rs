use crate::board::{Cell, CellState};
use crate::game::GameEnding;

/// Display capability driven by the game session.
///
/// The session only ever pushes changes; implementations keep whatever they
/// need to redraw.
pub trait Presenter {
    /// Paints `cell` as `state`.
    fn render_cell(&mut self, cell: Cell, state: CellState);

    /// Shows the current score.
    fn render_score(&mut self, score: u32);

    /// Shows the terminal-state banner.
    fn show_game_over(&mut self, ending: GameEnding);

    /// Hides the terminal-state banner.
    fn hide_game_over(&mut self);

    /// Enables or disables the start control.
    fn set_start_enabled(&mut self, enabled: bool);
}

/// Retained model of what the terminal should show, painted by
/// [`crate::renderer::render`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TerminalScreen {
    size: u16,
    cells: Vec<CellState>,
    score: u32,
    banner: Option<GameEnding>,
    start_enabled: bool,
}

impl TerminalScreen {
    /// Creates a blank `size`×`size` screen with the start control enabled.
    #[must_use]
    pub fn new(size: u16) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; usize::from(size) * usize::from(size)],
            score: 0,
            banner: None,
            start_enabled: true,
        }
    }

    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Returns the last state painted at `cell`; Empty when out of range.
    #[must_use]
    pub fn cell(&self, cell: Cell) -> CellState {
        self.slot(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn banner(&self) -> Option<GameEnding> {
        self.banner
    }

    #[must_use]
    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    fn slot(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.size && cell.col < self.size)
            .then(|| usize::from(cell.row) * usize::from(self.size) + usize::from(cell.col))
    }
}

impl Presenter for TerminalScreen {
    fn render_cell(&mut self, cell: Cell, state: CellState) {
        let Some(index) = self.slot(cell) else {
            log::warn!("ignoring paint outside the screen at {cell:?}");
            return;
        };
        self.cells[index] = state;
    }

    fn render_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_game_over(&mut self, ending: GameEnding) {
        self.banner = Some(ending);
    }

    fn hide_game_over(&mut self) {
        self.banner = None;
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::{Presenter, TerminalScreen};
    use crate::board::{Cell, CellState};
    use crate::game::{GameEnding, InvalidMove};

    #[test]
    fn new_screen_is_idle() {
        let screen = TerminalScreen::new(10);

        assert_eq!(screen.cell(Cell::new(4, 4)), CellState::Empty);
        assert_eq!(screen.score(), 0);
        assert_eq!(screen.banner(), None);
        assert!(screen.start_enabled());
    }

    #[test]
    fn screen_retains_painted_state() {
        let mut screen = TerminalScreen::new(10);

        screen.render_cell(Cell::new(0, 3), CellState::Occupied);
        screen.render_cell(Cell::new(7, 1), CellState::Food);
        screen.render_score(5);
        screen.show_game_over(GameEnding::Collision(InvalidMove::SelfCollision));
        screen.set_start_enabled(false);

        assert_eq!(screen.cell(Cell::new(0, 3)), CellState::Occupied);
        assert_eq!(screen.cell(Cell::new(7, 1)), CellState::Food);
        assert_eq!(screen.score(), 5);
        assert_eq!(
            screen.banner(),
            Some(GameEnding::Collision(InvalidMove::SelfCollision))
        );
        assert!(!screen.start_enabled());

        screen.hide_game_over();
        assert_eq!(screen.banner(), None);
    }

    #[test]
    fn out_of_range_paint_is_ignored() {
        let mut screen = TerminalScreen::new(3);

        screen.render_cell(Cell::new(5, 5), CellState::Food);

        assert_eq!(screen.cell(Cell::new(5, 5)), CellState::Empty);
    }
}

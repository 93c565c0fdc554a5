use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::board::{Cell, CellState};
use crate::config::{
    COLOR_BORDER, COLOR_EMPTY, COLOR_FOOD, COLOR_SNAKE, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE,
};
use crate::presenter::TerminalScreen;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Terminal columns used by one board cell.
pub const CELL_WIDTH: u16 = 2;

/// Renders the full frame from the retained screen model.
pub fn render(frame: &mut Frame<'_>, screen: &TerminalScreen) {
    let [board_row, hud_row] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let board_area = centered(board_row, board_outer_size(screen.size()));
    let block = Block::bordered().border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_cells(frame, inner, screen);
    render_hud(frame, hud_row, screen.score(), screen.start_enabled());

    match screen.banner() {
        Some(ending) => render_game_over_menu(frame, board_row, screen.score(), ending),
        None if screen.start_enabled() => render_start_menu(frame, board_row),
        None => {}
    }
}

/// Width and height of the bordered board, in terminal cells.
#[must_use]
pub fn board_outer_size(size: u16) -> (u16, u16) {
    (
        size.saturating_mul(CELL_WIDTH).saturating_add(2),
        size.saturating_add(2),
    )
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, screen: &TerminalScreen) {
    let buffer = frame.buffer_mut();
    for row in 0..screen.size() {
        for col in 0..screen.size() {
            let cell = Cell::new(row, col);
            let Some((x, y)) = logical_to_terminal(inner, cell) else {
                continue;
            };

            let (glyph, style) = match screen.cell(cell) {
                CellState::Empty => (GLYPH_EMPTY, Style::new().fg(COLOR_EMPTY)),
                CellState::Occupied => (
                    GLYPH_SNAKE,
                    Style::new().fg(COLOR_SNAKE).add_modifier(Modifier::BOLD),
                ),
                CellState::Food => (GLYPH_FOOD, Style::new().fg(COLOR_FOOD)),
            };
            buffer.set_string(x, y, glyph, style);
        }
    }
}

fn logical_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x = inner.x.checked_add(cell.col.checked_mul(CELL_WIDTH)?)?;
    let y = inner.y.checked_add(cell.row)?;
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

/// Returns a `width`×`height` rectangle centered in `area`, shrunk to fit.
#[must_use]
pub fn centered(area: Rect, (width, height): (u16, u16)) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(column);
    rect
}

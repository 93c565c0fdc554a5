use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::COLOR_MUTED;
use crate::game::GameEnding;
use crate::renderer::centered;

/// Draws the start prompt as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = [
        "SNAKE".to_owned(),
        String::new(),
        "[Space]/[Enter] Start".to_owned(),
        "[Q] Quit".to_owned(),
    ];
    render_popup(frame, area, " start ", &lines, Color::Green);
}

/// Draws the terminal-state banner as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, ending: GameEnding) {
    let (title, cause) = match ending {
        GameEnding::Collision(reason) => ("GAME OVER", format!("Cause: {reason}")),
        GameEnding::BoardFull => ("YOU WIN", "The board is full".to_owned()),
    };
    let lines = [
        title.to_owned(),
        String::new(),
        format!("Score: {score}"),
        cause,
        String::new(),
        "[Space]/[Enter] Play Again".to_owned(),
        "[Q] Quit".to_owned(),
    ];
    render_popup(frame, area, " game over ", &lines, Color::Red);
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[String], accent: Color) {
    let width = lines
        .iter()
        .map(|line| line.width())
        .max()
        .unwrap_or(0)
        .saturating_add(4);
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);

    let popup = centered(area, (width, height));
    frame.render_widget(Clear, popup);

    let text: Vec<Line<'_>> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                Line::styled(
                    line.as_str(),
                    Style::new().fg(accent).add_modifier(Modifier::BOLD),
                )
            } else if line.starts_with('[') {
                Line::styled(line.as_str(), Style::new().fg(COLOR_MUTED))
            } else {
                Line::from(line.as_str())
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

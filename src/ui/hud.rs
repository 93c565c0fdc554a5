use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{COLOR_MUTED, COLOR_SCORE};

const HUD_MARGIN_X: u16 = 1;

/// Renders the one-line HUD: score on the left, controls on the right.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32, start_enabled: bool) {
    let area = inset_horizontal(area, HUD_MARGIN_X);
    let [score_area, controls_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Score: ", Style::new().fg(COLOR_MUTED)),
            Span::styled(
                score.to_string(),
                Style::new().fg(COLOR_SCORE).add_modifier(Modifier::BOLD),
            ),
        ])),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(controls_line(start_enabled)).alignment(Alignment::Right),
        controls_area,
    );
}

fn controls_line(start_enabled: bool) -> Line<'static> {
    let start_style = if start_enabled {
        Style::new().fg(COLOR_SCORE)
    } else {
        Style::new()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    };

    Line::from(vec![
        Span::styled("Start ", start_style),
        Span::styled("Move ←↑↓→ ", Style::new().fg(COLOR_MUTED)),
        Span::styled("Quit q", Style::new().fg(COLOR_MUTED)),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

pub mod menu;
pub mod round;
pub mod tabs;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Difficulty bar
            Constraint::Min(0),   // Content
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.screen {
        Screen::Menu => menu::render_menu(frame, chunks[1], app),
        Screen::Playing => {
            if let Some(round) = app.round.as_ref() {
                round::render_round(frame, chunks[1], round);
            }
        }
        Screen::Result(report) => {
            if let Some(round) = app.round.as_ref() {
                round::render_round(frame, chunks[1], round);
            }
            round::render_result(frame, chunks[1], &report);
        }
    }

    render_status(frame, chunks[2], app.status.as_ref().map(|(text, _)| text.as_str()));
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let Some(text) = status else { return };
    let line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(Color::Rgb(255, 220, 80))),
        Span::styled(
            text.to_string(),
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Centers a `w` x `h` box inside `area`, shrinking it to fit.
pub(crate) fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let overlay_w = w.min(area.width.saturating_sub(4));
    let overlay_h = h.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    Rect::new(x, y, overlay_w, overlay_h)
}

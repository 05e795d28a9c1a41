use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};
use crate::game::{ConfigKey, DifficultyLevel};

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    // During a round the bar shows the round's own difficulty.
    let (current, parameter) = match (app.screen, app.round.as_ref()) {
        (Screen::Playing | Screen::Result(_), Some(round)) => (round.key().difficulty, round.key().parameter),
        _ => {
            let key = app.selected_key();
            (key.difficulty, key.parameter)
        }
    };

    let titles: Vec<Line> = DifficultyLevel::all()
        .iter()
        .map(|d| {
            let unlocked = app.is_unlocked(ConfigKey::new(*d, parameter));
            let label = if unlocked {
                format!(" {} ", d.title())
            } else {
                format!(" 🔒 {} ", d.title())
            };
            let style = if *d == current {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else if unlocked {
                Style::default().fg(Color::Rgb(120, 120, 140))
            } else {
                Style::default().fg(Color::Rgb(70, 70, 85))
            };
            Line::from(Span::styled(label, style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(format!(" 🧮 ThinkFaster · {} ", parameter.title()))
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(current.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}

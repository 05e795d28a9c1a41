use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::conveyor::{BASE_Y, STEP};
use crate::game::score::Verdict;
use crate::game::{GameRound, RoundOutcome, RoundReport};

const GOOD_COLOR: Color = Color::Rgb(80, 220, 80);
const WRONG_COLOR: Color = Color::Rgb(220, 80, 80);

pub fn render_round(frame: &mut Frame, area: Rect, round: &GameRound) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(180, 100, 220)))
        .title(format!(" 🧮 {} ", round.key()))
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Life bar
            Constraint::Length(1), // Counters
            Constraint::Min(6),    // Conveyor
            Constraint::Length(3), // Buttons
        ])
        .split(inner);

    let life = round.life_bar();
    let remaining = 1.0 - life.fraction();
    let gauge_color = if remaining > 0.5 {
        Color::Rgb(80, 200, 120)
    } else if remaining > 0.2 {
        Color::Rgb(255, 200, 60)
    } else {
        Color::Rgb(230, 70, 70)
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gauge_color).bg(Color::Rgb(30, 30, 40)))
        .ratio(remaining)
        .label(format!("{:.0}s", life.remaining_secs().ceil()));
    frame.render_widget(gauge, chunks[0]);

    let score = round.score();
    let counters = Line::from(vec![
        Span::styled(
            format!(" ✘ Wrong clicks: {} ", score.wrong()),
            Style::default().fg(WRONG_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Score: {} ", score.score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("✔ Good clicks: {} ", score.good()),
            Style::default().fg(GOOD_COLOR).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(counters).alignment(Alignment::Center), chunks[1]);

    let lines = conveyor_lines(round, chunks[2].height as usize);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[2]);

    render_buttons(frame, chunks[3], round.last_verdict());
}

/// Lays the equations out by their animated y, top of the field first.
fn conveyor_lines(round: &GameRound, height: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(""); height];
    if height == 0 {
        return lines;
    }

    let conveyor = round.conveyor();
    let top = conveyor.top_y();
    let floor = BASE_Y - STEP;
    let span = (top - floor).max(1.0);

    for (i, eq) in conveyor.iter().enumerate() {
        let t = ((top - eq.y) / span).clamp(0.0, 1.0);
        let row = (t * (height - 1) as f32).round() as usize;
        let text = if i == 0 {
            Span::styled(
                format!("▶  {}  ◀", eq),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("{}", eq), Style::default().fg(Color::Rgb(150, 150, 170)))
        };
        lines[row] = Line::from(text);
    }
    lines
}

fn render_buttons(frame: &mut Frame, area: Rect, last: Option<Verdict>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let flash = |verdict: Verdict, color: Color| {
        if last == Some(verdict) {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(60, 60, 80))
        }
    };

    let no = Paragraph::new("← N   Incorrect")
        .alignment(Alignment::Center)
        .style(Style::default().fg(WRONG_COLOR))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(flash(Verdict::Wrong, WRONG_COLOR)),
        );
    let yes = Paragraph::new("Correct   Y →")
        .alignment(Alignment::Center)
        .style(Style::default().fg(GOOD_COLOR))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(flash(Verdict::Good, GOOD_COLOR)),
        );
    frame.render_widget(no, cols[0]);
    frame.render_widget(yes, cols[1]);
}

pub fn render_result(frame: &mut Frame, area: Rect, report: &RoundReport) {
    let overlay_area = super::centered(area, 44, 12);
    frame.render_widget(Clear, overlay_area);

    let (title, color, message) = match report.outcome {
        RoundOutcome::Win => (" 🏆 NEW RECORD! ", Color::Rgb(255, 220, 80), "Best score for this level!"),
        RoundOutcome::HalfWin => (" ✔ LEVEL PASSED ", Color::Rgb(80, 220, 80), "Good, but not your best."),
        RoundOutcome::Lose => (" 💀 TIME'S UP ", Color::Rgb(230, 70, 70), "Keep practising!"),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  🎮 ", Style::default()),
            Span::styled(
                report.key.to_string(),
                Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  Score: {}", report.score),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled(format!("  ✔ {} good", report.good), Style::default().fg(GOOD_COLOR)),
            Span::styled("   ", Style::default()),
            Span::styled(format!("✘ {} wrong", report.wrong), Style::default().fg(WRONG_COLOR)),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!("  {message}"), Style::default().fg(Color::Rgb(180, 180, 200)))),
    ];
    if report.ledger_degraded {
        lines.push(Line::from(Span::styled(
            "  Records unavailable, score not saved",
            Style::default().fg(Color::Rgb(140, 80, 80)),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" menu  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("R", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" retry", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}

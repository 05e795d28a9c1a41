use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::{ConfigKey, DifficultyLevel, MathParameter};
use crate::scores::HighScoreRecord;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════╗
 ║  ▀█▀ █ █ █ █▄ █ █▄▀   █▀▀ ▄▀█ █▀ ▀█▀ █▀▀ █▀█      ║
 ║   █  █▀█ █ █ ▀█ █ █   █▀  █▀█ ▄█  █  ██▄ █▀▄      ║
 ╚════════════════════════════════════════════════════╝"#;

struct ParameterTile {
    icon: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const PARAMETER_TILES: [ParameterTile; 5] = [
    ParameterTile { icon: "➕", desc: "Sums", color: Color::Rgb(80, 220, 80), border_color: Color::Rgb(40, 120, 40) },
    ParameterTile { icon: "➖", desc: "Differences", color: Color::Rgb(220, 80, 80), border_color: Color::Rgb(120, 40, 40) },
    ParameterTile { icon: "✖", desc: "Products", color: Color::Rgb(200, 120, 255), border_color: Color::Rgb(100, 60, 140) },
    ParameterTile { icon: "➗", desc: "Quotients", color: Color::Rgb(100, 180, 255), border_color: Color::Rgb(50, 90, 140) },
    ParameterTile { icon: "🎲", desc: "All four", color: Color::Rgb(255, 160, 60), border_color: Color::Rgb(140, 80, 30) },
];

fn render_parameter_tile(
    frame: &mut Frame,
    area: Rect,
    parameter: MathParameter,
    record: Option<HighScoreRecord>,
    unlocked: bool,
    selected: bool,
) {
    let tile = &PARAMETER_TILES[parameter.index()];
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let name_color = if !unlocked {
        Color::Rgb(80, 80, 95)
    } else if selected {
        Color::Rgb(255, 255, 255)
    } else {
        tile.color
    };
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(format!("{} ", tile.icon), Style::default()),
            Span::styled(parameter.title(), Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(tile.desc, Style::default().fg(Color::Rgb(120, 120, 140)))),
    ];

    if !unlocked {
        lines.push(Line::from(Span::styled("🔒 Locked", Style::default().fg(Color::Rgb(140, 80, 80)))));
    } else {
        let best = match record {
            Some(r) if r.best > 0 => format!("🏆 {}", r.best),
            Some(_) => "No record".to_string(),
            None => "Records offline".to_string(),
        };
        lines.push(Line::from(Span::styled(best, Style::default().fg(Color::Rgb(255, 215, 0)))));
    }

    if selected && unlocked {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn controls() -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Rgb(80, 200, 255));
    let text_style = Style::default().fg(Color::Rgb(140, 140, 140));
    let rows = [
        ("    ← / →            ", "Pick operation"),
        ("    ↑ / ↓            ", "Pick difficulty"),
        ("    Enter            ", "Start round"),
        ("    H                ", "Records"),
        ("    Q                ", "Quit"),
    ];
    let mut lines = vec![Line::from("")];
    lines.extend(rows.iter().map(|(key, what)| {
        Line::from(vec![Span::styled(*key, key_style), Span::styled(*what, text_style)])
    }));
    lines
}

fn how_to_play(minimum_to_unlock: i32) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Rgb(80, 200, 255));
    let text_style = Style::default().fg(Color::Rgb(140, 140, 140));
    let dim = Style::default().fg(Color::Rgb(100, 100, 120));
    vec![
        Line::from(""),
        Line::from(Span::styled("  Judge the bottom equation before it drops!", dim)),
        Line::from(""),
        Line::from(vec![Span::styled("    → / Y            ", key_style), Span::styled("It is correct", text_style)]),
        Line::from(vec![Span::styled("    ← / N            ", key_style), Span::styled("It is wrong", text_style)]),
        Line::from(vec![Span::styled("    Esc              ", key_style), Span::styled("Give up", text_style)]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Beat your record with more than {minimum_to_unlock} to unlock"),
            dim,
        )),
        Line::from(Span::styled("  the next difficulty.", dim)),
    ]
}

pub fn render_menu(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Banner
            Constraint::Length(7),  // Tiles
            Constraint::Min(8),     // Controls
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let selected = app.selected_key();
    let tile_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(chunks[1]);
    for (i, parameter) in MathParameter::all().iter().enumerate() {
        let key = ConfigKey::new(selected.difficulty, *parameter);
        let record = app.ledger.record_for(key).ok();
        render_parameter_tile(
            frame,
            tile_cols[i],
            *parameter,
            record,
            app.is_unlocked(key),
            *parameter == selected.parameter,
        );
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    let controls = Paragraph::new(controls()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(" ⌨ Menu ")
            .title_style(Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let tile = &PARAMETER_TILES[selected.parameter.index()];
    let play = Paragraph::new(how_to_play(app.settings.minimum_score_to_unlock)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(format!(" 🎮 {} ", selected))
            .title_style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(play, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" Records", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);

    if app.show_records {
        render_records_overlay(frame, area, app);
    }
}

fn render_records_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let overlay_area = super::centered(area, 62, 12);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" 🏆 Records ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let header_style = Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(DifficultyLevel::all().iter().map(|d| Cell::from(d.title())))
            .collect::<Vec<_>>(),
    )
    .style(header_style);

    let rows: Vec<Row> = MathParameter::all()
        .iter()
        .map(|parameter| {
            let tile = &PARAMETER_TILES[parameter.index()];
            let mut cells = vec![Cell::from(Span::styled(
                format!("{} {}", tile.icon, parameter.title()),
                Style::default().fg(tile.color),
            ))];
            for difficulty in DifficultyLevel::all() {
                let key = ConfigKey::new(*difficulty, *parameter);
                let cell = if !app.is_unlocked(key) {
                    Span::styled("🔒", Style::default().fg(Color::Rgb(80, 80, 95)))
                } else {
                    match app.ledger.record_for(key) {
                        Ok(r) if r.best > 0 => Span::styled(
                            r.best.to_string(),
                            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
                        ),
                        Ok(_) => Span::styled("-", Style::default().fg(Color::Rgb(60, 60, 80))),
                        Err(_) => Span::styled("?", Style::default().fg(Color::Rgb(140, 80, 80))),
                    }
                };
                cells.push(Cell::from(cell));
            }
            Row::new(cells)
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(20), Constraint::Length(10), Constraint::Length(10), Constraint::Length(10)],
    )
    .header(header)
    .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(table, sections[0]);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to close", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]));
    frame.render_widget(hint, sections[1]);
}

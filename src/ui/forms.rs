//! The account and configuration screens: welcome menu, login and
//! registration forms, and the pre-game settings panel.

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Form, CONFIG_COLOR, CONFIG_FIRE_KEY, CONFIG_START, CONFIG_TIME};
use crate::config::COLOR_CHOICES;
use crate::ui::{centered, key_label};

const BANNER: &str = r#"
  ███████╗████████╗ █████╗ ██████╗  ██████╗ █████╗ ██████╗ ███████╗
  ██╔════╝╚══██╔══╝██╔══██╗██╔══██╗██╔════╝██╔══██╗██╔══██╗██╔════╝
  ███████╗   ██║   ███████║██████╔╝██║     ███████║██║  ██║█████╗
  ╚════██║   ██║   ██╔══██║██╔══██╗██║     ██╔══██║██║  ██║██╔══╝
  ███████║   ██║   ██║  ██║██║  ██║╚██████╗██║  ██║██████╔╝███████╗
  ╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝"#;

const ACCENT: Color = Color::Rgb(255, 220, 80);
const DIM: Color = Color::Rgb(120, 120, 140);
const HINT: Color = Color::Rgb(80, 200, 255);
const ERROR: Color = Color::Rgb(255, 90, 90);
const NOTICE: Color = Color::Rgb(80, 220, 120);

pub fn render_welcome(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = BANNER
        .lines()
        .skip(1)
        .map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default().fg(Color::Rgb(100, 255, 100)),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Defend the bottom of the screen. Outlast the clock.",
        Style::default().fg(DIM),
    )));
    lines.push(Line::from(""));
    lines.push(menu_line("L", "Log in"));
    lines.push(menu_line("R", "Register"));
    lines.push(menu_line("Q", "Quit"));

    let target = centered(area, 70, lines.len() as u16 + 2);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)));
    let inner = block.inner(target);
    frame.render_widget(block, target);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn menu_line(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(Color::White)),
    ])
}

pub fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    render_form(frame, area, " Log in ", &app.login_form, &app.notice);
}

pub fn render_register(frame: &mut Frame, area: Rect, app: &App) {
    render_form(frame, area, " Register ", &app.register_form, "");
}

fn render_form(frame: &mut Frame, area: Rect, title: &str, form: &Form, notice: &str) {
    let height = form.fields.len() as u16 * 2 + 7;
    let target = centered(area, 52, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(title)
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let inner = block.inner(target);
    frame.render_widget(Clear, target);
    frame.render_widget(block, target);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let shown: String = if field.masked {
            "*".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if focused { "_" } else { "" };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(180, 180, 200))
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} {:<17}", if focused { "▶" } else { " " }, field.label),
                Style::default().fg(if focused { ACCENT } else { DIM }),
            ),
            Span::styled(format!("{}{}", shown, cursor), value_style),
        ]));
        lines.push(Line::from(""));
    }
    if !form.error.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", form.error),
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        )));
    } else if !notice.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", notice),
            Style::default().fg(NOTICE),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Tab", Style::default().fg(HINT)),
        Span::styled(" next field  ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(HINT)),
        Span::styled(" submit  ", Style::default().fg(DIM)),
        Span::styled("Esc", Style::default().fg(HINT)),
        Span::styled(" back", Style::default().fg(DIM)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_config(frame: &mut Frame, area: Rect, app: &App) {
    let target = centered(area, 56, 15);
    let username = app
        .session
        .as_ref()
        .map(|s| s.username.as_str())
        .unwrap_or("?");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(format!(" Game setup — {} ", username))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let inner = block.inner(target);
    frame.render_widget(Clear, target);
    frame.render_widget(block, target);

    let fire_value = if app.capturing_fire_key {
        "Press any key…".to_string()
    } else {
        key_label(app.settings.fire_key)
    };
    let time_value = format!("◀ {:>3} s ▶", app.settings.time_limit_secs);
    let (color_name, rgb) = COLOR_CHOICES[app.settings.color_index % COLOR_CHOICES.len()];

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.push(config_row(app, CONFIG_FIRE_KEY, "Fire key", vec![Span::styled(
        fire_value,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )]));
    lines.push(Line::from(""));
    lines.push(config_row(app, CONFIG_TIME, "Time limit", vec![Span::styled(
        time_value,
        Style::default().fg(Color::White),
    )]));
    lines.push(Line::from(""));
    lines.push(config_row(app, CONFIG_COLOR, "Ship color", vec![
        Span::styled("◀ ", Style::default().fg(DIM)),
        Span::styled("▲ ", Style::default().fg(Color::Rgb(rgb.0, rgb.1, rgb.2))),
        Span::styled(color_name, Style::default().fg(Color::White)),
        Span::styled(" ▶", Style::default().fg(DIM)),
    ]));
    lines.push(Line::from(""));
    lines.push(config_row(app, CONFIG_START, "", vec![Span::styled(
        "▶ Start game",
        Style::default()
            .fg(if app.config_focus == CONFIG_START { ACCENT } else { NOTICE })
            .add_modifier(Modifier::BOLD),
    )]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ↑↓", Style::default().fg(HINT)),
        Span::styled(" select  ", Style::default().fg(DIM)),
        Span::styled("←→", Style::default().fg(HINT)),
        Span::styled(" change  ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(HINT)),
        Span::styled(" pick/start  ", Style::default().fg(DIM)),
        Span::styled("Esc", Style::default().fg(HINT)),
        Span::styled(" log out", Style::default().fg(DIM)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn config_row(app: &App, row: usize, label: &str, value: Vec<Span<'static>>) -> Line<'static> {
    let focused = app.config_focus == row;
    let mut spans = vec![Span::styled(
        format!("  {} {:<13}", if focused { "▶" } else { " " }, label),
        Style::default().fg(if focused { ACCENT } else { DIM }),
    )];
    spans.extend(value);
    Line::from(spans)
}

//! End-of-run summary: the verdict line, the final score, and the session's
//! run history for the logged-in player.

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::engine::EndReason;
use crate::ui::centered;
use crate::users::format_timestamp;

pub fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let username = app
        .session
        .as_ref()
        .map(|s| s.username.as_str())
        .unwrap_or("?");
    let runs = app.session.as_ref().map(|s| s.runs.as_slice()).unwrap_or(&[]);

    let height = (runs.len() as u16 * 2 + 10).min(area.height);
    let target = centered(area, 58, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(format!(" Session scores: {} ", username))
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD));
    let inner = block.inner(target);
    frame.render_widget(Clear, target);
    frame.render_widget(block, target);

    let mut lines: Vec<Line> = vec![Line::from("")];
    if let Some((reason, score)) = app.last_summary {
        let (msg, color) = verdict(reason, score);
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", msg), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(format!("   Score: {}", score), Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(""));
    }
    for (i, run) in runs.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>2}. {:>5} pts", i + 1, run.score),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "      {}  →  {}",
                format_timestamp(run.started_at),
                format_timestamp(run.ended_at)
            ),
            Style::default().fg(Color::Rgb(120, 120, 140)),
        )));
    }
    if runs.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No finished runs yet this session.",
            Style::default().fg(Color::Rgb(120, 120, 140)),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" new game  ", Style::default().fg(Color::Rgb(120, 120, 140))),
        Span::styled("Esc", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" game setup", Style::default().fg(Color::Rgb(120, 120, 140))),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn verdict(reason: EndReason, score: u32) -> (&'static str, Color) {
    match reason {
        EndReason::Win => ("Champion!", Color::Rgb(80, 255, 80)),
        EndReason::Lost => ("You Lost!", Color::Rgb(255, 90, 90)),
        EndReason::Time if score >= 100 => ("Winner!", Color::Rgb(80, 220, 255)),
        EndReason::Time => ("You can do better!", Color::Rgb(255, 180, 80)),
    }
}

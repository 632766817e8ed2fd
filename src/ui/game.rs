//! Arena rendering: scales the engine's world coordinates down to the
//! terminal cell grid and draws a status bar above the field.

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::engine::entities::SHIP_SIZE;
use crate::ui::key_label;

/// Fill colors per formation row, top row first.
const ROW_COLORS: [(u8, u8, u8); 4] =
    [(255, 0, 0), (255, 136, 0), (255, 255, 0), (136, 255, 0)];

pub fn render_game(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Starcade ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    render_status(frame, chunks[0], app);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = render_field(app, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" ←→↑↓ Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled(
            format!("{} Shoot ", key_label(app.settings.fire_key)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Quit to setup", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let hud = app.engine.hud();
    let lives_str = "♦ ".repeat(hud.lives as usize);
    let status = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", hud.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {}", lives_str),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Time: {}s ", hud.seconds),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Enemies: {} ", app.engine.world().enemies.len()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

fn render_field(app: &App, w: usize, h: usize) -> Vec<Line<'static>> {
    let arena = app.engine.arena();
    let world = app.engine.world();
    let sx = w as f32 / arena.width;
    let sy = h as f32 / arena.height;

    let bg = Color::Rgb(0, 0, 5);
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(bg)); w]; h];

    let put = |grid: &mut Vec<Vec<(char, Style)>>, cx: i32, cy: i32, ch: char, fg: Color, bold: bool| {
        if cx < 0 || cy < 0 || cx >= w as i32 || cy >= h as i32 {
            return;
        }
        let mut style = Style::default().fg(fg).bg(bg);
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        grid[cy as usize][cx as usize] = (ch, style);
    };

    // Enemies: one run of blocks per ship, colored by row.
    for enemy in &world.enemies {
        let (r, g, b) = ROW_COLORS[enemy.row];
        let color = Color::Rgb(r, g, b);
        let cy = ((enemy.y + SHIP_SIZE / 2.0) * sy) as i32;
        let cx0 = (enemy.x * sx) as i32;
        let cx1 = ((enemy.x + SHIP_SIZE) * sx) as i32;
        for cx in cx0..=cx1 {
            put(&mut grid, cx, cy, '▓', color, false);
        }
    }

    // Bullets.
    for bullet in &world.player_bullets {
        let cx = ((bullet.x + 3.0) * sx) as i32;
        let cy = ((bullet.y + 5.0) * sy) as i32;
        put(&mut grid, cx, cy, '│', Color::Rgb(120, 255, 255), true);
    }
    for bullet in &world.enemy_bullets {
        let cx = ((bullet.x + 3.0) * sx) as i32;
        let cy = ((bullet.y + 5.0) * sy) as i32;
        put(&mut grid, cx, cy, '┃', Color::Rgb(255, 100, 255), true);
    }

    // Player ship: a hull row with the nose one row up.
    let (r, g, b) = app.engine.ship_color();
    let ship_color = Color::Rgb(r, g, b);
    let ship = &world.player;
    let hull_y = ((ship.y + SHIP_SIZE * 0.75) * sy) as i32;
    let nose_y = ((ship.y + SHIP_SIZE * 0.25) * sy) as i32;
    let cx0 = (ship.x * sx) as i32;
    let cx1 = ((ship.x + SHIP_SIZE) * sx) as i32;
    for cx in cx0..=cx1 {
        put(&mut grid, cx, hull_y, '▄', ship_color, true);
    }
    put(&mut grid, (cx0 + cx1) / 2, nose_y, '▲', ship_color, true);

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

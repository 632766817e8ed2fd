pub mod forms;
pub mod game;
pub mod scores;

use ratatui::prelude::*;

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    match app.screen {
        Screen::Welcome => forms::render_welcome(frame, area),
        Screen::Login => forms::render_login(frame, area, app),
        Screen::Register => forms::render_register(frame, area, app),
        Screen::Config => forms::render_config(frame, area, app),
        Screen::Game => game::render_game(frame, area, app),
        Screen::Summary => scores::render_summary(frame, area, app),
    }
}

/// A centered sub-rectangle, clamped to the enclosing area.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Display name for a fire-key binding.
pub(crate) fn key_label(key: char) -> String {
    if key == ' ' {
        "Space".to_string()
    } else {
        key.to_ascii_uppercase().to_string()
    }
}

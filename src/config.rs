//! Game settings: fire key, time limit, ship color. Persisted as JSON next
//! to the executable and reloaded as defaults on the next launch. Load is
//! tolerant — a missing or corrupt file just yields the defaults.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::RunConfig;

const SETTINGS_FILE: &str = "starcade.settings.json";

/// Selectable run lengths, in seconds.
pub const TIME_CHOICES: [u32; 4] = [60, 120, 180, 300];

/// Selectable ship colors.
pub const COLOR_CHOICES: [(&str, (u8, u8, u8)); 5] = [
    ("Green", (80, 255, 80)),
    ("Cyan", (80, 220, 255)),
    ("Yellow", (255, 220, 80)),
    ("Magenta", (255, 100, 220)),
    ("White", (230, 230, 230)),
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub fire_key: char,
    pub time_limit_secs: u32,
    pub color_index: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { fire_key: ' ', time_limit_secs: 120, color_index: 0 }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(settings_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let Ok(data) = fs::read_to_string(&path) else {
            return Settings::default();
        };
        match serde_json::from_str::<Settings>(&data) {
            Ok(mut s) => {
                if s.color_index >= COLOR_CHOICES.len() {
                    s.color_index = 0;
                }
                s
            }
            Err(e) => {
                warn!("ignoring unreadable settings file {}: {}", path.display(), e);
                Settings::default()
            }
        }
    }

    /// Best-effort write; a read-only install directory is not fatal.
    pub fn save(&self) {
        self.save_to(settings_path());
    }

    pub fn save_to(&self, path: PathBuf) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("could not save settings to {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("could not serialize settings: {}", e),
        }
    }

    pub fn ship_color(&self) -> (u8, u8, u8) {
        COLOR_CHOICES[self.color_index % COLOR_CHOICES.len()].1
    }

    pub fn color_name(&self) -> &'static str {
        COLOR_CHOICES[self.color_index % COLOR_CHOICES.len()].0
    }

    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            fire_key: self.fire_key,
            time_limit_secs: self.time_limit_secs,
            ship_color: self.ship_color(),
        }
    }
}

fn settings_path() -> PathBuf {
    // Store next to the executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(SETTINGS_FILE);
        }
    }
    PathBuf::from(SETTINGS_FILE)
}

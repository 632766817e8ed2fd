//! Player accounts and the session-scoped score history.
//!
//! The user registry persists as JSON next to the executable; the run
//! history lives only for the process lifetime of the current login, so a
//! fresh session always starts with an empty list.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::RunRecord;

const USERS_FILE: &str = "starcade.users.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
    pub first: String,
    pub last: String,
    pub email: String,
}

pub struct UserStore {
    users: HashMap<String, UserRecord>,
    path: PathBuf,
}

impl UserStore {
    pub fn load() -> Self {
        Self::load_from(users_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let users = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(users) => users,
                Err(e) => {
                    warn!("ignoring unreadable user file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        UserStore { users, path }
    }

    /// Validate and add an account. Rules match the registration form:
    /// matching confirmation, password of at least 8 chars containing both a
    /// letter and a digit, and an unused username.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        confirm: &str,
        first: &str,
        last: &str,
        email: &str,
    ) -> Result<(), &'static str> {
        let username = username.trim();
        if username.is_empty() {
            return Err("Username is required");
        }
        if password != confirm {
            return Err("Passwords do not match");
        }
        if password.len() < 8
            || !password.chars().any(|c| c.is_ascii_alphabetic())
            || !password.chars().any(|c| c.is_ascii_digit())
        {
            return Err("Weak password (min 8, letters+digits)");
        }
        if self.users.contains_key(username) {
            return Err("Username exists");
        }
        self.users.insert(
            username.to_string(),
            UserRecord {
                password: password.to_string(),
                first: first.trim().to_string(),
                last: last.trim().to_string(),
                email: email.trim().to_string(),
            },
        );
        self.save();
        info!("registered user {}", username);
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username.trim())
            .is_some_and(|u| u.password == password)
    }

    fn save(&self) {
        match serde_json::to_string_pretty(&self.users) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("could not save users to {}: {}", self.path.display(), e);
                }
            }
            Err(e) => warn!("could not serialize users: {}", e),
        }
    }
}

fn users_path() -> PathBuf {
    // Store next to the executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(USERS_FILE);
        }
    }
    PathBuf::from(USERS_FILE)
}

// ── Session history ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SessionRun {
    pub score: u32,
    pub started_at: SystemTime,
    pub ended_at: SystemTime,
}

/// The logged-in player's run history; discarded on logout or exit.
pub struct Session {
    pub username: String,
    pub runs: Vec<SessionRun>,
}

impl Session {
    pub fn new(username: &str) -> Self {
        Session { username: username.to_string(), runs: Vec::new() }
    }

    pub fn record(&mut self, record: &RunRecord) {
        self.runs.push(SessionRun {
            score: record.final_score,
            started_at: record.started_at,
            ended_at: record.ended_at,
        });
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC. Days-to-civil conversion per Howard
/// Hinnant's algorithm; good for any date this program will ever print.
pub fn format_timestamp(t: SystemTime) -> String {
    let secs = t
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let days = secs.div_euclid(86_400);
    let tod = secs.rem_euclid(86_400);
    let (h, m, s) = (tod / 3600, (tod % 3600) / 60, tod % 60);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let mo = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if mo <= 2 { y + 1 } else { y };

    format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02}", y, mo, d, h, m, s)
}

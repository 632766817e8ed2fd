//! Screen state machine and input routing: welcome, registration, login,
//! configuration, the game itself, and the end-of-run summary. The app owns
//! the engine and drives it from the tick stream; the once-per-second
//! countdown is derived from the same stream.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Settings, COLOR_CHOICES, TIME_CHOICES};
use crate::engine::entities::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::engine::{EndReason, Engine};
use crate::users::{Session, UserStore};

const MAX_FIELD_LEN: usize = 40;
/// 20 ms ticks; 50 of them make one countdown second.
const TICKS_PER_SECOND: u32 = 50;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Register,
    Login,
    Config,
    Game,
    Summary,
}

pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

/// A vertical stack of text fields with one focused at a time.
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: String,
}

enum FormOutcome {
    Edited,
    Submit,
    Back,
}

impl Form {
    fn new(specs: &[(&'static str, bool)]) -> Self {
        Form {
            fields: specs
                .iter()
                .map(|&(label, masked)| FormField {
                    label,
                    value: String::new(),
                    masked,
                })
                .collect(),
            focus: 0,
            error: String::new(),
        }
    }

    fn reset(&mut self) {
        for f in &mut self.fields {
            f.value.clear();
        }
        self.focus = 0;
        self.error.clear();
    }

    fn value(&self, idx: usize) -> &str {
        &self.fields[idx].value
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Esc => return FormOutcome::Back,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            }
            KeyCode::Backspace => {
                self.fields[self.focus].value.pop();
            }
            KeyCode::Char(c) => {
                let value = &mut self.fields[self.focus].value;
                if value.chars().count() < MAX_FIELD_LEN && (c.is_ascii_graphic() || c == ' ') {
                    value.push(c);
                }
            }
            _ => {}
        }
        FormOutcome::Edited
    }
}

/// Rows on the configuration screen.
pub const CONFIG_ROWS: usize = 4;
pub const CONFIG_FIRE_KEY: usize = 0;
pub const CONFIG_TIME: usize = 1;
pub const CONFIG_COLOR: usize = 2;
pub const CONFIG_START: usize = 3;

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub users: UserStore,
    pub session: Option<Session>,
    pub settings: Settings,
    pub engine: Engine,
    pub login_form: Form,
    pub register_form: Form,
    /// Green one-shot notice on the login screen (e.g. after registering).
    pub notice: String,
    pub config_focus: usize,
    pub capturing_fire_key: bool,
    pub last_summary: Option<(EndReason, u32)>,
    ticks_into_second: u32,
    rng: StdRng,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            screen: Screen::Welcome,
            users: UserStore::load(),
            session: None,
            settings: Settings::load(),
            engine: Engine::new(ARENA_WIDTH, ARENA_HEIGHT),
            login_form: Form::new(&[("Username", false), ("Password", true)]),
            register_form: Form::new(&[
                ("Username", false),
                ("Password", true),
                ("Confirm password", true),
                ("First name", false),
                ("Last name", false),
                ("Email", false),
            ]),
            notice: String::new(),
            config_focus: 0,
            capturing_fire_key: false,
            last_summary: None,
            ticks_into_second: 0,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn on_tick(&mut self) {
        if self.screen != Screen::Game || !self.engine.is_running() {
            return;
        }
        self.engine.tick(&mut self.rng);
        self.ticks_into_second += 1;
        if self.ticks_into_second >= TICKS_PER_SECOND {
            self.ticks_into_second = 0;
            self.engine.countdown_tick();
        }
        if let Some(record) = self.engine.take_outcome() {
            if let Some(session) = &mut self.session {
                session.record(&record);
            }
            self.last_summary = Some((record.reason, record.final_score));
            self.screen = Screen::Summary;
        }
    }

    pub fn on_key_down(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Welcome => self.welcome_key(key),
            Screen::Login => self.login_key(key),
            Screen::Register => self.register_key(key),
            Screen::Config => self.config_key(key),
            Screen::Game => self.game_key(key),
            Screen::Summary => self.summary_key(key),
        }
    }

    pub fn on_key_up(&mut self, key: KeyEvent) {
        if self.screen == Screen::Game {
            self.engine.on_key_up(key.code);
        }
    }

    fn welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.login_form.reset();
                self.screen = Screen::Login;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.register_form.reset();
                self.screen = Screen::Register;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn login_key(&mut self, key: KeyEvent) {
        self.notice.clear();
        match self.login_form.handle_key(key) {
            FormOutcome::Submit => {
                let username = self.login_form.value(0).trim().to_string();
                let password = self.login_form.value(1).to_string();
                if self.users.login(&username, &password) {
                    info!("user {} logged in", username);
                    self.session = Some(Session::new(&username));
                    self.login_form.reset();
                    self.config_focus = 0;
                    self.screen = Screen::Config;
                } else {
                    self.login_form.error = "Invalid credentials".to_string();
                }
            }
            FormOutcome::Back => self.screen = Screen::Welcome,
            FormOutcome::Edited => {}
        }
    }

    fn register_key(&mut self, key: KeyEvent) {
        match self.register_form.handle_key(key) {
            FormOutcome::Submit => {
                let result = self.users.register(
                    self.register_form.value(0),
                    self.register_form.value(1),
                    self.register_form.value(2),
                    self.register_form.value(3),
                    self.register_form.value(4),
                    self.register_form.value(5),
                );
                match result {
                    Ok(()) => {
                        self.register_form.reset();
                        self.login_form.reset();
                        self.notice = "Registered! Please log in.".to_string();
                        self.screen = Screen::Login;
                    }
                    Err(msg) => self.register_form.error = msg.to_string(),
                }
            }
            FormOutcome::Back => self.screen = Screen::Welcome,
            FormOutcome::Edited => {}
        }
    }

    fn config_key(&mut self, key: KeyEvent) {
        if self.capturing_fire_key {
            match key.code {
                KeyCode::Char(c) => {
                    self.settings.fire_key = c.to_ascii_lowercase();
                    self.capturing_fire_key = false;
                }
                KeyCode::Esc => self.capturing_fire_key = false,
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.logout(),
            KeyCode::Down | KeyCode::Tab => {
                self.config_focus = (self.config_focus + 1) % CONFIG_ROWS;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.config_focus = (self.config_focus + CONFIG_ROWS - 1) % CONFIG_ROWS;
            }
            KeyCode::Left => self.cycle_choice(false),
            KeyCode::Right => self.cycle_choice(true),
            KeyCode::Enter => match self.config_focus {
                CONFIG_FIRE_KEY => self.capturing_fire_key = true,
                CONFIG_START => self.start_run(),
                _ => {}
            },
            _ => {}
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.config_focus {
            CONFIG_TIME => {
                let idx = TIME_CHOICES
                    .iter()
                    .position(|&t| t == self.settings.time_limit_secs)
                    .unwrap_or(0);
                let n = TIME_CHOICES.len();
                let idx = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
                self.settings.time_limit_secs = TIME_CHOICES[idx];
            }
            CONFIG_COLOR => {
                let n = COLOR_CHOICES.len();
                self.settings.color_index = if forward {
                    (self.settings.color_index + 1) % n
                } else {
                    (self.settings.color_index + n - 1) % n
                };
            }
            _ => {}
        }
    }

    fn start_run(&mut self) {
        self.settings.save();
        self.engine.start(self.settings.to_run_config(), &mut self.rng);
        self.ticks_into_second = 0;
        self.screen = Screen::Game;
    }

    fn game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Leaving mid-run abandons the run; no record is kept.
                self.engine.cancel();
                self.screen = Screen::Config;
            }
            code => self.engine.on_key_down(code),
        }
    }

    fn summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.start_run(),
            KeyCode::Esc => self.screen = Screen::Config,
            _ => {}
        }
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("user {} logged out", session.username);
        }
        self.last_summary = None;
        self.screen = Screen::Welcome;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

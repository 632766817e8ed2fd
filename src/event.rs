//! Terminal event pump: a background thread that forwards key press and
//! release edges and emits a simulation tick on a fixed cadence. The tick
//! deadline is tracked with an `Instant` so heavy key traffic cannot starve
//! the simulation clock.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                        let forwarded = match key.kind {
                            KeyEventKind::Press => Some(Event::KeyDown(key)),
                            KeyEventKind::Release => Some(Event::KeyUp(key)),
                            // Repeats are not edges; the engine's cooldown
                            // and intent flags only care about transitions.
                            KeyEventKind::Repeat => None,
                        };
                        if let Some(ev) = forwarded {
                            if tx.send(ev).is_err() {
                                return;
                            }
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

//! Keyboard input: turns crossterm events into simulation `InputEvent`s.
//!
//! A dedicated thread blocks on `event::read()` and forwards everything
//! through a channel, so polling from the game loop never blocks.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Press` /
//!   `Repeat` / `Release` events, so key-ups are forwarded as they arrive.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  A held movement key expires after `HOLD_WINDOW`
//!   polls of silence and a key-up is synthesised for it.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use alien_invasion::interfaces::{InputEvent, InputSource, Key};

/// Polls a movement key survives without a fresh press or repeat.
/// At 30 ticks/s this is ≈133 ms, shorter than any OS repeat interval.
const HOLD_WINDOW: u64 = 4;

pub struct ChannelInput {
    rx: mpsc::Receiver<Event>,
    /// Held movement keys → poll number they were last seen on.
    last_seen: HashMap<Key, u64>,
    polls: u64,
    synthesize_release: bool,
}

impl ChannelInput {
    pub fn spawn(synthesize_release: bool) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(err) => {
                    warn!("terminal event read failed: {err}");
                    break;
                }
            }
        });
        ChannelInput::from_receiver(rx, synthesize_release)
    }

    pub fn from_receiver(rx: mpsc::Receiver<Event>, synthesize_release: bool) -> Self {
        ChannelInput {
            rx,
            last_seen: HashMap::new(),
            polls: 0,
            synthesize_release,
        }
    }

    fn on_key(&mut self, key_event: KeyEvent, out: &mut Vec<InputEvent>) {
        let KeyEvent { code, kind, modifiers, .. } = key_event;

        let is_quit = matches!(code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
            || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
        if is_quit {
            if kind == KeyEventKind::Press {
                out.push(InputEvent::Quit);
            }
            return;
        }

        let Some(key) = map_key(code) else {
            return;
        };
        let movement = matches!(key, Key::Left | Key::Right);

        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat if movement => {
                if self.last_seen.insert(key, self.polls).is_none() {
                    out.push(InputEvent::KeyDown(key));
                }
            }
            KeyEventKind::Press => out.push(InputEvent::KeyDown(key)),
            KeyEventKind::Repeat => {}
            KeyEventKind::Release if movement => {
                if self.last_seen.remove(&key).is_some() {
                    out.push(InputEvent::KeyUp(key));
                }
            }
            KeyEventKind::Release => out.push(InputEvent::KeyUp(key)),
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('r' | 'R') => Some(Key::Restart),
        _ => None,
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        let mut events = Vec::new();

        while let Ok(ev) = self.rx.try_recv() {
            if let Event::Key(key_event) = ev {
                self.on_key(key_event, &mut events);
            }
        }

        if self.synthesize_release {
            let polls = self.polls;
            let mut expired: Vec<Key> = self
                .last_seen
                .iter()
                .filter(|(_, last)| polls.saturating_sub(**last) > HOLD_WINDOW)
                .map(|(&key, _)| key)
                .collect();
            // Left before Right, independent of hash order
            expired.sort_by_key(|key| *key != Key::Left);
            for key in expired {
                self.last_seen.remove(&key);
                events.push(InputEvent::KeyUp(key));
            }
        }

        events
    }
}

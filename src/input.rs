//! Keyboard state tracking.
//!
//! Instead of acting on each key event individually, `KeyTracker` records the
//! frame in which every key was last seen pressed.  Each frame the driver asks
//! which keys are still "fresh" and turns them into a `Controls` snapshot, so
//! Space and a direction can be held at the same time.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
//!   `Repeat` / `Release` events, so keys are removed on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Keys expire after the hold window of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::entities::{Action, GameStatus};

/// How long a key stays held without a fresh press/repeat event.  Covers the
/// OS key-repeat interval (≥ 15 Hz) with some slack.
pub const HOLD_WINDOW_MS: u64 = 133;

/// Directional and fire intent for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// What a single key press asks the driver to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    Quit,
}

#[derive(Debug)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
    hold_frames: u64,
}

impl KeyTracker {
    /// Build a tracker whose hold window is `HOLD_WINDOW_MS` at the given tick rate.
    pub fn new(fps: u32) -> Self {
        let hold_frames = (HOLD_WINDOW_MS * fps as u64).div_ceil(1000).max(1);
        Self {
            last_seen: HashMap::new(),
            hold_frames,
        }
    }

    pub fn hold_frames(&self) -> u64 {
        self.hold_frames
    }

    /// Record a press or repeat of `code` in `frame`.
    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(normalize(code), frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&normalize(code));
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    /// Forget every held key once a screen action has changed the status, so
    /// the key that triggered it (Space on the start screen) does not also
    /// fire on the first frame of the new screen.
    pub fn settle(&mut self, before: GameStatus, after: GameStatus) {
        if before != after {
            self.clear();
        }
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= self.hold_frames)
            .unwrap_or(false)
    }

    pub fn controls(&self, frame: u64) -> Controls {
        let any = |codes: &[KeyCode]| codes.iter().any(|&c| self.is_held(c, frame));
        Controls {
            left: any(&[KeyCode::Left, KeyCode::Char('a')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d')]),
            up: any(&[KeyCode::Up, KeyCode::Char('w')]),
            down: any(&[KeyCode::Down, KeyCode::Char('s')]),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }
}

/// Fold letter case so `A` and `a` share one entry.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a key press to a one-shot command for the current screen.
pub fn command_for(code: KeyCode, modifiers: KeyModifiers, status: GameStatus) -> Option<Command> {
    let code = normalize(code);
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('p') => match status {
            GameStatus::Playing | GameStatus::Paused => Some(Command::Game(Action::TogglePause)),
            _ => None,
        },
        KeyCode::Enter => match status {
            GameStatus::Start => Some(Command::Game(Action::Start)),
            GameStatus::Paused => Some(Command::Game(Action::Resume)),
            GameStatus::GameOver => Some(Command::Game(Action::PlayAgain)),
            GameStatus::Playing => None,
        },
        KeyCode::Char(' ') if status == GameStatus::Start => Some(Command::Game(Action::Start)),
        KeyCode::Char('r') => match status {
            GameStatus::Paused => Some(Command::Game(Action::Restart)),
            GameStatus::GameOver => Some(Command::Game(Action::PlayAgain)),
            _ => None,
        },
        _ => None,
    }
}

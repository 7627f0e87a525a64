//! Key events, decoupled from the terminal library.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press as the session understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Char(char),
    /// Ctrl+C; treated like quit.
    Interrupt,
    /// Nothing pressed, but the screen must be redrawn (e.g. after a resize).
    Redraw,
}

impl Key {
    pub const fn is_quit(self) -> bool {
        matches!(self, Self::Char('q') | Self::Interrupt)
    }
}

/// Blocking source of key events.
pub trait KeySource {
    /// Waits for the next key.
    fn next_key(&mut self) -> Result<Key>;
}

/// Reads keys from the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(key) = map_key_event(key) {
                        return Ok(key);
                    }
                }
                Event::Resize(_, _) => return Ok(Key::Redraw),
                _ => {}
            }
        }
    }
}

/// Translates a crossterm key event; keys the session ignores map to `None`.
pub fn map_key_event(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Key::Interrupt),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

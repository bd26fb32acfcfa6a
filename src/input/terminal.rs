//! Crossterm-backed terminal driver.
//!
//! Polls crossterm for terminal events and converts them to raw reads.
//! Chords with Ctrl become C0 control bytes, the way a plain terminal
//! would send them.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers,
};
use tracing::{trace, warn};

use super::classify;
use super::driver::{KeyCapabilities, RawRead, TerminalDriver};
use super::keys::FunctionKey;
use crate::config::{Settings, DEFAULT_TICK_RATE_MS};

/// Reads keys from the controlling terminal through crossterm.
#[derive(Debug, Clone)]
pub struct CrosstermDriver {
    /// How long each poll waits before checking again.
    tick_rate: Duration,
    /// Whether the terminal delivers wide characters.
    wide_chars: bool,
}

impl CrosstermDriver {
    /// Create a driver with the default tick rate and a wide-character locale.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
            wide_chars: true,
        }
    }

    /// Create a driver from host settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tick_rate: Duration::from_millis(settings.tick_rate_ms),
            wide_chars: settings.wide_chars,
        }
    }

    /// Wait for the next event crossterm can turn into a raw read.
    fn next_read(&self) -> std::io::Result<RawRead> {
        loop {
            if !event::poll(self.tick_rate)? {
                continue;
            }
            let read = match event::read()? {
                CrosstermEvent::Key(key_event) => map_key_event(key_event),
                CrosstermEvent::Resize(width, height) => {
                    trace!(width, height, "Terminal resized");
                    Some(RawRead::Function(FunctionKey::Resize))
                }
                // Mouse, focus and paste events are not keystrokes
                CrosstermEvent::Mouse(_)
                | CrosstermEvent::FocusGained
                | CrosstermEvent::FocusLost
                | CrosstermEvent::Paste(_) => None,
            };
            if let Some(read) = read {
                return Ok(read);
            }
        }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCapabilities for CrosstermDriver {
    fn has_capability(&self, key: FunctionKey) -> bool {
        match key {
            FunctionKey::Help | FunctionKey::Resize | FunctionKey::Other(_) => false,
            FunctionKey::F(n) => (1..=24).contains(&n),
            _ => true,
        }
    }

    fn is_printable(&self, codepoint: u32) -> bool {
        classify::is_printable_unicode(codepoint, self.wide_chars)
    }
}

impl TerminalDriver for CrosstermDriver {
    fn read_key(&mut self) -> RawRead {
        match self.next_read() {
            Ok(read) => read,
            Err(err) => {
                warn!(error = %err, "Terminal read failed, treating as end of input");
                RawRead::NoInput
            }
        }
    }
}

/// Convert a crossterm key event. Key releases produce nothing.
fn map_key_event(event: CrosstermKeyEvent) -> Option<RawRead> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let read = match event.code {
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            RawRead::Char(control_code(c).unwrap_or(c as u32))
        }
        KeyCode::Char(c) => RawRead::Char(c as u32),
        KeyCode::Enter => RawRead::Char(0x0D),
        KeyCode::Tab => RawRead::Char(0x09),
        KeyCode::Esc => RawRead::Char(0x1B),
        KeyCode::Null => RawRead::Char(0x00),
        KeyCode::Backspace => RawRead::Function(FunctionKey::Backspace),
        KeyCode::Delete => RawRead::Function(FunctionKey::DeleteChar),
        KeyCode::Insert => RawRead::Function(FunctionKey::InsertChar),
        KeyCode::Left => RawRead::Function(FunctionKey::Left),
        KeyCode::Right => RawRead::Function(FunctionKey::Right),
        KeyCode::Up => RawRead::Function(FunctionKey::Up),
        KeyCode::Down => RawRead::Function(FunctionKey::Down),
        KeyCode::Home => RawRead::Function(FunctionKey::Home),
        KeyCode::End => RawRead::Function(FunctionKey::End),
        KeyCode::PageUp => RawRead::Function(FunctionKey::PageUp),
        KeyCode::PageDown => RawRead::Function(FunctionKey::PageDown),
        KeyCode::F(n) => RawRead::Function(FunctionKey::F(n)),
        _ => RawRead::Function(FunctionKey::Other(0)),
    };
    Some(read)
}

/// The C0 byte a terminal sends for Ctrl plus `c`.
fn control_code(c: char) -> Option<u32> {
    match c.to_ascii_uppercase() {
        ' ' => Some(0x00),
        upper @ '@'..='_' => Some(upper as u32 & 0x1F),
        '?' => Some(0x7F),
        _ => None,
    }
}

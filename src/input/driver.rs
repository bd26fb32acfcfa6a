//! Terminal driver interface.
//!
//! The driver owns the device. It hands back one raw read at a time and
//! answers two questions about the terminal: which function keys it can
//! actually produce, and which codepoints the locale can print.

use std::collections::{HashSet, VecDeque};

use super::classify;
use super::keys::FunctionKey;

/// The result of one blocking read from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawRead {
    /// A byte or wide character.
    Char(u32),
    /// A function key.
    Function(FunctionKey),
    /// No more input (stream closed or read error).
    NoInput,
}

/// Capability and locale queries against the current terminal.
pub trait KeyCapabilities {
    /// Whether the terminal can produce this function key.
    ///
    /// Drivers that cannot answer must return false.
    fn has_capability(&self, key: FunctionKey) -> bool;

    /// Whether the codepoint is printable in the active locale.
    fn is_printable(&self, codepoint: u32) -> bool;
}

/// A source of raw keystrokes.
pub trait TerminalDriver: KeyCapabilities {
    /// Block until one keystroke is available.
    fn read_key(&mut self) -> RawRead;
}

/// The function keys every ordinary terminal can produce.
pub const STANDARD_KEYS: [FunctionKey; 23] = [
    FunctionKey::Down,
    FunctionKey::Up,
    FunctionKey::Left,
    FunctionKey::Right,
    FunctionKey::Home,
    FunctionKey::End,
    FunctionKey::Backspace,
    FunctionKey::DeleteChar,
    FunctionKey::PageDown,
    FunctionKey::PageUp,
    FunctionKey::Enter,
    FunctionKey::F(1),
    FunctionKey::F(2),
    FunctionKey::F(3),
    FunctionKey::F(4),
    FunctionKey::F(5),
    FunctionKey::F(6),
    FunctionKey::F(7),
    FunctionKey::F(8),
    FunctionKey::F(9),
    FunctionKey::F(10),
    FunctionKey::F(11),
    FunctionKey::F(12),
];

/// A driver that replays a fixed script of reads.
///
/// Used by tests and for replaying captured input. Reports
/// [`RawRead::NoInput`] once the script runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDriver {
    reads: VecDeque<RawRead>,
    capabilities: HashSet<FunctionKey>,
    wide_chars: bool,
}

impl ScriptedDriver {
    /// Create a driver with the standard key set and a wide-character locale.
    pub fn new(reads: impl IntoIterator<Item = RawRead>) -> Self {
        Self {
            reads: reads.into_iter().collect(),
            capabilities: STANDARD_KEYS.into_iter().collect(),
            wide_chars: true,
        }
    }

    /// Treat the terminal as single-byte.
    pub fn narrow(mut self) -> Self {
        self.wide_chars = false;
        self
    }

    /// Remove a function key from the terminal's capabilities.
    pub fn without(mut self, key: FunctionKey) -> Self {
        self.capabilities.remove(&key);
        self
    }

    /// Append a read to the script.
    pub fn push(&mut self, read: RawRead) {
        self.reads.push_back(read);
    }

    /// Number of reads left in the script.
    pub fn remaining(&self) -> usize {
        self.reads.len()
    }
}

impl KeyCapabilities for ScriptedDriver {
    fn has_capability(&self, key: FunctionKey) -> bool {
        self.capabilities.contains(&key)
    }

    fn is_printable(&self, codepoint: u32) -> bool {
        classify::is_printable_unicode(codepoint, self.wide_chars)
    }
}

impl TerminalDriver for ScriptedDriver {
    fn read_key(&mut self) -> RawRead {
        self.reads.pop_front().unwrap_or(RawRead::NoInput)
    }
}

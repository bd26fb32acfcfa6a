//! Key representations.
//!
//! A keystroke carries two layers: the raw code the terminal driver
//! reported, and the normalized [`Key`] that all routing matches on.

use std::fmt;

use super::classify;
use super::driver::KeyCapabilities;

/// A normalized key value.
///
/// Either a literal Unicode codepoint or one of the special key
/// identifiers, which are allocated downward from `u32::MAX` so they can
/// never collide with a codepoint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u32);

impl Key {
    /// A key the terminal reported that has no legal meaning.
    pub const UNKNOWN: Key = Key(0xFFFF_FFFF);
    pub const LEFT: Key = Key(0xFFFF_FFFE);
    pub const RIGHT: Key = Key(0xFFFF_FFFD);
    pub const UP: Key = Key(0xFFFF_FFFC);
    pub const DOWN: Key = Key(0xFFFF_FFFB);
    pub const RETURN: Key = Key(0xFFFF_FFFA);
    /// Both backspace and forward-delete.
    pub const DELETE: Key = Key(0xFFFF_FFF9);
    pub const ESCAPE: Key = Key(0xFFFF_FFF8);
    pub const TAB: Key = Key(0xFFFF_FFF7);
    pub const PAGE_UP: Key = Key(0xFFFF_FFF6);
    pub const PAGE_DOWN: Key = Key(0xFFFF_FFF5);
    pub const HOME: Key = Key(0xFFFF_FFF4);
    pub const END: Key = Key(0xFFFF_FFF3);
    pub const FUNC1: Key = Key(0xFFFF_FFEF);
    pub const FUNC12: Key = Key(0xFFFF_FFE4);

    /// Number of values reserved at the top of the range for special keys.
    pub const SPECIAL_COUNT: u32 = 28;

    /// Wrap a raw 32-bit value without any filtering.
    pub const fn from_u32(code: u32) -> Self {
        Key(code)
    }

    /// Key for a character.
    pub const fn from_char(c: char) -> Self {
        Key(c as u32)
    }

    /// Function key `n`, for `n` in 1..=12.
    pub fn func(n: u8) -> Option<Self> {
        (1..=12)
            .contains(&n)
            .then(|| Key(Self::FUNC1.0 - u32::from(n - 1)))
    }

    /// The 32-bit value of this key.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Whether this is a special key identifier rather than a codepoint.
    pub const fn is_special(self) -> bool {
        self.0 > u32::MAX - Self::SPECIAL_COUNT
    }

    /// The function key number (1..=12), if this is a function key.
    pub fn func_number(self) -> Option<u8> {
        if self.0 <= Self::FUNC1.0 && self.0 >= Self::FUNC12.0 {
            u8::try_from(Self::FUNC1.0 - self.0 + 1).ok()
        } else {
            None
        }
    }

    /// The character for this key, if it is a codepoint.
    pub fn as_char(self) -> Option<char> {
        if self.is_special() {
            None
        } else {
            char::from_u32(self.0)
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_special() {
            write!(f, "Key({})", super::names::name_of(*self))
        } else {
            write!(f, "Key({:#x})", self.0)
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::from_char(c)
    }
}

/// A non-character key as named by the terminal driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    Down,
    Up,
    Left,
    Right,
    Home,
    End,
    Backspace,
    DeleteChar,
    InsertChar,
    PageDown,
    PageUp,
    Enter,
    Help,
    /// The terminal was resized; not a key.
    Resize,
    /// Function key `F(n)`.
    F(u8),
    /// A driver code with no name here.
    Other(u32),
}

/// The driver-native code of a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawCode {
    /// A byte or wide character.
    Char(u32),
    /// A function key.
    Function(FunctionKey),
}

/// One decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    raw: RawCode,
    key: Key,
}

impl KeyEvent {
    /// Create an event from both layers.
    pub fn new(raw: RawCode, key: Key) -> Self {
        Self { raw, key }
    }

    /// The normalized key. This is the only field routing looks at.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The code the terminal driver reported.
    pub fn raw(&self) -> RawCode {
        self.raw
    }

    /// Whether the driver reported a function key.
    pub fn is_function(&self) -> bool {
        matches!(self.raw, RawCode::Function(_))
    }

    /// The key as it should be delivered to character input.
    ///
    /// Illegal or unsupported codes come back as [`Key::UNKNOWN`].
    pub fn char_input<C: KeyCapabilities + ?Sized>(&self, caps: &C) -> Key {
        classify::from_native(self.key.code(), caps)
    }
}

/// What one read from the terminal produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal changed size.
    Resize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_keys_are_contiguous() {
        assert_eq!(Key::func(1), Some(Key::FUNC1));
        assert_eq!(Key::func(12), Some(Key::FUNC12));
        assert_eq!(Key::func(0), None);
        assert_eq!(Key::func(13), None);
        for n in 1..=12 {
            assert_eq!(Key::func(n).and_then(Key::func_number), Some(n));
        }
    }

    #[test]
    fn test_special_keys_do_not_collide_with_codepoints() {
        for key in [Key::UNKNOWN, Key::LEFT, Key::TAB, Key::END, Key::FUNC1, Key::FUNC12] {
            assert!(key.is_special());
            assert!(key.code() > 0x10_FFFF);
            assert_eq!(key.as_char(), None);
        }
        assert!(!Key::from_char('a').is_special());
        assert!(!Key::from_u32(0x10_FFFF).is_special());
    }

    #[test]
    fn test_func_number_of_non_function_key() {
        assert_eq!(Key::END.func_number(), None);
        assert_eq!(Key::from_char('1').func_number(), None);
    }

    #[test]
    fn test_key_event_layers() {
        let event = KeyEvent::new(RawCode::Function(FunctionKey::Left), Key::LEFT);
        assert!(event.is_function());
        assert_eq!(event.key(), Key::LEFT);

        let event = KeyEvent::new(RawCode::Char(0x61), Key::from_char('a'));
        assert!(!event.is_function());
        assert_eq!(event.raw(), RawCode::Char(0x61));
    }

    #[test]
    fn test_debug_uses_names_for_special_keys() {
        assert_eq!(format!("{:?}", Key::LEFT), "Key(left-arrow)");
        assert_eq!(format!("{:?}", Key::from_char('a')), "Key(0x61)");
    }
}

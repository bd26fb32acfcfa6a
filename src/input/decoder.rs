//! Key decoder.
//!
//! Reads one keystroke from the terminal driver and normalizes it into a
//! [`KeyEvent`]. Backspace and forward-delete both become [`Key::DELETE`].

use tracing::trace;

use super::driver::{KeyCapabilities, RawRead, TerminalDriver};
use super::keys::{FunctionKey, Key, KeyEvent, Keystroke, RawCode};

/// Pulls keystrokes out of a terminal driver.
#[derive(Debug)]
pub struct KeyDecoder<D> {
    driver: D,
}

impl<D: TerminalDriver> KeyDecoder<D> {
    /// Wrap a driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Block for the next keystroke.
    ///
    /// Returns `None` when the driver has no more input; the caller should
    /// end its input loop.
    pub fn decode_key(&mut self) -> Option<Keystroke> {
        let read = self.driver.read_key();
        decode_read(read, &self.driver)
    }

    /// The wrapped driver, for capability and locale queries.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the wrapped driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Unwrap the driver.
    pub fn into_driver(self) -> D {
        self.driver
    }
}

/// Normalize one raw read.
pub fn decode_read<C: KeyCapabilities + ?Sized>(read: RawRead, caps: &C) -> Option<Keystroke> {
    let stroke = match read {
        RawRead::NoInput => return None,
        RawRead::Function(FunctionKey::Resize) => Keystroke::Resize,
        RawRead::Function(code) => {
            Keystroke::Key(KeyEvent::new(RawCode::Function(code), function_key(code)))
        }
        RawRead::Char(code) => Keystroke::Key(KeyEvent::new(RawCode::Char(code), char_key(code, caps))),
    };
    trace!(?read, ?stroke, "Decoded keystroke");
    Some(stroke)
}

fn function_key(code: FunctionKey) -> Key {
    match code {
        FunctionKey::Down => Key::DOWN,
        FunctionKey::Up => Key::UP,
        FunctionKey::Left => Key::LEFT,
        FunctionKey::Right => Key::RIGHT,
        FunctionKey::Home => Key::HOME,
        FunctionKey::End => Key::END,
        FunctionKey::Backspace | FunctionKey::DeleteChar => Key::DELETE,
        FunctionKey::PageDown => Key::PAGE_DOWN,
        FunctionKey::PageUp => Key::PAGE_UP,
        FunctionKey::Enter => Key::RETURN,
        FunctionKey::F(n) => Key::func(n).unwrap_or(Key::UNKNOWN),
        FunctionKey::InsertChar
        | FunctionKey::Help
        | FunctionKey::Resize
        | FunctionKey::Other(_) => Key::UNKNOWN,
    }
}

fn char_key<C: KeyCapabilities + ?Sized>(code: u32, caps: &C) -> Key {
    match code {
        0x09 => Key::TAB,
        0x1B => Key::ESCAPE,
        0x08 | 0x7F => Key::DELETE,
        0x0A | 0x0D => Key::RETURN,
        _ if code > 0x100 && !caps.is_printable(code) => Key::UNKNOWN,
        _ => Key::from_u32(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::driver::ScriptedDriver;

    fn decode_one(read: RawRead) -> Option<Keystroke> {
        let mut decoder = KeyDecoder::new(ScriptedDriver::new([read]));
        decoder.decode_key()
    }

    fn decoded_key(read: RawRead) -> Key {
        match decode_one(read) {
            Some(Keystroke::Key(event)) => event.key(),
            other => panic!("expected a key, got {other:?}"),
        }
    }

    #[test]
    fn test_control_bytes_map_to_special_keys() {
        let cases = [
            (0x09, Key::TAB),
            (0x1B, Key::ESCAPE),
            (0x08, Key::DELETE),
            (0x7F, Key::DELETE),
            (0x0D, Key::RETURN),
            (0x0A, Key::RETURN),
        ];
        for (byte, expected) in cases {
            assert_eq!(decoded_key(RawRead::Char(byte)), expected, "byte {byte:#x}");
        }
    }

    #[test]
    fn test_other_control_bytes_pass_through() {
        assert_eq!(decoded_key(RawRead::Char(0x0C)), Key::from_u32(0x0C));
        assert_eq!(decoded_key(RawRead::Char(0x19)), Key::from_u32(0x19));
    }

    #[test]
    fn test_plain_chars_pass_through() {
        assert_eq!(decoded_key(RawRead::Char(0x61)), Key::from_char('a'));
        assert_eq!(decoded_key(RawRead::Char(0xE9)), Key::from_u32(0xE9));
        assert_eq!(decoded_key(RawRead::Char(0x3B1)), Key::from_u32(0x3B1));
    }

    #[test]
    fn test_unprintable_wide_char_is_unknown() {
        let mut decoder = KeyDecoder::new(ScriptedDriver::new([RawRead::Char(0x3B1)]).narrow());
        match decoder.decode_key() {
            Some(Keystroke::Key(event)) => {
                assert_eq!(event.key(), Key::UNKNOWN);
                assert_eq!(event.raw(), RawCode::Char(0x3B1));
            }
            other => panic!("expected a key, got {other:?}"),
        }
    }

    #[test]
    fn test_function_keys_map_to_special_keys() {
        let cases = [
            (FunctionKey::Down, Key::DOWN),
            (FunctionKey::Up, Key::UP),
            (FunctionKey::Left, Key::LEFT),
            (FunctionKey::Right, Key::RIGHT),
            (FunctionKey::Home, Key::HOME),
            (FunctionKey::End, Key::END),
            (FunctionKey::Backspace, Key::DELETE),
            (FunctionKey::DeleteChar, Key::DELETE),
            (FunctionKey::PageUp, Key::PAGE_UP),
            (FunctionKey::PageDown, Key::PAGE_DOWN),
            (FunctionKey::Enter, Key::RETURN),
            (FunctionKey::F(1), Key::FUNC1),
            (FunctionKey::F(12), Key::FUNC12),
        ];
        for (code, expected) in cases {
            assert_eq!(decoded_key(RawRead::Function(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn test_unrecognized_function_keys_are_unknown() {
        for code in [
            FunctionKey::F(13),
            FunctionKey::InsertChar,
            FunctionKey::Help,
            FunctionKey::Other(0o777),
        ] {
            assert_eq!(decoded_key(RawRead::Function(code)), Key::UNKNOWN, "{code:?}");
        }
    }

    #[test]
    fn test_function_flag_is_kept() {
        match decode_one(RawRead::Function(FunctionKey::Backspace)) {
            Some(Keystroke::Key(event)) => {
                assert!(event.is_function());
                assert_eq!(event.raw(), RawCode::Function(FunctionKey::Backspace));
            }
            other => panic!("expected a key, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_is_not_a_key() {
        assert_eq!(decode_one(RawRead::Function(FunctionKey::Resize)), Some(Keystroke::Resize));
    }

    #[test]
    fn test_no_input() {
        assert_eq!(decode_one(RawRead::NoInput), None);

        let mut decoder = KeyDecoder::new(ScriptedDriver::new([RawRead::Char(0x61)]));
        assert!(decoder.decode_key().is_some());
        assert!(decoder.decode_key().is_none());
    }
}

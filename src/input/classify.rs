//! Legality and printability of key values.
//!
//! [`from_native`] is the filter every application-visible character
//! passes through. Anything it does not recognize becomes [`Key::UNKNOWN`].

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_width::UnicodeWidthChar;

use super::driver::KeyCapabilities;
use super::keys::{FunctionKey, Key};

/// Whether `code` is a legal Latin-1/Unicode input value or a special key.
pub fn is_legal_latin1(code: u32) -> bool {
    code == 0x0A
        || (0x20..0x7F).contains(&code)
        || (0xA0..0x11_0000).contains(&code)
        || Key::from_u32(code).is_special()
}

/// Whether the terminal can actually produce the special key `key`.
pub fn is_legal_keycode<C: KeyCapabilities + ?Sized>(key: Key, caps: &C) -> bool {
    match key {
        Key::LEFT => caps.has_capability(FunctionKey::Left),
        Key::RIGHT => caps.has_capability(FunctionKey::Right),
        Key::UP => caps.has_capability(FunctionKey::Up),
        Key::DOWN => caps.has_capability(FunctionKey::Down),
        Key::RETURN | Key::ESCAPE | Key::TAB => true,
        Key::DELETE => {
            caps.has_capability(FunctionKey::Backspace) || caps.has_capability(FunctionKey::DeleteChar)
        }
        Key::PAGE_UP => caps.has_capability(FunctionKey::PageUp),
        Key::PAGE_DOWN => caps.has_capability(FunctionKey::PageDown),
        Key::HOME => caps.has_capability(FunctionKey::Home),
        Key::END => caps.has_capability(FunctionKey::End),
        other => match other.func_number() {
            Some(n) => caps.has_capability(FunctionKey::F(n)),
            None => false,
        },
    }
}

/// Normalize a native code for character input.
pub fn from_native<C: KeyCapabilities + ?Sized>(code: u32, caps: &C) -> Key {
    let key = Key::from_u32(code);
    if !is_legal_latin1(code)
        || (code >= 0x100 && !(is_legal_keycode(key, caps) || caps.is_printable(code)))
    {
        Key::UNKNOWN
    } else {
        key
    }
}

/// Whether `key` is a non-Latin-1 codepoint the locale can print.
pub fn is_printable_beyond_latin1<C: KeyCapabilities + ?Sized>(key: Key, caps: &C) -> bool {
    key.code() > 0xFF && key.as_char().is_some() && caps.is_printable(key.code())
}

/// Printability by Unicode category and width, for drivers without a
/// locale of their own.
///
/// Unassigned codepoints, noncharacters, private-use, format and separator
/// codes are not printable. A single-byte terminal prints nothing at or
/// above 0x100.
pub fn is_printable_unicode(codepoint: u32, wide_chars: bool) -> bool {
    if !wide_chars && codepoint >= 0x100 {
        return false;
    }
    let Some(c) = char::from_u32(codepoint) else {
        return false;
    };
    let unprintable = matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Unassigned
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    );
    !unprintable && c.width().is_some()
}

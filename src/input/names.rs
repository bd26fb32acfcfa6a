//! Human-readable key names for diagnostics.

use std::borrow::Cow;

use super::keys::{FunctionKey, Key, KeyEvent, RawCode};

/// Name a normalized key.
pub fn name_of(key: Key) -> Cow<'static, str> {
    let code = key.code();
    match code {
        0x20..=0x7E => return Cow::Owned(char::from(code as u8).to_string()),
        0xA0..=0xFF => return Cow::Owned(format!("0x{:02X}", code)),
        _ => {}
    }

    if let Some(n) = key.func_number() {
        return Cow::Owned(format!("func-{}", n));
    }

    let name = match key {
        Key::TAB => "tab",
        Key::ESCAPE => "escape",
        Key::RETURN => "return",
        Key::DELETE => "delete",
        Key::LEFT => "left-arrow",
        Key::RIGHT => "right-arrow",
        Key::UP => "up-arrow",
        Key::DOWN => "down-arrow",
        Key::HOME => "home",
        Key::END => "end",
        Key::PAGE_UP => "page-up",
        Key::PAGE_DOWN => "page-down",
        _ if code < 0x20 => return Cow::Owned(format!("ctrl-{}", char::from(b'@' + code as u8))),
        _ => "unknown-key",
    };
    Cow::Borrowed(name)
}

/// Name a keystroke, preferring the driver's own view of it.
///
/// The raw layer tells backspace from delete and names driver keys that
/// have no normalized form.
pub fn name_of_event(event: &KeyEvent) -> Cow<'static, str> {
    match event.raw() {
        RawCode::Char(0x08) => Cow::Borrowed("backspace"),
        RawCode::Char(0x09) => Cow::Borrowed("tab"),
        RawCode::Char(0x1B) => Cow::Borrowed("escape"),
        RawCode::Char(0x7F) => Cow::Borrowed("delete-char"),
        RawCode::Char(code) if Key::from_u32(code).is_special() => Cow::Borrowed("unknown-key"),
        RawCode::Char(code) => name_of(Key::from_u32(code)),
        RawCode::Function(code) => function_key_name(code),
    }
}

fn function_key_name(code: FunctionKey) -> Cow<'static, str> {
    let name = match code {
        FunctionKey::Down => "down-arrow",
        FunctionKey::Up => "up-arrow",
        FunctionKey::Left => "left-arrow",
        FunctionKey::Right => "right-arrow",
        FunctionKey::Home => "home",
        FunctionKey::End => "end",
        FunctionKey::Backspace => "backspace",
        FunctionKey::DeleteChar => "delete-char",
        FunctionKey::InsertChar => "insert-char",
        FunctionKey::PageDown => "page-down",
        FunctionKey::PageUp => "page-up",
        FunctionKey::Enter => "enter",
        FunctionKey::Help => "help",
        FunctionKey::Resize => "resize",
        FunctionKey::F(n @ 1..=12) => return Cow::Owned(format!("func-{}", n)),
        FunctionKey::F(_) | FunctionKey::Other(_) => "unknown-key",
    };
    Cow::Borrowed(name)
}

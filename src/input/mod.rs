//! Keyboard input.
//!
//! This module turns raw terminal reads into normalized key events,
//! classifies key values, and names keys for diagnostics.

pub mod classify;
mod decoder;
mod driver;
mod keys;
pub mod names;
mod terminal;

pub use decoder::{decode_read, KeyDecoder};
pub use driver::{KeyCapabilities, RawRead, ScriptedDriver, TerminalDriver, STANDARD_KEYS};
pub use keys::{FunctionKey, Key, KeyEvent, Keystroke, RawCode};
pub use terminal::CrosstermDriver;

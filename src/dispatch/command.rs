//! Command descriptors.
//!
//! A [`Command`] names a handler and says what argument it gets: either a
//! fixed [`EditOp`] or the key that triggered it. Descriptors live in
//! statics and are only ever read.

use crate::input::Key;

/// The handlers keys can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move focus to the next window that wants input.
    ChangeFocus,
    /// Redraw the whole screen.
    Refresh,
    /// Re-layout after a terminal resize.
    Resize,
    GridAcceptKey,
    GridAcceptLine,
    GridInsertKey,
    GridMoveCursor,
    GridDelete,
    BufferAcceptKey,
    BufferAcceptLine,
    BufferInsertKey,
    BufferMoveCursor,
    BufferDelete,
    BufferHistory,
    BufferScroll,
}

/// Fixed command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// The command takes no argument.
    None,
    Left,
    Right,
    LeftEnd,
    RightEnd,
    Up,
    Down,
    UpEnd,
    DownEnd,
    UpPage,
    DownPage,
    Delete,
    DeleteNext,
    KillInput,
    KillLine,
}

/// How a command gets its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    /// Always the same operation.
    Fixed(EditOp),
    /// The key that triggered the command.
    PassKey,
}

/// The argument a handler is invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Op(EditOp),
    Key(Key),
}

/// An immutable (handler, argument) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    pub arg: ArgSpec,
}

impl Command {
    /// A command with a fixed argument.
    pub const fn fixed(action: Action, op: EditOp) -> Self {
        Self {
            action,
            arg: ArgSpec::Fixed(op),
        }
    }

    /// A command that receives the triggering key.
    pub const fn pass_key(action: Action) -> Self {
        Self {
            action,
            arg: ArgSpec::PassKey,
        }
    }

    /// Resolve the argument for a keystroke.
    pub fn resolve(&self, key: Key) -> Argument {
        match self.arg {
            ArgSpec::Fixed(op) => Argument::Op(op),
            ArgSpec::PassKey => Argument::Key(key),
        }
    }
}

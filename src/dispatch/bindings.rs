//! Key binding tables.
//!
//! Each scope is a pure lookup from a key to a static [`Command`]. Within
//! a window the always-bound keys are checked first, then the paging
//! override for text buffers with unseen output, then the char or line
//! table for whatever input the window has requested.
//!
//! Text buffers bind ctrl-Y and ctrl-V for paging ahead of char input, so
//! those two can never be typed into a text buffer. Text grids have no
//! such keys.

use tracing::trace;

use super::command::{Action, Command, EditOp};
use super::window::{InputRequest, Terminators, Window, WindowKind};
use crate::input::{classify, Key, KeyCapabilities};

const CTRL_A: u32 = 0x01;
const CTRL_B: u32 = 0x02;
const CTRL_D: u32 = 0x04;
const CTRL_E: u32 = 0x05;
const CTRL_F: u32 = 0x06;
const CTRL_K: u32 = 0x0B;
const CTRL_L: u32 = 0x0C;
const CTRL_N: u32 = 0x0E;
const CTRL_P: u32 = 0x10;
const CTRL_U: u32 = 0x15;
const CTRL_V: u32 = 0x16;
const CTRL_Y: u32 = 0x19;

static CHANGE_FOCUS: Command = Command::fixed(Action::ChangeFocus, EditOp::None);
static REFRESH: Command = Command::fixed(Action::Refresh, EditOp::None);
static RESIZE: Command = Command::fixed(Action::Resize, EditOp::None);

/// Keys that mean the same thing whichever window has focus.
pub fn global(key: Key) -> Option<&'static Command> {
    match key {
        Key::TAB => Some(&CHANGE_FOCUS),
        k if k.code() == CTRL_L => Some(&REFRESH),
        _ => None,
    }
}

/// The command run when the terminal is resized.
pub fn resize() -> &'static Command {
    &RESIZE
}

/// The line-editing commands of one window kind.
struct LineTable {
    accept: Command,
    accept_with_terminator: Command,
    insert: Command,
    left: Command,
    right: Command,
    left_end: Command,
    right_end: Command,
    delete: Command,
    delete_next: Command,
    kill_input: Command,
    kill_line: Command,
}

impl LineTable {
    const fn new(accept: Action, insert: Action, move_cursor: Action, delete: Action) -> Self {
        Self {
            accept: Command::fixed(accept, EditOp::None),
            accept_with_terminator: Command::pass_key(accept),
            insert: Command::pass_key(insert),
            left: Command::fixed(move_cursor, EditOp::Left),
            right: Command::fixed(move_cursor, EditOp::Right),
            left_end: Command::fixed(move_cursor, EditOp::LeftEnd),
            right_end: Command::fixed(move_cursor, EditOp::RightEnd),
            delete: Command::fixed(delete, EditOp::Delete),
            delete_next: Command::fixed(delete, EditOp::DeleteNext),
            kill_input: Command::fixed(delete, EditOp::KillInput),
            kill_line: Command::fixed(delete, EditOp::KillLine),
        }
    }
}

static GRID_LINE: LineTable = LineTable::new(
    Action::GridAcceptLine,
    Action::GridInsertKey,
    Action::GridMoveCursor,
    Action::GridDelete,
);
static GRID_CHAR: Command = Command::pass_key(Action::GridAcceptKey);

static BUFFER_LINE: LineTable = LineTable::new(
    Action::BufferAcceptLine,
    Action::BufferInsertKey,
    Action::BufferMoveCursor,
    Action::BufferDelete,
);
static BUFFER_CHAR: Command = Command::pass_key(Action::BufferAcceptKey);
static HISTORY_PREV: Command = Command::fixed(Action::BufferHistory, EditOp::Up);
static HISTORY_NEXT: Command = Command::fixed(Action::BufferHistory, EditOp::Down);
static SCROLL_TO_TOP: Command = Command::fixed(Action::BufferScroll, EditOp::UpEnd);
static SCROLL_TO_BOTTOM: Command = Command::fixed(Action::BufferScroll, EditOp::DownEnd);
static SCROLL_UP_PAGE: Command = Command::fixed(Action::BufferScroll, EditOp::UpPage);
static SCROLL_DOWN_PAGE: Command = Command::fixed(Action::BufferScroll, EditOp::DownPage);

/// Look up `key` in a window's own tables.
pub fn for_window<W, C>(window: &W, key: Key, caps: &C) -> Option<&'static Command>
where
    W: Window + ?Sized,
    C: KeyCapabilities + ?Sized,
{
    let cmd = match window.kind() {
        WindowKind::TextGrid => match window.input_request() {
            InputRequest::Line => line_editing(&GRID_LINE, window.line_terminators(), key, caps),
            InputRequest::Char => Some(&GRID_CHAR),
            InputRequest::None => None,
        },
        WindowKind::TextBuffer => text_buffer(key)
            .or_else(|| window.has_unseen_scrollback().then_some(&SCROLL_DOWN_PAGE))
            .or_else(|| match window.input_request() {
                InputRequest::Line => buffer_line(window.line_terminators(), key, caps),
                InputRequest::Char => Some(&BUFFER_CHAR),
                InputRequest::None => None,
            }),
        WindowKind::Pair => None,
    };
    trace!(?key, kind = ?window.kind(), found = ?cmd.map(|c| c.action), "Window binding lookup");
    cmd
}

/// Keys always bound in a text buffer.
fn text_buffer(key: Key) -> Option<&'static Command> {
    match key {
        Key::HOME => Some(&SCROLL_TO_TOP),
        Key::END => Some(&SCROLL_TO_BOTTOM),
        Key::PAGE_UP => Some(&SCROLL_UP_PAGE),
        Key::PAGE_DOWN => Some(&SCROLL_DOWN_PAGE),
        k if k.code() == CTRL_Y => Some(&SCROLL_UP_PAGE),
        k if k.code() == CTRL_V => Some(&SCROLL_DOWN_PAGE),
        _ => None,
    }
}

/// Line editing in a text buffer: the shared keys plus history recall.
fn buffer_line<C: KeyCapabilities + ?Sized>(
    terminators: Terminators,
    key: Key,
    caps: &C,
) -> Option<&'static Command> {
    match key {
        Key::UP => Some(&HISTORY_PREV),
        Key::DOWN => Some(&HISTORY_NEXT),
        k if k.code() == CTRL_P => Some(&HISTORY_PREV),
        k if k.code() == CTRL_N => Some(&HISTORY_NEXT),
        _ => line_editing(&BUFFER_LINE, terminators, key, caps),
    }
}

fn line_editing<C: KeyCapabilities + ?Sized>(
    table: &'static LineTable,
    terminators: Terminators,
    key: Key,
    caps: &C,
) -> Option<&'static Command> {
    let code = key.code();
    if (0x20..0x7F).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return Some(&table.insert);
    }

    let cmd = match key {
        Key::RETURN => Some(&table.accept),
        Key::LEFT => Some(&table.left),
        Key::RIGHT => Some(&table.right),
        Key::HOME => Some(&table.left_end),
        Key::END => Some(&table.right_end),
        Key::DELETE => Some(&table.delete),
        Key::ESCAPE => terminators.accepts(key).then_some(&table.accept_with_terminator),
        _ if key.func_number().is_some() => {
            terminators.accepts(key).then_some(&table.accept_with_terminator)
        }
        _ => match code {
            CTRL_B => Some(&table.left),
            CTRL_F => Some(&table.right),
            CTRL_A => Some(&table.left_end),
            CTRL_E => Some(&table.right_end),
            CTRL_D => Some(&table.delete_next),
            CTRL_K => Some(&table.kill_line),
            CTRL_U => Some(&table.kill_input),
            _ => None,
        },
    };

    cmd.or_else(|| classify::is_printable_beyond_latin1(key, caps).then_some(&table.insert))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::command::ArgSpec;
    use crate::dispatch::window::WindowState;
    use crate::input::{FunctionKey, ScriptedDriver};

    fn caps() -> ScriptedDriver {
        ScriptedDriver::new([])
    }

    fn lookup(window: &WindowState, key: Key) -> Option<Command> {
        for_window(window, key, &caps()).copied()
    }

    fn ctrl(c: char) -> Key {
        Key::from_u32(c as u32 & 0x1F)
    }

    #[test]
    fn test_global_keys() {
        assert_eq!(global(Key::TAB).map(|c| c.action), Some(Action::ChangeFocus));
        assert_eq!(global(ctrl('l')).map(|c| c.action), Some(Action::Refresh));
        assert_eq!(global(Key::from_char('a')), None);
        assert_eq!(global(Key::RETURN), None);
        assert_eq!(resize().action, Action::Resize);
    }

    #[test]
    fn test_grid_char_mode_takes_everything() {
        let grid = WindowState::text_grid().with_request(InputRequest::Char);
        for key in [Key::from_char('a'), Key::ESCAPE, Key::UNKNOWN, ctrl('y'), Key::FUNC12] {
            let cmd = lookup(&grid, key).unwrap();
            assert_eq!(cmd.action, Action::GridAcceptKey);
            assert_eq!(cmd.arg, ArgSpec::PassKey);
        }
    }

    #[test]
    fn test_idle_windows_bind_nothing() {
        let grid = WindowState::text_grid();
        let buffer = WindowState::text_buffer();
        let pair = WindowState::pair().with_request(InputRequest::Char);
        assert_eq!(lookup(&grid, Key::from_char('a')), None);
        assert_eq!(lookup(&buffer, Key::from_char('a')), None);
        assert_eq!(lookup(&pair, Key::from_char('a')), None);
    }

    #[test]
    fn test_grid_line_editing() {
        let grid = WindowState::text_grid().with_request(InputRequest::Line);
        let expect = |key: Key, action: Action, op: EditOp| {
            assert_eq!(lookup(&grid, key), Some(Command::fixed(action, op)), "{key:?}");
        };
        expect(Key::RETURN, Action::GridAcceptLine, EditOp::None);
        expect(Key::LEFT, Action::GridMoveCursor, EditOp::Left);
        expect(ctrl('b'), Action::GridMoveCursor, EditOp::Left);
        expect(Key::RIGHT, Action::GridMoveCursor, EditOp::Right);
        expect(ctrl('f'), Action::GridMoveCursor, EditOp::Right);
        expect(Key::HOME, Action::GridMoveCursor, EditOp::LeftEnd);
        expect(ctrl('a'), Action::GridMoveCursor, EditOp::LeftEnd);
        expect(Key::END, Action::GridMoveCursor, EditOp::RightEnd);
        expect(ctrl('e'), Action::GridMoveCursor, EditOp::RightEnd);
        expect(Key::DELETE, Action::GridDelete, EditOp::Delete);
        expect(ctrl('d'), Action::GridDelete, EditOp::DeleteNext);
        expect(ctrl('k'), Action::GridDelete, EditOp::KillLine);
        expect(ctrl('u'), Action::GridDelete, EditOp::KillInput);
    }

    #[test]
    fn test_line_insert_ranges() {
        let grid = WindowState::text_grid().with_request(InputRequest::Line);
        let insert = Command::pass_key(Action::GridInsertKey);
        assert_eq!(lookup(&grid, Key::from_char(' ')), Some(insert));
        assert_eq!(lookup(&grid, Key::from_char('~')), Some(insert));
        assert_eq!(lookup(&grid, Key::from_u32(0xA0)), Some(insert));
        assert_eq!(lookup(&grid, Key::from_u32(0xFF)), Some(insert));
        assert_eq!(lookup(&grid, Key::from_u32(0x85)), None);
        assert_eq!(lookup(&grid, Key::UNKNOWN), None);
        assert_eq!(lookup(&grid, ctrl('y')), None);
    }

    #[test]
    fn test_line_insert_beyond_latin1_follows_locale() {
        let grid = WindowState::text_grid().with_request(InputRequest::Line);
        let alpha = Key::from_u32(0x3B1);

        let wide = for_window(&grid, alpha, &ScriptedDriver::new([])).copied();
        assert_eq!(wide, Some(Command::pass_key(Action::GridInsertKey)));

        let narrow = for_window(&grid, alpha, &ScriptedDriver::new([]).narrow());
        assert!(narrow.is_none());
    }

    #[test]
    fn test_terminators_need_mask_bit() {
        let plain = WindowState::text_grid().with_request(InputRequest::Line);
        assert_eq!(lookup(&plain, Key::ESCAPE), None);
        assert_eq!(lookup(&plain, Key::func(3).unwrap()), None);

        let masked = plain.with_terminators(Terminators::ESCAPE | Terminators::FUNC3);
        let term = Some(Command::pass_key(Action::GridAcceptLine));
        assert_eq!(lookup(&masked, Key::ESCAPE), term);
        assert_eq!(lookup(&masked, Key::func(3).unwrap()), term);
        assert_eq!(lookup(&masked, Key::func(4).unwrap()), None);
    }

    #[test]
    fn test_buffer_line_history() {
        let buffer = WindowState::text_buffer().with_request(InputRequest::Line);
        let prev = Some(Command::fixed(Action::BufferHistory, EditOp::Up));
        let next = Some(Command::fixed(Action::BufferHistory, EditOp::Down));
        assert_eq!(lookup(&buffer, Key::UP), prev);
        assert_eq!(lookup(&buffer, ctrl('p')), prev);
        assert_eq!(lookup(&buffer, Key::DOWN), next);
        assert_eq!(lookup(&buffer, ctrl('n')), next);

        let grid = WindowState::text_grid().with_request(InputRequest::Line);
        assert_eq!(lookup(&grid, Key::UP), None);
    }

    #[test]
    fn test_buffer_line_editing_uses_buffer_actions() {
        let buffer = WindowState::text_buffer()
            .with_request(InputRequest::Line)
            .with_terminators(Terminators::FUNC1);
        assert_eq!(
            lookup(&buffer, Key::RETURN),
            Some(Command::fixed(Action::BufferAcceptLine, EditOp::None))
        );
        assert_eq!(
            lookup(&buffer, Key::from_char('x')),
            Some(Command::pass_key(Action::BufferInsertKey))
        );
        assert_eq!(
            lookup(&buffer, ctrl('k')),
            Some(Command::fixed(Action::BufferDelete, EditOp::KillLine))
        );
        assert_eq!(
            lookup(&buffer, Key::FUNC1),
            Some(Command::pass_key(Action::BufferAcceptLine))
        );
    }

    #[test]
    fn test_buffer_always_bound_keys_win_over_line_editing() {
        let buffer = WindowState::text_buffer().with_request(InputRequest::Line);
        assert_eq!(
            lookup(&buffer, Key::HOME),
            Some(Command::fixed(Action::BufferScroll, EditOp::UpEnd))
        );
        assert_eq!(
            lookup(&buffer, Key::END),
            Some(Command::fixed(Action::BufferScroll, EditOp::DownEnd))
        );
    }

    #[test]
    fn test_buffer_paging_keys_override_char_input() {
        let buffer = WindowState::text_buffer().with_request(InputRequest::Char);
        let up = Some(Command::fixed(Action::BufferScroll, EditOp::UpPage));
        let down = Some(Command::fixed(Action::BufferScroll, EditOp::DownPage));
        assert_eq!(lookup(&buffer, ctrl('y')), up);
        assert_eq!(lookup(&buffer, Key::PAGE_UP), up);
        assert_eq!(lookup(&buffer, ctrl('v')), down);
        assert_eq!(lookup(&buffer, Key::PAGE_DOWN), down);
        assert_eq!(
            lookup(&buffer, Key::from_char('y')),
            Some(Command::pass_key(Action::BufferAcceptKey))
        );
    }

    #[test]
    fn test_unseen_scrollback_pages_on_any_key() {
        let page = Some(Command::fixed(Action::BufferScroll, EditOp::DownPage));
        for request in [InputRequest::Line, InputRequest::Char, InputRequest::None] {
            let buffer = WindowState::text_buffer()
                .with_request(request)
                .with_unseen_scrollback(true);
            for key in [Key::RETURN, Key::from_char('a'), Key::DELETE, Key::UNKNOWN] {
                assert_eq!(lookup(&buffer, key), page, "{request:?} {key:?}");
            }
        }
    }

    #[test]
    fn test_capability_gaps_do_not_change_bindings() {
        let grid = WindowState::text_grid().with_request(InputRequest::Line);
        let caps = ScriptedDriver::new([]).without(FunctionKey::Left);
        assert!(for_window(&grid, Key::LEFT, &caps).is_some());
    }
}

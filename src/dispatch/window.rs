//! Window-tree interface.
//!
//! The router never owns windows. It reads their type and input state
//! through [`Window`] and walks them through [`WindowTree`].

use std::fmt;

use bitflags::bitflags;

use crate::input::Key;

/// The kind of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// A fixed grid of character cells.
    TextGrid,
    /// A scrolling buffer of text.
    TextBuffer,
    /// A layout node holding two children. Never takes input.
    Pair,
}

/// What kind of input a window is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputRequest {
    #[default]
    None,
    /// Single keystrokes.
    Char,
    /// A whole edited line.
    Line,
}

impl InputRequest {
    /// Whether any input is requested.
    pub fn is_pending(self) -> bool {
        self != InputRequest::None
    }
}

bitflags! {
    /// Keys besides Return that may end a line-input request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Terminators: u32 {
        const FUNC1 = 1 << 1;
        const FUNC2 = 1 << 2;
        const FUNC3 = 1 << 3;
        const FUNC4 = 1 << 4;
        const FUNC5 = 1 << 5;
        const FUNC6 = 1 << 6;
        const FUNC7 = 1 << 7;
        const FUNC8 = 1 << 8;
        const FUNC9 = 1 << 9;
        const FUNC10 = 1 << 10;
        const FUNC11 = 1 << 11;
        const FUNC12 = 1 << 12;
        const ESCAPE = 1 << 16;
    }
}

impl Terminators {
    /// The flag for `key`, if it can be a terminator at all.
    pub fn for_key(key: Key) -> Option<Self> {
        if key == Key::ESCAPE {
            return Some(Terminators::ESCAPE);
        }
        key.func_number()
            .and_then(|n| Terminators::from_bits(1 << n))
    }

    /// Whether `key` ends the line under this mask.
    pub fn accepts(self, key: Key) -> bool {
        Self::for_key(key).is_some_and(|flag| self.contains(flag))
    }
}

/// Read access to one window's input state.
pub trait Window {
    /// The window's kind.
    fn kind(&self) -> WindowKind;

    /// The input the window is waiting for.
    fn input_request(&self) -> InputRequest;

    /// Whether output the user has not seen is waiting below the fold.
    ///
    /// Only meaningful for text buffers.
    fn has_unseen_scrollback(&self) -> bool {
        false
    }

    /// The line-input terminator mask.
    fn line_terminators(&self) -> Terminators {
        Terminators::empty()
    }
}

/// The live window hierarchy.
pub trait WindowTree {
    /// Stable window handle.
    type Id: Copy + Eq + fmt::Debug;
    /// The window type the tree hands out.
    type Node: Window + ?Sized;

    /// Look up a window. `None` if it is not in the tree.
    fn window(&self, id: Self::Id) -> Option<&Self::Node>;

    /// The window after `from` in tree order.
    ///
    /// `None` starts a traversal; `None` is returned after the last window.
    fn next_in_tree_order(&self, from: Option<Self::Id>) -> Option<Self::Id>;
}

/// Handle into a [`VecTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(usize);

/// Plain window state, as kept by [`VecTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub kind: WindowKind,
    pub request: InputRequest,
    pub unseen_scrollback: bool,
    pub terminators: Terminators,
}

impl WindowState {
    fn of_kind(kind: WindowKind) -> Self {
        Self {
            kind,
            request: InputRequest::None,
            unseen_scrollback: false,
            terminators: Terminators::empty(),
        }
    }

    /// A text grid with no pending input.
    pub fn text_grid() -> Self {
        Self::of_kind(WindowKind::TextGrid)
    }

    /// A text buffer with no pending input.
    pub fn text_buffer() -> Self {
        Self::of_kind(WindowKind::TextBuffer)
    }

    /// A pair window.
    pub fn pair() -> Self {
        Self::of_kind(WindowKind::Pair)
    }

    /// Set the input request.
    pub fn with_request(mut self, request: InputRequest) -> Self {
        self.request = request;
        self
    }

    /// Set the line terminators.
    pub fn with_terminators(mut self, terminators: Terminators) -> Self {
        self.terminators = terminators;
        self
    }

    /// Mark unseen scrollback as pending.
    pub fn with_unseen_scrollback(mut self, pending: bool) -> Self {
        self.unseen_scrollback = pending;
        self
    }
}

impl Window for WindowState {
    fn kind(&self) -> WindowKind {
        self.kind
    }

    fn input_request(&self) -> InputRequest {
        self.request
    }

    fn has_unseen_scrollback(&self) -> bool {
        self.kind == WindowKind::TextBuffer && self.unseen_scrollback
    }

    fn line_terminators(&self) -> Terminators {
        self.terminators
    }
}

/// A window tree flattened into tree order.
///
/// Closed windows leave a hole so the remaining ids stay valid.
#[derive(Debug, Clone, Default)]
pub struct VecTree {
    slots: Vec<Option<WindowState>>,
}

impl VecTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a window at the end of tree order.
    pub fn push(&mut self, window: WindowState) -> WindowId {
        self.slots.push(Some(window));
        WindowId(self.slots.len() - 1)
    }

    /// Mutable access to a live window.
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowState> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Close a window. Its id is never reused.
    pub fn close(&mut self, id: WindowId) -> Option<WindowState> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    /// Number of live windows.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether the tree has no live windows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WindowTree for VecTree {
    type Id = WindowId;
    type Node = WindowState;

    fn window(&self, id: WindowId) -> Option<&WindowState> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn next_in_tree_order(&self, from: Option<WindowId>) -> Option<WindowId> {
        let start = from.map_or(0, |id| id.0 + 1);
        self.slots
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, slot)| slot.is_some())
            .map(|(index, _)| WindowId(index))
    }
}

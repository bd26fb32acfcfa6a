//! Focus router.
//!
//! Owns the focus reference and decides, for each keystroke, which
//! command runs and in which window:
//!
//! 1. Global keys, dispatched with no window. Focus is untouched.
//! 2. The focus window's own bindings.
//! 3. Every other non-pair window in tree order, starting after the focus
//!    window and wrapping around. The first one with a binding takes
//!    focus and receives the command.
//! 4. Otherwise the key is unbound and a notice goes to the sink.
//!
//! The focus reference must name a window in the live tree. Code that
//! closes windows must call [`FocusRouter::set_focus`] to repair it before
//! the next keystroke.

use std::fmt;

use tracing::{debug, trace, warn};

use super::bindings;
use super::command::{Action, Argument, Command};
use super::msgline::{DiagnosticSink, MessageLine};
use super::window::{Window, WindowKind, WindowTree};
use crate::input::{names, Key, KeyCapabilities, KeyEvent, Keystroke};

/// Receives resolved commands. Implemented by the window layer.
pub trait Dispatcher<Id> {
    /// Run `action` in `window` (`None` for global commands).
    fn dispatch(&mut self, action: Action, window: Option<Id>, argument: Argument);
}

impl<Id, F> Dispatcher<Id> for F
where
    F: FnMut(Action, Option<Id>, Argument),
{
    fn dispatch(&mut self, action: Action, window: Option<Id>, argument: Argument) {
        self(action, window, argument);
    }
}

/// What routing one keystroke did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<Id> {
    /// A handler was invoked.
    Dispatched {
        action: Action,
        window: Option<Id>,
        argument: Argument,
    },
    /// Nothing is bound to the key; a notice was shown.
    Unbound { name: String },
}

/// Routes keystrokes to commands and tracks the focus window.
#[derive(Debug)]
pub struct FocusRouter<Id, S = MessageLine> {
    focus: Option<Id>,
    sink: S,
}

impl<Id, S> FocusRouter<Id, S>
where
    Id: Copy + Eq + fmt::Debug,
    S: DiagnosticSink,
{
    /// Create a router with no focus window.
    pub fn new(sink: S) -> Self {
        Self { focus: None, sink }
    }

    /// The current focus window.
    pub fn focus(&self) -> Option<Id> {
        self.focus
    }

    /// Replace or clear the focus reference.
    pub fn set_focus(&mut self, focus: Option<Id>) {
        if self.focus != focus {
            debug!(from = ?self.focus, to = ?focus, "Focus set");
        }
        self.focus = focus;
    }

    /// The notice sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the notice sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Route any decoded keystroke.
    pub fn route<T, C, D>(
        &mut self,
        tree: &T,
        caps: &C,
        stroke: &Keystroke,
        dispatcher: &mut D,
    ) -> RouteOutcome<Id>
    where
        T: WindowTree<Id = Id>,
        C: KeyCapabilities + ?Sized,
        D: Dispatcher<Id> + ?Sized,
    {
        match stroke {
            Keystroke::Key(event) => self.route_key(tree, caps, event, dispatcher),
            Keystroke::Resize => self.route_resize(dispatcher),
        }
    }

    /// Route one key event. Invokes at most one handler.
    pub fn route_key<T, C, D>(
        &mut self,
        tree: &T,
        caps: &C,
        event: &KeyEvent,
        dispatcher: &mut D,
    ) -> RouteOutcome<Id>
    where
        T: WindowTree<Id = Id>,
        C: KeyCapabilities + ?Sized,
        D: Dispatcher<Id> + ?Sized,
    {
        let key = event.key();

        if let Some(cmd) = bindings::global(key) {
            return run(cmd, None, key, dispatcher);
        }

        if let Some(focus) = self.focus {
            let cmd = tree
                .window(focus)
                .and_then(|window| bindings::for_window(window, key, caps));
            if let Some(cmd) = cmd {
                return run(cmd, Some(focus), key, dispatcher);
            }
        }

        let found = scan_tree(tree, self.focus, |id| {
            let window = tree.window(id)?;
            if window.kind() == WindowKind::Pair {
                return None;
            }
            bindings::for_window(window, key, caps)
        });
        if let Some((id, cmd)) = found {
            debug!(from = ?self.focus, to = ?id, ?key, "Key bound in another window, moving focus");
            self.focus = Some(id);
            return run(cmd, Some(id), key, dispatcher);
        }

        let name = names::name_of_event(event).into_owned();
        trace!(?key, name = %name, "Key not bound anywhere");
        self.sink
            .notice(&format!("The key <{}> is not currently defined.", name));
        RouteOutcome::Unbound { name }
    }

    /// Route a terminal resize to the global resize command.
    pub fn route_resize<D>(&mut self, dispatcher: &mut D) -> RouteOutcome<Id>
    where
        D: Dispatcher<Id> + ?Sized,
    {
        run(bindings::resize(), None, Key::UNKNOWN, dispatcher)
    }

    /// Make sure focus is on a window that wants input.
    ///
    /// Keeps the current focus if it is requesting input. Otherwise moves
    /// it to the next requesting window in tree order. If no window is
    /// requesting input the focus reference is left as it was.
    pub fn guess_initial_focus<T>(&mut self, tree: &T) -> Option<Id>
    where
        T: WindowTree<Id = Id>,
    {
        let requesting =
            |id: Id| tree.window(id).is_some_and(|w| w.input_request().is_pending());

        if self.focus.is_some_and(requesting) {
            return self.focus;
        }

        if let Some((id, ())) = scan_tree(tree, self.focus, |id| requesting(id).then_some(())) {
            debug!(from = ?self.focus, to = ?id, "Guessed input focus");
            self.focus = Some(id);
        }
        self.focus
    }
}

impl<Id> Default for FocusRouter<Id, MessageLine>
where
    Id: Copy + Eq + fmt::Debug,
{
    fn default() -> Self {
        Self::new(MessageLine::default())
    }
}

fn run<Id, D>(cmd: &Command, window: Option<Id>, key: Key, dispatcher: &mut D) -> RouteOutcome<Id>
where
    Id: Copy + fmt::Debug,
    D: Dispatcher<Id> + ?Sized,
{
    let argument = cmd.resolve(key);
    debug!(action = ?cmd.action, ?window, ?argument, "Dispatching command");
    dispatcher.dispatch(cmd.action, window, argument);
    RouteOutcome::Dispatched {
        action: cmd.action,
        window,
        argument,
    }
}

/// Visit windows in tree order after `start`, wrapping once, until `probe`
/// finds something. `start` itself is not probed.
///
/// Stops after one full pass even if `start` is no longer in the tree.
fn scan_tree<T, R>(
    tree: &T,
    start: Option<T::Id>,
    mut probe: impl FnMut(T::Id) -> Option<R>,
) -> Option<(T::Id, R)>
where
    T: WindowTree,
{
    let mut cursor = start;
    let mut wrapped = false;
    loop {
        cursor = tree.next_in_tree_order(cursor);
        match cursor {
            Some(id) if Some(id) == start => return None,
            Some(id) => {
                if let Some(found) = probe(id) {
                    return Some((id, found));
                }
            }
            None if start.is_none() => return None,
            None if wrapped => {
                warn!(?start, "Focus window is not in the tree");
                return None;
            }
            None => wrapped = true,
        }
    }
}

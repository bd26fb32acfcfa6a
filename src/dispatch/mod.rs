//! Key dispatch.
//!
//! This module holds the binding tables, the focus router that consults
//! them, the window-tree interface it routes over, and the message line
//! that reports unbound keys.

pub mod bindings;
mod command;
mod msgline;
mod router;
mod window;

pub use command::{Action, ArgSpec, Argument, Command, EditOp};
pub use msgline::{DiagnosticSink, MessageLine};
pub use router::{Dispatcher, FocusRouter, RouteOutcome};
pub use window::{
    InputRequest, Terminators, VecTree, Window, WindowId, WindowKind, WindowState, WindowTree,
};

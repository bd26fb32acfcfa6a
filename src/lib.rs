//! keyroute - key decoding and focus-aware dispatch for terminal text windows.
//!
//! Raw terminal reads are decoded into [`input::KeyEvent`]s, then the
//! [`dispatch::FocusRouter`] finds the command bound to the key in the
//! global scope, the focus window, or another window that wants it.
//!
//! ```
//! use keyroute::dispatch::{
//!     Action, Argument, FocusRouter, InputRequest, VecTree, WindowId, WindowState,
//! };
//! use keyroute::input::{KeyDecoder, RawRead, ScriptedDriver};
//!
//! let mut tree = VecTree::new();
//! let grid = tree.push(WindowState::text_grid().with_request(InputRequest::Char));
//!
//! let mut decoder = KeyDecoder::new(ScriptedDriver::new([RawRead::Char(0x61)]));
//! let mut router: FocusRouter<WindowId> = FocusRouter::default();
//! let mut seen = Vec::new();
//!
//! router.guess_initial_focus(&tree);
//! while let Some(stroke) = decoder.decode_key() {
//!     let mut record = |action: Action, window: Option<WindowId>, _arg: Argument| {
//!         seen.push((action, window))
//!     };
//!     router.route(&tree, decoder.driver(), &stroke, &mut record);
//! }
//! assert_eq!(seen, vec![(Action::GridAcceptKey, Some(grid))]);
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod logging;

pub use error::{AppError, Result};

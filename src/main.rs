//! keyroute - interactive key inspector.
//!
//! Puts the terminal in raw mode, routes every keystroke through a small
//! demo window tree and prints what each key did.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::terminal;
use tracing::{info, warn};

use keyroute::config::Config;
use keyroute::dispatch::{
    Action, Argument, Dispatcher, EditOp, FocusRouter, InputRequest, MessageLine, RouteOutcome,
    Terminators, VecTree, Window, WindowId, WindowState, WindowTree,
};
use keyroute::input::{classify, names, CrosstermDriver, Key, KeyDecoder, Keystroke};
use keyroute::{logging, AppError};

/// ctrl-Q ends the session.
const QUIT_KEY: Key = Key::from_u32(0x11);

/// Inspect how terminal keys are decoded and routed.
#[derive(Debug, Parser)]
#[command(name = "keyroute", version, about)]
struct Cli {
    /// Path to a configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not show notices on the message line.
    #[arg(long)]
    no_message_line: bool,

    /// Treat the terminal as single-byte.
    #[arg(long)]
    narrow: bool,

    /// Log filter directives, e.g. "keyroute=trace".
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    let result = run(&cli);
    if let Err(err) = &result {
        eprintln!("{}", err.user_message());
        if let Some(action) = err.suggested_action() {
            eprintln!("{}", action);
        }
    }

    logging::shutdown();
    result.map_err(Into::into)
}

fn run(cli: &Cli) -> keyroute::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using default: {}", e);
            Config::default()
        }),
    };
    if cli.no_message_line {
        config.settings.message_line = false;
    }
    if cli.narrow {
        config.settings.wide_chars = false;
    }

    terminal::enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let outcome = inspect(&config);
    terminal::disable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    outcome
}

/// The input loop: repair focus, read a key, route it, report.
fn inspect(config: &Config) -> keyroute::Result<()> {
    let mut tree = VecTree::new();
    let _root = tree.push(WindowState::pair());
    let story = tree.push(
        WindowState::text_buffer()
            .with_request(InputRequest::Line)
            .with_terminators(Terminators::ESCAPE),
    );
    let status = tree.push(WindowState::text_grid().with_request(InputRequest::Char));
    info!(?story, ?status, "Demo windows created");

    let driver = CrosstermDriver::from_settings(&config.settings);
    let mut demo = Demo::new(driver.clone());
    let mut decoder = KeyDecoder::new(driver);
    let mut router = FocusRouter::new(MessageLine::new(config.settings.message_line));

    let mut out = io::stdout();
    write!(out, "keyroute: type keys to see where they go, ctrl-Q quits\r\n")?;

    loop {
        router.guess_initial_focus(&tree);

        let Some(stroke) = decoder.decode_key() else {
            break;
        };
        let label = match &stroke {
            Keystroke::Key(event) if event.key() == QUIT_KEY => break,
            Keystroke::Key(event) => names::name_of_event(event).into_owned(),
            Keystroke::Resize => "resize".to_string(),
        };

        router.sink_mut().clear();
        match router.route(&tree, decoder.driver(), &stroke, &mut demo) {
            RouteOutcome::Dispatched {
                action,
                window,
                argument,
            } => {
                write!(out, "<{}> {:?} in {:?} with {:?}\r\n", label, action, window, argument)?;
            }
            RouteOutcome::Unbound { .. } => {
                let notice = router.sink().current();
                if !notice.is_empty() {
                    write!(out, "  {}\r\n", notice)?;
                }
            }
        }

        for line in demo.output.drain(..) {
            write!(out, "  {}\r\n", line)?;
        }
        if std::mem::take(&mut demo.focus_change) {
            let next = next_requesting(&tree, router.focus());
            router.set_focus(next);
            write!(out, "  focus is now {:?}\r\n", router.focus())?;
        }
        out.flush()?;
    }

    Ok(())
}

/// The next window after `from` that wants input, wrapping around.
fn next_requesting(tree: &VecTree, from: Option<WindowId>) -> Option<WindowId> {
    let wants_input = |id: WindowId| {
        tree.window(id)
            .is_some_and(|w| w.input_request().is_pending())
    };
    let after = std::iter::successors(tree.next_in_tree_order(from), |id| {
        tree.next_in_tree_order(Some(*id))
    });
    let before = std::iter::successors(tree.next_in_tree_order(None), |id| {
        tree.next_in_tree_order(Some(*id))
    });
    after.chain(before).find(|id| wants_input(*id)).or(from)
}

/// Stand-in for the window layer: keeps one line of input and reports
/// what each handler would have done.
struct Demo {
    caps: CrosstermDriver,
    line: String,
    output: Vec<String>,
    focus_change: bool,
}

impl Demo {
    fn new(caps: CrosstermDriver) -> Self {
        Self {
            caps,
            line: String::new(),
            output: Vec::new(),
            focus_change: false,
        }
    }
}

impl Dispatcher<WindowId> for Demo {
    fn dispatch(&mut self, action: Action, _window: Option<WindowId>, argument: Argument) {
        match (action, argument) {
            (Action::ChangeFocus, _) => self.focus_change = true,
            (Action::BufferInsertKey | Action::GridInsertKey, Argument::Key(key)) => {
                if let Some(c) = key.as_char() {
                    self.line.push(c);
                }
                self.output.push(format!("line: {}", self.line));
            }
            (Action::BufferDelete | Action::GridDelete, Argument::Op(op)) => {
                match op {
                    EditOp::Delete => {
                        self.line.pop();
                    }
                    EditOp::KillInput | EditOp::KillLine => self.line.clear(),
                    _ => {}
                }
                self.output.push(format!("line: {}", self.line));
            }
            (Action::BufferAcceptLine | Action::GridAcceptLine, argument) => {
                let line = std::mem::take(&mut self.line);
                match argument {
                    Argument::Key(key) => self
                        .output
                        .push(format!("line entered: {:?} (ended by {})", line, names::name_of(key))),
                    Argument::Op(_) => self.output.push(format!("line entered: {:?}", line)),
                }
            }
            (Action::BufferAcceptKey | Action::GridAcceptKey, Argument::Key(key)) => {
                let delivered = classify::from_native(key.code(), &self.caps);
                self.output
                    .push(format!("char event: {}", names::name_of(delivered)));
            }
            _ => {}
        }
    }
}

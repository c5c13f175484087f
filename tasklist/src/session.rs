//! A terminal session: line commands in, rendered views out.
//!
//! The session owns the store and subscribes a renderer to it, so every
//! state change is drawn exactly once, after the whole `send` (feedback
//! actions included) has completed.

use crate::cli::{Command, CommandError, HELP};
use crate::config::AppConfig;
use crate::reducer::{TaskListEnvironment, TaskListReducer};
use crate::render::{renderer_for, Renderer};
use crate::types::{TaskAction, TaskListState};
use crate::view::TaskListView;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tasklist_runtime::{Store, StoreConfig};
use thiserror::Error;

/// The concrete store type for the task list
pub type TaskListStore = Store<TaskListState, TaskAction, TaskListEnvironment, TaskListReducer>;

/// Errors that end a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// What the caller should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading lines
    Continue,
    /// The user asked to leave
    Quit,
}

/// Output side of a session, shared with the store subscription
struct Screen<W> {
    out: W,
    renderer: Box<dyn Renderer>,
    // Subscribers cannot return errors; the first write failure is parked
    // here and surfaced by the next session call.
    error: Option<io::Error>,
}

impl<W: Write> Screen<W> {
    fn draw(&mut self, state: &TaskListState) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.renderer.render(&TaskListView::project(state), &mut self.out) {
            tracing::error!(error = %err, "Failed to render task list");
            self.error = Some(err);
        }
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.renderer.notice(message, &mut self.out)
    }

    fn take_error(&mut self) -> io::Result<()> {
        self.error.take().map_or(Ok(()), Err)
    }
}

/// An interactive task list bound to one output stream
pub struct Session<W: Write + 'static> {
    store: TaskListStore,
    screen: Rc<RefCell<Screen<W>>>,
}

impl<W: Write + 'static> Session<W> {
    /// Creates a session from configuration, writing to `out`
    #[must_use]
    pub fn new(config: &AppConfig, out: W) -> Self {
        Self::with_environment(
            TaskListEnvironment::production(),
            config.store_config(),
            renderer_for(config.render_mode, config.progress_width),
            out,
        )
    }

    /// Creates a session with explicit dependencies
    #[must_use]
    pub fn with_environment(
        env: TaskListEnvironment,
        store_config: StoreConfig,
        renderer: Box<dyn Renderer>,
        out: W,
    ) -> Self {
        let screen = Rc::new(RefCell::new(Screen {
            out,
            renderer,
            error: None,
        }));

        let mut store = Store::with_config(
            TaskListState::new(),
            TaskListReducer::new(),
            env,
            store_config,
        );
        let sink = Rc::clone(&screen);
        store.subscribe(move |state: &TaskListState| sink.borrow_mut().draw(state));

        Self { store, screen }
    }

    /// Handles one input line
    ///
    /// Blank lines are ignored. Lines that do not parse are reported on the
    /// output as `error: ...` and change nothing. A store error is reported
    /// the same way, after the frame for whatever state it left behind.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if output cannot be written.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow, SessionError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return Ok(Flow::Continue),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected input line");
                self.notice(&format!("error: {err}"))?;
                return Ok(Flow::Continue);
            },
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.notice(HELP)?,
            Command::Show => self.render_now()?,
            command => {
                if let Some(action) = command.into_action() {
                    tracing::debug!(?action, "Dispatching");
                    if let Err(err) = self.store.send(action) {
                        tracing::warn!(error = %err, "Store rejected action");
                        self.screen.borrow_mut().take_error()?;
                        self.notice(&format!("error: {err}"))?;
                    }
                }
                self.screen.borrow_mut().take_error()?;
            },
        }

        Ok(Flow::Continue)
    }

    /// Reads lines until `quit` or end of input
    ///
    /// # Errors
    ///
    /// Returns the first [`SessionError`] raised by reading or handling a line.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), SessionError> {
        for line in input.lines() {
            if self.handle_line(&line?)? == Flow::Quit {
                tracing::debug!("Quit requested");
                return Ok(());
            }
        }
        tracing::debug!("End of input");
        Ok(())
    }

    /// Draws the current state without changing it
    ///
    /// # Errors
    ///
    /// Returns any error from the output stream.
    pub fn render_now(&mut self) -> io::Result<()> {
        let screen = &self.screen;
        self.store.state(|state| screen.borrow_mut().draw(state));
        screen.borrow_mut().take_error()
    }

    /// Read the current state via a closure
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TaskListState) -> T,
    {
        self.store.state(f)
    }

    /// Inspect the output stream
    pub fn with_output<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&W) -> T,
    {
        f(&self.screen.borrow().out)
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.screen.borrow_mut().notice(message)
    }
}

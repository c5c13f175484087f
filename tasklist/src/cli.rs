//! Line commands for the terminal front end.
//!
//! Each input line is one user event. The first word picks the command;
//! whatever follows the first space is its argument, kept verbatim so that
//! `type` can set pending input with leading or trailing whitespace.

use crate::types::{TaskAction, TaskId};
use std::str::FromStr;
use thiserror::Error;

/// Help text shown by the `help` command
pub const HELP: &str = "\
commands:
  type <text>    set the input text (not submitted)
  submit         add the input text as a task
  add <text>     type and submit in one step
  toggle <id>    mark a task done or not done
  delete <id>    remove a task (alias: rm)
  clear          remove all completed tasks
  show           draw the list again
  help           show this help
  quit           leave (alias: exit)";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the pending input
    Type(String),
    /// Submit the pending input
    Submit,
    /// Set the pending input and submit it
    Add(String),
    /// Toggle a task
    Toggle(TaskId),
    /// Delete a task
    Delete(TaskId),
    /// Clear completed tasks
    Clear,
    /// Render again without changing anything
    Show,
    /// Print help
    Help,
    /// End the session
    Quit,
}

/// Why a line could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("empty command")]
    Empty,

    /// First word is not a known command
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    /// Command needs an argument that was not given
    #[error("`{command}` needs a task id")]
    MissingId {
        /// The command as typed
        command: String,
    },

    /// Argument is not a task id
    #[error("`{value}` is not a task id")]
    InvalidId {
        /// The offending argument
        value: String,
    },

    /// Command takes no argument but got one
    #[error("`{command}` takes no argument")]
    UnexpectedArgument {
        /// The command as typed
        command: String,
    },
}

impl Command {
    /// Parses one input line
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing why the line is not a command.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, arg) = match line.split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (line, None),
        };
        let name = word.to_ascii_lowercase();

        match name.as_str() {
            "type" => Ok(Self::Type(arg.unwrap_or_default().to_string())),
            "add" => Ok(Self::Add(arg.unwrap_or_default().to_string())),
            "toggle" => parse_id(word, arg).map(Self::Toggle),
            "delete" | "rm" => parse_id(word, arg).map(Self::Delete),
            "submit" => no_arg(word, arg, Self::Submit),
            "clear" => no_arg(word, arg, Self::Clear),
            "show" => no_arg(word, arg, Self::Show),
            "help" => no_arg(word, arg, Self::Help),
            "quit" | "exit" => no_arg(word, arg, Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }

    /// The store action for this command, if it has one
    ///
    /// `show`, `help` and `quit` are handled by the front end itself.
    #[must_use]
    pub fn into_action(self) -> Option<TaskAction> {
        match self {
            Self::Type(text) => Some(TaskAction::SetPendingInput { text }),
            Self::Submit => Some(TaskAction::AddTask),
            Self::Add(text) => Some(TaskAction::QuickAdd { text }),
            Self::Toggle(id) => Some(TaskAction::ToggleTask { id }),
            Self::Delete(id) => Some(TaskAction::DeleteTask { id }),
            Self::Clear => Some(TaskAction::ClearCompleted),
            Self::Show | Self::Help | Self::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_id(word: &str, arg: Option<&str>) -> Result<TaskId, CommandError> {
    let value = arg.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(CommandError::MissingId {
            command: word.to_string(),
        });
    }
    value.parse().map_err(|_| CommandError::InvalidId {
        value: value.to_string(),
    })
}

fn no_arg(word: &str, arg: Option<&str>, command: Command) -> Result<Command, CommandError> {
    match arg.map(str::trim) {
        None | Some("") => Ok(command),
        Some(_) => Err(CommandError::UnexpectedArgument {
            command: word.to_string(),
        }),
    }
}

//! A single-user task list built on the task list runtime.
//!
//! The crate is split the usual way:
//!
//! - [`types`]: state and actions
//! - [`reducer`]: the pure state transitions
//! - [`view`]: the read-only projection handed to renderers
//! - [`render`]: text and JSON renderers
//! - [`cli`] and [`session`]: the terminal front end
//! - [`config`]: environment-driven settings for the binary
//!
//! # Quick Start
//!
//! ```
//! use tasklist::{TaskAction, TaskListEnvironment, TaskListReducer, TaskListState};
//! use tasklist_runtime::Store;
//!
//! let mut store = Store::new(
//!     TaskListState::new(),
//!     TaskListReducer::new(),
//!     TaskListEnvironment::production(),
//! );
//!
//! store.send(TaskAction::QuickAdd { text: "Buy milk".to_string() })?;
//! let id = store.state(|s| s.tasks[0].id);
//! store.send(TaskAction::ToggleTask { id })?;
//!
//! let counts = store.state(TaskListState::counts);
//! assert_eq!((counts.completed, counts.total), (1, 1));
//! # Ok::<(), tasklist_runtime::StoreError>(())
//! ```

pub mod cli;
pub mod config;
pub mod reducer;
pub mod render;
pub mod session;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use cli::{Command, CommandError};
pub use config::{AppConfig, ConfigError};
pub use reducer::{TaskListEnvironment, TaskListReducer};
pub use render::{JsonRenderer, RenderMode, Renderer, TextRenderer};
pub use session::{Flow, Session, SessionError, TaskListStore};
pub use types::{Task, TaskAction, TaskCounts, TaskId, TaskListState};
pub use view::{TaskListView, TaskRow};

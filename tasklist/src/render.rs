//! Renderers that turn a [`TaskListView`] into output.
//!
//! Two flavours: plain text for people at a terminal, and one JSON document
//! per line for anything driving the binary programmatically.

use crate::view::TaskListView;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

/// Default width of the text progress bar, in cells
pub const DEFAULT_PROGRESS_WIDTH: usize = 20;

/// How the session draws itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON document per render
    Json,
}

/// Returned when a render mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown render mode `{0}` (expected `text` or `json`)")]
pub struct UnknownRenderMode(pub String);

impl FromStr for RenderMode {
    type Err = UnknownRenderMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownRenderMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Draws views and one-off messages
pub trait Renderer {
    /// Write a full rendering of `view`
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    fn render(&self, view: &TaskListView<'_>, out: &mut dyn Write) -> io::Result<()>;

    /// Write a message that is not part of the list (help, errors)
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    fn notice(&self, message: &str, out: &mut dyn Write) -> io::Result<()>;
}

/// Builds the renderer for a mode
#[must_use]
pub fn renderer_for(mode: RenderMode, progress_width: usize) -> Box<dyn Renderer> {
    match mode {
        RenderMode::Text => Box::new(TextRenderer::new(progress_width)),
        RenderMode::Json => Box::new(JsonRenderer),
    }
}

/// Plain text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    progress_width: usize,
}

impl TextRenderer {
    /// Creates a text renderer with the given progress bar width
    #[must_use]
    pub const fn new(progress_width: usize) -> Self {
        Self { progress_width }
    }

    fn progress_bar(&self, view: &TaskListView<'_>) -> String {
        let filled = if view.counts.total == 0 {
            0
        } else {
            self.progress_width * view.counts.completed / view.counts.total
        };
        format!(
            "[{}{}] {}%",
            "#".repeat(filled),
            "-".repeat(self.progress_width - filled),
            view.progress_percent
        )
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_WIDTH)
    }
}

impl Renderer for TextRenderer {
    fn render(&self, view: &TaskListView<'_>, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "== My Tasks ==")?;

        let submit = if view.can_submit { "ready" } else { "disabled" };
        writeln!(out, "input: {:?} (submit: {submit})", view.pending_input)?;

        if view.show_stats {
            let label = if view.all_completed {
                "All tasks completed!"
            } else {
                "tasks completed"
            };
            writeln!(
                out,
                "{} / {} {label}",
                view.counts.completed, view.counts.total
            )?;
            writeln!(out, "{}", self.progress_bar(view))?;
            if view.show_clear_completed {
                writeln!(
                    out,
                    "`clear` removes {} completed task(s)",
                    view.counts.completed
                )?;
            }
        }

        if view.is_empty {
            writeln!(out, "No tasks yet")?;
            writeln!(out, "Add your first task above to get started!")?;
        } else {
            for row in &view.tasks {
                let mark = if row.completed { 'x' } else { ' ' };
                writeln!(out, "{} [{mark}] {}", row.id, row.text)?;
            }
        }

        writeln!(out)?;
        out.flush()
    }

    fn notice(&self, message: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{message}")?;
        out.flush()
    }
}

/// JSON-lines renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &TaskListView<'_>, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, view).map_err(io::Error::from)?;
        writeln!(out)?;
        out.flush()
    }

    fn notice(&self, message: &str, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, &serde_json::json!({ "notice": message }))
            .map_err(io::Error::from)?;
        writeln!(out)?;
        out.flush()
    }
}

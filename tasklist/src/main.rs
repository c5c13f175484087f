//! Terminal task list.
//!
//! Reads one command per line from stdin and redraws the list on stdout
//! after every change. Logs go to stderr.

use anyhow::Context;
use std::io;
use tasklist::{config::DEFAULT_LOG_FILTER, AppConfig, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tasklist_runtime::metrics::register_metrics();

    info!(
        render_mode = %config.render_mode,
        progress_width = config.progress_width,
        max_feedback_actions = config.max_feedback_actions,
        "Starting task list"
    );

    let mut session = Session::new(&config, io::stdout().lock());
    session.render_now().context("failed to draw task list")?;
    session
        .run(io::stdin().lock())
        .context("task list session failed")?;

    let total = session.state(tasklist::TaskListState::count);
    info!(total, "Session ended, discarding tasks");
    Ok(())
}

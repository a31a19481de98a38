use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to a file: the terminal belongs to the UI.
pub fn init(log_path: &Path) -> anyhow::Result<()> {
    let dir = log_path.parent().context("Invalid log file path")?;
    let file_name = log_path.file_name().context("Invalid log file name")?;
    fs::create_dir_all(dir).context("Could not create log directory")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kanban_tui=info,kanban_store=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_appender),
        )
        .init();

    Ok(())
}

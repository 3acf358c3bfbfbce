use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "spell-ring.log";

/// Install console and daily-rolling file logging. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_logger(log_dir: Option<&Path>) -> Result<()> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(false)
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!("Logger initialized, writing to {:?}", log_dir.join(LOG_FILE_NAME));
    Ok(())
}

fn default_log_dir() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join("spell-ring").join("logs");
    }

    match std::env::current_exe() {
        Ok(exe_path) => exe_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| {
                eprintln!("Warning: Could not get parent directory of executable, using current directory");
                PathBuf::from(".")
            }),
        Err(e) => {
            eprintln!("Warning: Could not get executable path ({}), using current directory", e);
            PathBuf::from(".")
        }
    }
}

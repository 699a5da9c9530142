//! Logging setup
//!
//! File-only: the TUI owns the terminal, so logs go to a daily rolling
//! file under `<work_dir>/logs` through a non-blocking writer. The
//! returned guard must stay alive for the lifetime of the process.

use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

/// Initialize tracing into `<work_dir>/logs/reef-pos.log.<date>`
pub fn init(work_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let log_dir = work_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "reef-pos.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = if let Ok(from_env) = EnvFilter::try_from_default_env() {
        from_env
    } else if cfg!(debug_assertions) {
        EnvFilter::new("info,reef_pos=debug,reef_client=debug")
    } else {
        EnvFilter::new("info")
    };

    let file_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(path = %log_dir.display(), "Tracing initialized");
    Ok(guard)
}

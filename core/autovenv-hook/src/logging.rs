//! File-based diagnostics for the hook binary.
//!
//! Stdout belongs to the host shell (it evals whatever we print), so logs
//! go to a rolling file under the user's state directory instead. Set
//! `AUTOVENV_LOG` (env-filter syntax) for anything beyond warnings.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes file logging. Returns the writer guard, which the caller
/// holds for the process lifetime; returns `None` (logging disabled) when
/// no writable log directory exists.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = dirs::state_dir().or_else(dirs::cache_dir)?.join("autovenv");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "autovenv-hook.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("AUTOVENV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

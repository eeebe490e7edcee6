use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::error::{AppError, AppResult};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();
static LOGGER_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

pub const LOG_FILE_PREFIX: &str = "pulseboard.log";

/// Installs the global subscriber once; later calls are no-ops.
///
/// `RUST_LOG` takes precedence over `directives`. With a `log_dir`, events are
/// also written to a daily rolling file in that directory.
pub fn init_logging(log_dir: Option<&Path>, directives: &str) -> AppResult<()> {
    LOGGER_INIT
        .get_or_try_init(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(directives))
                .map_err(|err| AppError::config(format!("invalid log directives: {err}")))?;

            let (file_layer, guard) = match log_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir)?;
                    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    let layer = fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true)
                        .with_timer(UtcTime::rfc_3339());
                    (Some(layer), Some(guard))
                }
                None => (None, None),
            };

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_timer(UtcTime::rfc_3339()),
                )
                .try_init()
                .map_err(|err| AppError::other(format!("failed to install subscriber: {err}")))?;

            // try_init succeeds at most once per process, so the slot is still empty
            if let Some(guard) = guard {
                let _ = LOGGER_GUARD.set(guard);
            }

            Ok(())
        })
        .map(|_| ())
}

pub fn is_initialized() -> bool {
    LOGGER_INIT.get().is_some()
}

use std::any::Any;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

/// Picks the filter directives: `--verbose` wins, then `RUST_LOG`, then the
/// config file.
pub fn filter_directives(config: &LogConfig, env: Option<&str>, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    match env.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ => config.filter.clone(),
    }
}

/// Installs the global subscriber writing to the log file. The terminal is
/// owned by the UI, so nothing is logged to stdout or stderr.
pub fn init_logging(config: &LogConfig, verbose: bool) -> AppResult<PathBuf> {
    let env = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(config, env.as_deref(), verbose);
    let filter = EnvFilter::try_new(&directives)
        .map_err(|err| AppError::invalid_argument(format!("invalid log filter: {err}")))?;

    let path = config.resolved_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| {
            AppError::io_with_context(err, format!("failed to open log file {}", path.display()))
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::unsupported(format!("logging is already initialized: {err}")))?;
    Ok(path)
}

/// Reports panics, including the ones the render worker catches, to the log
/// file instead of stderr, which is the alternate screen while the UI runs.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_default();
        error!(
            location = %location,
            message = panic_message(info.payload()),
            "panic"
        );
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber when `ENABLE_LOGGING` is set.
///
/// `LOG_LEVEL` takes an `EnvFilter` directive; `LOG_FILE` redirects output
/// from stderr to an appended file.
pub(crate) fn init() {
    if !is_enabled(std::env::var("ENABLE_LOGGING").ok().as_deref()) {
        return;
    }

    let filter = level_filter(std::env::var("LOG_LEVEL").ok().as_deref());
    let log_file = std::env::var_os("LOG_FILE").filter(|path| !path.is_empty());

    match log_file.map(open_log_file) {
        Some(Ok(file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        Some(Err(message)) => {
            eprintln!("warning: {message}, logging to stderr instead");
            init_stderr(filter);
        }
        None => init_stderr(filter),
    }
}

fn init_stderr(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_log_file(path: OsString) -> Result<std::fs::File, String> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open log file '{}': {e}", Path::new(&path).display()))
}

fn is_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn level_filter(level: Option<&str>) -> EnvFilter {
    level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

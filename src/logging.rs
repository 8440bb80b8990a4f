// Conditional logging macros - only active in debug builds

use std::fs::{self, File};
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

pub const LOG_FILE_NAME: &str = "strands.log";

/// Where log output goes while the terminal UI owns the screen.
#[must_use]
pub fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .map_or_else(std::env::temp_dir, |dir| dir.join("strands"))
        .join(LOG_FILE_NAME)
}

/// Set up `env_logger` filtered by `RUST_LOG`, defaulting to `warn`.
///
/// With `to_file`, records are appended to [`log_file_path`] instead of stderr;
/// if that file cannot be opened, stderr is used.
pub fn init(to_file: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    let mut fallback = None;
    if to_file {
        let path = log_file_path();
        match open_log_file(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => fallback = Some(format!("cannot open {}: {e}", path.display())),
        }
    }

    if builder.try_init().is_err() {
        return;
    }
    if let Some(reason) = fallback {
        log::warn!("Logging to stderr, {reason}");
    }
}

fn open_log_file(path: &std::path::Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}

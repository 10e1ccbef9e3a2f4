use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TYPINGO_LOG=debug`
pub const LOG_ENV: &str = "TYPINGO_LOG";

/// Send tracing output to `path`. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr; if the file can't be
/// opened logging stays off.
pub fn init(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("typingo.log");
        init(Some(&path));
        assert!(path.exists());
        // a second init must not panic even though a subscriber is set
        init(Some(&path));
    }

    #[test]
    fn init_without_path_is_noop() {
        init(None);
    }
}

use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Env var holding the log filter, e.g. `KEYTRAINER_LOG=debug`
pub const LOG_ENV: &str = "KEYTRAINER_LOG";

/// Send logs to `path` when `KEYTRAINER_LOG` is set. The terminal belongs to the UI,
/// so nothing is ever written to stderr. Returns whether a logger was installed.
pub fn init(path: &Path) -> std::io::Result<bool> {
    if std::env::var_os(LOG_ENV).is_none() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = Builder::from_env(Env::new().filter(LOG_ENV))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok();

    Ok(installed)
}

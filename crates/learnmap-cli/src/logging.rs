//! Tracing subscriber setup.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use learnmap_core::StorageConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the defaults. When the terminal UI owns the screen
/// (`to_file`), output goes to the configured log file instead of stderr.
pub fn init(storage: &StorageConfig, verbose: bool, to_file: bool) -> color_eyre::Result<()> {
    let default_directive = if verbose { "learnmap=debug" } else { "learnmap=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if to_file {
        let path = storage.log_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }

    Ok(())
}

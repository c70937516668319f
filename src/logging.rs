//! Logging setup.
//!
//! The terminal is in raw alternate-screen mode while the aquarium runs, so
//! log records go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

/// Route `log` records to `path`, appending. Default filter is `info`,
/// overridable via `RUST_LOG`.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

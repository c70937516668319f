//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::RendererConfig;
use crate::types::{DEFAULT_SWARM_SIZE, DEFAULT_TICK_MS};

#[derive(Parser, Debug, Clone)]
#[command(name = "nemo", version, about = "ASCII aquarium for the terminal", long_about = None)]
pub struct Cli {
    /// Number of fish swimming at once
    #[arg(long, default_value_t = DEFAULT_SWARM_SIZE)]
    pub swarm_size: usize,

    /// Milliseconds between frames
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// One color per fish instead of coloring glyphs by shape
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    /// Show the stats overlay and write a debug log
    #[arg(long, env = "NEMO_DEBUG")]
    pub debug: bool,

    /// Log file (logging is off unless this or --debug is given)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Fixed RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            swarm_size: self.swarm_size,
            tick_delay: Duration::from_millis(self.tick_ms),
            glyph_colors: !self.mono,
            debug: self.debug,
            seed: self.seed,
        }
    }

    /// Where to log, if anywhere.
    pub fn log_target(&self) -> Option<PathBuf> {
        match (&self.log_file, self.debug) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(PathBuf::from("nemo.log")),
            (None, false) => None,
        }
    }
}

//! Renderer configuration.

use std::time::Duration;

use anyhow::{ensure, Result};

use crate::types::{DEFAULT_SWARM_SIZE, DEFAULT_TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Fish slots per run
    pub swarm_size: usize,
    /// Interval between render ticks
    pub tick_delay: Duration,
    /// Color fish glyphs by class instead of one style per fish
    pub glyph_colors: bool,
    /// Draw the stats overlay every tick and on stop
    pub debug: bool,
    /// Fixed RNG seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            swarm_size: DEFAULT_SWARM_SIZE,
            tick_delay: Duration::from_millis(DEFAULT_TICK_MS),
            glyph_colors: true,
            debug: false,
            seed: None,
        }
    }
}

impl RendererConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.swarm_size > 0, "swarm size must be at least 1");
        ensure!(!self.tick_delay.is_zero(), "tick delay must be non-zero");
        Ok(())
    }
}

//! Compositor: paints one frame of the aquarium.
//!
//! Draw order per tick is banner, fish, bubbles, then the optional stats
//! overlay. Bubbles go after fish so wake trails sit on top of the swimmers.
//! Hidden layers are swept between the bubbles and the overlay, so the stats
//! always count live layers.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use crate::config::RendererConfig;
use crate::core::{Screen, TickContext};
use crate::state::RenderState;
use crate::types::CellStyle;

const BANNER: &str = r"
  ___  ___ __ _  ___
 / _ \/ -_)  ' \/ _ \
/_//_/\__/_/_/_/\___/";

/// Columns kept free right of the banner.
const BANNER_MARGIN: i32 = 4;

#[derive(Debug, Clone)]
pub struct Compositor {
    banner: Vec<String>,
    glyph_colors: bool,
    debug: bool,
}

impl Compositor {
    pub fn new(config: &RendererConfig) -> Self {
        let mut banner: Vec<String> = BANNER
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        if let Some(last) = banner.last_mut() {
            last.push(' ');
            last.push_str(env!("CARGO_PKG_VERSION"));
        }
        Self {
            banner,
            glyph_colors: config.glyph_colors,
            debug: config.debug,
        }
    }

    pub fn banner(&self) -> &[String] {
        &self.banner
    }

    /// Top-left corner of the banner for a `width` x `height` screen.
    pub fn banner_origin(&self, width: u16, height: u16) -> (i32, i32) {
        let last = self.banner.last().map(|l| l.chars().count()).unwrap_or(0) as i32;
        let x = width as i32 - last - BANNER_MARGIN;
        let y = height as i32 - self.banner.len() as i32 - 1;
        (x, y)
    }

    /// Advance every layer one tick and flush the result.
    pub fn frame<S: Screen>(&self, state: &mut RenderState<S>, now: SystemTime) -> Result<()> {
        self.draw_banner(state);

        let RenderState {
            screen,
            swarm,
            catalog,
            palette,
            rng,
            width,
            height,
            ..
        } = state;
        let mut ctx = TickContext {
            catalog,
            palette,
            rng,
            width: *width as i32,
            height: *height as i32,
            glyph_colors: self.glyph_colors,
        };
        swarm.advance_fish(screen, &mut ctx)?;
        swarm.advance_bubbles(screen, &mut ctx);
        swarm.sweep(&mut ctx)?;
        state.ticks += 1;

        if self.debug {
            self.draw_stats(state, now);
        }
        state.screen.show()
    }

    pub fn draw_banner<S: Screen>(&self, state: &mut RenderState<S>) {
        let (x, y) = self.banner_origin(state.width, state.height);
        for (dy, line) in self.banner.iter().enumerate() {
            state.screen.put_str(x, y + dy as i32, line, state.banner_style);
        }
    }

    /// Timestamp and live layer counts in the top-right corner.
    pub fn draw_stats<S: Screen>(&self, state: &mut RenderState<S>, now: SystemTime) {
        let ts = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let lines = [
            format!("TS: {:5}", ts),
            format!("Fish: {:5}", state.swarm.live_fish()),
            format!("Bubbles: {:5}", state.swarm.live_bubbles()),
        ];
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let x = state.width as i32 - widest - 1;
        let top = lines.len() as i32 - 1;
        for (dy, line) in lines.iter().enumerate() {
            state
                .screen
                .put_str(x, top + dy as i32, line, CellStyle::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AssetCatalog, FrameBuffer, PaletteConfig, SpawnRng};

    fn state(width: u16, height: u16) -> RenderState<FrameBuffer> {
        let mut state = RenderState::new(
            FrameBuffer::new(width, height),
            AssetCatalog::builtin(),
            PaletteConfig::default(),
            SpawnRng::seeded(3),
        )
        .unwrap();
        state.seed(4, true).unwrap();
        state
    }

    #[test]
    fn test_banner_carries_version() {
        let c = Compositor::new(&RendererConfig::default());
        assert_eq!(c.banner().len(), 3);
        assert!(c.banner()[2].ends_with(env!("CARGO_PKG_VERSION")));
        assert!(c.banner()[0].starts_with("  ___"));
    }

    #[test]
    fn test_banner_sits_bottom_right() {
        let c = Compositor::new(&RendererConfig::default());
        let mut st = state(80, 24);
        c.draw_banner(&mut st);
        let (x, y) = c.banner_origin(80, 24);
        assert_eq!(y, 20);
        let last = &c.banner()[2];
        assert_eq!(x, 80 - last.chars().count() as i32 - 4);
        let row = st.screen().row_text(y + 2);
        assert!(row.contains(last.as_str()));
        assert_eq!(st.screen().get(x, y + 2).map(|c| c.style), Some(st.banner_style()));
    }

    #[test]
    fn test_frame_advances_and_shows() {
        let c = Compositor::new(&RendererConfig::default());
        let mut st = state(80, 24);
        for _ in 0..3 {
            c.frame(&mut st, SystemTime::now()).unwrap();
        }
        assert_eq!(st.ticks(), 3);
        assert_eq!(st.screen().shown(), 3);
        assert_eq!(st.swarm().live_fish(), 4);
    }

    #[test]
    fn test_stats_overlay_only_in_debug() {
        let quiet = Compositor::new(&RendererConfig::default());
        let mut st = state(60, 20);
        quiet.frame(&mut st, UNIX_EPOCH).unwrap();
        assert!(!st.screen().row_text(3).contains("Fish:"));

        let debug = Compositor::new(&RendererConfig {
            debug: true,
            ..RendererConfig::default()
        });
        debug.frame(&mut st, UNIX_EPOCH).unwrap();
        assert!(!st.screen().row_text(1).contains("TS:"));
        assert!(st.screen().row_text(2).contains("TS:     0"));
        assert!(st.screen().row_text(3).contains("Fish:     4"));
        assert!(st.screen().row_text(4).contains("Bubbles:"));
    }
}

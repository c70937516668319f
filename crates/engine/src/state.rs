//! Shared renderer state, guarded by the scheduler's single mutex.

use anyhow::Result;

use crate::core::{AssetCatalog, PaletteConfig, Screen, SpawnRng, Swarm, TickContext};
use crate::types::{CellStyle, BUBBLE_GROUP, FISH_GROUP};

/// Everything the render loop and the control path share.
pub struct RenderState<S> {
    pub(crate) screen: S,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) running: bool,
    pub(crate) banner_style: CellStyle,
    pub(crate) swarm: Swarm,
    pub(crate) catalog: AssetCatalog,
    pub(crate) palette: PaletteConfig,
    pub(crate) rng: SpawnRng,
    pub(crate) ticks: u64,
    pub(crate) generation: u64,
}

impl<S: Screen> RenderState<S> {
    /// Fails when the catalog lacks the fish or bubble group.
    pub fn new(screen: S, catalog: AssetCatalog, palette: PaletteConfig, rng: SpawnRng) -> Result<Self> {
        catalog.require(FISH_GROUP)?;
        catalog.require(BUBBLE_GROUP)?;
        let (width, height) = screen.size();
        let banner_style = palette.base;
        Ok(Self {
            screen,
            width,
            height,
            running: false,
            banner_style,
            swarm: Swarm::new(),
            catalog,
            palette,
            rng,
            ticks: 0,
            generation: 0,
        })
    }

    /// Re-read the screen geometry and blank it.
    pub fn refresh(&mut self) {
        let (width, height) = self.screen.size();
        self.width = width;
        self.height = height;
        self.screen.clear();
    }

    /// Refresh, then fill `capacity` fish slots from scratch.
    pub fn seed(&mut self, capacity: usize, glyph_colors: bool) -> Result<()> {
        self.refresh();
        let Self {
            swarm,
            catalog,
            palette,
            rng,
            width,
            height,
            banner_style,
            ..
        } = self;
        *banner_style = palette.random_fish(rng);
        let mut ctx = TickContext {
            catalog,
            palette,
            rng,
            width: *width as i32,
            height: *height as i32,
            glyph_colors,
        };
        swarm.seed(capacity, &mut ctx)?;
        self.ticks = 0;
        self.generation += 1;
        log::debug!(
            "seeded {} fish at {}x{} (generation {})",
            capacity,
            self.width,
            self.height,
            self.generation
        );
        Ok(())
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn banner_style(&self) -> CellStyle {
        self.banner_style
    }

    /// Ticks rendered since the last seed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Bumped on every seed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

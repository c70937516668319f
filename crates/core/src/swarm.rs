//! Swarm module - fixed-capacity slot arrays of fish and bubbles
//!
//! Slots are addressed by stable index: bubble slot `i` belongs to fish slot
//! `i`, because wake bubbles are spawned from the fish in the same slot. The
//! arrays are never compacted; a slot is either empty or holds one layer.
//!
//! A tick runs in three passes, driven by the compositor in draw order:
//!
//! 1. [`Swarm::advance_fish`] - every fish draws and moves; fish whose leading
//!    edge lands on a wake column drop a bubble into their bubble slot
//! 2. [`Swarm::advance_bubbles`] - every bubble draws and rises
//! 3. [`Swarm::sweep`] - hidden fish are counted, removed and replaced by the
//!    same number of new fish; hidden bubbles are removed
//!
//! After a sweep the number of live fish equals the capacity again.

use crate::assets::CatalogError;
use crate::layer::{Layer, TickContext};
use crate::screen::Screen;
use crate::types::WAKE_DIVISOR;

/// Fish and bubble slot arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Swarm {
    fish: Vec<Option<Layer>>,
    bubbles: Vec<Option<Layer>>,
    seeded: bool,
}

impl Swarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `capacity` fish slots and reset the bubble slots.
    ///
    /// All or nothing: on error the previous arrays are left untouched.
    pub fn seed(&mut self, capacity: usize, ctx: &mut TickContext<'_>) -> Result<(), CatalogError> {
        let fish = (0..capacity)
            .map(|_| Layer::spawn_fish(ctx).map(Some))
            .collect::<Result<Vec<_>, _>>()?;
        self.fish = fish;
        self.bubbles = vec![None; capacity];
        self.seeded = true;
        Ok(())
    }

    /// Drop every layer and both arrays.
    pub fn clear(&mut self) {
        self.fish = Vec::new();
        self.bubbles = Vec::new();
        self.seeded = false;
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn capacity(&self) -> usize {
        self.fish.len()
    }

    pub fn fish(&self) -> &[Option<Layer>] {
        &self.fish
    }

    pub fn bubbles(&self) -> &[Option<Layer>] {
        &self.bubbles
    }

    pub fn live_fish(&self) -> usize {
        self.fish.iter().flatten().count()
    }

    pub fn live_bubbles(&self) -> usize {
        self.bubbles.iter().flatten().count()
    }

    /// Put `layer` into fish slot `index`. Out-of-range indices are ignored.
    pub fn place_fish(&mut self, index: usize, layer: Layer) {
        if let Some(slot) = self.fish.get_mut(index) {
            *slot = Some(layer);
        }
    }

    /// Put `layer` into bubble slot `index`. Out-of-range indices are ignored.
    pub fn place_bubble(&mut self, index: usize, layer: Layer) {
        if let Some(slot) = self.bubbles.get_mut(index) {
            *slot = Some(layer);
        }
    }

    /// Pass 1: draw and move every fish, firing wake bubbles.
    pub fn advance_fish<S: Screen + ?Sized>(
        &mut self,
        screen: &mut S,
        ctx: &mut TickContext<'_>,
    ) -> Result<(), CatalogError> {
        let stride = ctx.width / WAKE_DIVISOR;
        for (i, slot) in self.fish.iter_mut().enumerate() {
            let Some(fish) = slot else {
                continue;
            };
            let edge = fish.leading_edge();
            let row = fish.y() - 1;
            fish.tick(screen, ctx);
            log::trace!("fish {i}: {fish}");

            if stride > 0 && edge > 0 && edge % stride == 0 {
                let bubble = Layer::spawn_bubble(ctx, edge, row)?;
                if let Some(b) = self.bubbles.get_mut(i) {
                    *b = Some(bubble);
                }
            }
        }
        Ok(())
    }

    /// Pass 2: draw and move every bubble.
    pub fn advance_bubbles<S: Screen + ?Sized>(&mut self, screen: &mut S, ctx: &mut TickContext<'_>) {
        for bubble in self.bubbles.iter_mut().flatten() {
            bubble.tick(screen, ctx);
        }
    }

    /// Pass 3: remove hidden layers and replace hidden fish one for one.
    ///
    /// Returns how many fish were replaced.
    pub fn sweep(&mut self, ctx: &mut TickContext<'_>) -> Result<usize, CatalogError> {
        let mut vacated = Vec::new();
        for (i, slot) in self.fish.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(Layer::is_hidden) {
                *slot = None;
                vacated.push(i);
            }
        }
        for slot in self.bubbles.iter_mut() {
            if slot.as_ref().is_some_and(Layer::is_hidden) {
                *slot = None;
            }
        }

        for &i in &vacated {
            self.fish[i] = Some(Layer::spawn_fish(ctx)?);
        }
        if !vacated.is_empty() {
            log::debug!("replenished {} fish", vacated.len());
        }
        Ok(vacated.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Asset, AssetCatalog};
    use crate::fb::FrameBuffer;
    use crate::palette::PaletteConfig;
    use crate::rng::SpawnRng;
    use crate::types::{CellStyle, FISH_GROUP};

    fn parts(seed: u64) -> (AssetCatalog, PaletteConfig, SpawnRng) {
        (
            AssetCatalog::builtin(),
            PaletteConfig::default(),
            SpawnRng::seeded(seed),
        )
    }

    fn ctx<'a>(
        catalog: &'a AssetCatalog,
        palette: &'a PaletteConfig,
        rng: &'a mut SpawnRng,
        width: i32,
        height: i32,
    ) -> TickContext<'a> {
        TickContext {
            catalog,
            palette,
            rng,
            width,
            height,
            glyph_colors: true,
        }
    }

    #[test]
    fn test_seed_fills_every_slot() {
        let (catalog, palette, mut rng) = parts(1);
        let mut ctx = ctx(&catalog, &palette, &mut rng, 80, 24);
        let mut swarm = Swarm::new();
        assert!(!swarm.is_seeded());

        swarm.seed(12, &mut ctx).unwrap();
        assert!(swarm.is_seeded());
        assert_eq!(swarm.capacity(), 12);
        assert_eq!(swarm.live_fish(), 12);
        assert_eq!(swarm.bubbles().len(), 12);
        assert_eq!(swarm.live_bubbles(), 0);
    }

    #[test]
    fn test_failed_seed_keeps_previous_arrays() {
        let (catalog, palette, mut rng) = parts(2);
        let mut swarm = Swarm::new();
        swarm
            .seed(3, &mut ctx(&catalog, &palette, &mut rng, 80, 24))
            .unwrap();
        let before = swarm.clone();

        let empty = AssetCatalog::new();
        let err = swarm
            .seed(5, &mut ctx(&empty, &palette, &mut rng, 80, 24))
            .unwrap_err();
        assert_eq!(err.code(), "unknown_group");
        assert_eq!(swarm, before);
    }

    #[test]
    fn test_clear_empties_arrays() {
        let (catalog, palette, mut rng) = parts(3);
        let mut swarm = Swarm::new();
        swarm
            .seed(4, &mut ctx(&catalog, &palette, &mut rng, 80, 24))
            .unwrap();
        swarm.clear();
        assert!(!swarm.is_seeded());
        assert_eq!(swarm.capacity(), 0);
        assert!(swarm.bubbles().is_empty());
    }

    #[test]
    fn test_population_stays_constant() {
        let (catalog, palette, mut rng) = parts(4);
        let mut ctx = ctx(&catalog, &palette, &mut rng, 60, 20);
        let mut screen = FrameBuffer::new(60, 20);
        let mut swarm = Swarm::new();
        swarm.seed(6, &mut ctx).unwrap();

        let mut replaced = 0;
        for _ in 0..500 {
            swarm.advance_fish(&mut screen, &mut ctx).unwrap();
            swarm.advance_bubbles(&mut screen, &mut ctx);
            replaced += swarm.sweep(&mut ctx).unwrap();
            assert_eq!(swarm.live_fish(), 6);
            assert_eq!(swarm.capacity(), 6);
            assert_eq!(swarm.bubbles().len(), 6);
            assert!(swarm.fish().iter().flatten().all(|f| !f.is_hidden()));
            assert!(swarm.bubbles().iter().flatten().all(|b| !b.is_hidden()));
        }
        assert!(replaced > 0, "fish should cross the screen within 500 ticks");
    }

    #[test]
    fn test_wake_bubble_at_leading_edge() {
        let (catalog, palette, mut rng) = parts(5);
        let mut ctx = ctx(&catalog, &palette, &mut rng, 96, 30);
        let mut screen = FrameBuffer::new(96, 30);
        let mut swarm = Swarm::new();
        swarm.seed(2, &mut ctx).unwrap();

        let asset = Asset::new(FISH_GROUP, &["<()>"]).unwrap();
        swarm.place_fish(1, Layer::fish(asset, 20, 10, 1, 0, CellStyle::default()));
        swarm.advance_fish(&mut screen, &mut ctx).unwrap();

        let bubble = swarm.bubbles()[1].as_ref().expect("wake bubble");
        assert_eq!((bubble.x(), bubble.y()), (24, 9));
    }

    #[test]
    fn test_sweep_replaces_hidden_fish_in_place() {
        let (catalog, palette, mut rng) = parts(6);
        let mut ctx = ctx(&catalog, &palette, &mut rng, 40, 20);
        let mut screen = FrameBuffer::new(40, 20);
        let mut swarm = Swarm::new();
        swarm.seed(3, &mut ctx).unwrap();

        // Far past the right edge and still heading right.
        let asset = Asset::new(FISH_GROUP, &[">"]).unwrap();
        swarm.place_fish(2, Layer::fish(asset, 100, 0, 1, 0, CellStyle::default()));
        let keep0 = swarm.fish()[0].clone();

        swarm.advance_fish(&mut screen, &mut ctx).unwrap();
        assert!(swarm.fish()[2].as_ref().unwrap().is_hidden());
        assert!(swarm.sweep(&mut ctx).unwrap() >= 1);

        let fresh = swarm.fish()[2].as_ref().unwrap();
        assert!(!fresh.is_hidden());
        assert!(fresh.asset().width() > 1, "replaced by a catalog fish");
        assert_eq!(swarm.live_fish(), 3);
        assert_ne!(swarm.fish()[0], keep0, "slot 0 still moved");
    }
}

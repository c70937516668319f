//! Layer module - one animated sprite and its per-tick behavior
//!
//! A [`Layer`] owns its position, velocity and hidden flag, and paints itself
//! into a [`Screen`]. The [`Behavior`] tag picks the update rule:
//!
//! - **Fish** swim horizontally, erasing the cells they leave behind, and hide
//!   once they have fully crossed the far edge.
//! - **Bubbles** rise, change glyph every tick, and hide above the top edge.
//!
//! Layers never remove themselves; the swarm sweeps hidden layers after each
//! tick.

use std::fmt;

use crate::assets::{Asset, AssetCatalog, CatalogError};
use crate::palette::PaletteConfig;
use crate::rng::SpawnRng;
use crate::screen::Screen;
use crate::types::{
    CellStyle, BUBBLE_GROUP, BUBBLE_VELOCITIES, FISH_GROUP, FISH_VELOCITIES, FRAME_LEFT_FACING,
    FRAME_RIGHT_FACING, SPAWN_MARGIN_FACTOR,
};

/// Update rule of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Fish,
    Bubble,
}

/// Screen edge a fish enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Everything a layer needs from the outside world during one tick.
pub struct TickContext<'a> {
    pub catalog: &'a AssetCatalog,
    pub palette: &'a PaletteConfig,
    pub rng: &'a mut SpawnRng,
    pub width: i32,
    pub height: i32,
    /// Color fish glyphs by class instead of the per-layer style
    pub glyph_colors: bool,
}

/// One animated sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    x: i32,
    y: i32,
    velocity: i32,
    hidden: bool,
    drawn: bool,
    style: CellStyle,
    asset: Asset,
    frame: usize,
    behavior: Behavior,
}

impl Layer {
    pub fn fish(asset: Asset, x: i32, y: i32, velocity: i32, frame: usize, style: CellStyle) -> Self {
        Self {
            x,
            y,
            velocity,
            hidden: false,
            drawn: false,
            style,
            asset,
            frame,
            behavior: Behavior::Fish,
        }
    }

    pub fn bubble(asset: Asset, x: i32, y: i32, velocity: i32, style: CellStyle) -> Self {
        Self {
            x,
            y,
            velocity,
            hidden: false,
            drawn: false,
            style,
            asset,
            frame: 0,
            behavior: Behavior::Bubble,
        }
    }

    /// A random fish from the catalog, entering from a random side.
    pub fn spawn_fish(ctx: &mut TickContext<'_>) -> Result<Self, CatalogError> {
        let asset = ctx.catalog.random(FISH_GROUP, ctx.rng)?;
        let speed = ctx.rng.pick(&FISH_VELOCITIES, 1);
        let side = if ctx.rng.coin() { Side::Left } else { Side::Right };
        let style = ctx.palette.random_fish(ctx.rng);
        Ok(Self::fish_from_side(asset, side, speed, style, ctx))
    }

    /// Place a fish in the off-screen spawn band of `side`.
    ///
    /// The band is `SPAWN_MARGIN_FACTOR` asset widths deep so fish arrive
    /// staggered. `speed` is a magnitude; the sign follows the side.
    pub fn fish_from_side(
        asset: Asset,
        side: Side,
        speed: i32,
        style: CellStyle,
        ctx: &mut TickContext<'_>,
    ) -> Self {
        let aw = asset.width();
        let ah = asset.height();
        let speed = speed.abs().max(1);
        let y = ctx.rng.below(ctx.height - ah);
        match side {
            Side::Left => {
                let x = -(ctx.rng.below(aw * SPAWN_MARGIN_FACTOR - aw) + aw);
                Self::fish(asset, x, y, speed, FRAME_RIGHT_FACING, style)
            }
            Side::Right => {
                let w = ctx.width;
                let x = ctx.rng.below((w + aw * SPAWN_MARGIN_FACTOR) - (w + aw)) + w + aw;
                let frame = if asset.frames().len() > FRAME_LEFT_FACING {
                    FRAME_LEFT_FACING
                } else {
                    FRAME_RIGHT_FACING
                };
                Self::fish(asset, x, y, -speed, frame, style)
            }
        }
    }

    /// A random bubble glyph rising from `(x, y)`.
    pub fn spawn_bubble(ctx: &mut TickContext<'_>, x: i32, y: i32) -> Result<Self, CatalogError> {
        let asset = ctx.catalog.random(BUBBLE_GROUP, ctx.rng)?;
        let velocity = -ctx.rng.pick(&BUBBLE_VELOCITIES, 1);
        let style = ctx.palette.random_bubble(ctx.rng);
        Ok(Self::bubble(asset, x, y, velocity, style))
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn style(&self) -> CellStyle {
        self.style
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Column just ahead of the sprite in its direction of travel.
    pub fn leading_edge(&self) -> i32 {
        if self.velocity < 0 {
            self.x + 1
        } else {
            self.x + self.asset.width()
        }
    }

    /// Draw, then move. Returns whether the layer is now hidden.
    ///
    /// A hidden layer does nothing.
    pub fn tick<S: Screen + ?Sized>(&mut self, screen: &mut S, ctx: &mut TickContext<'_>) -> bool {
        if self.hidden {
            return true;
        }
        if self.behavior == Behavior::Bubble {
            if let Ok(asset) = ctx.catalog.random(BUBBLE_GROUP, ctx.rng) {
                self.asset = asset;
            }
        }
        self.draw(screen, ctx);
        self.update(ctx)
    }

    pub fn draw<S: Screen + ?Sized>(&mut self, screen: &mut S, ctx: &mut TickContext<'_>) {
        match self.behavior {
            Behavior::Fish => self.draw_fish(screen, ctx),
            Behavior::Bubble => self.draw_bubble(screen),
        }
        self.drawn = true;
    }

    /// Advance one step and flag the layer once it has left the screen.
    pub fn update(&mut self, ctx: &TickContext<'_>) -> bool {
        let gone = match self.behavior {
            Behavior::Fish => {
                let aw = self.asset.width();
                (self.velocity > 0 && self.x > ctx.width + aw)
                    || (self.velocity < 0 && self.x < -aw)
            }
            Behavior::Bubble => self.y < -self.asset.height(),
        };
        if gone {
            self.hidden = true;
        }
        match self.behavior {
            Behavior::Fish => self.x += self.velocity,
            Behavior::Bubble => self.y += self.velocity,
        }
        self.hidden
    }

    fn draw_fish<S: Screen + ?Sized>(&self, screen: &mut S, ctx: &mut TickContext<'_>) {
        let Some(frame) = self.asset.frame(self.frame) else {
            return;
        };
        let blank = CellStyle::default();
        let trail = self.velocity.abs() + 1;
        for (dy, row) in frame.rows().iter().enumerate() {
            let ty = self.y + dy as i32;
            let len = row.len() as i32;

            // Wipe what the previous position left behind.
            let wipe = if self.velocity > 0 {
                (self.x - trail)..self.x
            } else {
                (self.x + len)..(self.x + len + trail)
            };
            for tx in wipe {
                screen.set_cell(tx, ty, ' ', blank);
            }

            for (dx, &ch) in row.iter().enumerate() {
                let tx = self.x + dx as i32;
                if ch.is_whitespace() {
                    screen.set_cell(tx, ty, ch, blank);
                } else if ctx.glyph_colors {
                    let style = ctx.palette.glyph_style(ch, ctx.rng);
                    screen.set_cell(tx, ty, ch, style);
                } else {
                    screen.set_cell(tx, ty, ch, self.style);
                }
            }
        }
    }

    fn draw_bubble<S: Screen + ?Sized>(&self, screen: &mut S) {
        let Some(frame) = self.asset.frame(self.frame) else {
            return;
        };
        let blank = CellStyle::default();
        for (dy, row) in frame.rows().iter().enumerate() {
            let ty = self.y + dy as i32;
            for (dx, &ch) in row.iter().enumerate() {
                let tx = self.x + dx as i32;
                if self.drawn {
                    screen.set_cell(tx, ty - self.velocity, ' ', blank);
                }
                if ch.is_whitespace() {
                    screen.set_cell(tx, ty, ch, blank);
                } else {
                    screen.set_cell(tx, ty, ch, self.style);
                }
            }
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x:{:4} y:{:4} velo:{:4} hidden:{:6} group:{:6}",
            self.x,
            self.y,
            self.velocity,
            self.hidden,
            self.asset.group()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::FrameBuffer;

    fn runner() -> Asset {
        Asset::new(FISH_GROUP, &[">(#)@>", "<@(#)<"]).unwrap()
    }

    struct Fixture {
        catalog: AssetCatalog,
        palette: PaletteConfig,
        rng: SpawnRng,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            Self {
                catalog: AssetCatalog::builtin(),
                palette: PaletteConfig::default(),
                rng: SpawnRng::seeded(seed),
            }
        }

        fn ctx(&mut self, width: i32, height: i32) -> TickContext<'_> {
            TickContext {
                catalog: &self.catalog,
                palette: &self.palette,
                rng: &mut self.rng,
                width,
                height,
                glyph_colors: false,
            }
        }
    }

    #[test]
    fn test_left_spawn_band() {
        let mut fx = Fixture::new(11);
        for _ in 0..200 {
            let mut ctx = fx.ctx(80, 24);
            let l = Layer::fish_from_side(runner(), Side::Left, 2, CellStyle::default(), &mut ctx);
            assert!(l.x() <= -6 && l.x() >= -48, "x = {}", l.x());
            assert!((0..23).contains(&l.y()));
            assert_eq!(l.velocity(), 2);
            assert_eq!(l.frame(), FRAME_RIGHT_FACING);
        }
    }

    #[test]
    fn test_right_spawn_band() {
        let mut fx = Fixture::new(12);
        for _ in 0..200 {
            let mut ctx = fx.ctx(80, 24);
            let l = Layer::fish_from_side(runner(), Side::Right, 3, CellStyle::default(), &mut ctx);
            assert!(l.x() >= 86 && l.x() < 86 + 42, "x = {}", l.x());
            assert_eq!(l.velocity(), -3);
            assert_eq!(l.frame(), FRAME_LEFT_FACING);
        }
    }

    #[test]
    fn test_spawn_fish_respects_side_invariants() {
        let mut fx = Fixture::new(13);
        for _ in 0..300 {
            let mut ctx = fx.ctx(100, 40);
            let l = Layer::spawn_fish(&mut ctx).unwrap();
            let aw = l.asset().width();
            if l.velocity() > 0 {
                assert!(l.x() <= -aw);
                assert_eq!(l.frame(), FRAME_RIGHT_FACING);
            } else {
                assert!(l.x() >= 100 + aw);
                assert_eq!(l.frame(), FRAME_LEFT_FACING);
            }
            assert!(FISH_VELOCITIES.contains(&l.velocity().abs()));
        }
    }

    #[test]
    fn test_tiny_screen_spawns_at_row_zero() {
        let mut fx = Fixture::new(14);
        let mut ctx = fx.ctx(10, 1);
        let l = Layer::fish_from_side(runner(), Side::Left, 1, CellStyle::default(), &mut ctx);
        assert_eq!(l.y(), 0);
    }

    #[test]
    fn test_fish_draws_and_erases_trail() {
        let mut fx = Fixture::new(15);
        let mut screen = FrameBuffer::new(20, 1);
        let mut fish = Layer::fish(runner(), 2, 0, 2, 0, CellStyle::default());

        let mut ctx = fx.ctx(20, 1);
        assert!(!fish.tick(&mut screen, &mut ctx));
        assert_eq!(screen.row_text(0), "  >(#)@>            ");
        assert_eq!(fish.x(), 4);

        assert!(!fish.tick(&mut screen, &mut ctx));
        assert_eq!(screen.row_text(0), "    >(#)@>          ");
    }

    #[test]
    fn test_left_moving_fish_erases_right_side() {
        let mut fx = Fixture::new(16);
        let mut screen = FrameBuffer::new(20, 1);
        let mut fish = Layer::fish(runner(), 10, 0, -3, 1, CellStyle::default());

        let mut ctx = fx.ctx(20, 1);
        fish.tick(&mut screen, &mut ctx);
        assert_eq!(screen.row_text(0), "          <@(#)<    ");
        fish.tick(&mut screen, &mut ctx);
        assert_eq!(screen.row_text(0), "       <@(#)<       ");
    }

    #[test]
    fn test_fish_hides_past_far_edge() {
        let mut fx = Fixture::new(17);
        let mut screen = FrameBuffer::new(20, 1);
        let mut fish = Layer::fish(runner(), 25, 0, 1, 0, CellStyle::default());
        let mut ctx = fx.ctx(20, 1);
        // 26 is the last column still considered in play (width + asset width).
        assert!(!fish.tick(&mut screen, &mut ctx));
        assert!(!fish.tick(&mut screen, &mut ctx));
        assert!(fish.tick(&mut screen, &mut ctx));
        assert!(fish.is_hidden());

        let x = fish.x();
        assert!(fish.tick(&mut screen, &mut ctx));
        assert_eq!(fish.x(), x, "hidden layers stay put");
    }

    #[test]
    fn test_left_moving_fish_hides() {
        let mut fx = Fixture::new(18);
        let mut screen = FrameBuffer::new(20, 1);
        let mut fish = Layer::fish(runner(), -6, 0, -2, 1, CellStyle::default());
        let mut ctx = fx.ctx(20, 1);
        assert!(!fish.tick(&mut screen, &mut ctx));
        assert!(fish.tick(&mut screen, &mut ctx));
    }

    #[test]
    fn test_glyph_color_mode_styles_by_class() {
        let mut fx = Fixture::new(19);
        let accent = fx.palette.accent;
        let own = CellStyle::default().with_fg(crate::types::Rgb::new(1, 1, 1));
        let mut screen = FrameBuffer::new(10, 1);
        let mut fish = Layer::fish(runner(), 0, 0, 1, 0, own);

        let mut ctx = fx.ctx(10, 1);
        ctx.glyph_colors = true;
        fish.tick(&mut screen, &mut ctx);
        // '@' sits at column 4 of ">(#)@>".
        assert_eq!(screen.get(4, 0).map(|c| c.style), Some(accent));

        let mut ctx = fx.ctx(10, 1);
        fish.tick(&mut screen, &mut ctx);
        assert_eq!(screen.get(5, 0).map(|c| c.style), Some(own));
    }

    #[test]
    fn test_spaces_are_painted_transparent() {
        let mut fx = Fixture::new(20);
        let asset = Asset::new(FISH_GROUP, &["> <"]).unwrap();
        let own = CellStyle::muted();
        let mut screen = FrameBuffer::new(5, 1);
        let mut fish = Layer::fish(asset, 0, 0, 1, 0, own);
        let mut ctx = fx.ctx(5, 1);
        fish.tick(&mut screen, &mut ctx);
        assert_eq!(screen.get(1, 0).map(|c| c.style), Some(CellStyle::default()));
        assert_eq!(screen.get(0, 0).map(|c| c.style), Some(own));
    }

    #[test]
    fn test_bubble_rises_and_erases() {
        let mut fx = Fixture::new(21);
        let mut screen = FrameBuffer::new(3, 10);
        let asset = Asset::new(BUBBLE_GROUP, &["o"]).unwrap();
        let mut bubble = Layer::bubble(asset, 1, 8, -2, CellStyle::default());
        let mut ctx = fx.ctx(3, 10);

        assert!(!bubble.tick(&mut screen, &mut ctx));
        assert_ne!(screen.get(1, 8).map(|c| c.ch), Some(' '));
        assert_eq!(bubble.y(), 6);

        bubble.tick(&mut screen, &mut ctx);
        assert_eq!(screen.get(1, 8).map(|c| c.ch), Some(' '));
        assert_ne!(screen.get(1, 6).map(|c| c.ch), Some(' '));
        assert_eq!(screen.ink(), 1);
    }

    #[test]
    fn test_bubble_hides_above_top() {
        let mut fx = Fixture::new(22);
        let mut screen = FrameBuffer::new(3, 3);
        let asset = Asset::new(BUBBLE_GROUP, &["o"]).unwrap();
        let mut bubble = Layer::bubble(asset, 1, 0, -1, CellStyle::default());
        let mut ctx = fx.ctx(3, 3);
        assert!(!bubble.tick(&mut screen, &mut ctx)); // y 0 -> -1
        assert!(!bubble.tick(&mut screen, &mut ctx)); // y -1 -> -2
        assert!(bubble.tick(&mut screen, &mut ctx));
    }

    #[test]
    fn test_spawn_bubble_rises() {
        let mut fx = Fixture::new(23);
        let mut ctx = fx.ctx(40, 20);
        let b = Layer::spawn_bubble(&mut ctx, 7, 9).unwrap();
        assert_eq!((b.x(), b.y()), (7, 9));
        assert!(b.velocity() < 0);
        assert!(BUBBLE_VELOCITIES.contains(&-b.velocity()));
        assert_eq!(b.behavior(), Behavior::Bubble);
    }

    #[test]
    fn test_leading_edge() {
        let right = Layer::fish(runner(), 20, 0, 2, 0, CellStyle::default());
        assert_eq!(right.leading_edge(), 26);
        let left = Layer::fish(runner(), 20, 0, -2, 1, CellStyle::default());
        assert_eq!(left.leading_edge(), 21);
    }

    #[test]
    fn test_display() {
        let l = Layer::fish(runner(), -3, 4, 2, 0, CellStyle::default());
        assert_eq!(l.to_string(), "x:  -3 y:   4 velo:   2 hidden:false  group:fish  ");
    }
}

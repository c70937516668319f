//! Core aquarium module - sprites, their behaviors and the swarm
//!
//! This module contains the layer simulation: what a fish or bubble is, how it
//! moves and paints itself, and how the swarm keeps its population constant.
//! It has **no dependencies** on threads, terminals or input, making it:
//!
//! - **Deterministic**: a seeded [`SpawnRng`] reproduces a whole swarm
//! - **Testable**: layers paint into any [`Screen`], including the in-memory
//!   [`FrameBuffer`]
//! - **Portable**: the terminal backend is just another `Screen`
//!
//! # Module Structure
//!
//! - [`assets`]: sprite catalog with random selection by group
//! - [`palette`]: sprite styles and glyph color classes
//! - [`layer`]: one sprite, its spawn rules and per-tick behavior
//! - [`swarm`]: stable-index slot arrays with replenishment
//! - [`screen`]: the drawing surface contract
//! - [`fb`]: in-memory framebuffer implementing [`Screen`]
//! - [`rng`]: seedable random source
//!
//! # Example
//!
//! ```
//! use nemo_core::{AssetCatalog, FrameBuffer, PaletteConfig, SpawnRng, Swarm, TickContext};
//!
//! let catalog = AssetCatalog::builtin();
//! let palette = PaletteConfig::default();
//! let mut rng = SpawnRng::seeded(7);
//! let mut screen = FrameBuffer::new(80, 24);
//! let mut ctx = TickContext {
//!     catalog: &catalog,
//!     palette: &palette,
//!     rng: &mut rng,
//!     width: 80,
//!     height: 24,
//!     glyph_colors: true,
//! };
//!
//! let mut swarm = Swarm::new();
//! swarm.seed(4, &mut ctx).unwrap();
//! for _ in 0..100 {
//!     swarm.advance_fish(&mut screen, &mut ctx).unwrap();
//!     swarm.advance_bubbles(&mut screen, &mut ctx);
//!     swarm.sweep(&mut ctx).unwrap();
//! }
//! assert_eq!(swarm.live_fish(), 4);
//! ```

pub mod assets;
pub mod fb;
pub mod layer;
pub mod palette;
pub mod rng;
pub mod screen;
pub mod swarm;

pub use nemo_types as types;

// Re-export commonly used types for convenience
pub use assets::{Asset, AssetCatalog, CatalogError, Frame};
pub use fb::{Cell, FrameBuffer};
pub use layer::{Behavior, Layer, Side, TickContext};
pub use palette::{GlyphClass, PaletteConfig};
pub use rng::SpawnRng;
pub use screen::Screen;
pub use swarm::Swarm;

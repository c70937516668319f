//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the aquarium.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (layer simulation, terminal rendering, input mapping).
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 120 | Render tick interval |
//! | `DEFAULT_SWARM_SIZE` | 12 | Fish slots seeded per run |
//!
//! # Spawn Geometry
//!
//! Fish enter from outside the visible area. The spawn band on each side is
//! `SPAWN_MARGIN_FACTOR` asset widths deep, so entries are staggered instead of
//! arriving all at once.
//!
//! - `FISH_VELOCITIES`: columns per tick, negated for fish entering from the right
//! - `BUBBLE_VELOCITIES`: rows per tick, always negated (bubbles rise)
//! - `WAKE_DIVISOR`: a wake bubble fires when a fish's leading edge is a
//!   multiple of `width / WAKE_DIVISOR`
//!
//! # Examples
//!
//! ```
//! use nemo_types::{CellStyle, Control, Rgb, DEFAULT_TICK_MS};
//!
//! let style = CellStyle::default().with_fg(Rgb::new(173, 216, 230)).bold();
//! assert!(style.bold);
//! assert_eq!(style.fg, Some(Rgb::new(173, 216, 230)));
//!
//! let resize = Control::Resize { width: 80, height: 24 };
//! assert_eq!(resize.as_str(), "resize");
//! assert_eq!(DEFAULT_TICK_MS, 120);
//! ```

/// Render tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 120;

/// Number of fish slots seeded per run
pub const DEFAULT_SWARM_SIZE: usize = 12;

/// Depth of the off-screen spawn band, in asset widths
pub const SPAWN_MARGIN_FACTOR: i32 = 8;

/// Fish speeds in columns per tick
pub const FISH_VELOCITIES: [i32; 3] = [2, 1, 3];

/// Bubble speeds in rows per tick (applied negated)
pub const BUBBLE_VELOCITIES: [i32; 4] = [3, 2, 4, 5];

/// Wake bubbles fire on multiples of `width / WAKE_DIVISOR`
pub const WAKE_DIVISOR: i32 = 4;

/// Asset group holding fish sprites
pub const FISH_GROUP: &str = "fish";

/// Asset group holding bubble glyphs
pub const BUBBLE_GROUP: &str = "bubble";

/// Frame index of right-facing fish (used for left spawns)
pub const FRAME_RIGHT_FACING: usize = 0;

/// Frame index of left-facing fish (used for right spawns)
pub const FRAME_LEFT_FACING: usize = 1;


/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
///
/// `None` colors fall through to the terminal default, which is what keeps
/// blank sprite cells transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    /// Dim + bold with the default foreground; the base look of every sprite.
    pub const fn muted() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: true,
            dim: true,
        }
    }

    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// State-changing requests delivered to the renderer control loop.
///
/// Produced by the event-polling path (keys, resizes) and consumed
/// exclusively by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start when stopped, stop when running
    Toggle,
    /// Stop, reseed, start
    Restart,
    /// Terminal geometry changed (no-op when equal to the current size)
    Resize { width: u16, height: u16 },
}

impl Control {
    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use nemo_types::Control;
    ///
    /// assert_eq!(Control::Toggle.as_str(), "toggle");
    /// assert_eq!(Control::Restart.as_str(), "restart");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Toggle => "toggle",
            Control::Restart => "restart",
            Control::Resize { .. } => "resize",
        }
    }
}

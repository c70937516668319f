//! Terminal output for the aquarium.
//!
//! Sprites are painted into a [`FrameBuffer`](crate::core::FrameBuffer) back
//! buffer and flushed with crossterm, writing only the cells that changed
//! since the previous frame. No widget or layout layer sits in between.

pub mod renderer;
pub mod screen;

pub use nemo_core as core;
pub use nemo_types as types;

pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::TerminalScreen;

//! Terminal input for the aquarium.
//!
//! Maps `crossterm` events into [`crate::types::Control`] requests and
//! recognizes quit keys. Nothing here touches renderer state.

pub mod map;

pub use nemo_types as types;

pub use map::{handle_key_event, map_event, should_quit};

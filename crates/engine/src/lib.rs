//! Render scheduling for the aquarium.
//!
//! The engine owns everything that happens over time:
//! - [`Scheduler`]: the Stopped/Running state machine and the `nemo-render` thread
//! - [`Compositor`]: what one tick paints
//! - [`ControlLoop`]: applies toggle/restart/resize requests off the event path
//!
//! The scheduler is generic over [`core::Screen`], so the whole machine runs
//! headless against a [`core::FrameBuffer`] in tests.

pub mod compositor;
pub mod config;
pub mod control;
pub mod scheduler;
pub mod state;

pub use nemo_core as core;
pub use nemo_types as types;

pub use compositor::Compositor;
pub use config::RendererConfig;
pub use control::{ControlHandle, ControlLoop};
pub use scheduler::Scheduler;
pub use state::RenderState;

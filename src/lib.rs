//! nemo: an ASCII aquarium for the terminal (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `nemo::{core,engine,input,term,types}` and carries the
//! binary's CLI and logging setup.

pub mod cli;
pub mod logging;

pub use nemo_core as core;
pub use nemo_engine as engine;
pub use nemo_input as input;
pub use nemo_term as term;
pub use nemo_types as types;

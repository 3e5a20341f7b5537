//! The run module loads a single program, applies memory patches and queued input, and runs it
//! until it halts, faults or starves for input.

/// Error types for the run module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{run, RunResult};
pub use error::Error;
pub use interfaces::{RunArgs, RunArgsBuilder};

//! The chain module connects copies of one program into a pipeline: every stage is configured
//! with a phase setting, and each stage's output becomes the next stage's input.

/// Error types for the chain module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{
    chain,
    pipeline::{best_phases, run_chain},
    ChainResult,
};
pub use error::Error;
pub use interfaces::{ChainArgs, ChainArgsBuilder};

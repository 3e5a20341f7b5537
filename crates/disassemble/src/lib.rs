//! The Disassembler module converts a program's memory image into human-readable assembly.
//!
//! Cells are decoded with the same instruction decoder the VM executes with, so the listing
//! shows exactly what the VM would run if control reached each address.

/// Error types for the disassembler module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{disassemble, disassemble_memory};
pub use error::Error;
pub use interfaces::{DisassemblerArgs, DisassemblerArgsBuilder};

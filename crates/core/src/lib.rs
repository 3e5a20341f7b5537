//! The Core module serves as the central integration point for all of tapenet's
//! functionality: the VM itself and the tools built on top of it.
//!
//! This module re-exports the public interfaces of all the tool-specific crates,
//! making it easier to use tapenet's capabilities in other projects.

// Re-export all tool-specific modules
pub use tapenet_chain;
pub use tapenet_disassembler;
pub use tapenet_network;
pub use tapenet_run;
pub use tapenet_vm;

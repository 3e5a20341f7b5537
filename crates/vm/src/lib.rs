//! Tapenet Virtual Machine implementation
//!
//! This crate provides the tape-memory virtual machine used by every tapenet tool, including the
//! core VM components and extension modules for driving programs that speak ASCII.

/// Core VM implementation, including memory, opcodes, program loading and execution
pub mod core;

/// Extensions to the core VM, such as ASCII input/output helpers
pub mod ext;

/// Error types for the VM
pub mod error;

pub use error::Error;

/// Constants used throughout the VM implementation
pub mod constants;

/// Memory implementation for the VM tape, including program loading
pub mod memory;

/// Opcode definitions and implementations
pub mod opcodes;

/// Core virtual machine implementation
pub mod vm;

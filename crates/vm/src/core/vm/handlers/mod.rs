//! Opcode handlers organized by category.
//!
//! Each submodule contains handler functions for related opcodes. Handlers receive the decoded
//! instruction and never move the program counter themselves: branching handlers return the
//! jump target instead.

/// Arithmetic operations: ADD, MUL
pub mod arithmetic;

/// Comparison operations: LT, EQ
pub mod comparison;

/// Control flow: JNZ, JZ, ARB, HALT
pub mod control;

/// Input/output operations: IN, OUT
pub mod io;

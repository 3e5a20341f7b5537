//! Common utilities, constants, and resources used across the tapenet codebase.
//!
//! This crate provides shared functionality for the tapenet toolkit, including
//! program target resolution, default network parameters, and general utility functions.

/// Constants used throughout the tapenet codebase.
pub mod constants;

/// Error type for the common crate.
pub mod error;

/// Resolution of program targets (files or inline program text).
pub mod program;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;

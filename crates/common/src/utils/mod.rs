/// Input/output utilities for file manipulation.
pub mod io;

/// String parsing and formatting utilities.
pub mod strings;

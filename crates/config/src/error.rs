//! Error types for the configuration module

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic error with a message
    #[error("Error: {0}")]
    Generic(String),

    /// The key does not name a configuration value
    #[error("invalid key: '{0}' is not a valid configuration key")]
    UnknownKey(String),

    /// A value or the configuration file could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
}

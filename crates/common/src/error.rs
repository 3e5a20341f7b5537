/// Error type for the common crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reading a program file
    #[error("Filesystem error: {0}")]
    FilesystemError(#[from] std::io::Error),
    /// Malformed program text or argument
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Generic error
    #[error("Error: {0}")]
    Eyre(#[from] eyre::Report),
}

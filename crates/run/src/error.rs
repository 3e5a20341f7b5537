/// Error type for the run module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fatal VM error while loading or running the program
    #[error("VM error: {0}")]
    Vm(#[from] tapenet_vm::Error),
    /// Malformed input values or memory patches
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] tapenet_common::Error),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

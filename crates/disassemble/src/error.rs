/// Error type for the Disassembler module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target is not a valid program
    #[error("VM error: {0}")]
    Vm(#[from] tapenet_vm::Error),
    /// Generic internal error that may occur during disassembly
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

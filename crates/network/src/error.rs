/// Error type for the network module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be loaded into a VM
    #[error("VM error: {0}")]
    Vm(#[from] tapenet_vm::Error),
    /// The instance that receives re-injected packets can no longer run, so the network can
    /// never make progress again
    #[error("instance {id} faulted: {reason}")]
    CarrierFaulted {
        /// The faulted instance
        id: usize,
        /// What happened to it
        reason: String,
    },
    /// Every instance was excluded before the network terminated
    #[error("every instance has been excluded, the network can not terminate")]
    Stalled,
    /// The pool can not hold a single instance
    #[error("invalid pool size: {0}")]
    InvalidPoolSize(usize),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

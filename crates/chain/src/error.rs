/// Error type for the chain module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be loaded into a VM
    #[error("VM error: {0}")]
    Vm(#[from] tapenet_vm::Error),
    /// A stage hit an unknown opcode or a fatal VM error
    #[error("stage {stage} faulted: {reason}")]
    StageFaulted {
        /// Index of the stage in the chain
        stage: usize,
        /// What went wrong
        reason: String,
    },
    /// A stage asked for more input before producing any output
    #[error("stage {stage} is waiting for input that will never arrive")]
    Starved {
        /// Index of the stage in the chain
        stage: usize,
    },
    /// A stage halted before producing any output
    #[error("stage {stage} halted without producing a signal")]
    NoSignal {
        /// Index of the stage in the chain
        stage: usize,
    },
    /// The phase settings are unusable
    #[error("invalid phases: {0}")]
    InvalidPhases(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

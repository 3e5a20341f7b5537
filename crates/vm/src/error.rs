/// Fatal VM errors.
///
/// Running out of input is not an error: it is reported as
/// [`Status::NeedsInput`](crate::core::vm::Status::NeedsInput). Unknown opcodes are terminal
/// statuses as well, see [`Status::UnknownOpcode`](crate::core::vm::Status::UnknownOpcode).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operand or jump target resolved to a negative memory address.
    #[error("effective address {address} out of range (pc {pc})")]
    AddressOutOfRange {
        /// The offending effective address
        address: i64,
        /// Address of the instruction being executed
        pc: usize,
    },

    /// Adding an offset to the relative base overflowed `i64`.
    #[error("relative address overflow: base {base} + offset {offset} (pc {pc})")]
    AddressOverflow {
        /// The relative base before the addition
        base: i64,
        /// The offset that was added to it
        offset: i64,
        /// Address of the instruction being executed
        pc: usize,
    },

    /// A mode digit other than positional, immediate or relative.
    #[error("invalid addressing mode {mode} (pc {pc})")]
    InvalidMode {
        /// The offending mode digit
        mode: i64,
        /// Address of the instruction being executed
        pc: usize,
    },

    /// A write operand was encoded in immediate mode.
    #[error("immediate mode used for a write operand (pc {pc})")]
    ImmediateWrite {
        /// Address of the instruction being executed
        pc: usize,
    },

    /// The program text could not be parsed into a memory image.
    #[error("Parse error: {0}")]
    ParseError(String),
}

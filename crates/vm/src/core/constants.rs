/// Addresses below this limit live in the dense, contiguous part of [`Memory`](super::memory::Memory).
/// Writes at or above it go to the sparse overflow map instead of growing the vector.
pub const DENSE_MEMORY_LIMIT: usize = 1 << 20;

/// Initial capacity reserved for the dense part of a fresh memory.
pub const INITIAL_MEMORY_CAPACITY: usize = 4096;

/// Instructions encode their opcode in the two lowest decimal digits.
pub const OPCODE_RADIX: i64 = 100;

/// Each addressing mode occupies one decimal digit above the opcode.
pub const MODE_RADIX: i64 = 10;

use std::{fmt, str::FromStr};

use hashbrown::HashMap;

use crate::error::Error;

use super::constants::{DENSE_MEMORY_LIMIT, INITIAL_MEMORY_CAPACITY};

/// The [`Memory`] struct represents the tape of a VM: a mapping from non-negative addresses to
/// signed cells, unbounded above, where every address that has never been written reads as zero.
///
/// Low addresses are stored contiguously and grown lazily on write. Writes far beyond the
/// contiguous region are kept in a sparse map, so a single store to a huge address does not
/// allocate everything below it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    /// Contiguous cells starting at address 0
    cells: Vec<i64>,

    /// Cells at or above [`DENSE_MEMORY_LIMIT`]
    sparse: HashMap<usize, i64>,

    /// One past the highest address written
    len: usize,
}

impl Memory {
    /// Creates a new, empty [`Memory`]
    pub fn new() -> Memory {
        Memory {
            cells: Vec::with_capacity(INITIAL_MEMORY_CAPACITY),
            sparse: HashMap::new(),
            len: 0,
        }
    }

    /// Creates a [`Memory`] whose first cells are `values`, starting at address 0.
    ///
    /// ```
    /// use tapenet_vm::core::memory::Memory;
    ///
    /// let memory = Memory::from_values(&[1, 0, 0, 0, 99]);
    /// assert_eq!(memory.read(4), 99);
    /// assert_eq!(memory.read(5), 0);
    /// ```
    pub fn from_values(values: &[i64]) -> Memory {
        let mut memory = Memory::new();
        for (address, value) in values.iter().enumerate() {
            memory.write(address, *value);
        }
        memory
    }

    /// One past the highest address ever written.
    ///
    /// ```
    /// use tapenet_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// assert_eq!(memory.size(), 0);
    /// memory.write(9, 1);
    /// assert_eq!(memory.size(), 10);
    /// ```
    pub fn size(&self) -> usize {
        self.len
    }

    /// Reads the cell at `address`. Never-written cells read as zero and are not allocated.
    pub fn read(&self, address: usize) -> i64 {
        if address < DENSE_MEMORY_LIMIT {
            self.cells.get(address).copied().unwrap_or(0)
        } else {
            self.sparse.get(&address).copied().unwrap_or(0)
        }
    }

    /// Writes `value` to the cell at `address`, extending the tape if necessary.
    ///
    /// ```
    /// use tapenet_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.write(1 << 40, 7);
    /// assert_eq!(memory.read(1 << 40), 7);
    /// assert_eq!(memory.size(), (1 << 40) + 1);
    /// ```
    pub fn write(&mut self, address: usize, value: i64) {
        self.len = self.len.max(address.saturating_add(1));
        if address >= DENSE_MEMORY_LIMIT {
            self.sparse.insert(address, value);
            return;
        }

        if address >= self.cells.len() {
            self.cells.resize(address + 1, 0);
        }
        self.cells[address] = value;
    }

    /// Returns the cells in `start..end`, zero-filled where nothing was written.
    pub fn dump(&self, start: usize, end: usize) -> Vec<i64> {
        (start..end).map(|address| self.read(address)).collect()
    }

    /// Returns every cell from address 0 up to [`Memory::size`].
    pub fn to_vec(&self) -> Vec<i64> {
        self.dump(0, self.size())
    }
}

/// Parses a program: comma separated signed integers, one per address starting at 0.
///
/// A single trailing line break is accepted, since program files end with one. Anything else
/// that is not a signed integer between two commas is rejected.
///
/// ```
/// use tapenet_vm::core::memory::parse_program;
///
/// let memory = parse_program("1,0,0,0,99\n").expect("valid program");
/// assert_eq!(memory.to_vec(), vec![1, 0, 0, 0, 99]);
/// assert!(parse_program("1, 0").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Memory, Error> {
    let source = source
        .strip_suffix("\r\n")
        .or_else(|| source.strip_suffix('\n'))
        .unwrap_or(source);

    if source.is_empty() {
        return Err(Error::ParseError("program is empty".to_string()));
    }

    let mut memory = Memory::new();
    for (address, token) in source.split(',').enumerate() {
        let value = token.parse::<i64>().map_err(|e| {
            Error::ParseError(format!("invalid value '{token}' at address {address}: {e}"))
        })?;
        memory.write(address, value);
    }

    Ok(memory)
}

impl FromStr for Memory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_program(s)
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.to_vec().iter().map(|cell| cell.to_string()).collect::<Vec<_>>();
        write!(f, "{}", cells.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unwritten_is_zero() {
        let memory = Memory::new();
        assert_eq!(memory.read(0), 0);
        assert_eq!(memory.read(12345), 0);
        assert_eq!(memory.size(), 0);
    }

    #[test]
    fn test_write_extends_dense() {
        let mut memory = Memory::new();
        memory.write(3, 42);
        assert_eq!(memory.cells, vec![0, 0, 0, 42]);
        assert_eq!(memory.size(), 4);
    }

    #[test]
    fn test_write_far_address_is_sparse() {
        let mut memory = Memory::from_values(&[1, 2, 3]);
        memory.write(DENSE_MEMORY_LIMIT + 5, -9);
        assert_eq!(memory.cells.len(), 3);
        assert_eq!(memory.read(DENSE_MEMORY_LIMIT + 5), -9);
        assert_eq!(memory.size(), DENSE_MEMORY_LIMIT + 6);
    }

    #[test]
    fn test_size_tracks_highest_write() {
        let mut memory = Memory::new();
        memory.write(DENSE_MEMORY_LIMIT * 4, 1);
        memory.write(DENSE_MEMORY_LIMIT + 1, 2);
        memory.write(7, 3);
        assert_eq!(memory.size(), DENSE_MEMORY_LIMIT * 4 + 1);

        // clones track their own size
        let mut copy = memory.clone();
        copy.write(DENSE_MEMORY_LIMIT * 8, 4);
        assert_eq!(memory.size(), DENSE_MEMORY_LIMIT * 4 + 1);
        assert_eq!(copy.size(), DENSE_MEMORY_LIMIT * 8 + 1);
    }

    #[test]
    fn test_dump_zero_fills() {
        let memory = Memory::from_values(&[5, 6]);
        assert_eq!(memory.dump(1, 4), vec![6, 0, 0]);
    }

    #[test]
    fn test_parse_program_negative_values() {
        let memory = parse_program("109,-1,204,1,99").expect("failed to parse program");
        assert_eq!(memory.to_vec(), vec![109, -1, 204, 1, 99]);
    }

    #[test]
    fn test_parse_program_crlf() {
        let memory = parse_program("3,0,4,0,99\r\n").expect("failed to parse program");
        assert_eq!(memory.size(), 5);
    }

    #[test]
    fn test_parse_program_rejects_whitespace() {
        assert!(parse_program("1,0 ,0").is_err());
        assert!(parse_program(" 1,0").is_err());
        assert!(parse_program("1,0,0\n\n").is_err());
    }

    #[test]
    fn test_parse_program_rejects_empty_tokens() {
        assert!(parse_program("").is_err());
        assert!(parse_program("1,,2").is_err());
        assert!(parse_program("1,2,").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let source = "1002,4,3,4,33";
        let memory: Memory = source.parse().expect("failed to parse program");
        assert_eq!(memory.to_string(), source);
    }
}

use std::fmt;

use crate::error::Error;

use super::super::{
    constants::{MODE_RADIX, OPCODE_RADIX},
    memory::Memory,
    opcodes::OpCodeInfo,
};

/// [`Status`] is what the VM reports after every [`VM::step`](super::VM::step).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The instruction executed; the VM can keep going.
    Continue,

    /// A HALT instruction was reached. Terminal.
    Halted,

    /// The next instruction is an input instruction and the input queue is empty. Nothing was
    /// mutated; push a value and step again to resume.
    NeedsInput,

    /// The cell at the program counter does not hold a known opcode. Carries the raw cell value.
    /// Terminal.
    UnknownOpcode(i64),
}

impl Status {
    /// Whether the VM can never make progress again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Halted | Status::UnknownOpcode(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Continue => write!(f, "continuing"),
            Status::Halted => write!(f, "halted"),
            Status::NeedsInput => write!(f, "blocked on input"),
            Status::UnknownOpcode(cell) => write!(f, "unknown opcode {cell}"),
        }
    }
}

/// How an operand is turned into an effective value or address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The operand is an address.
    Position,
    /// The operand is the value itself. Illegal for write operands.
    Immediate,
    /// The operand is an offset from the relative base.
    Relative,
}

impl Mode {
    /// Converts one decimal mode digit into a [`Mode`].
    pub fn from_digit(digit: i64, pc: usize) -> Result<Mode, Error> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            mode => Err(Error::InvalidMode { mode, pc }),
        }
    }

    /// Renders `operand` in assembly syntax: `[n]`, `n`, `[rb+n]` or `[rb-n]`.
    ///
    /// ```
    /// use tapenet_vm::core::vm::Mode;
    ///
    /// assert_eq!(Mode::Position.render(7), "[7]");
    /// assert_eq!(Mode::Relative.render(-2), "[rb-2]");
    /// ```
    pub fn render(&self, operand: i64) -> String {
        match self {
            Mode::Position => format!("[{operand}]"),
            Mode::Immediate => operand.to_string(),
            Mode::Relative if operand < 0 => format!("[rb-{}]", operand.unsigned_abs()),
            Mode::Relative => format!("[rb+{operand}]"),
        }
    }
}

/// [`Instruction`] is a single decoded instruction: the opcode, one addressing mode per operand
/// and the raw operand cells that follow the opcode cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The address of the opcode cell.
    pub address: usize,

    /// The opcode, with the mode digits stripped.
    pub opcode: u8,

    /// Static information about the opcode.
    pub info: OpCodeInfo,

    /// One addressing mode per operand, first operand first.
    pub modes: Vec<Mode>,

    /// The raw operand cells, first operand first.
    pub operands: Vec<i64>,
}

impl Instruction {
    /// Decodes the instruction stored at `address`.
    ///
    /// Returns `Ok(None)` when the cell does not hold a known opcode, and an error when a mode
    /// digit is not a valid addressing mode.
    ///
    /// ```
    /// use tapenet_vm::core::{memory::Memory, opcodes, vm::{Instruction, Mode}};
    ///
    /// let memory = Memory::from_values(&[1002, 4, 3, 4, 33]);
    /// let instruction = Instruction::decode(&memory, 0).expect("valid modes").expect("known opcode");
    /// assert_eq!(instruction.opcode, opcodes::MUL);
    /// assert_eq!(instruction.modes, vec![Mode::Position, Mode::Immediate, Mode::Position]);
    /// assert_eq!(instruction.operands, vec![4, 3, 4]);
    /// ```
    pub fn decode(memory: &Memory, address: usize) -> Result<Option<Instruction>, Error> {
        let cell = memory.read(address);
        if cell < 0 {
            return Ok(None);
        }

        let opcode = cell % OPCODE_RADIX;
        let info = match OpCodeInfo::lookup(opcode) {
            Some(info) => info,
            None => return Ok(None),
        };

        let mut digits = cell / OPCODE_RADIX;
        let mut modes = Vec::with_capacity(info.operands() as usize);
        let mut operands = Vec::with_capacity(info.operands() as usize);
        for index in 0..info.operands() as usize {
            modes.push(Mode::from_digit(digits % MODE_RADIX, address)?);
            operands.push(memory.read(address + 1 + index));
            digits /= MODE_RADIX;
        }

        Ok(Some(Instruction { address, opcode: opcode as u8, info, modes, operands }))
    }

    /// How many cells the instruction occupies.
    pub fn length(&self) -> usize {
        self.info.length()
    }

    /// The address of the instruction that follows this one in memory.
    pub fn next_address(&self) -> usize {
        self.address + self.length()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info.name())?;
        for (mode, operand) in self.modes.iter().zip(&self.operands) {
            write!(f, " {}", mode.render(*operand))?;
        }
        Ok(())
    }
}

/// [`ExecutionResult`] is the result of running a program until it can no longer continue on its
/// own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Why execution stopped.
    pub status: Status,

    /// Every value the program emitted that had not been consumed yet.
    pub output: Vec<i64>,

    /// Total number of instructions executed by the VM so far.
    pub instructions_executed: u64,

    /// The program counter after execution stopped.
    pub pc: usize,
}
